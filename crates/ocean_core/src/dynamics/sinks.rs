use crate::config::RegenerationConfig;
use crate::grid::GridSystem;
use ocean_data::GridChannel;

/// Fe2+ consumed per unit of O2 removed.
const FE2_PER_O2: f64 = 4.0;

/// Abiotic iron oxidation: dissolved ferrous iron scavenges free oxygen.
///
/// Only cells holding both more than `oxidation_o2_threshold` oxygen and
/// more than `fe2_depletion_threshold` iron react.
pub fn apply_iron_oxidation(grids: &mut GridSystem, regen: &RegenerationConfig) {
    let o2_loss = regen.fe2_oxidation_rate;
    let fe2_loss = o2_loss * FE2_PER_O2;
    for col in 0..grids.cols {
        for row in 0..grids.rows {
            let o2 = grids.get_cell(GridChannel::Oxygen, col, row);
            let fe2 = grids.get_cell(GridChannel::Fe2, col, row);
            if o2 > regen.oxidation_o2_threshold && fe2 > regen.fe2_depletion_threshold {
                grids.set_cell(GridChannel::Oxygen, col, row, (o2 - o2_loss).max(0.0));
                grids.set_cell(GridChannel::Fe2, col, row, (fe2 - fe2_loss).max(0.0));
            }
        }
    }
}
