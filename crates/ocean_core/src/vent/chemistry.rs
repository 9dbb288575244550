//! Vent flux and mixing reactions between overlapping vents.

use super::types::VentType;
use crate::grid::GridSystem;
use ocean_data::{Chemical, GridChannel};

const PRECIPITATION_RETAIN: f64 = 0.95;
const IRON_SULFIDE_RETAIN: f64 = 0.9;
const METHANE_O2_THRESHOLD: f64 = 10.0;
const METHANE_OXIDATION_RATE: f64 = 0.1;
const METHANE_CO2_PER_O2: f64 = 5.0;

/// Inputs to one chemical's flux computation.
#[derive(Debug, Clone, Copy)]
pub struct FluxFactors {
    pub base_flux: f64,
    pub intensity: f64,
    pub global_multiplier: f64,
    pub env_multiplier: f64,
    pub lifecycle_multiplier: f64,
}

/// `base × ratio × intensity × global × env × lifecycle`.
#[must_use]
pub fn chemical_flux(ty: &VentType, chemical: Chemical, f: FluxFactors) -> f64 {
    f.base_flux
        * ty.ratios.get(chemical)
        * f.intensity
        * f.global_multiplier
        * f.env_multiplier
        * f.lifecycle_multiplier
}

/// Adds `amount` and clamps to `max`.
pub fn inject_clamped(
    grids: &mut GridSystem,
    channel: GridChannel,
    col: usize,
    row: usize,
    amount: f64,
    max: f64,
) {
    let current = grids.get_cell(channel, col, row);
    grids.set_cell(channel, col, row, (current + amount).min(max));
}

/// Applies the qualitative mixing rules for two vents sharing `cells`.
pub fn apply_mixing_reactions(
    a: &VentType,
    b: &VentType,
    cells: &[(usize, usize)],
    grids: &mut GridSystem,
) {
    let opposite_ph = (a.is_alkaline() && b.is_acidic()) || (b.is_alkaline() && a.is_acidic());
    if opposite_ph {
        scale_fe2(cells, grids, PRECIPITATION_RETAIN);
    }

    let sulfide_iron = (a.emits(Chemical::H2s) && b.emits(Chemical::Fe2))
        || (b.emits(Chemical::H2s) && a.emits(Chemical::Fe2));
    if sulfide_iron {
        scale_fe2(cells, grids, IRON_SULFIDE_RETAIN);
    }

    if a.emits(Chemical::Ch4) || b.emits(Chemical::Ch4) {
        for &(col, row) in cells {
            let o2 = grids.get_cell(GridChannel::Oxygen, col, row);
            if o2 > METHANE_O2_THRESHOLD {
                let consumed = o2 * METHANE_OXIDATION_RATE;
                grids.set_cell(GridChannel::Oxygen, col, row, o2 - consumed);
                grids.add_cell(GridChannel::Co2, col, row, consumed * METHANE_CO2_PER_O2);
            }
        }
    }
}

fn scale_fe2(cells: &[(usize, usize)], grids: &mut GridSystem, factor: f64) {
    for &(col, row) in cells {
        let fe2 = grids.get_cell(GridChannel::Fe2, col, row);
        grids.set_cell(GridChannel::Fe2, col, row, fe2 * factor);
    }
}
