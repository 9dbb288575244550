//! Infinite reservoirs pulling the grid boundary toward fixed concentrations.
//!
//! The atmosphere exchanges with the first atmosphere row, the open ocean
//! with the two edge columns of the water band. Each exchange moves a
//! fraction of the gradient per tick; the resulting value never drops below 0.

use crate::config::ReservoirConfig;
use crate::grid::GridSystem;
use crate::stratification::Stratification;
use ocean_data::GridChannel;

fn relax_toward(
    grids: &mut GridSystem,
    channel: GridChannel,
    col: usize,
    row: usize,
    target: f64,
    rate: f64,
) {
    let current = grids.get_cell(channel, col, row);
    let flux = rate * (target - current);
    grids.set_cell(channel, col, row, (current + flux).max(0.0));
}

pub fn apply(grids: &mut GridSystem, strat: &Stratification, config: &ReservoirConfig) {
    apply_atmosphere(grids, strat, config);
    apply_ocean(grids, strat, config);
}

fn apply_atmosphere(grids: &mut GridSystem, strat: &Stratification, config: &ReservoirConfig) {
    let Ok(row) = usize::try_from(strat.atmosphere_row) else {
        return;
    };
    if row >= grids.rows {
        return;
    }
    let exchanges = [
        (GridChannel::Oxygen, config.atmospheric_o2, config.atmosphere_o2_rate),
        (GridChannel::Nitrogen, config.atmospheric_n2, config.atmosphere_n2_rate),
        (GridChannel::Co2, config.atmospheric_co2, config.atmosphere_co2_rate),
    ];
    for col in 0..grids.cols {
        for (channel, target, rate) in exchanges {
            relax_toward(grids, channel, col, row, target, rate);
        }
    }
}

fn apply_ocean(grids: &mut GridSystem, strat: &Stratification, config: &ReservoirConfig) {
    if strat.water_end_col == 0 {
        return;
    }
    let exchanges = [
        (
            GridChannel::Phosphorus,
            config.oceanic_phosphorus,
            config.ocean_phosphorus_rate,
        ),
        (GridChannel::Nitrogen, config.oceanic_nitrogen, config.ocean_nitrogen_rate),
        (GridChannel::Fe2, config.oceanic_fe2, config.ocean_fe2_rate),
        (GridChannel::Oxygen, config.oceanic_o2, config.ocean_o2_rate),
    ];
    let mut edges = vec![strat.water_start_col];
    if strat.water_end_col - 1 != strat.water_start_col {
        edges.push(strat.water_end_col - 1);
    }
    for col in edges {
        for row in strat.water_rows() {
            for (channel, target, rate) in exchanges {
                relax_toward(grids, channel, col, row, target, rate);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{AppConfig, WorldConfig};

    fn strat(cols: usize, rows: usize) -> Stratification {
        Stratification::new(&AppConfig {
            world: WorldConfig {
                cols,
                rows,
                ..Default::default()
            },
            ..Default::default()
        })
    }

    #[test]
    fn test_atmosphere_row_relaxes_toward_reservoir() {
        let strat = strat(4, 20);
        let mut grids = GridSystem::new(4, 20);
        apply(&mut grids, &strat, &ReservoirConfig::default());
        let row = strat.atmosphere_row as usize;
        assert!((grids.get_cell(GridChannel::Co2, 2, row) - 40.0).abs() < 1e-9);
        assert!((grids.get_cell(GridChannel::Nitrogen, 2, row) - 30.0).abs() < 1e-9);
        assert_eq!(grids.get_cell(GridChannel::Co2, 2, row + 1), 0.0);
    }

    #[test]
    fn test_ocean_edges_exchange_and_interior_untouched() {
        let strat = strat(5, 20);
        let mut grids = GridSystem::new(5, 20);
        grids.set_cell(GridChannel::Oxygen, 4, 8, 105.0);
        apply(&mut grids, &strat, &ReservoirConfig::default());
        assert!((grids.get_cell(GridChannel::Fe2, 0, 8) - 3.0).abs() < 1e-9);
        assert!((grids.get_cell(GridChannel::Oxygen, 4, 8) - 101.0).abs() < 1e-9);
        assert_eq!(grids.get_cell(GridChannel::Fe2, 2, 8), 0.0);
    }

    #[test]
    fn test_restricted_world_has_no_atmosphere_exchange() {
        let mut config = AppConfig::default();
        config.world.cols = 20;
        config.world.rows = 20;
        config.world.restrict_to_vents = true;
        let strat = Stratification::new(&config);
        let mut grids = GridSystem::new(20, 20);
        apply(&mut grids, &strat, &ReservoirConfig::default());
        assert_eq!(grids.get_cell(GridChannel::Co2, 10, 0), 0.0);
        assert!(grids.get_cell(GridChannel::Fe2, strat.water_start_col, 0) > 0.0);
    }
}
