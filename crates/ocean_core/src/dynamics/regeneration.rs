//! Global regeneration of light, oxygen and sediment nutrients, plus the
//! laboratory baseline used by single-vent runs.

use crate::config::{AppConfig, FluxMultipliers, RegenerationConfig};
use crate::grid::GridSystem;
use crate::stratification::Stratification;
use ocean_data::GridChannel;

const OXYGEN_EXTRA_PER_MULT: f64 = 0.05;
const OXYGEN_EXTRA_CAP: f64 = 100.0;

pub fn regenerate(grids: &mut GridSystem, strat: &Stratification, config: &AppConfig) {
    let regen = &config.regeneration;
    let flux = &config.flux;
    regenerate_light(grids, strat, regen, flux.light);
    regenerate_oxygen(grids, strat, regen, flux.oxygen);
    regenerate_sediment(grids, strat, regen, flux);
}

/// Columns touched by column-wide regeneration.
fn regen_cols(strat: &Stratification) -> std::ops::Range<usize> {
    if strat.restricted {
        strat.water_cols()
    } else {
        0..strat.cols
    }
}

fn regenerate_light(
    grids: &mut GridSystem,
    strat: &Stratification,
    regen: &RegenerationConfig,
    mult: f64,
) {
    let rows = grids.rows;
    for col in regen_cols(strat) {
        for row in 0..rows {
            let depth = row as f64 / rows as f64;
            let max_light = regen.light_max * mult * (-4.0 * depth).exp();
            let current = grids.get_cell(GridChannel::Light, col, row);
            if current < max_light {
                grids.set_cell(
                    GridChannel::Light,
                    col,
                    row,
                    current + regen.light_step * mult,
                );
            }
        }
    }
}

/// UV photolysis in the upper half of the water, then the scenario's oxygen bias.
fn regenerate_oxygen(
    grids: &mut GridSystem,
    strat: &Stratification,
    regen: &RegenerationConfig,
    mult: f64,
) {
    let photic_limit = strat.sediment_row as f64 / 2.0;
    for col in 0..grids.cols {
        for row in (0..grids.rows).take_while(|&r| (r as f64) < photic_limit) {
            let uv = grids.get_cell(GridChannel::Uv, col, row);
            let current = grids.get_cell(GridChannel::Oxygen, col, row);
            let room = (regen.oxygen_grid_max - current).max(0.0);
            let produced = (uv / 100.0 * regen.photolysis_rate).min(room);
            if produced > 0.0 {
                grids.set_cell(GridChannel::Oxygen, col, row, current + produced);
            }
        }
    }

    if mult != 1.0 {
        let extra = OXYGEN_EXTRA_PER_MULT * (mult - 1.0);
        for col in regen_cols(strat) {
            for row in 0..grids.rows {
                let current = grids.get_cell(GridChannel::Oxygen, col, row);
                grids.set_cell(
                    GridChannel::Oxygen,
                    col,
                    row,
                    (current + extra).clamp(0.0, OXYGEN_EXTRA_CAP),
                );
            }
        }
    }
}

/// Sediment rows leak nitrogen, phosphorus and hydrogen upward.
fn regenerate_sediment(
    grids: &mut GridSystem,
    strat: &Stratification,
    regen: &RegenerationConfig,
    flux: &FluxMultipliers,
) {
    fn add_capped(
        grids: &mut GridSystem,
        channel: GridChannel,
        col: usize,
        row: usize,
        amount: f64,
        cap: f64,
    ) {
        let current = grids.get_cell(channel, col, row);
        grids.set_cell(channel, col, row, (current + amount).min(cap));
    }

    for col in 0..grids.cols {
        for row in (0..grids.rows).filter(|&r| strat.is_in_sediment(r)) {
            add_capped(
                grids,
                GridChannel::Nitrogen,
                col,
                row,
                regen.nitrogen_flux * flux.nitrogen,
                regen.nitrogen_max,
            );
            let mut phosphorus = regen.phosphorus_flux;
            if flux.phosphorus != 1.0 {
                phosphorus += regen.phosphorus_flux * (flux.phosphorus - 1.0);
            }
            add_capped(
                grids,
                GridChannel::Phosphorus,
                col,
                row,
                phosphorus,
                regen.phosphorus_max,
            );
            add_capped(
                grids,
                GridChannel::H2,
                col,
                row,
                regen.h2_production * flux.h2,
                regen.h2_max,
            );
        }
    }
}

/// Resets the water band to the laboratory baseline, scaled by flux multipliers.
pub fn maintain_baseline(grids: &mut GridSystem, strat: &Stratification, config: &AppConfig) {
    let base = &config.regeneration.baseline;
    let flux = &config.flux;
    let targets = [
        (GridChannel::H2, base.h2),
        (GridChannel::Co2, base.co2),
        (GridChannel::Phosphorus, base.phosphorus),
        (GridChannel::Nitrogen, base.nitrogen),
        (GridChannel::Oxygen, base.oxygen),
        (GridChannel::Temperature, base.temperature),
        (GridChannel::Light, base.light),
    ];
    for col in strat.water_cols() {
        for row in strat.water_rows() {
            for (channel, value) in targets {
                grids.set_cell(channel, col, row, value * flux.channel(channel));
            }
        }
    }
}

/// Slow loss of dissolved h2 and co2 inside the water band.
pub fn apply_environmental_decay(grids: &mut GridSystem, strat: &Stratification, decay: f64) {
    for col in strat.water_cols() {
        for row in strat.water_rows() {
            for channel in [GridChannel::H2, GridChannel::Co2] {
                let v = grids.get_cell(channel, col, row);
                grids.set_cell(channel, col, row, v * decay);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::WorldConfig;

    fn world(cols: usize, rows: usize) -> (AppConfig, Stratification) {
        let config = AppConfig {
            world: WorldConfig {
                cols,
                rows,
                ..Default::default()
            },
            ..Default::default()
        };
        let strat = Stratification::new(&config);
        (config, strat)
    }

    #[test]
    fn test_sediment_nutrients_regrow_with_caps() {
        let (config, strat) = world(4, 20);
        let mut grids = GridSystem::new(4, 20);
        grids.set_cell(GridChannel::H2, 1, 19, 240.0);
        regenerate(&mut grids, &strat, &config);
        assert_eq!(grids.get_cell(GridChannel::Nitrogen, 0, 18), 0.5);
        assert_eq!(grids.get_cell(GridChannel::Phosphorus, 0, 18), 0.5);
        assert_eq!(grids.get_cell(GridChannel::H2, 0, 18), 20.0);
        assert_eq!(grids.get_cell(GridChannel::H2, 1, 19), 250.0);
        assert_eq!(grids.get_cell(GridChannel::Nitrogen, 0, 10), 0.0);
    }

    #[test]
    fn test_photolysis_limited_to_upper_water() {
        let (config, strat) = world(2, 20);
        let mut grids = GridSystem::new(2, 20);
        grids.grid_mut(GridChannel::Uv).fill(100.0);
        regenerate(&mut grids, &strat, &config);
        assert!((grids.get_cell(GridChannel::Oxygen, 0, 2) - 0.02).abs() < 1e-12);
        assert_eq!(grids.get_cell(GridChannel::Oxygen, 0, 15), 0.0);
    }

    #[test]
    fn test_light_regrows_below_profile() {
        let (config, strat) = world(2, 10);
        let mut grids = GridSystem::new(2, 10);
        regenerate(&mut grids, &strat, &config);
        assert_eq!(grids.get_cell(GridChannel::Light, 0, 0), 0.5);
    }

    #[test]
    fn test_baseline_and_decay() {
        let (mut config, strat) = world(4, 20);
        config.flux.h2 = 2.0;
        let mut grids = GridSystem::new(4, 20);
        maintain_baseline(&mut grids, &strat, &config);
        assert_eq!(grids.get_cell(GridChannel::H2, 1, 5), 300.0);
        assert_eq!(grids.get_cell(GridChannel::Temperature, 1, 5), 70.0);
        assert_eq!(grids.get_cell(GridChannel::H2, 1, 0), 0.0);
        apply_environmental_decay(&mut grids, &strat, 0.5);
        assert_eq!(grids.get_cell(GridChannel::H2, 1, 5), 150.0);
    }
}
