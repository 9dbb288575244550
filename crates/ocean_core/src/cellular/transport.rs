//! Passive membrane exchange between a cell and the grid cell it sits in.
//!
//! Structural damage makes the membrane both more permeable and leakier.
//! Energy comes from the proton-motive force across the membrane, from H₂
//! diffusing down its gradient and from CO₂ capture; nutrients trickle in
//! when the water is richer than the cell.

use crate::config::CellularConfig;
use crate::grid::GridSystem;
use crate::organelle::{h2_uptake_bonus, OrganelleLogic};
use ocean_data::{Cell, GridChannel};

/// Internal H₂ equivalent of one unit of stored energy.
const ENERGY_PER_H2: f64 = 5.0;
/// CO₂ level below which capture yields nothing.
const CO2_SATURATION: f64 = 50.0;
const CO2_ENERGY_YIELD: f64 = 0.1;
const NUTRIENT_UPTAKE: f64 = 0.1;
const NITROGEN_LEAK: f64 = 0.5;
const PHOSPHORUS_LEAK: f64 = 0.1;

/// Where the exchange happens.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Site {
    pub col: usize,
    pub row: usize,
    /// External pH at the cell.
    pub ph: f64,
    pub in_sediment: bool,
}

pub fn passive_exchange(
    cell: &mut Cell,
    grids: &mut GridSystem,
    site: Site,
    config: &CellularConfig,
) {
    let damage = (cell.structural_damage / config.max_structural_damage).clamp(0.0, 1.0);
    let permeability = config.membrane_permeability * (1.0 + damage);
    let leak = config.membrane_leak_rate * (1.0 + 2.0 * damage);
    let max = cell.max_resources;

    // Proton-motive force from the alkaline exterior.
    let gradient = site.ph - config.internal_ph;
    let pmf: f64 = cell
        .organelles
        .iter()
        .map(|o| o.pmf_yield(gradient, config.pmf_energy_yield))
        .sum();
    cell.pools.energy += pmf;

    let h2_env = grids.get_cell(GridChannel::H2, site.col, site.row);
    let h2_gradient = h2_env - cell.pools.energy / ENERGY_PER_H2;
    let flow = h2_gradient * permeability * h2_uptake_bonus(&cell.organelles);
    if flow > 0.0 {
        let room = (max - cell.pools.energy).max(0.0);
        cell.pools.energy += grids.consume_cell(GridChannel::H2, site.col, site.row, flow.min(room));
    } else {
        cell.pools.energy += flow - leak;
    }

    let co2_env = grids.get_cell(GridChannel::Co2, site.col, site.row);
    let capture = (co2_env - CO2_SATURATION) * config.membrane_co2_diffusion;
    if capture > 0.0 {
        cell.pools.energy += capture * CO2_ENERGY_YIELD;
    }

    for (channel, pool) in [
        (GridChannel::Phosphorus, &mut cell.pools.phosphorus),
        (GridChannel::Nitrogen, &mut cell.pools.nitrogen),
    ] {
        let env = grids.get_cell(channel, site.col, site.row);
        if env > *pool {
            let room = (max - *pool).max(0.0);
            let want = ((env - *pool) * permeability * NUTRIENT_UPTAKE).min(room);
            *pool += grids.consume_cell(channel, site.col, site.row, want);
        }
    }

    if !site.in_sediment {
        cell.pools.nitrogen -= leak * NITROGEN_LEAK;
        cell.pools.phosphorus -= leak * PHOSPHORUS_LEAK;
    }

    cell.pools.clamp(max);
}
