//! Per-tick maintenance cost of the dominant metabolic pathway.
//!
//! Costs are pure functions of the genome and the local water. They are
//! composed with the size multiplier, thermal stress, pigment cost and
//! organelle upkeep by the cell tick.

use crate::config::MetabolismConfig;
use ocean_data::{Genome, MetabolismPathway};

/// Resources drawn (or, for CO₂, released) by one tick of metabolism.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MetabolicCost {
    pub energy: f64,
    pub oxygen: f64,
    pub nitrogen: f64,
    /// Released into the environment.
    pub co2: f64,
}

/// Local water a cell metabolises in.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Surroundings {
    pub oxygen: f64,
    pub in_sediment: bool,
}

/// Environmental stress on the pathway: fermenters suffer in oxygenated
/// water, chemosynthesisers away from the reduced sediment.
#[must_use]
pub fn environmental_stress(
    pathway: MetabolismPathway,
    surroundings: Surroundings,
    config: &MetabolismConfig,
) -> f64 {
    match pathway {
        MetabolismPathway::Fermentation if surroundings.oxygen > config.fermentation_o2_toxicity => {
            config.fermentation_stress
        }
        MetabolismPathway::Chemosynthesis if !surroundings.in_sediment => {
            config.chemosynthesis_stress
        }
        _ => 1.0,
    }
}

#[must_use]
pub fn metabolic_cost(
    genome: &Genome,
    surroundings: Surroundings,
    config: &MetabolismConfig,
) -> MetabolicCost {
    let pathway = genome.metabolism_type;
    let eff = genome.metabolic_efficiency;
    let stress = environmental_stress(pathway, surroundings, config);
    let base = config.base_cost;

    match pathway {
        MetabolismPathway::Fermentation => MetabolicCost {
            energy: base * config.fermentation_multiplier * stress * eff * 2.0,
            oxygen: config.oxygen_cost * eff,
            nitrogen: 0.0,
            co2: base * 0.5 * eff,
        },
        MetabolismPathway::Chemosynthesis => MetabolicCost {
            energy: base * config.chemosynthesis_multiplier * stress * eff,
            oxygen: 0.0,
            nitrogen: base * 0.5 * stress * eff,
            co2: base * 0.1 * eff,
        },
        MetabolismPathway::Luca => {
            let oxygen = config.oxygen_cost * eff;
            MetabolicCost {
                energy: base * config.luca_multiplier * stress * eff * 2.0,
                oxygen,
                nitrogen: 0.0,
                co2: oxygen,
            }
        }
        _ => {
            let oxygen = config.oxygen_cost * eff;
            MetabolicCost {
                energy: base * stress * eff * 2.0,
                oxygen,
                nitrogen: 0.0,
                co2: oxygen,
            }
        }
    }
}
