//! Capability table for [`Organelle`] variants.
//!
//! Each variant exposes the same three capabilities: a per-tick maintenance
//! cost, a one-time construction cost, and its per-tick effect on transport
//! or motion. Leveled variants scale linearly with their level.

use crate::config::AppConfig;
use crate::genome::GenomeLogic;
use ocean_data::{Enzyme, Genome, MetabolismPathway, Organelle};

const HYDROGENASE_COPIES_PER_LEVEL: f64 = 20.0;

/// One-time resource cost of building an organelle.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ConstructionCost {
    pub energy: f64,
    pub phosphorus: f64,
    pub nitrogen: f64,
}

pub trait OrganelleLogic {
    /// Energy spent every tick to keep the organelle.
    fn maintenance_cost(&self) -> f64;

    fn construction_cost(&self) -> ConstructionCost;

    /// Multiplier on membrane H₂ uptake. 1.0 for organelles without the effect.
    fn h2_uptake_bonus(&self) -> f64;

    /// Energy harvested from a proton gradient of `gradient` pH units.
    fn pmf_yield(&self, gradient: f64, base_yield: f64) -> f64;

    /// Energy spent moving at `speed`.
    fn movement_cost(&self, speed: f64, cost_per_level: f64) -> f64;
}

impl OrganelleLogic for Organelle {
    fn maintenance_cost(&self) -> f64 {
        match *self {
            Organelle::Ribosome => 0.01,
            Organelle::Hydrogenosome => 0.02,
            Organelle::ChemosyntheticEnzymes => 0.03,
            Organelle::HydrogenaseComplex { level } => 0.04 * level,
            Organelle::AtpSynthase { level } => 0.05 * level,
            Organelle::Flagellum { level } => 0.05 * level,
        }
    }

    fn construction_cost(&self) -> ConstructionCost {
        let (energy, phosphorus, nitrogen) = match *self {
            Organelle::Ribosome => (10.0, 5.0, 2.0),
            Organelle::Hydrogenosome => (20.0, 2.0, 5.0),
            Organelle::ChemosyntheticEnzymes => (25.0, 3.0, 8.0),
            Organelle::HydrogenaseComplex { level } => (30.0 * level, 5.0 * level, 10.0 * level),
            Organelle::AtpSynthase { level } => (50.0 * level, 10.0 * level, 15.0 * level),
            Organelle::Flagellum { level } => (30.0 * level, 5.0 * level, 0.0),
        };
        ConstructionCost {
            energy,
            phosphorus,
            nitrogen,
        }
    }

    fn h2_uptake_bonus(&self) -> f64 {
        match *self {
            Organelle::HydrogenaseComplex { level } => 1.0 + 0.05 * level,
            _ => 1.0,
        }
    }

    fn pmf_yield(&self, gradient: f64, base_yield: f64) -> f64 {
        match *self {
            Organelle::AtpSynthase { level } if gradient > 0.0 => {
                gradient * base_yield * (0.5 + 0.1 * level)
            }
            _ => 0.0,
        }
    }

    fn movement_cost(&self, speed: f64, cost_per_level: f64) -> f64 {
        match *self {
            Organelle::Flagellum { level } => speed * cost_per_level * level,
            _ => 0.0,
        }
    }
}

/// Organelles a cell with `genome` carries.
///
/// Every cell has a ribosome and a level-1 ATP synthase. Flagella appear at
/// any positive level; hydrogenosomes and chemosynthetic enzymes follow
/// pathway efficiency; a hydrogenase complex follows hydrogenase expression.
#[must_use]
pub fn organelles_for(genome: &Genome, config: &AppConfig) -> Vec<Organelle> {
    let threshold = config.mutation.organelle_threshold;
    let mut organelles = vec![Organelle::Ribosome, Organelle::AtpSynthase { level: 1.0 }];

    if genome.flagella_level > 0.0 {
        organelles.push(Organelle::Flagellum {
            level: genome.flagella_level,
        });
    }
    if genome.pathway_efficiency(MetabolismPathway::Fermentation) > threshold {
        organelles.push(Organelle::Hydrogenosome);
    }
    if genome.pathway_efficiency(MetabolismPathway::Chemosynthesis) > threshold {
        organelles.push(Organelle::ChemosyntheticEnzymes);
    }

    let hydrogenase_copies: u32 = genome
        .expressed_enzymes()
        .into_iter()
        .filter(|(enzyme, _)| *enzyme == Enzyme::Hydrogenase)
        .map(|(_, copies)| copies)
        .sum();
    if hydrogenase_copies > 0 {
        organelles.push(Organelle::HydrogenaseComplex {
            level: f64::from(hydrogenase_copies) / HYDROGENASE_COPIES_PER_LEVEL,
        });
    }
    organelles
}

#[must_use]
pub fn total_maintenance(organelles: &[Organelle]) -> f64 {
    organelles.iter().map(OrganelleLogic::maintenance_cost).sum()
}

/// Product of all H₂ uptake bonuses.
#[must_use]
pub fn h2_uptake_bonus(organelles: &[Organelle]) -> f64 {
    organelles.iter().map(OrganelleLogic::h2_uptake_bonus).product()
}

/// Cost of growing flagella from `parent_level` to `child_level`.
///
/// Only an increase is charged; a loss or no change is free.
#[must_use]
pub fn flagella_upgrade_cost(parent_level: f64, child_level: f64) -> ConstructionCost {
    let delta = child_level - parent_level;
    if delta <= 0.0 {
        return ConstructionCost::default();
    }
    Organelle::Flagellum { level: delta }.construction_cost()
}
