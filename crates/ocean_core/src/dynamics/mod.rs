//! Per-tick environmental dynamics.
//!
//! Order within a tick is fixed: vents inject, the grid regenerates (or is
//! reset to baseline in single-vent runs), iron scavenges oxygen, the
//! reservoirs exchange with the boundary, and finally the chemistry diffuses.

pub mod regeneration;
pub mod reservoirs;
pub mod sinks;

use crate::config::AppConfig;
use crate::diffusion::DiffusionSystem;
use crate::grid::GridSystem;
use crate::stratification::Stratification;
use crate::vent::VentManager;
use ocean_data::OceanEvent;
use rand::Rng;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DynamicsManager {
    pub vents: VentManager,
}

impl DynamicsManager {
    #[must_use]
    pub fn new(config: &AppConfig, strat: &Stratification) -> Self {
        Self {
            vents: VentManager::new(&config.vents, strat, &config.vent_system),
        }
    }

    /// Advances the environment by one tick and returns vent events.
    pub fn update<R: Rng>(
        &mut self,
        grids: &mut GridSystem,
        strat: &Stratification,
        config: &AppConfig,
        rng: &mut R,
        frame: u64,
    ) -> Vec<OceanEvent> {
        let events = self.vents.update(grids, strat, config, rng, frame);

        if config.world.execution_mode.maintains_baseline() {
            regeneration::maintain_baseline(grids, strat, config);
            regeneration::apply_environmental_decay(
                grids,
                strat,
                config.regeneration.environmental_decay,
            );
        } else {
            regeneration::regenerate(grids, strat, config);
        }

        if !config.world.progressive_oxygen {
            sinks::apply_iron_oxidation(grids, &config.regeneration);
        }

        reservoirs::apply(grids, strat, &config.reservoirs);
        DiffusionSystem::update(grids, strat, &config.diffusion);
        events
    }
}
