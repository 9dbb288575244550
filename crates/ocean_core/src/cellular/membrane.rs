//! Cell-size physics: surface-to-volume trade-offs of the membrane.
//!
//! Storage grows with volume, metabolic cost follows Kleiber's 3/4 law, and
//! larger cells are slower. With size evolution off every multiplier is 1.

use crate::config::{CellularConfig, EvolutionLevel};
use ocean_data::Genome;

fn size_ratio(size: f64, config: &CellularConfig) -> f64 {
    size / config.size_reference
}

/// Maximum content of each resource pool.
#[must_use]
pub fn storage_capacity(genome: &Genome, config: &CellularConfig) -> f64 {
    if config.size_evolution == EvolutionLevel::None {
        return genome.storage_capacity;
    }
    let profile = config.size_evolution.size_profile();
    genome.storage_capacity * size_ratio(genome.size, config).powi(3) * profile.storage_multiplier
}

/// Kleiber scaling of every metabolic cost.
#[must_use]
pub fn metabolic_multiplier(genome: &Genome, config: &CellularConfig) -> f64 {
    if config.size_evolution == EvolutionLevel::None {
        return 1.0;
    }
    let profile = config.size_evolution.size_profile();
    size_ratio(genome.size, config).powf(0.75) * profile.metabolic_multiplier
}

/// Speed factor, floored so that large cells still move.
#[must_use]
pub fn movement_penalty(genome: &Genome, config: &CellularConfig) -> f64 {
    if config.size_evolution == EvolutionLevel::None {
        return 1.0;
    }
    let profile = config.size_evolution.size_profile();
    let ratio = size_ratio(genome.size, config);
    if ratio <= 0.0 {
        return config.min_movement_factor;
    }
    (profile.movement_penalty / ratio).max(config.min_movement_factor)
}
