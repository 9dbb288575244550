//! Clone-and-perturb mutation under environmental-stability pressure.
//!
//! Every continuous trait moves by a uniform draw whose half-width is the
//! parent's own mutation rate times a per-trait range, divided by
//! `0.5 + stability`: calm environments mutate less. The mutation rate
//! itself drifts and is pulled toward a stability-dependent target.

use super::GenomeLogic;
use crate::config::{AppConfig, MutationConfig};
use ocean_data::{EvolutionaryEra, Genome, MetabolismPathway};
use rand::Rng;

const PRIMORDIAL_RATE: f64 = 0.15;
const MODERN_RATE: f64 = 0.03;
const TRANSITION_RATE: f64 = 0.08;
const SOD_MIN: f64 = 0.1;
const SOD_MAX: f64 = 1.0;
const LUCA_MIN_EFFICIENCY: f64 = 0.1;

/// Uniform draw in `[-half_width, half_width]`, 0 for an empty range.
fn jitter<R: Rng>(rng: &mut R, half_width: f64) -> f64 {
    if half_width > 0.0 {
        rng.gen_range(-half_width..=half_width)
    } else {
        0.0
    }
}

#[must_use]
pub fn era_for_rate(mutation_rate: f64) -> EvolutionaryEra {
    if mutation_rate > PRIMORDIAL_RATE {
        EvolutionaryEra::Primordial
    } else if mutation_rate > TRANSITION_RATE {
        EvolutionaryEra::Transition
    } else {
        EvolutionaryEra::Modern
    }
}

/// Selection pull of the mutation rate toward the stability target.
#[must_use]
pub fn mutation_pressure(stability: f64, current_rate: f64, config: &MutationConfig) -> f64 {
    let stability = stability.clamp(0.0, 1.0);
    let target = PRIMORDIAL_RATE + (MODERN_RATE - PRIMORDIAL_RATE) * stability;
    ((target - current_rate) * config.pressure_strength)
        .clamp(config.pressure_min, config.pressure_max)
}

fn mutate_rate<R: Rng>(parent_rate: f64, stability: f64, config: &MutationConfig, rng: &mut R) -> f64 {
    let mut rate = parent_rate + jitter(rng, config.rate_change);
    if config.stability_enabled {
        rate += mutation_pressure(stability, parent_rate, config);
    }
    rate.clamp(config.rate_min, config.rate_max)
}

/// Drifts pathway efficiencies, re-derives enablement and the dominant pathway.
fn mutate_metabolisms<R: Rng>(genome: &mut Genome, scale: f64, config: &MutationConfig, rng: &mut R) {
    let drift = config.metabolic_drift * genome.mutation_rate * scale;
    for (pathway, t) in &mut genome.metabolisms {
        let is_luca = *pathway == MetabolismPathway::Luca;
        let floor = if is_luca { LUCA_MIN_EFFICIENCY } else { 0.0 };
        t.efficiency = (t.efficiency + jitter(rng, drift)).clamp(floor, config.efficiency_max);
        t.enabled = is_luca || t.efficiency > config.organelle_threshold;
    }

    let mut best = MetabolismPathway::Luca;
    let mut best_eff = genome.pathway_efficiency(MetabolismPathway::Luca);
    for (pathway, t) in &genome.metabolisms {
        if t.efficiency > best_eff {
            best_eff = t.efficiency;
            best = *pathway;
        }
    }
    genome.metabolism_type = best;
}

/// Rare jump to an unrelated pathway. Usually fatal.
fn cross_metabolism_jump<R: Rng>(genome: &mut Genome, config: &MutationConfig, rng: &mut R) {
    if rng.gen::<f64>() >= config.cross_metabolism_chance {
        return;
    }
    let others: Vec<MetabolismPathway> = MetabolismPathway::ALL
        .into_iter()
        .filter(|p| *p != genome.metabolism_type)
        .collect();
    genome.metabolism_type = others[rng.gen_range(0..others.len())];
    if rng.gen::<f64>() < config.cross_metabolism_mortality {
        genome.lethal = true;
    }
}

/// Produces the offspring genome of `parent`.
///
/// `stability` is the environmental stability estimate in `[0, 1]`. The
/// result may be flagged `lethal`, in which case no child should be built.
pub fn mutate<R: Rng>(parent: &Genome, stability: f64, config: &AppConfig, rng: &mut R) -> Genome {
    let m = &config.mutation;
    let mr = parent.mutation_rate;
    let scale = 1.0 / (0.5 + stability.clamp(0.0, 1.0));
    let size_range = config.cellular.size_evolution.size_profile().mutation_range;
    let color_range = config.cellular.color_evolution.color_profile().mutation_range;

    let mut child = parent.clone();
    child.flagella_level =
        (parent.flagella_level + jitter(rng, m.flagella_range * mr * scale)).clamp(0.0, m.flagella_max);
    child.size = (parent.size + jitter(rng, size_range * mr * scale) * 10.0).clamp(m.size_min, m.size_max);
    for channel in &mut child.color {
        *channel = (*channel + jitter(rng, color_range * mr * scale) * 10.0).clamp(0.0, 255.0);
    }
    child.mutation_rate = mutate_rate(mr, stability, m, rng);
    child.metabolic_efficiency = (parent.metabolic_efficiency
        + jitter(rng, m.efficiency_range * mr * scale) * 10.0)
        .clamp(m.efficiency_min, m.efficiency_max);
    child.storage_capacity = (parent.storage_capacity
        + jitter(rng, m.storage_range * mr * scale) * 10.0)
        .clamp(m.storage_min, m.storage_max);
    child.dna_repair_efficiency = (parent.dna_repair_efficiency
        + jitter(rng, m.dna_repair_range * mr * scale))
        .clamp(m.dna_repair_min, m.dna_repair_max);
    child.sod_efficiency =
        (parent.sod_efficiency + jitter(rng, m.sod_range * mr * scale)).clamp(SOD_MIN, SOD_MAX);
    child.thermal_optimum = (parent.thermal_optimum
        + jitter(rng, m.thermal_optimum_range * mr * scale))
        .clamp(m.temperature_min, m.temperature_max);
    child.thermal_tolerance = (parent.thermal_tolerance
        + jitter(rng, m.thermal_tolerance_range * mr * scale))
        .clamp(m.tolerance_min, m.tolerance_max);

    child.generation = parent.generation.saturating_add(1);
    child.evolutionary_era = era_for_rate(child.mutation_rate);
    child.species_id = None;
    child.lethal = false;

    mutate_metabolisms(&mut child, scale, m, rng);
    cross_metabolism_jump(&mut child, m, rng);
    child.sync_organelle_flags();
    child.color = child.phenotypic_color();
    child
}

/// DNA damage from UV or oxidative stress: one random trait takes a large hit.
pub fn apply_uv_mutation<R: Rng>(genome: &mut Genome, config: &MutationConfig, rng: &mut R) {
    match rng.gen_range(0..8) {
        0 => {
            genome.size = (genome.size + rng.gen_range(-5.0..=5.0)).clamp(config.size_min, config.size_max);
        }
        1 => {
            let channel = rng.gen_range(0..3);
            genome.color[channel] = (genome.color[channel] + rng.gen_range(-30.0..=30.0)).clamp(0.0, 255.0);
        }
        2 => {
            genome.metabolic_efficiency = (genome.metabolic_efficiency + rng.gen_range(-0.15..=0.15))
                .clamp(config.efficiency_min, config.efficiency_max);
        }
        3 => {
            genome.storage_capacity = (genome.storage_capacity + rng.gen_range(-15.0..=15.0))
                .clamp(config.storage_min, config.storage_max);
        }
        4 => {
            genome.dna_repair_efficiency = (genome.dna_repair_efficiency + rng.gen_range(-0.1..=0.1))
                .clamp(config.dna_repair_min, config.dna_repair_max);
        }
        5 => {
            genome.sod_efficiency = (genome.sod_efficiency + rng.gen_range(-0.1..=0.1)).clamp(SOD_MIN, SOD_MAX);
        }
        6 => {
            genome.thermal_optimum = (genome.thermal_optimum + rng.gen_range(-5.0..=5.0))
                .clamp(config.temperature_min, config.temperature_max);
        }
        _ => {
            genome.thermal_tolerance = (genome.thermal_tolerance + rng.gen_range(-2.0..=2.0))
                .clamp(config.tolerance_min, config.tolerance_max);
        }
    }
    genome.species_id = None;
}
