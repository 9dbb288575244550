//! Binary fission.
//!
//! An admissible parent splits all four pools 50/50 and hands the halves to
//! a mutated offspring. A lethal mutation aborts the division after the
//! split: the parent keeps only its half.

use crate::cell::create_cell;
use crate::config::AppConfig;
use crate::genome::mutation::{apply_uv_mutation, mutate};
use crate::organelle::flagella_upgrade_cost;
use crate::stratification::Stratification;
use chrono::Utc;
use ocean_data::{Cell, OceanEvent};
use rand::Rng;

const LETHAL_CAUSE: &str = "non_viable_genome";

pub struct ReproductionContext<'a, R: Rng> {
    pub frame: u64,
    pub config: &'a AppConfig,
    pub strat: &'a Stratification,
    /// Environmental stability in `[0, 1]`.
    pub stability: f64,
    pub rng: &'a mut R,
}

/// Resource, cooldown and damage checks, without the chance draw.
#[must_use]
pub fn meets_requirements(cell: &Cell, config: &AppConfig) -> bool {
    let r = &config.reproduction;
    if cell.reproduction_cooldown > 0 || cell.structural_damage > r.max_damage {
        return false;
    }

    let max = cell.max_resources;
    let threshold = max * r.threshold;
    let is_luca = cell.genome.is_luca();
    let nitrogen_required = if is_luca {
        max * r.luca_nitrogen_threshold
    } else {
        threshold
    };
    let oxygen_ok = (is_luca && r.luca_oxygen_exempt) || cell.pools.oxygen > threshold;

    cell.pools.energy > threshold
        && oxygen_ok
        && cell.pools.nitrogen > nitrogen_required
        && cell.pools.phosphorus > max * r.phosphorus_threshold
}

/// Full admission: requirements plus the per-tick chance draw.
pub fn can_reproduce<R: Rng>(cell: &Cell, config: &AppConfig, rng: &mut R) -> bool {
    meets_requirements(cell, config) && rng.gen::<f64>() < config.effective_reproduction_chance()
}

/// Splits `parent`. Returns the child, if viable, and the event describing
/// the attempt.
///
/// In phantom-mitosis mode the child is still returned; the caller discards it.
pub fn reproduce<R: Rng>(
    parent: &mut Cell,
    ctx: &mut ReproductionContext<'_, R>,
) -> (Option<Cell>, OceanEvent) {
    let config = ctx.config;
    let inherited = parent.pools.split_half();

    let mut genome = mutate(&parent.genome, ctx.stability, config, ctx.rng);
    if parent.uv_mutation_pending {
        apply_uv_mutation(&mut genome, &config.mutation, ctx.rng);
        parent.uv_mutation_pending = false;
    }

    if genome.lethal {
        tracing::debug!(
            frame = ctx.frame,
            parent = %parent.id,
            generation = parent.genome.generation,
            metabolism = genome.metabolism_type.as_str(),
            "Lethal mutation"
        );
        return (
            None,
            OceanEvent::LethalMutation {
                frame: ctx.frame,
                parent_id: parent.id,
                parent_generation: parent.genome.generation,
                child_dna: Box::new(genome),
                cause: LETHAL_CAUSE.to_string(),
                timestamp: Utc::now().to_rfc3339(),
            },
        );
    }

    let (x, y) = ctx
        .strat
        .clamp_to_water(parent.x, parent.y, config.world.resolution);
    let mut child = create_cell(x, y, genome, Some(parent.id), config, ctx.rng);
    child.pools = inherited;

    let upgrade = flagella_upgrade_cost(parent.genome.flagella_level, child.genome.flagella_level);
    child.pools.energy -= upgrade.energy;
    child.pools.phosphorus -= upgrade.phosphorus;
    child.pools.nitrogen -= upgrade.nitrogen;
    child.pools.clamp(child.max_resources);

    parent.reproduction_cooldown = config.reproduction.cooldown;
    child.reproduction_cooldown = config.reproduction.cooldown;

    let phantom = config.world.execution_mode.phantom_mitosis();
    tracing::debug!(
        frame = ctx.frame,
        parent = %parent.id,
        child = %child.id,
        generation = child.genome.generation,
        phantom = phantom,
        "Cell divided"
    );
    let event = OceanEvent::Reproduction {
        frame: ctx.frame,
        parent_id: parent.id,
        child_id: child.id,
        parent_generation: parent.genome.generation,
        child_dna: Box::new(child.genome.clone()),
        phantom,
        timestamp: Utc::now().to_rfc3339(),
    };
    (Some(child), event)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ExecutionMode;
    use crate::genome::DnaFactory;
    use ocean_data::{MetabolismPathway, ResourcePools};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn parent(config: &AppConfig, rng: &mut ChaCha8Rng) -> Cell {
        let genome = DnaFactory::create_founder(config, rng);
        let mut cell = create_cell(100.0, 100.0, genome, None, config, rng);
        cell.genome.metabolism_type = MetabolismPathway::Fermentation;
        cell.max_resources = 200.0;
        cell.pools = ResourcePools {
            energy: 160.0,
            oxygen: 160.0,
            nitrogen: 160.0,
            phosphorus: 130.0,
        };
        cell
    }

    fn config() -> AppConfig {
        let mut config = AppConfig::default();
        config.world.cols = 30;
        config.world.rows = 30;
        config.reproduction.threshold = 0.75;
        config.reproduction.phosphorus_threshold = 0.6;
        config
    }

    #[test]
    fn test_threshold_admission() {
        let config = config();
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let mut cell = parent(&config, &mut rng);
        assert!(meets_requirements(&cell, &config));

        cell.pools.phosphorus = 120.0;
        assert!(!meets_requirements(&cell, &config));
        cell.pools.phosphorus = 130.0;

        cell.reproduction_cooldown = 1;
        assert!(!meets_requirements(&cell, &config));
        cell.reproduction_cooldown = 0;

        cell.structural_damage = 25.0;
        assert!(!meets_requirements(&cell, &config));
    }

    #[test]
    fn test_luca_oxygen_exemption() {
        let mut config = config();
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let mut cell = parent(&config, &mut rng);
        cell.genome.metabolism_type = MetabolismPathway::Luca;
        cell.pools.oxygen = 0.0;
        assert!(meets_requirements(&cell, &config));
        config.reproduction.luca_oxygen_exempt = false;
        assert!(!meets_requirements(&cell, &config));
    }

    #[test]
    fn test_split_halves_parent_pools() {
        let config = config();
        let strat = Stratification::new(&config);
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        let mut cell = parent(&config, &mut rng);
        let mut ctx = ReproductionContext {
            frame: 7,
            config: &config,
            strat: &strat,
            stability: 0.5,
            rng: &mut rng,
        };
        let (child, event) = reproduce(&mut cell, &mut ctx);
        assert_eq!(cell.pools.energy, 80.0);
        assert_eq!(cell.pools.oxygen, 80.0);
        assert_eq!(cell.pools.nitrogen, 80.0);
        assert_eq!(cell.pools.phosphorus, 65.0);
        assert_eq!(event.frame(), 7);

        let child = child.expect("viable child");
        assert_eq!(child.parent_id, Some(cell.id));
        assert_eq!(child.genome.generation, cell.genome.generation + 1);
        assert_eq!(cell.reproduction_cooldown, 300);
        assert_eq!(child.reproduction_cooldown, 300);
        assert!(child.pools.energy <= child.max_resources);
    }

    #[test]
    fn test_lethal_mutation_keeps_cost() {
        let mut config = config();
        config.mutation.cross_metabolism_chance = 1.0;
        config.mutation.cross_metabolism_mortality = 1.0;
        let strat = Stratification::new(&config);
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let mut cell = parent(&config, &mut rng);
        let mut ctx = ReproductionContext {
            frame: 1,
            config: &config,
            strat: &strat,
            stability: 0.5,
            rng: &mut rng,
        };
        let (child, event) = reproduce(&mut cell, &mut ctx);
        assert!(child.is_none());
        assert!(matches!(event, OceanEvent::LethalMutation { .. }));
        assert_eq!(cell.pools.energy, 80.0);
        assert_eq!(cell.reproduction_cooldown, 0);
    }

    #[test]
    fn test_uv_flag_consumed() {
        let config = config();
        let strat = Stratification::new(&config);
        let mut rng = ChaCha8Rng::seed_from_u64(4);
        let mut cell = parent(&config, &mut rng);
        cell.uv_mutation_pending = true;
        let mut ctx = ReproductionContext {
            frame: 1,
            config: &config,
            strat: &strat,
            stability: 0.5,
            rng: &mut rng,
        };
        reproduce(&mut cell, &mut ctx);
        assert!(!cell.uv_mutation_pending);
    }

    #[test]
    fn test_phantom_flag_in_single_vent_mode() {
        let mut config = config();
        config.world.execution_mode = ExecutionMode::SingleVent;
        let strat = Stratification::new(&config);
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let mut cell = parent(&config, &mut rng);
        let mut ctx = ReproductionContext {
            frame: 1,
            config: &config,
            strat: &strat,
            stability: 0.5,
            rng: &mut rng,
        };
        let (child, event) = reproduce(&mut cell, &mut ctx);
        assert!(child.is_some());
        let OceanEvent::Reproduction { phantom, .. } = event else {
            panic!("expected a reproduction event, got {event:?}");
        };
        assert!(phantom);
    }
}
