//! Cell construction and the per-tick physiology pass.
//!
//! A tick runs, in order: movement, passive membrane exchange, metabolic
//! upkeep, flagellar cost, SOD synthesis, oxidative damage, repair, UV and
//! finally death detection. Pools are clamped to `[0, max_resources]` at the
//! end of every tick, so no pool is ever observed negative.

use crate::cellular::chemotaxis::{follows_h2, h2_steering};
use crate::cellular::transport::{passive_exchange, Site};
use crate::cellular::{membrane, metabolic_cost, oxidative, pigmentation, thermal_stress, uv, Surroundings};
use crate::config::AppConfig;
use crate::genome::GenomeLogic;
use crate::grid::GridSystem;
use crate::organelle::{organelles_for, total_maintenance, OrganelleLogic};
use crate::stratification::Stratification;
use crate::vent::VentManager;
use ocean_data::{Cell, DeathCause, Genome, GridChannel, ResourcePools};
use rand::Rng;
use uuid::Uuid;

/// Chance per unit of oxidative damage that it hits DNA.
const OXIDATIVE_MUTATION_CHANCE: f64 = 0.1;
const NO_FLAGELLA_SPEED: f64 = 0.1;

/// Builds a live cell at `(x, y)` carrying `genome`.
///
/// Pools start at the configured founder values, clamped to the cell's
/// storage. Ids are drawn from `rng` so seeded runs are reproducible.
pub fn create_cell<R: Rng>(
    x: f64,
    y: f64,
    mut genome: Genome,
    parent_id: Option<Uuid>,
    config: &AppConfig,
    rng: &mut R,
) -> Cell {
    genome.sync_organelle_flags();
    genome.species_id = Some(genome.species_id());

    let max_resources = membrane::storage_capacity(&genome, &config.cellular).max(f64::EPSILON);
    let base_speed = if genome.flagella_level > 0.0 {
        genome.flagella_level
    } else {
        NO_FLAGELLA_SPEED
    };
    let max_speed = base_speed
        * membrane::movement_penalty(&genome, &config.cellular)
        * config.cellular.speed_multiplier;

    let m = &config.metabolism;
    let mut pools = ResourcePools {
        energy: m.initial_energy,
        oxygen: m.initial_oxygen,
        nitrogen: m.initial_nitrogen,
        phosphorus: m.initial_phosphorus,
    };
    pools.clamp(max_resources);

    Cell {
        id: Uuid::from_u128(rng.gen::<u128>()),
        parent_id,
        x,
        y,
        vx: 0.0,
        vy: 0.0,
        organelles: organelles_for(&genome, config),
        genome,
        pools,
        max_resources,
        max_speed,
        age: 0,
        health: 100.0,
        structural_damage: 0.0,
        sod_protein: 0.5,
        oxidative_damage_frame: 0.0,
        uv_damage_frame: 0.0,
        uv_mutation_pending: false,
        reproduction_cooldown: 0,
        death: None,
    }
}

/// Read-only surroundings of the population during a tick.
pub struct Habitat<'a> {
    pub strat: &'a Stratification,
    pub vents: &'a VentManager,
    pub config: &'a AppConfig,
}

fn grid_position(cell: &Cell, grids: &GridSystem, habitat: &Habitat) -> (usize, usize) {
    grids
        .cell_at(cell.x, cell.y, habitat.config.world.resolution)
        .unwrap_or((habitat.strat.water_start_col, habitat.strat.water_start_row))
}

/// Brownian jitter plus chemotaxis, limited by max speed and damped by
/// zone viscosity. The cell bounces off the water band edges.
fn swim<R: Rng>(cell: &mut Cell, grids: &GridSystem, habitat: &Habitat, rng: &mut R) {
    let cellular = &habitat.config.cellular;
    let resolution = habitat.config.world.resolution;
    let (col, row) = grid_position(cell, grids, habitat);

    let angle = rng.gen_range(0.0..std::f64::consts::TAU);
    let mut ax = angle.cos() * cellular.brownian_strength;
    let mut ay = angle.sin() * cellular.brownian_strength;
    if follows_h2(cell.genome.metabolism_type) {
        let (sx, sy) = h2_steering(
            grids,
            col,
            row,
            cellular.chemotaxis_strength,
            cellular.membrane_sensitivity,
        );
        ax += sx;
        ay += sy;
    }

    cell.vx += ax;
    cell.vy += ay;
    let speed = cell.vx.hypot(cell.vy);
    if speed > cell.max_speed && speed > 0.0 {
        let scale = cell.max_speed / speed;
        cell.vx *= scale;
        cell.vy *= scale;
    }
    let viscosity = habitat.strat.viscosity(row);
    cell.vx *= viscosity;
    cell.vy *= viscosity;

    let (nx, ny) = (cell.x + cell.vx, cell.y + cell.vy);
    let (cx, cy) = habitat.strat.clamp_to_water(nx, ny, resolution);
    if cx != nx {
        cell.vx = -cell.vx;
    }
    if cy != ny {
        cell.vy = -cell.vy;
    }
    cell.x = cx;
    cell.y = cy;
}

/// Advances one live cell by a tick. Sets `cell.death` when it dies.
pub fn update_cell<R: Rng>(cell: &mut Cell, grids: &mut GridSystem, habitat: &Habitat, rng: &mut R) {
    if cell.is_dead() {
        return;
    }
    let config = habitat.config;
    let cellular = &config.cellular;
    cell.oxidative_damage_frame = 0.0;
    cell.uv_damage_frame = 0.0;

    swim(cell, grids, habitat, rng);
    let (col, row) = grid_position(cell, grids, habitat);
    let in_sediment = habitat.strat.is_in_sediment(row);

    let site = Site {
        col,
        row,
        ph: habitat.vents.ph_at(cell.x, cell.y, config.world.resolution),
        in_sediment,
    };
    passive_exchange(cell, grids, site, cellular);

    let oxygen_env = grids.get_cell(GridChannel::Oxygen, col, row);
    let cost = metabolic_cost(
        &cell.genome,
        Surroundings {
            oxygen: oxygen_env,
            in_sediment,
        },
        &config.metabolism,
    );
    let size = membrane::metabolic_multiplier(&cell.genome, cellular);
    let thermal = thermal_stress(
        grids.get_cell(GridChannel::Temperature, col, row),
        cell.genome.thermal_optimum,
        cell.genome.thermal_tolerance,
        cellular.thermal_stress_multiplier,
    );
    let pigment = pigmentation(cell.genome.color, cellular);
    cell.pools.energy -= cost.energy * size * thermal
        + pigment.pigment_cost
        + total_maintenance(&cell.organelles);
    cell.pools.oxygen -= cost.oxygen * size;
    cell.pools.nitrogen -= cost.nitrogen * size;
    grids.add_cell(GridChannel::Co2, col, row, cost.co2);

    let speed = cell.vx.hypot(cell.vy);
    let movement: f64 = cell
        .organelles
        .iter()
        .map(|o| o.movement_cost(speed, cellular.flagella_movement_cost))
        .sum();
    cell.pools.energy -= movement;

    cell.sod_protein = oxidative::relax_sod(
        cell.sod_protein,
        cell.genome.sod_efficiency,
        cellular.sod_synthesis_rate,
    );
    let oxidative_damage = oxidative::oxidative_damage(oxygen_env, cell.sod_protein, cellular);
    cell.structural_damage += oxidative_damage;
    cell.oxidative_damage_frame = oxidative_damage;

    let repair = oxidative::repair(
        cell.structural_damage,
        cell.genome.dna_repair_efficiency,
        cell.pools.energy,
        cellular,
    );
    cell.structural_damage -= repair.repaired;
    cell.pools.energy -= repair.energy_spent;

    let uv_level = grids.get_cell(GridChannel::Uv, col, row);
    if let Some(hit) = uv::expose(
        uv_level,
        pigment.photoprotection,
        cell.genome.dna_repair_efficiency,
        cellular,
        rng,
    ) {
        cell.structural_damage += hit.damage;
        cell.uv_damage_frame = hit.damage;
        cell.uv_mutation_pending |= hit.mutation;
    }
    if oxidative_damage > 0.0 && rng.gen::<f64>() < oxidative_damage * OXIDATIVE_MUTATION_CHANCE {
        cell.uv_mutation_pending = true;
    }

    cell.structural_damage = cell.structural_damage.max(0.0);
    cell.health = (cellular.max_structural_damage - cell.structural_damage).max(0.0);
    cell.death = death_cause(cell, config);
    cell.pools.clamp(cell.max_resources);

    cell.reproduction_cooldown = cell.reproduction_cooldown.saturating_sub(1);
    cell.age += 1;
}

/// First failed survival condition, checked in a fixed order.
#[must_use]
pub fn death_cause(cell: &Cell, config: &AppConfig) -> Option<DeathCause> {
    let pools = &cell.pools;
    if pools.energy <= 0.0 {
        return Some(if cell.oxidative_damage_frame > 0.0 {
            DeathCause::EnergyDepletionRepairBankruptcy
        } else {
            DeathCause::EnergyDepletionStarvation
        });
    }
    if pools.oxygen <= 0.0 && !cell.genome.metabolism_type.is_anaerobic() {
        return Some(DeathCause::OxygenDepletion);
    }
    if pools.nitrogen <= 0.0 {
        return Some(DeathCause::NitrogenDepletion);
    }
    if pools.phosphorus <= 0.0 {
        return Some(DeathCause::PhosphorusDepletion);
    }
    if cell.structural_damage >= config.cellular.max_structural_damage {
        return Some(if cell.oxidative_damage_frame > cell.uv_damage_frame {
            DeathCause::StructuralFailureOxidative
        } else if cell.uv_damage_frame > 0.0 {
            DeathCause::StructuralFailureUv
        } else {
            DeathCause::StructuralFailureAccumulation
        });
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::genome::DnaFactory;
    use ocean_data::{MetabolismPathway, Organelle};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn setup() -> (AppConfig, Stratification, VentManager, GridSystem) {
        let mut config = AppConfig::default();
        config.world.cols = 20;
        config.world.rows = 20;
        config.vents.clear();
        let strat = Stratification::new(&config);
        let vents = VentManager::new(&config.vents, &strat, &config.vent_system);
        let grids = GridSystem::new(20, 20);
        (config, strat, vents, grids)
    }

    fn founder(config: &AppConfig, rng: &mut ChaCha8Rng) -> Cell {
        let genome = DnaFactory::create_founder(config, rng);
        create_cell(100.0, 100.0, genome, None, config, rng)
    }

    #[test]
    fn test_new_cell_pools_are_bounded() {
        let (config, ..) = setup();
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let cell = founder(&config, &mut rng);
        assert!(cell.max_resources > 0.0);
        assert!(cell.pools.energy <= cell.max_resources);
        assert_eq!(cell.pools.energy, cell.max_resources.min(500.0));
        assert!(cell.organelles.contains(&Organelle::Ribosome));
        assert!(cell.genome.species_id.is_some());
        assert!((cell.max_speed - 0.1 * membrane::movement_penalty(&cell.genome, &config.cellular)).abs() < 1e-12);
    }

    #[test]
    fn test_seeded_ids_are_reproducible() {
        let (config, ..) = setup();
        let a = founder(&config, &mut ChaCha8Rng::seed_from_u64(4));
        let b = founder(&config, &mut ChaCha8Rng::seed_from_u64(4));
        assert_eq!(a.id, b.id);
    }

    #[test]
    fn test_tick_keeps_cell_in_water_and_pools_non_negative() {
        let (config, strat, vents, mut grids) = setup();
        let habitat = Habitat {
            strat: &strat,
            vents: &vents,
            config: &config,
        };
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let mut cell = founder(&config, &mut rng);
        for _ in 0..200 {
            update_cell(&mut cell, &mut grids, &habitat, &mut rng);
            let (cx, cy) = strat.clamp_to_water(cell.x, cell.y, config.world.resolution);
            assert_eq!((cx, cy), (cell.x, cell.y));
            assert!(cell.pools.energy >= 0.0 && cell.pools.nitrogen >= 0.0);
            if cell.is_dead() {
                break;
            }
        }
        assert!(cell.age > 0);
    }

    #[test]
    fn test_death_cause_order() {
        let (config, ..) = setup();
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        let mut cell = founder(&config, &mut rng);
        assert_eq!(death_cause(&cell, &config), None);

        cell.pools.nitrogen = 0.0;
        cell.pools.phosphorus = 0.0;
        assert_eq!(death_cause(&cell, &config), Some(DeathCause::NitrogenDepletion));

        cell.pools.energy = 0.0;
        cell.oxidative_damage_frame = 0.3;
        assert_eq!(
            death_cause(&cell, &config),
            Some(DeathCause::EnergyDepletionRepairBankruptcy)
        );
    }

    #[test]
    fn test_aerobes_need_oxygen() {
        let (config, ..) = setup();
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        let mut cell = founder(&config, &mut rng);
        cell.pools.oxygen = 0.0;
        assert_eq!(death_cause(&cell, &config), None);
        cell.genome.metabolism_type = MetabolismPathway::AerobicRespiration;
        assert_eq!(death_cause(&cell, &config), Some(DeathCause::OxygenDepletion));
    }

    #[test]
    fn test_structural_failure_attribution() {
        let (config, ..) = setup();
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        let mut cell = founder(&config, &mut rng);
        cell.structural_damage = 100.0;
        assert_eq!(
            death_cause(&cell, &config),
            Some(DeathCause::StructuralFailureAccumulation)
        );
        cell.uv_damage_frame = 2.0;
        assert_eq!(death_cause(&cell, &config), Some(DeathCause::StructuralFailureUv));
        cell.oxidative_damage_frame = 3.0;
        assert_eq!(
            death_cause(&cell, &config),
            Some(DeathCause::StructuralFailureOxidative)
        );
    }

    #[test]
    fn test_oxygenated_water_damages_cells() {
        let (config, strat, vents, mut grids) = setup();
        grids.grid_mut(GridChannel::Oxygen).fill(80.0);
        grids.grid_mut(GridChannel::H2).fill(200.0);
        let habitat = Habitat {
            strat: &strat,
            vents: &vents,
            config: &config,
        };
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let mut cell = founder(&config, &mut rng);
        update_cell(&mut cell, &mut grids, &habitat, &mut rng);
        assert!(cell.oxidative_damage_frame > 0.0);
        assert!(cell.structural_damage > 0.0);
        assert!(cell.health < 100.0);
    }
}
