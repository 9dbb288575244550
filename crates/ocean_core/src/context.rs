//! The simulation instance.
//!
//! [`SimulationContext`] owns the grids, the vent field, the population and
//! the one seeded random source of a run. A tick mutates the environment
//! first (vents, regeneration, sinks, reservoirs, diffusion), then walks the
//! population once, then removes the dead and admits the newborn.

use crate::cell::{create_cell, update_cell, Habitat};
use crate::config::AppConfig;
use crate::dynamics::{regeneration, DynamicsManager};
use crate::genome::DnaFactory;
use crate::governor::GameGovernor;
use crate::grid::GridSystem;
use crate::reproduction::{can_reproduce, reproduce, ReproductionContext};
use crate::stability::StabilityTracker;
use crate::stratification::Stratification;
use chrono::Utc;
use ocean_data::{Cell, OceanEvent, VentSnapshot};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::collections::BTreeMap;
use std::time::Duration;

pub struct SimulationContext {
    pub config: AppConfig,
    pub grids: GridSystem,
    pub strat: Stratification,
    pub dynamics: DynamicsManager,
    pub cells: Vec<Cell>,
    pub governor: GameGovernor,
    pub stability: StabilityTracker,
    seed: u64,
    frame: u64,
    rng: ChaCha8Rng,
}

impl SimulationContext {
    /// Validates `config`, builds the world and seeds the founders.
    ///
    /// An absent seed is drawn from the OS; the chosen seed is logged and
    /// available from [`SimulationContext::seed`].
    pub fn new(config: AppConfig) -> anyhow::Result<Self> {
        config.validate()?;
        let seed = config.world.seed.unwrap_or_else(rand::random);
        let mut rng = ChaCha8Rng::seed_from_u64(seed);

        let strat = Stratification::new(&config);
        anyhow::ensure!(
            !strat.water_rows().is_empty() && !strat.water_cols().is_empty(),
            "World has no water band (rows {:?}, cols {:?})",
            strat.water_rows(),
            strat.water_cols()
        );
        let mut grids = GridSystem::generate(config.world.cols, config.world.rows, seed);
        if let Some(env) = &config.world.initial_environment {
            grids.apply_initial_environment(env);
        }
        if config.world.execution_mode.maintains_baseline() {
            regeneration::maintain_baseline(&mut grids, &strat, &config);
        }
        grids.sanitize(&strat);
        let dynamics = DynamicsManager::new(&config, &strat);

        let founders = config
            .world
            .execution_mode
            .founder_count(config.world.initial_population);
        let mut cells = Vec::with_capacity(founders);
        for _ in 0..founders {
            let (x, y) = founder_position(&config, &strat, &dynamics, &mut rng);
            let genome = DnaFactory::create_founder(&config, &mut rng);
            cells.push(create_cell(x, y, genome, None, &config, &mut rng));
        }

        tracing::info!(
            seed = seed,
            cols = config.world.cols,
            rows = config.world.rows,
            vents = dynamics.vents.vents.len(),
            founders = founders,
            mode = ?config.world.execution_mode,
            fingerprint = %config.fingerprint(),
            "World built"
        );

        Ok(Self {
            config,
            grids,
            strat,
            dynamics,
            cells,
            governor: GameGovernor::new(),
            stability: StabilityTracker::new(),
            seed,
            frame: 0,
            rng,
        })
    }

    /// Advances the world by one frame and returns what happened.
    pub fn tick(&mut self) -> anyhow::Result<Vec<OceanEvent>> {
        let frame = self.frame;
        let mode = self.config.world.execution_mode;

        let mut events = self.dynamics.update(
            &mut self.grids,
            &self.strat,
            &self.config,
            &mut self.rng,
            frame,
        );

        // Offspring born this frame do not count toward this frame's cap.
        let population = self.cells.len();
        events.extend(
            self.governor
                .update(frame, population, mode, &self.config.governor),
        );
        let reproduction_allowed = self.governor.can_reproduce(mode);
        let stability = self.stability.stability();

        let habitat = Habitat {
            strat: &self.strat,
            vents: &self.dynamics.vents,
            config: &self.config,
        };
        let mut newborns = Vec::new();
        for cell in &mut self.cells {
            update_cell(cell, &mut self.grids, &habitat, &mut self.rng);
            if cell.is_dead()
                || !reproduction_allowed
                || !can_reproduce(cell, &self.config, &mut self.rng)
            {
                continue;
            }
            let mut ctx = ReproductionContext {
                frame,
                config: &self.config,
                strat: &self.strat,
                stability,
                rng: &mut self.rng,
            };
            let (child, event) = reproduce(cell, &mut ctx);
            events.push(event);
            if let Some(child) = child {
                if !mode.phantom_mitosis() {
                    newborns.push(child);
                }
            }
        }

        let timestamp = Utc::now().to_rfc3339();
        let deaths_before = events.len();
        for cell in self.cells.iter().filter(|c| c.is_dead()) {
            if let Some(cause) = cell.death {
                events.push(OceanEvent::Death {
                    frame,
                    id: cell.id,
                    generation: cell.genome.generation,
                    age: cell.age,
                    cause,
                    x: cell.x,
                    y: cell.y,
                    timestamp: timestamp.clone(),
                });
            }
        }
        let deaths = events.len() - deaths_before;
        self.cells.retain(|c| !c.is_dead());
        let births = newborns.len();
        self.cells.extend(newborns);

        self.stability.record_deaths(deaths);
        self.stability.update(
            frame,
            self.cells.len(),
            &self.grids,
            &self.strat,
            &self.config.stability,
            &mut self.rng,
        );

        if births > 0 || deaths > 0 {
            tracing::debug!(
                frame = frame,
                births = births,
                deaths = deaths,
                population = self.cells.len(),
                "Population changed"
            );
        }
        self.frame += 1;
        Ok(events)
    }

    /// Feeds a measured wall-clock frame duration to the governor.
    pub fn record_frame_time(&mut self, duration: Duration) {
        self.governor
            .record_frame_time(duration.as_secs_f64(), &self.config.governor);
    }

    /// Adds an externally built cell to the population.
    pub fn add_cell(&mut self, cell: Cell) {
        self.cells.push(cell);
    }

    #[must_use]
    pub fn population(&self) -> usize {
        self.cells.len()
    }

    #[must_use]
    pub fn frame(&self) -> u64 {
        self.frame
    }

    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Every channel at a world position.
    #[must_use]
    pub fn sample(&self, x: f64, y: f64) -> BTreeMap<&'static str, f64> {
        self.grids.sample(x, y, self.config.world.resolution)
    }

    #[must_use]
    pub fn vent_snapshots(&self) -> Vec<VentSnapshot> {
        self.dynamics.vents.snapshots(&self.config)
    }

    /// Mean and maximum generation of the living population.
    #[must_use]
    pub fn generation_stats(&self) -> (f64, u32) {
        if self.cells.is_empty() {
            return (0.0, 0);
        }
        let total: u64 = self.cells.iter().map(|c| u64::from(c.generation())).sum();
        let max = self.cells.iter().map(Cell::generation).max().unwrap_or(0);
        (total as f64 / self.cells.len() as f64, max)
    }
}

/// Single-cell laboratory runs start beside the first vent; otherwise
/// founders are scattered over the water band.
fn founder_position<R: Rng>(
    config: &AppConfig,
    strat: &Stratification,
    dynamics: &DynamicsManager,
    rng: &mut R,
) -> (f64, f64) {
    let resolution = config.world.resolution;
    let single = config.world.execution_mode.founder_count(usize::MAX) == 1;
    if let (true, Some(vent)) = (single, dynamics.vents.vents.first()) {
        let (x, y) = vent.world_position(resolution);
        return strat.clamp_to_water(x, y - resolution, resolution);
    }
    let x = sample_span(strat.water_start_col, strat.water_end_col, rng) * resolution;
    let y = sample_span(strat.water_start_row, strat.water_end_row, rng) * resolution;
    strat.clamp_to_water(x, y, resolution)
}

fn sample_span<R: Rng>(start: usize, end: usize, rng: &mut R) -> f64 {
    if end <= start {
        return start as f64;
    }
    rng.gen_range(start as f64..end as f64)
}
