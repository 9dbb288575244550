pub mod macros;

use ocean_core::cell::create_cell;
use ocean_core::config::ExecutionMode;
use ocean_core::genome::DnaFactory;
use ocean_core::{AppConfig, SimulationContext};
use ocean_data::{Cell, GridChannel, MetabolismPathway, ResourcePools};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// A small seeded world with no founders unless asked for.
#[allow(dead_code)]
pub struct ContextBuilder {
    config: AppConfig,
    cells: Vec<CellBuilder>,
    fills: Vec<(GridChannel, f64)>,
}

#[allow(dead_code)]
impl ContextBuilder {
    pub fn new() -> Self {
        let mut config = AppConfig::default();
        config.world.cols = 40;
        config.world.rows = 30;
        config.world.seed = Some(42);
        config.world.initial_population = 0;
        Self {
            config,
            cells: Vec::new(),
            fills: Vec::new(),
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.config.world.seed = Some(seed);
        self
    }

    pub fn with_mode(mut self, mode: ExecutionMode) -> Self {
        self.config.world.execution_mode = mode;
        self
    }

    pub fn with_population(mut self, count: usize) -> Self {
        self.config.world.initial_population = count;
        self
    }

    pub fn with_config<F>(mut self, modifier: F) -> Self
    where
        F: FnOnce(&mut AppConfig),
    {
        modifier(&mut self.config);
        self
    }

    pub fn with_cell(mut self, cell: CellBuilder) -> Self {
        self.cells.push(cell);
        self
    }

    /// Overwrites a whole channel after the world is built.
    pub fn with_uniform(mut self, channel: GridChannel, value: f64) -> Self {
        self.fills.push((channel, value));
        self
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn build(self) -> SimulationContext {
        let mut ctx = SimulationContext::new(self.config).expect("test config is valid");
        for (channel, value) in self.fills {
            ctx.grids.grid_mut(channel).fill(value);
        }
        ctx.grids.sanitize(&ctx.strat);
        for builder in self.cells {
            let cell = builder.build(&ctx.config);
            ctx.add_cell(cell);
        }
        ctx
    }
}

/// A single founder-derived cell with explicit pools.
#[allow(dead_code)]
pub struct CellBuilder {
    x: f64,
    y: f64,
    seed: u64,
    pathway: Option<MetabolismPathway>,
    pools: Option<ResourcePools>,
    max_resources: Option<f64>,
}

#[allow(dead_code)]
impl CellBuilder {
    pub fn new() -> Self {
        Self {
            x: 200.0,
            y: 150.0,
            seed: 7,
            pathway: None,
            pools: None,
            max_resources: None,
        }
    }

    pub fn at(mut self, x: f64, y: f64) -> Self {
        self.x = x;
        self.y = y;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_pathway(mut self, pathway: MetabolismPathway) -> Self {
        self.pathway = Some(pathway);
        self
    }

    pub fn with_pools(mut self, energy: f64, oxygen: f64, nitrogen: f64, phosphorus: f64) -> Self {
        self.pools = Some(ResourcePools {
            energy,
            oxygen,
            nitrogen,
            phosphorus,
        });
        self
    }

    pub fn with_max_resources(mut self, max: f64) -> Self {
        self.max_resources = Some(max);
        self
    }

    pub fn build(self, config: &AppConfig) -> Cell {
        let mut rng = ChaCha8Rng::seed_from_u64(self.seed);
        let genome = DnaFactory::create_founder(config, &mut rng);
        let mut cell = create_cell(self.x, self.y, genome, None, config, &mut rng);
        if let Some(pathway) = self.pathway {
            cell.genome.metabolism_type = pathway;
        }
        if let Some(max) = self.max_resources {
            cell.max_resources = max;
        }
        if let Some(pools) = self.pools {
            cell.pools = pools;
        }
        cell
    }
}
