//! Configuration management for simulation parameters.
//!
//! Every tunable constant of the ocean lives in one immutable [`AppConfig`]
//! snapshot. It is built once, validated, and handed to
//! [`SimulationContext::new`](crate::context::SimulationContext::new);
//! nothing in the engine reads configuration ambiently.
//!
//! ## Example `ocean.toml`
//!
//! ```toml
//! [world]
//! cols = 128
//! rows = 72
//! seed = 42
//! execution_mode = "Production"
//!
//! [[vents]]
//! vent_type = "BLACK_SMOKER"
//! x = 40
//! width = 5
//!
//! [diffusion]
//! iterations = 2
//! ```

use ocean_data::{Chemical, ChemicalTable, GridChannel, PositionMode, VentContext, VentTypeId};
use serde::{Deserialize, Serialize};

/// Spread of founder traits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum VariabilityLevel {
    None,
    Medium,
    #[default]
    High,
}

/// Strength of size or color trade-offs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum EvolutionLevel {
    None,
    #[default]
    Medium,
    High,
}

/// Size trade-off table of an [`EvolutionLevel`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SizeProfile {
    pub storage_multiplier: f64,
    pub metabolic_multiplier: f64,
    pub movement_penalty: f64,
    pub mutation_range: f64,
}

/// Pigment trade-off table of an [`EvolutionLevel`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorProfile {
    pub light_absorption: f64,
    pub pigment_cost: f64,
    pub mutation_range: f64,
}

impl EvolutionLevel {
    #[must_use]
    pub fn size_profile(self) -> SizeProfile {
        let (storage_multiplier, metabolic_multiplier, movement_penalty, mutation_range) =
            match self {
                EvolutionLevel::None => (1.0, 1.0, 1.0, 0.0),
                EvolutionLevel::Medium => (1.5, 1.3, 0.7, 2.0),
                EvolutionLevel::High => (2.0, 1.6, 0.5, 3.0),
            };
        SizeProfile {
            storage_multiplier,
            metabolic_multiplier,
            movement_penalty,
            mutation_range,
        }
    }

    #[must_use]
    pub fn color_profile(self) -> ColorProfile {
        let (light_absorption, pigment_cost, mutation_range) = match self {
            EvolutionLevel::None => (1.0, 0.0, 0.0),
            EvolutionLevel::Medium => (1.3, 0.01, 20.0),
            EvolutionLevel::High => (1.8, 0.03, 40.0),
        };
        ColorProfile {
            light_absorption,
            pigment_cost,
            mutation_range,
        }
    }
}

/// Run profile. Changes caps, reproduction speed and laboratory behaviour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ExecutionMode {
    #[default]
    Development,
    Production,
    SingleCell,
    SingleVent,
}

impl ExecutionMode {
    #[must_use]
    pub fn reproduction_multiplier(self) -> f64 {
        match self {
            ExecutionMode::Development => 2.0,
            _ => 1.0,
        }
    }

    #[must_use]
    pub fn population_cap(self, governor: &GovernorConfig) -> usize {
        match self {
            ExecutionMode::Development => governor.dev_population_cap,
            _ => governor.prod_population_cap,
        }
    }

    /// Offspring are logged and discarded instead of joining the population.
    #[must_use]
    pub fn phantom_mitosis(self) -> bool {
        self == ExecutionMode::SingleVent
    }

    /// The water band is reset to laboratory baseline every tick.
    #[must_use]
    pub fn maintains_baseline(self) -> bool {
        self == ExecutionMode::SingleVent
    }

    #[must_use]
    pub fn restricts_to_vents(self) -> bool {
        self == ExecutionMode::SingleVent
    }

    #[must_use]
    pub fn founder_count(self, configured: usize) -> usize {
        match self {
            ExecutionMode::SingleCell | ExecutionMode::SingleVent => 1,
            _ => configured,
        }
    }
}

/// Movement damping per stratification zone.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(default)]
pub struct ViscosityConfig {
    pub atmosphere: f64,
    pub water: f64,
    pub sediment: f64,
}

impl Default for ViscosityConfig {
    fn default() -> Self {
        Self {
            atmosphere: 0.99,
            water: 0.95,
            sediment: 0.60,
        }
    }
}

/// Constant fill for the water band at world build. Unset channels keep their profile.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct InitialEnvironment {
    pub h2: Option<f64>,
    pub co2: Option<f64>,
    pub oxygen: Option<f64>,
    pub nitrogen: Option<f64>,
    pub phosphorus: Option<f64>,
    pub temperature: Option<f64>,
    pub light: Option<f64>,
}

impl InitialEnvironment {
    pub fn entries(&self) -> impl Iterator<Item = (GridChannel, f64)> + '_ {
        [
            (GridChannel::H2, self.h2),
            (GridChannel::Co2, self.co2),
            (GridChannel::Oxygen, self.oxygen),
            (GridChannel::Nitrogen, self.nitrogen),
            (GridChannel::Phosphorus, self.phosphorus),
            (GridChannel::Temperature, self.temperature),
            (GridChannel::Light, self.light),
        ]
        .into_iter()
        .filter_map(|(channel, value)| value.map(|v| (channel, v)))
    }
}

/// World geometry and run-level switches.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(default)]
pub struct WorldConfig {
    pub cols: usize,
    pub rows: usize,
    /// World units per grid cell.
    pub resolution: f64,
    pub atmosphere_depth: f64,
    pub sediment_depth: f64,
    pub restrict_to_vents: bool,
    pub seed: Option<u64>,
    pub initial_population: usize,
    pub variability_level: VariabilityLevel,
    pub color_variability_level: VariabilityLevel,
    pub execution_mode: ExecutionMode,
    /// Disables the abiotic iron-oxidation oxygen sink.
    pub progressive_oxygen: bool,
    pub initial_environment: Option<InitialEnvironment>,
    pub viscosity: ViscosityConfig,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            cols: 128,
            rows: 72,
            resolution: 10.0,
            atmosphere_depth: 0.15,
            sediment_depth: 0.10,
            restrict_to_vents: false,
            seed: None,
            initial_population: 20,
            variability_level: VariabilityLevel::High,
            color_variability_level: VariabilityLevel::Medium,
            execution_mode: ExecutionMode::Development,
            progressive_oxygen: false,
            initial_environment: None,
            viscosity: ViscosityConfig::default(),
        }
    }
}

impl WorldConfig {
    #[must_use]
    pub fn width(&self) -> f64 {
        self.cols as f64 * self.resolution
    }

    #[must_use]
    pub fn height(&self) -> f64 {
        self.rows as f64 * self.resolution
    }
}

/// One vent in the scenario list.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(default)]
pub struct VentConfig {
    pub x: Option<usize>,
    pub y: Option<usize>,
    pub width: usize,
    pub intensity: f64,
    #[serde(alias = "type", alias = "sub_type")]
    pub vent_type: String,
    pub position_mode: PositionMode,
    pub context: VentContext,
    /// Attach an ageing lifecycle to the vent.
    pub lifecycle: bool,
}

impl Default for VentConfig {
    fn default() -> Self {
        Self {
            x: None,
            y: None,
            width: 3,
            intensity: 1.0,
            vent_type: VentTypeId::Alkaline.as_str().to_string(),
            position_mode: PositionMode::Center,
            context: VentContext::Submarine,
            lifecycle: true,
        }
    }
}

/// Named per-chemical values, readable in TOML.
#[derive(Serialize, Deserialize, Debug, Clone, Copy)]
pub struct ChemicalValues {
    pub h2: f64,
    pub co2: f64,
    pub fe2: f64,
    pub ch4: f64,
    pub h2s: f64,
    pub nh3: f64,
}

impl ChemicalValues {
    #[must_use]
    pub fn to_table(&self) -> ChemicalTable {
        ChemicalTable::new(self.h2, self.co2, self.fe2, self.ch4, self.h2s, self.nh3)
    }
}

/// Shared vent-field parameters.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(default)]
pub struct VentSystemConfig {
    pub global_multiplier: f64,
    pub base_flux: ChemicalValues,
    pub max_accumulation: ChemicalValues,
    pub mixing_enabled: bool,
    /// Spread injection over the decay-weighted plume instead of the source row.
    pub plume_dispersal: bool,
    pub events_enabled: bool,
    pub surge_duration: u64,
    pub event_history: usize,
}

impl Default for VentSystemConfig {
    fn default() -> Self {
        Self {
            global_multiplier: 1.0,
            base_flux: ChemicalValues {
                h2: 5.0,
                co2: 2.0,
                fe2: 1.0,
                ch4: 1.5,
                h2s: 2.0,
                nh3: 1.0,
            },
            max_accumulation: ChemicalValues {
                h2: 250.0,
                co2: 150.0,
                fe2: 1000.0,
                ch4: 200.0,
                h2s: 300.0,
                nh3: 150.0,
            },
            mixing_enabled: true,
            plume_dispersal: false,
            events_enabled: true,
            surge_duration: 300,
            event_history: 50,
        }
    }
}

/// Scenario flux multipliers. Absent entries are 1.0.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(default)]
pub struct FluxMultipliers {
    pub h2: f64,
    pub co2: f64,
    pub fe2: f64,
    pub ch4: f64,
    pub h2s: f64,
    pub nh3: f64,
    pub oxygen: f64,
    pub nitrogen: f64,
    pub phosphorus: f64,
    pub light: f64,
    pub temperature: f64,
}

impl Default for FluxMultipliers {
    fn default() -> Self {
        Self {
            h2: 1.0,
            co2: 1.0,
            fe2: 1.0,
            ch4: 1.0,
            h2s: 1.0,
            nh3: 1.0,
            oxygen: 1.0,
            nitrogen: 1.0,
            phosphorus: 1.0,
            light: 1.0,
            temperature: 1.0,
        }
    }
}

impl FluxMultipliers {
    #[must_use]
    pub fn chemical(&self, chemical: Chemical) -> f64 {
        match chemical {
            Chemical::H2 => self.h2,
            Chemical::Co2 => self.co2,
            Chemical::Fe2 => self.fe2,
            Chemical::Ch4 => self.ch4,
            Chemical::H2s => self.h2s,
            Chemical::Nh3 => self.nh3,
        }
    }

    #[must_use]
    pub fn channel(&self, channel: GridChannel) -> f64 {
        match channel {
            GridChannel::H2 => self.h2,
            GridChannel::Co2 => self.co2,
            GridChannel::Fe2 => self.fe2,
            GridChannel::Ch4 => self.ch4,
            GridChannel::H2s => self.h2s,
            GridChannel::Nh3 => self.nh3,
            GridChannel::Oxygen => self.oxygen,
            GridChannel::Nitrogen => self.nitrogen,
            GridChannel::Phosphorus => self.phosphorus,
            GridChannel::Light => self.light,
            GridChannel::Temperature => self.temperature,
            GridChannel::Uv | GridChannel::Ph => 1.0,
        }
    }
}

/// Relaxation rate per stratification zone.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(default)]
pub struct DiffusionRates {
    pub atmosphere: f64,
    pub water: f64,
    pub sediment: f64,
}

impl Default for DiffusionRates {
    fn default() -> Self {
        Self {
            atmosphere: 0.25,
            water: 0.1,
            sediment: 0.005,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(default)]
pub struct DiffusionConfig {
    pub enabled: bool,
    pub iterations: usize,
    pub epsilon: f64,
    pub rates: DiffusionRates,
    pub channels: Vec<GridChannel>,
}

impl Default for DiffusionConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            iterations: 1,
            epsilon: 0.001,
            rates: DiffusionRates::default(),
            channels: vec![
                GridChannel::H2,
                GridChannel::Oxygen,
                GridChannel::Co2,
                GridChannel::Nitrogen,
                GridChannel::Phosphorus,
                GridChannel::Fe2,
            ],
        }
    }
}

/// Infinite atmosphere and open-ocean reservoirs feeding the grid boundary.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(default)]
pub struct ReservoirConfig {
    pub atmospheric_o2: f64,
    pub atmospheric_n2: f64,
    pub atmospheric_co2: f64,
    pub atmosphere_o2_rate: f64,
    pub atmosphere_n2_rate: f64,
    pub atmosphere_co2_rate: f64,
    pub oceanic_phosphorus: f64,
    pub oceanic_nitrogen: f64,
    pub oceanic_fe2: f64,
    pub oceanic_o2: f64,
    pub ocean_phosphorus_rate: f64,
    pub ocean_nitrogen_rate: f64,
    pub ocean_fe2_rate: f64,
    pub ocean_o2_rate: f64,
}

impl Default for ReservoirConfig {
    fn default() -> Self {
        Self {
            atmospheric_o2: 0.1,
            atmospheric_n2: 1000.0,
            atmospheric_co2: 500.0,
            atmosphere_o2_rate: 0.05,
            atmosphere_n2_rate: 0.03,
            atmosphere_co2_rate: 0.08,
            oceanic_phosphorus: 50.0,
            oceanic_nitrogen: 50.0,
            oceanic_fe2: 100.0,
            oceanic_o2: 5.0,
            ocean_phosphorus_rate: 0.02,
            ocean_nitrogen_rate: 0.04,
            ocean_fe2_rate: 0.03,
            ocean_o2_rate: 0.04,
        }
    }
}

/// Laboratory baseline the water band is held at in single-vent mode.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(default)]
pub struct BaselineConfig {
    pub h2: f64,
    pub co2: f64,
    pub phosphorus: f64,
    pub nitrogen: f64,
    pub oxygen: f64,
    pub temperature: f64,
    pub light: f64,
}

impl Default for BaselineConfig {
    fn default() -> Self {
        Self {
            h2: 150.0,
            co2: 100.0,
            phosphorus: 80.0,
            nitrogen: 50.0,
            oxygen: 0.0,
            temperature: 70.0,
            light: 0.0,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(default)]
pub struct RegenerationConfig {
    pub light_max: f64,
    pub light_step: f64,
    pub photolysis_rate: f64,
    pub oxygen_grid_max: f64,
    pub nitrogen_flux: f64,
    pub nitrogen_max: f64,
    pub phosphorus_flux: f64,
    pub phosphorus_max: f64,
    pub h2_production: f64,
    pub h2_max: f64,
    pub fe2_oxidation_rate: f64,
    pub fe2_depletion_threshold: f64,
    pub oxidation_o2_threshold: f64,
    pub environmental_decay: f64,
    pub baseline: BaselineConfig,
}

impl Default for RegenerationConfig {
    fn default() -> Self {
        Self {
            light_max: 100.0,
            light_step: 0.5,
            photolysis_rate: 0.02,
            oxygen_grid_max: 1.0,
            nitrogen_flux: 0.5,
            nitrogen_max: 200.0,
            phosphorus_flux: 0.5,
            phosphorus_max: 200.0,
            h2_production: 20.0,
            h2_max: 250.0,
            fe2_oxidation_rate: 0.015,
            fe2_depletion_threshold: 10.0,
            oxidation_o2_threshold: 5.0,
            environmental_decay: 0.999,
            baseline: BaselineConfig::default(),
        }
    }
}

/// Per-tick metabolic costs and founder resource pools.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(default)]
pub struct MetabolismConfig {
    pub base_cost: f64,
    pub oxygen_cost: f64,
    pub luca_multiplier: f64,
    pub fermentation_multiplier: f64,
    pub chemosynthesis_multiplier: f64,
    pub fermentation_o2_toxicity: f64,
    pub fermentation_stress: f64,
    pub chemosynthesis_stress: f64,
    pub initial_energy: f64,
    pub initial_oxygen: f64,
    pub initial_nitrogen: f64,
    pub initial_phosphorus: f64,
}

impl Default for MetabolismConfig {
    fn default() -> Self {
        Self {
            base_cost: 0.08,
            oxygen_cost: 0.02,
            luca_multiplier: 1.0,
            fermentation_multiplier: 1.0,
            chemosynthesis_multiplier: 1.0,
            fermentation_o2_toxicity: 70.0,
            fermentation_stress: 1.5,
            chemosynthesis_stress: 1.3,
            initial_energy: 500.0,
            initial_oxygen: 0.0,
            initial_nitrogen: 50.0,
            initial_phosphorus: 50.0,
        }
    }
}

/// Binary fission admission and cost parameters.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(default)]
pub struct ReproductionConfig {
    pub threshold: f64,
    pub phosphorus_threshold: f64,
    pub luca_nitrogen_threshold: f64,
    pub chance: f64,
    pub cooldown: u32,
    pub max_damage: f64,
    /// Skip the oxygen gate for anaerobic (luca) cells.
    pub luca_oxygen_exempt: bool,
}

impl Default for ReproductionConfig {
    fn default() -> Self {
        Self {
            threshold: 0.40,
            phosphorus_threshold: 0.40,
            luca_nitrogen_threshold: 0.3,
            chance: 0.01,
            cooldown: 300,
            max_damage: 20.0,
            luca_oxygen_exempt: true,
        }
    }
}

/// Trait perturbation ranges and bounds.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(default)]
pub struct MutationConfig {
    pub flagella_range: f64,
    pub flagella_max: f64,
    pub size_min: f64,
    pub size_max: f64,
    pub efficiency_range: f64,
    pub efficiency_min: f64,
    pub efficiency_max: f64,
    pub storage_range: f64,
    pub storage_min: f64,
    pub storage_max: f64,
    pub dna_repair_range: f64,
    pub dna_repair_min: f64,
    pub dna_repair_max: f64,
    pub sod_range: f64,
    pub thermal_optimum_range: f64,
    pub temperature_min: f64,
    pub temperature_max: f64,
    pub thermal_tolerance_range: f64,
    pub tolerance_min: f64,
    pub tolerance_max: f64,
    pub rate_change: f64,
    pub rate_min: f64,
    pub rate_max: f64,
    pub stability_enabled: bool,
    pub pressure_strength: f64,
    pub pressure_min: f64,
    pub pressure_max: f64,
    pub metabolic_drift: f64,
    pub organelle_threshold: f64,
    pub cross_metabolism_chance: f64,
    pub cross_metabolism_mortality: f64,
}

impl Default for MutationConfig {
    fn default() -> Self {
        Self {
            flagella_range: 0.3,
            flagella_max: 6.0,
            size_min: 5.0,
            size_max: 40.0,
            efficiency_range: 0.1,
            efficiency_min: 0.5,
            efficiency_max: 2.0,
            storage_range: 10.0,
            storage_min: 50.0,
            storage_max: 300.0,
            dna_repair_range: 0.05,
            dna_repair_min: 0.1,
            dna_repair_max: 1.0,
            sod_range: 0.1,
            thermal_optimum_range: 3.0,
            temperature_min: 50.0,
            temperature_max: 80.0,
            thermal_tolerance_range: 1.0,
            tolerance_min: 3.0,
            tolerance_max: 20.0,
            rate_change: 0.02,
            rate_min: 0.01,
            rate_max: 0.3,
            stability_enabled: true,
            pressure_strength: 0.1,
            pressure_min: -0.01,
            pressure_max: 0.02,
            metabolic_drift: 0.005,
            organelle_threshold: 1.0,
            cross_metabolism_chance: 0.00001,
            cross_metabolism_mortality: 0.8,
        }
    }
}

/// Physiology modifiers: thermal, membrane, pigment, UV, oxygen, repair, motion.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(default)]
pub struct CellularConfig {
    pub thermal_stress_multiplier: f64,
    pub size_evolution: EvolutionLevel,
    pub color_evolution: EvolutionLevel,
    pub size_reference: f64,
    pub min_movement_factor: f64,
    pub membrane_permeability: f64,
    pub membrane_leak_rate: f64,
    pub membrane_co2_diffusion: f64,
    pub internal_ph: f64,
    pub pmf_energy_yield: f64,
    pub chemotaxis_strength: f64,
    pub membrane_sensitivity: f64,
    pub brownian_strength: f64,
    pub speed_multiplier: f64,
    pub flagella_movement_cost: f64,
    pub uv_enabled: bool,
    pub uv_surface_intensity: f64,
    pub uv_damage_chance_max: f64,
    pub uv_max_damage: f64,
    pub oxygen_safe_threshold: f64,
    pub oxidative_damage_rate: f64,
    pub sod_synthesis_rate: f64,
    pub base_repair_speed: f64,
    pub repair_energy_cost: f64,
    pub max_structural_damage: f64,
}

impl Default for CellularConfig {
    fn default() -> Self {
        Self {
            thermal_stress_multiplier: 0.005,
            size_evolution: EvolutionLevel::Medium,
            color_evolution: EvolutionLevel::Medium,
            size_reference: 15.0,
            min_movement_factor: 0.3,
            membrane_permeability: 0.15,
            membrane_leak_rate: 0.02,
            membrane_co2_diffusion: 0.1,
            internal_ph: 8.5,
            pmf_energy_yield: 0.05,
            chemotaxis_strength: 0.5,
            membrane_sensitivity: 0.1,
            brownian_strength: 0.1,
            speed_multiplier: 1.0,
            flagella_movement_cost: 0.1,
            uv_enabled: true,
            uv_surface_intensity: 100.0,
            uv_damage_chance_max: 0.01,
            uv_max_damage: 5.0,
            oxygen_safe_threshold: 10.0,
            oxidative_damage_rate: 0.01,
            sod_synthesis_rate: 0.05,
            base_repair_speed: 0.2,
            repair_energy_cost: 0.5,
            max_structural_damage: 100.0,
        }
    }
}

/// Closed-loop reproduction throttle.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(default)]
pub struct GovernorConfig {
    pub fps_check_interval: u64,
    pub fps_history: usize,
    pub min_fps: f64,
    pub dev_population_cap: usize,
    pub prod_population_cap: usize,
}

impl Default for GovernorConfig {
    fn default() -> Self {
        Self {
            fps_check_interval: 60,
            fps_history: 60,
            min_fps: 30.0,
            dev_population_cap: 500,
            prod_population_cap: 2000,
        }
    }
}

/// Environmental stability estimate feeding mutation pressure.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(default)]
pub struct StabilityConfig {
    pub enabled: bool,
    pub interval: u64,
    pub history_length: usize,
    pub resource_samples: usize,
}

impl Default for StabilityConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            interval: 100,
            history_length: 50,
            resource_samples: 10,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(default)]
pub struct AppConfig {
    pub world: WorldConfig,
    pub vents: Vec<VentConfig>,
    pub vent_system: VentSystemConfig,
    pub flux: FluxMultipliers,
    pub diffusion: DiffusionConfig,
    pub reservoirs: ReservoirConfig,
    pub regeneration: RegenerationConfig,
    pub metabolism: MetabolismConfig,
    pub reproduction: ReproductionConfig,
    pub mutation: MutationConfig,
    pub cellular: CellularConfig,
    pub governor: GovernorConfig,
    pub stability: StabilityConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            world: WorldConfig::default(),
            vents: vec![
                VentConfig::default(),
                VentConfig {
                    x: Some(32),
                    width: 3,
                    vent_type: VentTypeId::BlackSmoker.as_str().to_string(),
                    position_mode: PositionMode::Explicit,
                    ..Default::default()
                },
            ],
            vent_system: VentSystemConfig::default(),
            flux: FluxMultipliers::default(),
            diffusion: DiffusionConfig::default(),
            reservoirs: ReservoirConfig::default(),
            regeneration: RegenerationConfig::default(),
            metabolism: MetabolismConfig::default(),
            reproduction: ReproductionConfig::default(),
            mutation: MutationConfig::default(),
            cellular: CellularConfig::default(),
            governor: GovernorConfig::default(),
            stability: StabilityConfig::default(),
        }
    }
}

impl AppConfig {
    /// Validates all configuration parameters.
    ///
    /// Returns the first violated rule as an error.
    pub fn validate(&self) -> anyhow::Result<()> {
        // World
        anyhow::ensure!(self.world.cols > 0, "Grid cols must be positive");
        anyhow::ensure!(self.world.cols <= 4096, "Grid cols too large (max 4096)");
        anyhow::ensure!(self.world.rows >= 3, "Grid rows must be at least 3");
        anyhow::ensure!(self.world.rows <= 4096, "Grid rows too large (max 4096)");
        anyhow::ensure!(self.world.resolution > 0.0, "Resolution must be positive");
        anyhow::ensure!(
            (0.0..1.0).contains(&self.world.atmosphere_depth),
            "Atmosphere depth must be in [0.0, 1.0)"
        );
        anyhow::ensure!(
            (0.0..1.0).contains(&self.world.sediment_depth),
            "Sediment depth must be in [0.0, 1.0)"
        );
        anyhow::ensure!(
            self.world.atmosphere_depth + self.world.sediment_depth < 1.0,
            "Atmosphere and sediment leave no water band"
        );
        anyhow::ensure!(
            self.world.initial_population <= 100_000,
            "Initial population too large (max 100000)"
        );

        // Vents
        for vent in &self.vents {
            anyhow::ensure!(vent.width > 0, "Vent width must be positive");
            anyhow::ensure!(
                (0.0..=3.0).contains(&vent.intensity),
                "Vent intensity must be in [0.0, 3.0]"
            );
        }
        anyhow::ensure!(
            self.vent_system.global_multiplier >= 0.0,
            "Global vent multiplier must be non-negative"
        );

        // Diffusion
        anyhow::ensure!(
            self.diffusion.iterations <= 100,
            "Diffusion iterations too large (max 100)"
        );
        anyhow::ensure!(self.diffusion.epsilon >= 0.0, "Epsilon must be non-negative");
        for rate in [
            self.diffusion.rates.atmosphere,
            self.diffusion.rates.water,
            self.diffusion.rates.sediment,
        ] {
            anyhow::ensure!(
                (0.0..=1.0).contains(&rate),
                "Diffusion rates must be in [0.0, 1.0]"
            );
        }

        // Reproduction
        for threshold in [
            self.reproduction.threshold,
            self.reproduction.phosphorus_threshold,
            self.reproduction.luca_nitrogen_threshold,
            self.reproduction.chance,
        ] {
            anyhow::ensure!(
                (0.0..=1.0).contains(&threshold),
                "Reproduction thresholds and chance must be in [0.0, 1.0]"
            );
        }

        // Mutation
        anyhow::ensure!(
            self.mutation.rate_min <= self.mutation.rate_max,
            "Mutation rate bounds are inverted"
        );
        anyhow::ensure!(
            self.mutation.size_min > 0.0 && self.mutation.size_min <= self.mutation.size_max,
            "Size bounds must be positive and ordered"
        );
        anyhow::ensure!(
            (0.0..=1.0).contains(&self.mutation.cross_metabolism_mortality),
            "Cross-metabolism mortality must be in [0.0, 1.0]"
        );

        // Cellular
        anyhow::ensure!(self.cellular.size_reference > 0.0, "Size reference must be positive");
        anyhow::ensure!(
            self.cellular.thermal_stress_multiplier >= 0.0,
            "Thermal stress multiplier must be non-negative"
        );
        anyhow::ensure!(
            self.cellular.max_structural_damage > 0.0,
            "Max structural damage must be positive"
        );

        // Governor
        anyhow::ensure!(
            self.governor.fps_check_interval > 0,
            "FPS check interval must be positive"
        );
        anyhow::ensure!(self.governor.fps_history > 0, "FPS history must be positive");

        anyhow::ensure!(self.stability.interval > 0, "Stability interval must be positive");

        Ok(())
    }

    /// Parses and validates configuration from TOML text.
    pub fn from_toml(content: &str) -> anyhow::Result<Self> {
        let config = toml::from_str::<Self>(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads `path` if it exists, otherwise falls back to defaults.
    pub fn load(path: impl AsRef<std::path::Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            tracing::info!(path = %path.display(), "No config file, using defaults");
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        let config = Self::from_toml(&content)
            .map_err(|e| anyhow::anyhow!("{}: {e}", path.display()))?;
        tracing::info!(path = %path.display(), "Config loaded");
        Ok(config)
    }

    /// Hash of the physics-relevant sections, for comparing runs.
    #[must_use]
    pub fn fingerprint(&self) -> String {
        use sha2::{Digest, Sha256};
        let mut hasher = Sha256::new();
        hasher.update(format!("{:?}", self.world).as_bytes());
        hasher.update(format!("{:?}", self.vents).as_bytes());
        hasher.update(format!("{:?}", self.vent_system).as_bytes());
        hasher.update(format!("{:?}", self.flux).as_bytes());
        hasher.update(format!("{:?}", self.diffusion).as_bytes());
        hasher.update(format!("{:?}", self.metabolism).as_bytes());
        hasher.update(format!("{:?}", self.reproduction).as_bytes());
        hasher.update(format!("{:?}", self.mutation).as_bytes());
        hasher.update(format!("{:?}", self.cellular).as_bytes());
        hex::encode(hasher.finalize())
    }

    /// Mode-adjusted reproduction chance per tick.
    #[must_use]
    pub fn effective_reproduction_chance(&self) -> f64 {
        (self.reproduction.chance * self.world.execution_mode.reproduction_multiplier()).min(1.0)
    }
}
