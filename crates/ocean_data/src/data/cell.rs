use super::genome::Genome;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Composable cost/effect unit attached to a cell.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Organelle {
    Ribosome,
    Flagellum { level: f64 },
    Hydrogenosome,
    HydrogenaseComplex { level: f64 },
    AtpSynthase { level: f64 },
    ChemosyntheticEnzymes,
}

/// Why a cell stopped living.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeathCause {
    EnergyDepletionStarvation,
    EnergyDepletionRepairBankruptcy,
    OxygenDepletion,
    NitrogenDepletion,
    PhosphorusDepletion,
    StructuralFailureOxidative,
    StructuralFailureUv,
    StructuralFailureAccumulation,
}

impl DeathCause {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            DeathCause::EnergyDepletionStarvation => "energy_depletion_starvation",
            DeathCause::EnergyDepletionRepairBankruptcy => "energy_depletion_repair_bankruptcy",
            DeathCause::OxygenDepletion => "oxygen_depletion",
            DeathCause::NitrogenDepletion => "nitrogen_depletion",
            DeathCause::PhosphorusDepletion => "phosphorus_depletion",
            DeathCause::StructuralFailureOxidative => "structural_failure_oxidative",
            DeathCause::StructuralFailureUv => "structural_failure_uv",
            DeathCause::StructuralFailureAccumulation => "structural_failure_accumulation",
        }
    }
}

/// The four internal resource pools of a cell.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ResourcePools {
    pub energy: f64,
    pub oxygen: f64,
    pub nitrogen: f64,
    pub phosphorus: f64,
}

impl ResourcePools {
    /// Clamps every pool into `[0, max]`.
    pub fn clamp(&mut self, max: f64) {
        self.energy = self.energy.clamp(0.0, max);
        self.oxygen = self.oxygen.clamp(0.0, max);
        self.nitrogen = self.nitrogen.clamp(0.0, max);
        self.phosphorus = self.phosphorus.clamp(0.0, max);
    }

    /// Halves every pool, returning the withdrawn half.
    pub fn split_half(&mut self) -> ResourcePools {
        self.energy *= 0.5;
        self.oxygen *= 0.5;
        self.nitrogen *= 0.5;
        self.phosphorus *= 0.5;
        *self
    }
}

/// An autonomous cell agent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cell {
    pub id: Uuid,
    pub parent_id: Option<Uuid>,
    pub x: f64,
    pub y: f64,
    pub vx: f64,
    pub vy: f64,
    pub genome: Genome,
    pub pools: ResourcePools,
    pub max_resources: f64,
    pub max_speed: f64,
    pub organelles: Vec<Organelle>,
    pub age: u64,
    /// 100 minus structural damage, floored at 0.
    pub health: f64,
    pub structural_damage: f64,
    pub sod_protein: f64,
    pub oxidative_damage_frame: f64,
    pub uv_damage_frame: f64,
    pub uv_mutation_pending: bool,
    pub reproduction_cooldown: u32,
    pub death: Option<DeathCause>,
}

impl Cell {
    #[must_use]
    pub fn is_dead(&self) -> bool {
        self.death.is_some()
    }

    #[must_use]
    pub fn generation(&self) -> u32 {
        self.genome.generation
    }
}
