use super::chemistry::ChemicalTable;
use serde::{Deserialize, Serialize};

/// Identifier of a vent archetype.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VentTypeId {
    #[default]
    Alkaline,
    BlackSmoker,
    Diffuse,
    ColdSeep,
}

impl VentTypeId {
    pub const ALL: [VentTypeId; 4] = [
        VentTypeId::Alkaline,
        VentTypeId::BlackSmoker,
        VentTypeId::Diffuse,
        VentTypeId::ColdSeep,
    ];

    /// Resolves a scenario id. Unknown ids fall back to `Alkaline`.
    #[must_use]
    pub fn from_id(id: &str) -> Self {
        match id.trim().to_ascii_uppercase().replace(['-', ' '], "_").as_str() {
            "BLACK_SMOKER" | "BLACKSMOKER" => VentTypeId::BlackSmoker,
            "DIFFUSE" => VentTypeId::Diffuse,
            "COLD_SEEP" | "COLDSEEP" => VentTypeId::ColdSeep,
            _ => VentTypeId::Alkaline,
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            VentTypeId::Alkaline => "ALKALINE",
            VentTypeId::BlackSmoker => "BLACK_SMOKER",
            VentTypeId::Diffuse => "DIFFUSE",
            VentTypeId::ColdSeep => "COLD_SEEP",
        }
    }
}

/// Lifecycle phase of a vent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VentPhase {
    #[default]
    Active,
    Waning,
    Dormant,
    Extinct,
}

impl VentPhase {
    /// Output multiplier applied to injected flux.
    #[must_use]
    pub fn multiplier(self) -> f64 {
        match self {
            VentPhase::Active => 1.0,
            VentPhase::Waning => 0.5,
            VentPhase::Dormant | VentPhase::Extinct => 0.0,
        }
    }

    #[must_use]
    pub fn is_active(self) -> bool {
        matches!(self, VentPhase::Active | VentPhase::Waning)
    }
}

/// Whether the vent sits under water or is exposed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VentContext {
    #[default]
    Submarine,
    Subaerial,
}

/// How a vent's column is resolved at world build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PositionMode {
    #[default]
    Explicit,
    Center,
}

/// Read-only lifecycle view.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LifecycleSnapshot {
    pub phase: VentPhase,
    pub age: u64,
    pub max_age: u64,
    pub progress: f64,
    pub is_active: bool,
}

/// Read-only vent state exposed to rendering and logging collaborators.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VentSnapshot {
    pub vent_type: VentTypeId,
    pub x: usize,
    pub y: usize,
    pub width: usize,
    pub intensity: f64,
    pub lifecycle: Option<LifecycleSnapshot>,
    /// Current per-chemical flux, before accumulation clamping.
    pub output: ChemicalTable,
    pub ph: f64,
    pub redox: f64,
    pub color: [u8; 3],
}

/// Stochastic geological events that reshape the vent field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GeologicalEventKind {
    Earthquake,
    VolcanicSurge,
    Reactivation,
    Cooling,
}
