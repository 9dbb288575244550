use super::cell::DeathCause;
use super::genome::Genome;
use super::vent::{GeologicalEventKind, VentPhase};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Reproduction throttle state of the governor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GovernorStatus {
    #[default]
    Stable,
    LowFpsBraking,
    PopulationLimitReached,
}

/// Events surfaced to external collaborators once per tick. The engine never persists them.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum OceanEvent {
    /// A committed binary fission.
    Reproduction {
        frame: u64,
        parent_id: Uuid,
        child_id: Uuid,
        parent_generation: u32,
        child_dna: Box<Genome>,
        /// Logged then discarded (single-vent laboratory mode).
        phantom: bool,
        timestamp: String,
    },
    /// A division that aborted because the offspring genome was not viable.
    LethalMutation {
        frame: u64,
        parent_id: Uuid,
        parent_generation: u32,
        child_dna: Box<Genome>,
        cause: String,
        timestamp: String,
    },
    Death {
        frame: u64,
        id: Uuid,
        generation: u32,
        age: u64,
        cause: DeathCause,
        x: f64,
        y: f64,
        timestamp: String,
    },
    VentPhaseChange {
        frame: u64,
        vent: usize,
        from: VentPhase,
        to: VentPhase,
    },
    Geological {
        frame: u64,
        kind: GeologicalEventKind,
        vent: Option<usize>,
        timestamp: String,
    },
    GovernorChange {
        frame: u64,
        status: GovernorStatus,
        average_fps: f64,
    },
}

impl OceanEvent {
    #[must_use]
    pub fn frame(&self) -> u64 {
        match self {
            OceanEvent::Reproduction { frame, .. }
            | OceanEvent::LethalMutation { frame, .. }
            | OceanEvent::Death { frame, .. }
            | OceanEvent::VentPhaseChange { frame, .. }
            | OceanEvent::Geological { frame, .. }
            | OceanEvent::GovernorChange { frame, .. } => *frame,
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}
