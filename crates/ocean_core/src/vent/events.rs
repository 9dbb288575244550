//! Rare geological events that reshape the vent field.

use ocean_data::GeologicalEventKind;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

#[derive(Debug, Clone, Serialize, Deserialize)]
struct EventSlot {
    kind: GeologicalEventKind,
    probability: f64,
    min_cooldown: u64,
    cooldown: u64,
}

/// One entry of the event history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeologicalRecord {
    pub kind: GeologicalEventKind,
    pub frame: u64,
    pub vent: Option<usize>,
}

/// Per-tick Bernoulli trials with a cooldown after each firing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeologicalEvents {
    slots: Vec<EventSlot>,
    history: VecDeque<GeologicalRecord>,
    max_history: usize,
}

impl GeologicalEvents {
    #[must_use]
    pub fn new(max_history: usize) -> Self {
        let slot = |kind, probability, min_cooldown| EventSlot {
            kind,
            probability,
            min_cooldown,
            cooldown: 0,
        };
        Self {
            slots: vec![
                slot(GeologicalEventKind::Earthquake, 0.00005, 3000),
                slot(GeologicalEventKind::VolcanicSurge, 0.0001, 2000),
                slot(GeologicalEventKind::Reactivation, 0.0002, 1500),
                slot(GeologicalEventKind::Cooling, 0.0003, 1000),
            ],
            history: VecDeque::new(),
            max_history,
        }
    }

    /// Rolls every event once. Cooling-down events are skipped.
    pub fn roll<R: Rng>(&mut self, rng: &mut R) -> Vec<GeologicalEventKind> {
        let mut fired = Vec::new();
        for slot in &mut self.slots {
            if slot.cooldown > 0 {
                slot.cooldown -= 1;
                continue;
            }
            if rng.gen::<f64>() < slot.probability {
                slot.cooldown = slot.min_cooldown;
                fired.push(slot.kind);
            }
        }
        fired
    }

    pub fn record(&mut self, record: GeologicalRecord) {
        self.history.push_back(record);
        while self.history.len() > self.max_history {
            self.history.pop_front();
        }
    }

    #[must_use]
    pub fn recent(&self, count: usize) -> Vec<GeologicalRecord> {
        let skip = self.history.len().saturating_sub(count);
        self.history.iter().skip(skip).cloned().collect()
    }
}
