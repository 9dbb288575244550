//! Vent ageing and phase transitions.
//!
//! Without an activity cycle the phase only moves forward
//! (ACTIVE, WANING, EXTINCT). A cycle toggles ACTIVE and DORMANT.
//! Only `reactivate` goes back from WANING, and nothing leaves EXTINCT.

use super::types::{ActivityCycle, VentType};
use ocean_data::{LifecycleSnapshot, VentPhase};
use serde::{Deserialize, Serialize};

const WANING_FRACTION: f64 = 0.9;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VentLifecycle {
    pub phase: VentPhase,
    pub age: u64,
    pub max_age: u64,
    #[serde(skip)]
    cycle: Option<ActivityCycle>,
}

impl VentLifecycle {
    #[must_use]
    pub fn new(max_age: u64, cycle: Option<ActivityCycle>) -> Self {
        Self {
            phase: VentPhase::Active,
            age: 0,
            max_age,
            cycle,
        }
    }

    #[must_use]
    pub fn for_type(ty: &VentType) -> Self {
        Self::new(ty.max_age, ty.cycle)
    }

    /// Ages the vent one tick. Returns `(from, to)` when the phase changed.
    pub fn update(&mut self) -> Option<(VentPhase, VentPhase)> {
        if self.phase == VentPhase::Extinct {
            return None;
        }
        let before = self.phase;
        self.age += 1;

        if let Some(cycle) = self.cycle {
            if cycle.total() > 0 {
                let position = self.age % cycle.total();
                if position < cycle.active {
                    if self.phase == VentPhase::Dormant {
                        self.phase = VentPhase::Active;
                    }
                } else if self.phase == VentPhase::Active {
                    self.phase = VentPhase::Dormant;
                }
            }
        }

        if self.age as f64 > self.max_age as f64 * WANING_FRACTION
            && self.phase == VentPhase::Active
        {
            self.phase = VentPhase::Waning;
        }
        if self.age >= self.max_age {
            self.phase = VentPhase::Extinct;
        }

        (self.phase != before).then_some((before, self.phase))
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.phase.is_active()
    }

    #[must_use]
    pub fn multiplier(&self) -> f64 {
        self.phase.multiplier()
    }

    /// Forces a phase. Extinct vents stay extinct.
    pub fn set_phase(&mut self, phase: VentPhase) {
        if self.phase != VentPhase::Extinct {
            self.phase = phase;
        }
    }

    /// Revives a dormant or waning vent and resets its age.
    pub fn reactivate(&mut self) -> bool {
        if matches!(self.phase, VentPhase::Dormant | VentPhase::Waning) {
            self.phase = VentPhase::Active;
            self.age = 0;
            true
        } else {
            false
        }
    }

    pub fn extinguish(&mut self) {
        self.phase = VentPhase::Extinct;
    }

    #[must_use]
    pub fn snapshot(&self) -> LifecycleSnapshot {
        LifecycleSnapshot {
            phase: self.phase,
            age: self.age,
            max_age: self.max_age,
            progress: if self.max_age == 0 {
                1.0
            } else {
                self.age as f64 / self.max_age as f64
            },
            is_active: self.is_active(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_waning_then_extinct() {
        let mut lc = VentLifecycle::new(20, None);
        let mut transitions = Vec::new();
        for _ in 0..22 {
            if let Some(t) = lc.update() {
                transitions.push(t);
            }
        }
        assert_eq!(
            transitions,
            vec![
                (VentPhase::Active, VentPhase::Waning),
                (VentPhase::Waning, VentPhase::Extinct)
            ]
        );
        assert_eq!(lc.age, 20);
    }

    #[test]
    fn test_cycle_toggles_dormancy() {
        let mut lc = VentLifecycle::new(
            1_000,
            Some(ActivityCycle {
                active: 3,
                dormant: 2,
            }),
        );
        let phases: Vec<VentPhase> = (0..6)
            .map(|_| {
                lc.update();
                lc.phase
            })
            .collect();
        assert_eq!(
            phases,
            vec![
                VentPhase::Active,
                VentPhase::Active,
                VentPhase::Dormant,
                VentPhase::Dormant,
                VentPhase::Active,
                VentPhase::Active
            ]
        );
    }

    #[test]
    fn test_extinct_is_terminal() {
        let mut lc = VentLifecycle::new(100, None);
        lc.extinguish();
        assert!(!lc.reactivate());
        lc.set_phase(VentPhase::Active);
        assert_eq!(lc.phase, VentPhase::Extinct);
        assert_eq!(lc.update(), None);
    }

    #[test]
    fn test_reactivate_resets_age() {
        let mut lc = VentLifecycle::new(20, None);
        for _ in 0..19 {
            lc.update();
        }
        assert_eq!(lc.phase, VentPhase::Waning);
        assert!(lc.reactivate());
        assert_eq!(lc.age, 0);
        assert_eq!(lc.snapshot().progress, 0.0);
    }
}
