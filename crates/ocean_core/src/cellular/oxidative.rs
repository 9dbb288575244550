//! Reactive-oxygen damage, superoxide dismutase and DNA repair.

use crate::config::CellularConfig;

/// Moves the SOD protein level one synthesis step toward the genome target.
#[must_use]
pub fn relax_sod(current: f64, target: f64, rate: f64) -> f64 {
    if current < target {
        (current + rate).min(target)
    } else {
        (current - rate).max(target)
    }
}

/// Structural damage from free oxygen above the safe threshold.
#[must_use]
pub fn oxidative_damage(oxygen: f64, sod_protein: f64, config: &CellularConfig) -> f64 {
    if oxygen <= config.oxygen_safe_threshold {
        return 0.0;
    }
    let unprotected = (1.0 - sod_protein).clamp(0.0, 1.0);
    (oxygen - config.oxygen_safe_threshold) * unprotected * config.oxidative_damage_rate
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Repair {
    pub repaired: f64,
    pub energy_spent: f64,
}

/// Repairs up to `base_repair_speed · efficiency` damage, as far as energy allows.
#[must_use]
pub fn repair(damage: f64, efficiency: f64, energy: f64, config: &CellularConfig) -> Repair {
    if damage <= 0.0 || energy <= 0.0 {
        return Repair::default();
    }
    let mut repaired = damage.min(config.base_repair_speed * efficiency);
    let mut energy_spent = repaired * config.repair_energy_cost;
    if energy_spent > energy {
        energy_spent = energy;
        repaired = if config.repair_energy_cost > 0.0 {
            energy / config.repair_energy_cost
        } else {
            repaired
        };
    }
    Repair {
        repaired,
        energy_spent,
    }
}
