use serde::{Deserialize, Serialize};

/// Stress multiplier ceiling: at most doubles metabolic cost.
pub const MAX_THERMAL_STRESS: f64 = 2.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StressCategory {
    None,
    Low,
    Medium,
    High,
    Severe,
}

/// Metabolic cost multiplier from temperature deviation.
///
/// 1.0 inside `[optimum - tolerance, optimum + tolerance]`, rising linearly
/// by `multiplier` per degree beyond the tolerance, capped at 2.0.
#[must_use]
pub fn thermal_stress(temperature: f64, optimum: f64, tolerance: f64, multiplier: f64) -> f64 {
    let deviation = (temperature - optimum).abs();
    if deviation <= tolerance {
        return 1.0;
    }
    (1.0 + (deviation - tolerance) * multiplier).min(MAX_THERMAL_STRESS)
}

#[must_use]
pub fn stress_category(stress: f64) -> StressCategory {
    if stress <= 1.0 {
        StressCategory::None
    } else if stress <= 1.2 {
        StressCategory::Low
    } else if stress <= 1.5 {
        StressCategory::Medium
    } else if stress <= 1.8 {
        StressCategory::High
    } else {
        StressCategory::Severe
    }
}
