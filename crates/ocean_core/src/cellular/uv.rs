use crate::config::CellularConfig;
use rand::Rng;

/// Result of a UV hit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UvHit {
    pub damage: f64,
    /// The hit escaped repair and will mutate the next offspring.
    pub mutation: bool,
}

/// Rolls for UV damage under `uv` intensity.
///
/// Pigment photoprotection divides the incoming dose; repair efficiency both
/// softens the damage and guards against the pending mutation.
pub fn expose<R: Rng>(
    uv: f64,
    photoprotection: f64,
    repair_efficiency: f64,
    config: &CellularConfig,
    rng: &mut R,
) -> Option<UvHit> {
    if !config.uv_enabled || uv <= 0.0 {
        return None;
    }
    let dose = uv / photoprotection.max(1.0) / config.uv_surface_intensity.max(f64::EPSILON);
    let chance = dose * config.uv_damage_chance_max;
    if rng.gen::<f64>() >= chance {
        return None;
    }
    Some(UvHit {
        damage: dose * config.uv_max_damage * (1.0 - repair_efficiency * 0.5),
        mutation: rng.gen::<f64>() > repair_efficiency,
    })
}
