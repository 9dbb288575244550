use crate::config::{CellularConfig, EvolutionLevel};

/// Optical properties derived from a cell's pigment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pigmentation {
    /// Mean of the RGB channels, `[0, 255]`.
    pub brightness: f64,
    pub light_absorption: f64,
    /// Divisor applied to incoming UV.
    pub photoprotection: f64,
    /// Extra energy per tick for synthesising dark pigment.
    pub pigment_cost: f64,
}

const DARK_PHOTOPROTECTION: f64 = 2.5;

fn lerp(from: f64, to: f64, t: f64) -> f64 {
    from + (to - from) * t
}

/// Dark cells absorb more light and shield UV, at a pigment cost.
#[must_use]
pub fn pigmentation(color: [f64; 3], config: &CellularConfig) -> Pigmentation {
    let brightness = color.iter().sum::<f64>() / 3.0;
    if config.color_evolution == EvolutionLevel::None {
        return Pigmentation {
            brightness,
            light_absorption: 1.0,
            photoprotection: 1.0,
            pigment_cost: 0.0,
        };
    }
    let profile = config.color_evolution.color_profile();
    let t = (brightness / 255.0).clamp(0.0, 1.0);
    Pigmentation {
        brightness,
        light_absorption: lerp(profile.light_absorption, 1.0 / profile.light_absorption, t),
        photoprotection: lerp(DARK_PHOTOPROTECTION, 1.0, t),
        pigment_cost: profile.pigment_cost * (1.0 - t),
    }
}
