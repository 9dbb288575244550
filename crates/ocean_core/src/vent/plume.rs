//! Dispersion footprint of a vent.
//!
//! Submarine plumes rise up to `MAX_HEIGHT` rows and widen as they go;
//! subaerial output spreads isotropically inside a disc. The footprint is
//! cached by the owning vent and must be invalidated whenever position,
//! intensity or activity changes.

use super::types::PlumeProfile;
use ocean_data::VentContext;
use serde::{Deserialize, Serialize};

const MAX_HEIGHT: i64 = 20;
const MIN_DECAY: f64 = 0.01;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlumeCell {
    pub col: usize,
    pub row: usize,
    pub distance: f64,
    pub decay: f64,
}

/// Geometry needed to trace a plume.
#[derive(Debug, Clone, Copy)]
pub struct PlumeSource {
    pub col: usize,
    pub row: usize,
    pub width: usize,
    pub context: VentContext,
    pub profile: PlumeProfile,
}

fn in_bounds(col: i64, row: i64, cols: usize, rows: usize) -> bool {
    col >= 0 && row >= 0 && (col as usize) < cols && (row as usize) < rows
}

#[must_use]
pub fn calculate(source: &PlumeSource, cols: usize, rows: usize) -> Vec<PlumeCell> {
    let mut cells = Vec::new();
    let sx = source.col as i64;
    let sy = source.row as i64;
    let max_radius = (source.width * 3) as i64;
    let PlumeProfile {
        decay_rate,
        buoyancy,
    } = source.profile;

    match source.context {
        VentContext::Submarine => {
            for dy in 0..MAX_HEIGHT {
                let ty = sy - dy;
                if ty < 0 || ty >= rows as i64 {
                    continue;
                }
                let spread = (max_radius as f64 * (1.0 + dy as f64 * 0.2)).floor() as i64;
                for dx in -spread..=spread {
                    let tx = sx + dx;
                    if !in_bounds(tx, ty, cols, rows) {
                        continue;
                    }
                    let distance = ((dx * dx + dy * dy) as f64).sqrt();
                    let decay = (-decay_rate * distance).exp()
                        * (1.0 - dy as f64 * 0.02 * buoyancy);
                    if decay > MIN_DECAY {
                        cells.push(PlumeCell {
                            col: tx as usize,
                            row: ty as usize,
                            distance,
                            decay,
                        });
                    }
                }
            }
        }
        VentContext::Subaerial => {
            for dx in -max_radius..=max_radius {
                for dy in -max_radius..=max_radius {
                    let (tx, ty) = (sx + dx, sy + dy);
                    if !in_bounds(tx, ty, cols, rows) {
                        continue;
                    }
                    let distance = ((dx * dx + dy * dy) as f64).sqrt();
                    if distance > max_radius as f64 {
                        continue;
                    }
                    let decay = (-decay_rate * distance).exp();
                    if decay > MIN_DECAY {
                        cells.push(PlumeCell {
                            col: tx as usize,
                            row: ty as usize,
                            distance,
                            decay,
                        });
                    }
                }
            }
        }
    }
    cells
}

#[cfg(test)]
mod tests {
    use super::*;

    fn source(context: VentContext) -> PlumeSource {
        PlumeSource {
            col: 10,
            row: 30,
            width: 3,
            context,
            profile: PlumeProfile {
                decay_rate: 0.12,
                buoyancy: 0.9,
            },
        }
    }

    #[test]
    fn test_submarine_plume_rises() {
        let cells = calculate(&source(VentContext::Submarine), 40, 40);
        assert!(cells.iter().all(|c| c.row <= 30));
        let origin = cells
            .iter()
            .find(|c| c.col == 10 && c.row == 30)
            .expect("source cell present");
        assert_eq!(origin.decay, 1.0);
        assert!(cells.iter().any(|c| c.row < 20));
    }

    #[test]
    fn test_subaerial_plume_is_a_disc() {
        let cells = calculate(&source(VentContext::Subaerial), 40, 40);
        assert!(cells.iter().all(|c| c.distance <= 9.0));
        assert!(cells.iter().any(|c| c.row > 30));
    }

    #[test]
    fn test_plume_clipped_to_grid() {
        let mut src = source(VentContext::Submarine);
        src.col = 0;
        src.row = 2;
        let cells = calculate(&src, 5, 5);
        assert!(cells.iter().all(|c| c.col < 5 && c.row < 5));
        assert!(!cells.is_empty());
    }
}
