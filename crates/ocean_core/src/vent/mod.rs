//! Hydrothermal vents: archetypes, placement, ageing, injection and mixing.

pub mod chemistry;
pub mod events;
pub mod factory;
pub mod lifecycle;
pub mod manager;
pub mod plume;
pub mod types;

pub use factory::VentFactory;
pub use lifecycle::VentLifecycle;
pub use manager::VentManager;
pub use types::VentType;

use ocean_data::{VentContext, VentTypeId};
use plume::{PlumeCell, PlumeSource};
use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;

pub const MAX_INTENSITY: f64 = 3.0;

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
struct Surge {
    remaining: u64,
    restore: f64,
}

/// A point or line source at the bottom of a water column.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Vent {
    pub vent_type: VentTypeId,
    pub col: usize,
    pub row: usize,
    pub width: usize,
    intensity: f64,
    pub context: VentContext,
    pub lifecycle: Option<VentLifecycle>,
    surge: Option<Surge>,
    #[serde(skip)]
    plume: Option<Vec<PlumeCell>>,
}

impl Vent {
    #[must_use]
    pub fn new(
        vent_type: VentTypeId,
        col: usize,
        row: usize,
        width: usize,
        intensity: f64,
        context: VentContext,
        lifecycle: Option<VentLifecycle>,
    ) -> Self {
        Self {
            vent_type,
            col,
            row,
            width,
            intensity: intensity.max(0.0),
            context,
            lifecycle,
            surge: None,
            plume: None,
        }
    }

    #[must_use]
    pub fn ty(&self) -> &'static VentType {
        VentType::get(self.vent_type)
    }

    #[must_use]
    pub fn intensity(&self) -> f64 {
        self.intensity
    }

    /// Clamps to `[0, MAX_INTENSITY]` and drops the cached plume.
    pub fn set_intensity(&mut self, intensity: f64) {
        self.intensity = intensity.clamp(0.0, MAX_INTENSITY);
        self.invalidate_plume();
    }

    /// Multiplies the intensity without the upper clamp.
    pub fn scale_intensity(&mut self, factor: f64) {
        self.intensity = (self.intensity * factor).max(0.0);
        self.invalidate_plume();
    }

    /// Multiplies intensity for `duration` ticks, then restores it.
    pub fn begin_surge(&mut self, factor: f64, duration: u64) {
        let restore = self.surge.map_or(self.intensity, |s| s.restore);
        self.scale_intensity(factor);
        self.surge = Some(Surge {
            remaining: duration,
            restore,
        });
    }

    pub(crate) fn tick_surge(&mut self) {
        if let Some(mut surge) = self.surge {
            surge.remaining = surge.remaining.saturating_sub(1);
            if surge.remaining == 0 {
                self.surge = None;
                self.intensity = surge.restore;
                self.invalidate_plume();
            } else {
                self.surge = Some(surge);
            }
        }
    }

    #[must_use]
    pub fn is_surging(&self) -> bool {
        self.surge.is_some()
    }

    /// Vents without a lifecycle are permanently active.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.lifecycle.as_ref().is_none_or(VentLifecycle::is_active)
    }

    #[must_use]
    pub fn lifecycle_multiplier(&self) -> f64 {
        self.lifecycle.as_ref().map_or(1.0, VentLifecycle::multiplier)
    }

    /// Columns that receive direct injection, clamped to the grid.
    #[must_use]
    pub fn injection_cols(&self, cols: usize) -> RangeInclusive<usize> {
        let half = self.width / 2;
        let start = self.col.saturating_sub(half);
        let mut end = self.col + half;
        if self.width % 2 == 0 {
            end = end.saturating_sub(1).max(start);
        }
        start..=end.min(cols.saturating_sub(1))
    }

    /// Columns warmed to the archetype temperature.
    #[must_use]
    pub fn thermal_cols(&self, cols: usize) -> RangeInclusive<usize> {
        let radius = self.width / 2;
        self.col.saturating_sub(radius)..=(self.col + radius).min(cols.saturating_sub(1))
    }

    /// Cached dispersion footprint.
    pub fn plume_cells(&mut self, cols: usize, rows: usize) -> &[PlumeCell] {
        let source = PlumeSource {
            col: self.col,
            row: self.row,
            width: self.width,
            context: self.context,
            profile: self.ty().plume,
        };
        self.plume
            .get_or_insert_with(|| plume::calculate(&source, cols, rows))
    }

    pub fn invalidate_plume(&mut self) {
        self.plume = None;
    }

    #[must_use]
    pub fn world_position(&self, resolution: f64) -> (f64, f64) {
        (self.col as f64 * resolution, self.row as f64 * resolution)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vent(col: usize, width: usize) -> Vent {
        Vent::new(
            VentTypeId::Alkaline,
            col,
            40,
            width,
            1.0,
            VentContext::Submarine,
            None,
        )
    }

    #[test]
    fn test_injection_columns_odd_and_even() {
        assert_eq!(vent(10, 3).injection_cols(100), 9..=11);
        assert_eq!(vent(10, 4).injection_cols(100), 8..=11);
        assert_eq!(vent(0, 5).injection_cols(100), 0..=2);
        assert_eq!(vent(99, 5).injection_cols(100), 97..=99);
    }

    #[test]
    fn test_set_intensity_clamps_and_invalidates() {
        let mut v = vent(10, 3);
        assert!(!v.plume_cells(50, 50).is_empty());
        v.set_intensity(7.0);
        assert_eq!(v.intensity(), MAX_INTENSITY);
        assert!(v.plume.is_none());
        v.set_intensity(-1.0);
        assert_eq!(v.intensity(), 0.0);
    }

    #[test]
    fn test_surge_restores_intensity() {
        let mut v = vent(10, 3);
        v.begin_surge(2.0, 2);
        assert_eq!(v.intensity(), 2.0);
        v.tick_surge();
        assert!(v.is_surging());
        v.tick_surge();
        assert!(!v.is_surging());
        assert_eq!(v.intensity(), 1.0);
    }

    #[test]
    fn test_vent_without_lifecycle_is_always_active() {
        let v = vent(3, 3);
        assert!(v.is_active());
        assert_eq!(v.lifecycle_multiplier(), 1.0);
    }
}
