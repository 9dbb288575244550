//! Atmosphere / water / sediment banding of the grid.

use crate::config::{AppConfig, ViscosityConfig};
use serde::{Deserialize, Serialize};

/// Zone a row belongs to. Selects the diffusion rate and viscosity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Zone {
    Atmosphere,
    Water,
    Sediment,
}

/// Row and column boundaries of the water band.
///
/// Ends are exclusive. In restricted mode there is no atmosphere
/// (`atmosphere_row == -1`) and the sediment row sits below the grid.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Stratification {
    pub rows: usize,
    pub cols: usize,
    pub atmosphere_row: i64,
    pub sediment_row: usize,
    pub water_start_row: usize,
    pub water_end_row: usize,
    pub water_start_col: usize,
    pub water_end_col: usize,
    pub restricted: bool,
    pub viscosity: ViscosityConfig,
}

impl Stratification {
    #[must_use]
    pub fn new(config: &AppConfig) -> Self {
        let world = &config.world;
        let restricted =
            world.restrict_to_vents || world.execution_mode.restricts_to_vents();
        let first_vent_width = config.vents.first().map(|v| v.width);
        let mut strat = Self {
            rows: world.rows,
            cols: world.cols,
            atmosphere_row: 0,
            sediment_row: 0,
            water_start_row: 0,
            water_end_row: 0,
            water_start_col: 0,
            water_end_col: world.cols,
            restricted,
            viscosity: world.viscosity.clone(),
        };
        strat.calculate_boundaries(
            world.atmosphere_depth,
            world.sediment_depth,
            first_vent_width,
        );
        strat
    }

    /// Recomputes the bands. Callers must `sanitize` the grids afterwards.
    pub fn calculate_boundaries(
        &mut self,
        atmosphere_depth: f64,
        sediment_depth: f64,
        first_vent_width: Option<usize>,
    ) {
        let rows = self.rows as f64;
        self.atmosphere_row = (rows * atmosphere_depth).floor() as i64;
        self.sediment_row = ((rows * (1.0 - sediment_depth)).floor() as usize).min(self.rows);
        self.water_start_row = self.atmosphere_row.max(0) as usize;
        self.water_end_row = self.sediment_row.max(self.water_start_row);
        self.water_start_col = 0;
        self.water_end_col = self.cols;

        if self.restricted {
            self.atmosphere_row = -1;
            self.sediment_row = self.rows;
            self.water_start_row = 0;
            self.water_end_row = self.rows;
            if let Some(width) = first_vent_width {
                let center = self.cols / 2;
                let half = width.max(1) / 2;
                self.water_start_col = center.saturating_sub(half);
                self.water_end_col = (center + half + 1).min(self.cols);
            }
        }
    }

    #[inline]
    #[must_use]
    pub fn is_in_water(&self, col: usize, row: usize) -> bool {
        row >= self.water_start_row
            && row < self.water_end_row
            && col >= self.water_start_col
            && col < self.water_end_col
    }

    #[inline]
    #[must_use]
    pub fn is_in_sediment(&self, row: usize) -> bool {
        !self.restricted && row >= self.sediment_row
    }

    #[inline]
    #[must_use]
    pub fn is_in_atmosphere(&self, row: usize) -> bool {
        !self.restricted && (row as i64) < self.atmosphere_row
    }

    #[must_use]
    pub fn zone(&self, row: usize) -> Zone {
        if (row as i64) < self.atmosphere_row {
            Zone::Atmosphere
        } else if row >= self.sediment_row {
            Zone::Sediment
        } else {
            Zone::Water
        }
    }

    /// Velocity damping for movement in `row`.
    #[must_use]
    pub fn viscosity(&self, row: usize) -> f64 {
        if self.is_in_sediment(row) {
            self.viscosity.sediment
        } else if self.is_in_atmosphere(row) {
            self.viscosity.atmosphere
        } else {
            self.viscosity.water
        }
    }

    /// Clamps a world position into the water band, in world units.
    #[must_use]
    pub fn clamp_to_water(&self, x: f64, y: f64, resolution: f64) -> (f64, f64) {
        let min_x = self.water_start_col as f64 * resolution;
        let max_x = (self.water_end_col as f64 * resolution - 1.0).max(min_x);
        let min_y = self.water_start_row as f64 * resolution;
        let max_y = (self.water_end_row as f64 * resolution - 1.0).max(min_y);
        (x.clamp(min_x, max_x), y.clamp(min_y, max_y))
    }

    #[must_use]
    pub fn water_cols(&self) -> std::ops::Range<usize> {
        self.water_start_col..self.water_end_col
    }

    #[must_use]
    pub fn water_rows(&self) -> std::ops::Range<usize> {
        self.water_start_row..self.water_end_row
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{VentConfig, WorldConfig};

    fn config(rows: usize, cols: usize, restrict: bool) -> AppConfig {
        AppConfig {
            world: WorldConfig {
                rows,
                cols,
                restrict_to_vents: restrict,
                ..Default::default()
            },
            vents: vec![VentConfig {
                width: 5,
                ..Default::default()
            }],
            ..Default::default()
        }
    }

    #[test]
    fn test_default_bands() {
        let strat = Stratification::new(&config(100, 50, false));
        assert_eq!(strat.atmosphere_row, 15);
        assert_eq!(strat.sediment_row, 90);
        assert!(strat.is_in_atmosphere(14));
        assert!(strat.is_in_water(0, 15));
        assert!(!strat.is_in_water(0, 90));
        assert!(strat.is_in_sediment(90));
        assert_eq!(strat.zone(95), Zone::Sediment);
        assert_eq!(strat.viscosity(95), 0.60);
    }

    #[test]
    fn test_restricted_column() {
        let strat = Stratification::new(&config(40, 50, true));
        assert_eq!(strat.atmosphere_row, -1);
        assert_eq!(strat.sediment_row, 40);
        assert_eq!(strat.water_cols(), 23..28);
        assert!(strat.is_in_water(25, 0));
        assert!(!strat.is_in_water(10, 10));
        assert!(!strat.is_in_sediment(39));
        assert_eq!(strat.zone(39), Zone::Water);
    }

    #[test]
    fn test_bounds_are_ordered() {
        let strat = Stratification::new(&config(3, 3, false));
        assert!(strat.water_start_row <= strat.water_end_row);
        assert!(strat.water_start_col <= strat.water_end_col);
    }

    #[test]
    fn test_clamp_to_water() {
        let strat = Stratification::new(&config(100, 50, false));
        let (x, y) = strat.clamp_to_water(-20.0, 5.0, 10.0);
        assert_eq!(x, 0.0);
        assert_eq!(y, 150.0);
    }
}
