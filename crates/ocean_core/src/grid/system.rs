use crate::config::InitialEnvironment;
use crate::stratification::Stratification;
use ocean_data::GridChannel;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One named scalar field, stored column-major in a flat buffer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Grid {
    pub cells: Vec<f64>,
    #[serde(skip)]
    pub back_buffer: Vec<f64>,
    pub cols: usize,
    pub rows: usize,
}

impl Grid {
    #[must_use]
    pub fn new(cols: usize, rows: usize) -> Self {
        let cells = vec![0.0; cols * rows];
        let back_buffer = cells.clone();
        Self {
            cells,
            back_buffer,
            cols,
            rows,
        }
    }

    /// Builds a grid from a closed-form `(col, row) -> value` profile.
    pub fn from_fn(cols: usize, rows: usize, mut f: impl FnMut(usize, usize) -> f64) -> Self {
        let mut grid = Self::new(cols, rows);
        for col in 0..cols {
            for row in 0..rows {
                let idx = grid.index(col, row);
                grid.cells[idx] = f(col, row);
            }
        }
        grid
    }

    #[inline(always)]
    pub fn index(&self, col: usize, row: usize) -> usize {
        col * self.rows + row
    }

    #[inline]
    #[must_use]
    pub fn contains(&self, col: usize, row: usize) -> bool {
        col < self.cols && row < self.rows
    }

    /// Value at a cell, 0 when out of range.
    #[inline]
    #[must_use]
    pub fn get(&self, col: usize, row: usize) -> f64 {
        if self.contains(col, row) {
            self.cells[self.index(col, row)]
        } else {
            0.0
        }
    }

    #[inline]
    pub fn set(&mut self, col: usize, row: usize, value: f64) {
        if self.contains(col, row) {
            let idx = self.index(col, row);
            self.cells[idx] = value;
        }
    }

    pub fn fill(&mut self, value: f64) {
        self.cells.iter_mut().for_each(|v| *v = value);
    }

    /// Promotes the back buffer to the live cells.
    pub fn swap_buffers(&mut self) {
        std::mem::swap(&mut self.cells, &mut self.back_buffer);
    }

    #[must_use]
    pub fn total(&self) -> f64 {
        self.cells.iter().sum()
    }
}

/// Owns every concentration and physical field of the world.
///
/// World positions are mapped to cells by floor division with the
/// resolution. Out-of-range access reads 0 and writes nothing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GridSystem {
    pub cols: usize,
    pub rows: usize,
    grids: Vec<Grid>,
}

impl GridSystem {
    /// All-zero fields.
    #[must_use]
    pub fn new(cols: usize, rows: usize) -> Self {
        Self {
            cols,
            rows,
            grids: GridChannel::ALL
                .iter()
                .map(|_| Grid::new(cols, rows))
                .collect(),
        }
    }

    /// Fields from the depth profiles, textured with noise from `seed`.
    #[must_use]
    pub fn generate(cols: usize, rows: usize, seed: u64) -> Self {
        let mut system = Self::new(cols, rows);
        for channel in GridChannel::ALL {
            *system.grid_mut(channel) = super::init::initialize(channel, cols, rows, seed);
        }
        system
    }

    /// Overwrites whole channels with constant scenario values.
    pub fn apply_initial_environment(&mut self, env: &InitialEnvironment) {
        for (channel, value) in env.entries() {
            self.grid_mut(channel).fill(value);
        }
    }

    #[inline]
    #[must_use]
    pub fn grid(&self, channel: GridChannel) -> &Grid {
        &self.grids[channel as usize]
    }

    #[inline]
    pub fn grid_mut(&mut self, channel: GridChannel) -> &mut Grid {
        &mut self.grids[channel as usize]
    }

    /// Mutable access to several fields at once, for parallel passes.
    pub fn grids_mut(&mut self) -> impl Iterator<Item = (GridChannel, &mut Grid)> {
        GridChannel::ALL.into_iter().zip(self.grids.iter_mut())
    }

    /// Maps a world position to a cell, `None` when outside the grid.
    #[inline]
    #[must_use]
    pub fn cell_at(&self, x: f64, y: f64, resolution: f64) -> Option<(usize, usize)> {
        let col = (x / resolution).floor();
        let row = (y / resolution).floor();
        if !col.is_finite() || !row.is_finite() || col < 0.0 || row < 0.0 {
            return None;
        }
        let (col, row) = (col as usize, row as usize);
        (col < self.cols && row < self.rows).then_some((col, row))
    }

    #[must_use]
    pub fn get(&self, channel: GridChannel, x: f64, y: f64, resolution: f64) -> f64 {
        self.cell_at(x, y, resolution)
            .map_or(0.0, |(c, r)| self.get_cell(channel, c, r))
    }

    pub fn set(&mut self, channel: GridChannel, x: f64, y: f64, resolution: f64, value: f64) {
        if let Some((c, r)) = self.cell_at(x, y, resolution) {
            self.set_cell(channel, c, r, value);
        }
    }

    pub fn add(&mut self, channel: GridChannel, x: f64, y: f64, resolution: f64, amount: f64) {
        if let Some((c, r)) = self.cell_at(x, y, resolution) {
            self.add_cell(channel, c, r, amount);
        }
    }

    /// Withdraws up to `amount`, returning what was actually taken.
    pub fn consume(
        &mut self,
        channel: GridChannel,
        x: f64,
        y: f64,
        resolution: f64,
        amount: f64,
    ) -> f64 {
        match self.cell_at(x, y, resolution) {
            Some((c, r)) => self.consume_cell(channel, c, r, amount),
            None => 0.0,
        }
    }

    #[inline]
    #[must_use]
    pub fn get_cell(&self, channel: GridChannel, col: usize, row: usize) -> f64 {
        self.grid(channel).get(col, row)
    }

    /// Chemical channels are floored at zero.
    pub fn set_cell(&mut self, channel: GridChannel, col: usize, row: usize, value: f64) {
        let value = if channel.is_chemical() {
            value.max(0.0)
        } else {
            value
        };
        self.grid_mut(channel).set(col, row, value);
    }

    pub fn add_cell(&mut self, channel: GridChannel, col: usize, row: usize, amount: f64) {
        let current = self.get_cell(channel, col, row);
        self.set_cell(channel, col, row, current + amount);
    }

    pub fn consume_cell(&mut self, channel: GridChannel, col: usize, row: usize, amount: f64) -> f64 {
        if !self.grid(channel).contains(col, row) || amount <= 0.0 {
            return 0.0;
        }
        let current = self.get_cell(channel, col, row).max(0.0);
        let taken = current.min(amount);
        self.grid_mut(channel).set(col, row, current - taken);
        taken
    }

    /// Clears cleared-outside-water channels in every cell outside the water band.
    pub fn sanitize(&mut self, strat: &Stratification) {
        for col in 0..self.cols {
            for row in 0..self.rows {
                if strat.is_in_water(col, row) {
                    continue;
                }
                for channel in GridChannel::ALL {
                    if channel.cleared_outside_water() {
                        self.grid_mut(channel).set(col, row, 0.0);
                    }
                }
            }
        }
    }

    /// Read-only view of every channel at a world position.
    #[must_use]
    pub fn sample(&self, x: f64, y: f64, resolution: f64) -> BTreeMap<&'static str, f64> {
        GridChannel::ALL
            .iter()
            .map(|&channel| (channel.name(), self.get(channel, x, y, resolution)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_consume_never_goes_negative() {
        let mut grids = GridSystem::new(4, 4);
        grids.set(GridChannel::H2, 15.0, 15.0, 10.0, 30.0);
        let taken = grids.consume(GridChannel::H2, 15.0, 15.0, 10.0, 50.0);
        assert_eq!(taken, 30.0);
        assert_eq!(grids.get(GridChannel::H2, 15.0, 15.0, 10.0), 0.0);
    }

    #[test]
    fn test_out_of_range_is_noop() {
        let mut grids = GridSystem::new(4, 4);
        grids.add(GridChannel::Oxygen, -5.0, 10.0, 10.0, 20.0);
        grids.set(GridChannel::Oxygen, 400.0, 10.0, 10.0, 20.0);
        assert_eq!(grids.get(GridChannel::Oxygen, -5.0, 10.0, 10.0), 0.0);
        assert_eq!(grids.consume(GridChannel::Oxygen, 400.0, 0.0, 10.0, 5.0), 0.0);
        assert_eq!(grids.grid(GridChannel::Oxygen).total(), 0.0);
    }

    #[test]
    fn test_chemical_channels_floor_at_zero() {
        let mut grids = GridSystem::new(2, 2);
        grids.add_cell(GridChannel::Co2, 1, 1, -10.0);
        assert_eq!(grids.get_cell(GridChannel::Co2, 1, 1), 0.0);
        grids.add_cell(GridChannel::Temperature, 1, 1, -10.0);
        assert_eq!(grids.get_cell(GridChannel::Temperature, 1, 1), -10.0);
    }

    #[test]
    fn test_sample_covers_every_channel() {
        let grids = GridSystem::generate(8, 8, 1);
        let sample = grids.sample(12.0, 40.0, 10.0);
        assert_eq!(sample.len(), GridChannel::ALL.len());
        assert!(sample["co2"] >= 80.0);
    }
}
