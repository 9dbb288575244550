//! Discrete-Laplacian relaxation of the chemical fields.
//!
//! Each pass writes `v + rate(zone) * (mean(neighbours) - v)` into the back
//! buffer and swaps only after the whole grid is done, so the sweep order
//! never biases the result. Edge cells average over the 2 or 3 neighbours
//! they have; the grid does not wrap. This loses mass at the border on
//! purpose: the boundary behaves as an open sink.

use crate::config::{DiffusionConfig, DiffusionRates};
use crate::grid::{Grid, GridSystem};
use crate::stratification::{Stratification, Zone};
#[cfg(feature = "parallel")]
use rayon::prelude::*;

fn zone_rate(rates: &DiffusionRates, zone: Zone) -> f64 {
    match zone {
        Zone::Atmosphere => rates.atmosphere,
        Zone::Water => rates.water,
        Zone::Sediment => rates.sediment,
    }
}

/// One Jacobi pass over a single grid.
pub fn relax(grid: &mut Grid, epsilon: f64, rate_for_row: impl Fn(usize) -> f64) {
    let cols = grid.cols;
    let rows = grid.rows;
    if grid.back_buffer.len() != grid.cells.len() {
        grid.back_buffer = grid.cells.clone();
    }

    for x in 0..cols {
        for y in 0..rows {
            let idx = grid.index(x, y);
            let current = grid.cells[idx];
            let mut sum = 0.0;
            let mut neighbours = 0u32;
            if x > 0 {
                sum += grid.cells[grid.index(x - 1, y)];
                neighbours += 1;
            }
            if x + 1 < cols {
                sum += grid.cells[grid.index(x + 1, y)];
                neighbours += 1;
            }
            if y > 0 {
                sum += grid.cells[grid.index(x, y - 1)];
                neighbours += 1;
            }
            if y + 1 < rows {
                sum += grid.cells[grid.index(x, y + 1)];
                neighbours += 1;
            }

            let mut next = current;
            if neighbours > 0 {
                let delta = rate_for_row(y) * (sum / f64::from(neighbours) - current);
                if delta.abs() >= epsilon {
                    next = current + delta;
                }
            }
            grid.back_buffer[idx] = next;
        }
    }
    grid.swap_buffers();
}

/// Runs the configured passes over every diffused channel.
pub struct DiffusionSystem;

impl DiffusionSystem {
    pub fn update(grids: &mut GridSystem, strat: &Stratification, config: &DiffusionConfig) {
        if !config.enabled || config.iterations == 0 {
            return;
        }
        let rates = &config.rates;
        let epsilon = config.epsilon;
        let rate_for_row = |row: usize| zone_rate(rates, strat.zone(row));

        let targets: Vec<&mut Grid> = grids
            .grids_mut()
            .filter(|(channel, _)| config.channels.contains(channel))
            .map(|(_, grid)| grid)
            .collect();

        #[cfg(feature = "parallel")]
        targets.into_par_iter().for_each(|grid| {
            for _ in 0..config.iterations {
                relax(grid, epsilon, rate_for_row);
            }
        });

        #[cfg(not(feature = "parallel"))]
        for grid in targets {
            for _ in 0..config.iterations {
                relax(grid, epsilon, rate_for_row);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_three_cell_full_mixing() {
        let mut grid = Grid::new(3, 1);
        grid.cells = vec![0.0, 100.0, 0.0];
        relax(&mut grid, 0.001, |_| 0.5);
        assert_eq!(grid.cells, vec![50.0, 50.0, 50.0]);
    }

    #[test]
    fn test_uniform_field_is_fixed_point() {
        let mut grid = Grid::new(4, 4);
        grid.fill(7.0);
        relax(&mut grid, 0.001, |_| 0.25);
        assert!(grid.cells.iter().all(|&v| v == 7.0));
    }

    #[test]
    fn test_small_updates_suppressed() {
        let mut grid = Grid::new(2, 1);
        grid.cells = vec![1.0, 1.0001];
        relax(&mut grid, 0.001, |_| 0.1);
        assert_eq!(grid.cells, vec![1.0, 1.0001]);
    }

    #[test]
    fn test_zero_rate_sediment_holds_still() {
        let mut grid = Grid::new(1, 3);
        grid.cells = vec![0.0, 0.0, 90.0];
        relax(&mut grid, 0.0, |row| if row == 2 { 0.0 } else { 0.5 });
        assert_eq!(grid.cells[2], 90.0);
        assert_eq!(grid.cells[1], 22.5);
    }
}
