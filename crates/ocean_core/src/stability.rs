//! Environmental stability estimate in `[0, 1]`.
//!
//! Combines three signals, refreshed every `interval` ticks: how steady the
//! population has been, how uniform resources are across the water, and how
//! low recent mortality was. Calm worlds drive mutation rates down.

use crate::config::StabilityConfig;
use crate::grid::GridSystem;
use crate::stratification::Stratification;
use ocean_data::GridChannel;
use rand::Rng;
use std::collections::VecDeque;

const DEFAULT_STABILITY: f64 = 0.5;
const MIN_POPULATION_SAMPLES: usize = 10;
const MAX_POPULATION_CV: f64 = 0.5;
const MAX_MORTALITY: f64 = 0.3;
const POPULATION_WEIGHT: f64 = 0.3;
const RESOURCE_WEIGHT: f64 = 0.2;
const MORTALITY_WEIGHT: f64 = 0.5;

/// Coefficient of variation, 0 for an empty or zero-mean sample.
fn coefficient_of_variation(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    if mean <= 0.0 {
        return 0.0;
    }
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
    variance.sqrt() / mean
}

#[derive(Debug, Clone)]
pub struct StabilityTracker {
    population_history: VecDeque<f64>,
    deaths_since_check: u64,
    stability: f64,
}

impl Default for StabilityTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl StabilityTracker {
    #[must_use]
    pub fn new() -> Self {
        Self {
            population_history: VecDeque::new(),
            deaths_since_check: 0,
            stability: DEFAULT_STABILITY,
        }
    }

    #[must_use]
    pub fn stability(&self) -> f64 {
        self.stability
    }

    pub fn record_deaths(&mut self, count: usize) {
        self.deaths_since_check += count as u64;
    }

    fn population_stability(&self) -> f64 {
        if self.population_history.len() < MIN_POPULATION_SAMPLES {
            return DEFAULT_STABILITY;
        }
        let samples: Vec<f64> = self.population_history.iter().copied().collect();
        let cv = coefficient_of_variation(&samples).clamp(0.0, MAX_POPULATION_CV);
        1.0 - cv / MAX_POPULATION_CV
    }

    fn resource_stability<R: Rng>(
        grids: &GridSystem,
        strat: &Stratification,
        samples: usize,
        rng: &mut R,
    ) -> f64 {
        let cols = strat.water_cols();
        let rows = strat.water_rows();
        if cols.is_empty() || rows.is_empty() || samples == 0 {
            return DEFAULT_STABILITY;
        }
        let totals: Vec<f64> = (0..samples)
            .map(|_| {
                let col = rng.gen_range(cols.clone());
                let row = rng.gen_range(rows.clone());
                [
                    GridChannel::Light,
                    GridChannel::Oxygen,
                    GridChannel::Nitrogen,
                    GridChannel::Phosphorus,
                ]
                .into_iter()
                .map(|channel| grids.get_cell(channel, col, row))
                .sum()
            })
            .collect();
        1.0 - coefficient_of_variation(&totals).clamp(0.0, 1.0)
    }

    fn mortality_stability(&self, population: usize) -> f64 {
        let ratio = self.deaths_since_check as f64 / population.max(1) as f64;
        1.0 - ratio.clamp(0.0, MAX_MORTALITY) / MAX_MORTALITY
    }

    /// Samples the world and refreshes the estimate on interval frames.
    pub fn update<R: Rng>(
        &mut self,
        frame: u64,
        population: usize,
        grids: &GridSystem,
        strat: &Stratification,
        config: &StabilityConfig,
        rng: &mut R,
    ) {
        if !config.enabled || frame == 0 || frame % config.interval.max(1) != 0 {
            return;
        }
        self.population_history.push_back(population as f64);
        while self.population_history.len() > config.history_length {
            self.population_history.pop_front();
        }

        let population_score = self.population_stability();
        let resource_score = Self::resource_stability(grids, strat, config.resource_samples, rng);
        let mortality_score = self.mortality_stability(population);
        self.stability = (POPULATION_WEIGHT * population_score
            + RESOURCE_WEIGHT * resource_score
            + MORTALITY_WEIGHT * mortality_score)
            .clamp(0.0, 1.0);
        self.deaths_since_check = 0;

        tracing::debug!(
            frame = frame,
            stability = self.stability,
            population = population_score,
            resources = resource_score,
            mortality = mortality_score,
            "Environmental stability updated"
        );
    }
}
