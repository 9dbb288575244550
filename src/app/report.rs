//! Periodic run summaries.

use chrono::Utc;
use ocean_core::{Metrics, SimulationContext};
use ocean_data::GovernorStatus;
use serde::Serialize;

/// One line of progress, logged and optionally printed as JSON.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub frame: u64,
    pub population: usize,
    pub births: u64,
    pub deaths: u64,
    pub lethal_mutations: u64,
    pub mean_generation: f64,
    pub max_generation: u32,
    pub stability: f64,
    pub governor: GovernorStatus,
    pub ticks_per_second: f64,
    pub timestamp: String,
}

impl Report {
    #[must_use]
    pub fn capture(ctx: &SimulationContext, metrics: &Metrics) -> Self {
        let (mean_generation, max_generation) = ctx.generation_stats();
        let elapsed = metrics.elapsed().as_secs_f64();
        let ticks_per_second = if elapsed > 0.0 {
            metrics.tick_count() as f64 / elapsed
        } else {
            0.0
        };
        Self {
            frame: ctx.frame(),
            population: ctx.population(),
            births: metrics.births(),
            deaths: metrics.deaths(),
            lethal_mutations: metrics.lethal_mutations(),
            mean_generation,
            max_generation,
            stability: ctx.stability.stability(),
            governor: ctx.governor.status(),
            ticks_per_second,
            timestamp: Utc::now().to_rfc3339(),
        }
    }

    pub fn log(&self) {
        tracing::info!(
            frame = self.frame,
            population = self.population,
            births = self.births,
            deaths = self.deaths,
            lethal = self.lethal_mutations,
            generation = self.mean_generation,
            max_generation = self.max_generation,
            stability = self.stability,
            governor = ?self.governor,
            tps = self.ticks_per_second,
            "Progress"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ocean_core::AppConfig;

    #[test]
    fn test_capture_fresh_world() {
        let mut config = AppConfig::default();
        config.world.cols = 30;
        config.world.rows = 20;
        config.world.seed = Some(1);
        config.world.initial_population = 4;
        let ctx = SimulationContext::new(config).expect("valid config");
        let report = Report::capture(&ctx, &Metrics::new());
        assert_eq!(report.frame, 0);
        assert_eq!(report.population, 4);
        assert_eq!(report.max_generation, 0);
        assert_eq!(report.governor, GovernorStatus::Stable);
    }
}
