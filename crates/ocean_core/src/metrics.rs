//! Performance and population metrics for the simulation.
//!
//! Counters are atomics so a reporting task can read them while the tick
//! loop writes.

use ocean_data::OceanEvent;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

/// Running counters for one simulation instance.
pub struct Metrics {
    tick_count: AtomicU64,
    population: AtomicU64,
    births: AtomicU64,
    deaths: AtomicU64,
    lethal_mutations: AtomicU64,
    start_time: Instant,
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

impl Metrics {
    #[must_use]
    pub fn new() -> Self {
        Self {
            tick_count: AtomicU64::new(0),
            population: AtomicU64::new(0),
            births: AtomicU64::new(0),
            deaths: AtomicU64::new(0),
            lethal_mutations: AtomicU64::new(0),
            start_time: Instant::now(),
        }
    }

    /// Records a completed tick with its duration.
    pub fn record_tick(&self, duration: Duration, population: usize) {
        self.tick_count.fetch_add(1, Ordering::Relaxed);
        self.population.store(population as u64, Ordering::Relaxed);

        let tick = self.tick_count.load(Ordering::Relaxed);
        if tick.is_multiple_of(1000) {
            tracing::info!(
                tick = tick,
                population = population,
                births = self.births(),
                deaths = self.deaths(),
                lethal = self.lethal_mutations(),
                duration_ms = duration.as_millis() as u64,
                "Simulation tick"
            );
        }
    }

    /// Folds a tick's events into the counters.
    pub fn record_events(&self, events: &[OceanEvent]) {
        for event in events {
            match event {
                OceanEvent::Reproduction { phantom: false, .. } => {
                    self.births.fetch_add(1, Ordering::Relaxed);
                }
                OceanEvent::Death { .. } => {
                    self.deaths.fetch_add(1, Ordering::Relaxed);
                }
                OceanEvent::LethalMutation { .. } => {
                    self.lethal_mutations.fetch_add(1, Ordering::Relaxed);
                }
                _ => {}
            }
        }
    }

    #[must_use]
    pub fn tick_count(&self) -> u64 {
        self.tick_count.load(Ordering::Relaxed)
    }

    #[must_use]
    pub fn population(&self) -> u64 {
        self.population.load(Ordering::Relaxed)
    }

    #[must_use]
    pub fn births(&self) -> u64 {
        self.births.load(Ordering::Relaxed)
    }

    #[must_use]
    pub fn deaths(&self) -> u64 {
        self.deaths.load(Ordering::Relaxed)
    }

    #[must_use]
    pub fn lethal_mutations(&self) -> u64 {
        self.lethal_mutations.load(Ordering::Relaxed)
    }

    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }
}

/// Installs a fmt subscriber honouring `RUST_LOG`, defaulting to `info`.
///
/// Safe to call more than once; later calls are ignored.
pub fn init_logging() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing::subscriber::set_global_default(
        tracing_subscriber::FmtSubscriber::builder()
            .with_env_filter(filter)
            .finish(),
    )
    .ok();
}

#[cfg(test)]
mod tests {
    use super::*;
    use ocean_data::DeathCause;
    use uuid::Uuid;

    #[test]
    fn test_metrics_new() {
        let metrics = Metrics::new();
        assert_eq!(metrics.tick_count(), 0);
        assert_eq!(metrics.births(), 0);
    }

    #[test]
    fn test_record_tick() {
        let metrics = Metrics::new();
        metrics.record_tick(Duration::from_millis(16), 42);
        assert_eq!(metrics.tick_count(), 1);
        assert_eq!(metrics.population(), 42);
    }

    #[test]
    fn test_record_events_counts_deaths() {
        let metrics = Metrics::new();
        let death = OceanEvent::Death {
            frame: 3,
            id: Uuid::new_v4(),
            generation: 1,
            age: 10,
            cause: DeathCause::NitrogenDepletion,
            x: 0.0,
            y: 0.0,
            timestamp: String::new(),
        };
        metrics.record_events(&[death.clone(), death]);
        assert_eq!(metrics.deaths(), 2);
        assert_eq!(metrics.births(), 0);
    }

    #[test]
    fn test_init_logging_twice_is_harmless() {
        init_logging();
        init_logging();
    }
}
