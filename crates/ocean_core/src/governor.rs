//! Closed-loop reproduction throttle.
//!
//! Every `fps_check_interval` ticks the governor averages the recent frame
//! durations and compares the population against the mode cap. Either limit
//! switches reproduction off until the next check clears it; there is no
//! hysteresis.

use crate::config::{ExecutionMode, GovernorConfig};
use ocean_data::{GovernorStatus, OceanEvent};
use std::collections::VecDeque;

#[derive(Debug, Clone)]
pub struct GameGovernor {
    /// Recent frame durations in seconds.
    frame_times: VecDeque<f64>,
    status: GovernorStatus,
    reproduction_allowed: bool,
    average_fps: f64,
}

impl Default for GameGovernor {
    fn default() -> Self {
        Self::new()
    }
}

impl GameGovernor {
    #[must_use]
    pub fn new() -> Self {
        Self {
            frame_times: VecDeque::new(),
            status: GovernorStatus::Stable,
            reproduction_allowed: true,
            average_fps: f64::INFINITY,
        }
    }

    pub fn record_frame_time(&mut self, seconds: f64, config: &GovernorConfig) {
        if !seconds.is_finite() || seconds < 0.0 {
            return;
        }
        self.frame_times.push_back(seconds);
        while self.frame_times.len() > config.fps_history {
            self.frame_times.pop_front();
        }
    }

    fn measured_fps(&self) -> f64 {
        if self.frame_times.is_empty() {
            return f64::INFINITY;
        }
        let mean = self.frame_times.iter().sum::<f64>() / self.frame_times.len() as f64;
        if mean > 0.0 {
            1.0 / mean
        } else {
            f64::INFINITY
        }
    }

    /// Re-evaluates the throttle on check frames.
    ///
    /// Returns a [`OceanEvent::GovernorChange`] when the status changes.
    pub fn update(
        &mut self,
        frame: u64,
        population: usize,
        mode: ExecutionMode,
        config: &GovernorConfig,
    ) -> Option<OceanEvent> {
        if frame % config.fps_check_interval.max(1) != 0 {
            return None;
        }
        self.average_fps = self.measured_fps();

        let status = if population >= mode.population_cap(config) {
            GovernorStatus::PopulationLimitReached
        } else if self.average_fps < config.min_fps {
            GovernorStatus::LowFpsBraking
        } else {
            GovernorStatus::Stable
        };
        self.reproduction_allowed = status == GovernorStatus::Stable;

        if status == self.status {
            return None;
        }
        tracing::info!(
            frame = frame,
            from = ?self.status,
            to = ?status,
            population = population,
            fps = self.average_fps,
            "Governor status changed"
        );
        self.status = status;
        Some(OceanEvent::GovernorChange {
            frame,
            status,
            average_fps: self.average_fps,
        })
    }

    /// Single-cell runs are never throttled.
    #[must_use]
    pub fn can_reproduce(&self, mode: ExecutionMode) -> bool {
        mode == ExecutionMode::SingleCell || self.reproduction_allowed
    }

    #[must_use]
    pub fn status(&self) -> GovernorStatus {
        self.status
    }

    #[must_use]
    pub fn average_fps(&self) -> f64 {
        self.average_fps
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_population_cap_brakes() {
        let config = GovernorConfig::default();
        let mut governor = GameGovernor::new();
        let event = governor.update(60, 500, ExecutionMode::Development, &config);
        assert!(matches!(
            event,
            Some(OceanEvent::GovernorChange {
                status: GovernorStatus::PopulationLimitReached,
                ..
            })
        ));
        assert!(!governor.can_reproduce(ExecutionMode::Development));
        assert!(governor.can_reproduce(ExecutionMode::SingleCell));
    }

    #[test]
    fn test_low_fps_brakes_and_recovers() {
        let config = GovernorConfig::default();
        let mut governor = GameGovernor::new();
        for _ in 0..60 {
            governor.record_frame_time(0.05, &config);
        }
        governor.update(60, 10, ExecutionMode::Production, &config);
        assert_eq!(governor.status(), GovernorStatus::LowFpsBraking);
        assert!((governor.average_fps() - 20.0).abs() < 1e-9);

        for _ in 0..60 {
            governor.record_frame_time(0.01, &config);
        }
        governor.update(120, 10, ExecutionMode::Production, &config);
        assert_eq!(governor.status(), GovernorStatus::Stable);
        assert!(governor.can_reproduce(ExecutionMode::Production));
    }

    #[test]
    fn test_only_checks_on_interval() {
        let config = GovernorConfig::default();
        let mut governor = GameGovernor::new();
        assert!(governor
            .update(59, 10_000, ExecutionMode::Production, &config)
            .is_none());
        assert_eq!(governor.status(), GovernorStatus::Stable);
    }

    #[test]
    fn test_history_is_bounded() {
        let config = GovernorConfig {
            fps_history: 3,
            ..Default::default()
        };
        let mut governor = GameGovernor::new();
        for t in [1.0, 1.0, 0.01, 0.01, 0.01] {
            governor.record_frame_time(t, &config);
        }
        governor.update(0, 0, ExecutionMode::Production, &config);
        assert!((governor.average_fps() - 100.0).abs() < 1e-6);
    }
}
