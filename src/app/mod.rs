pub mod report;
pub mod shutdown;

pub use report::Report;
pub use shutdown::ShutdownManager;

use anyhow::Result;
use ocean_core::{AppConfig, Metrics, SimulationContext};
use ocean_data::OceanEvent;
use std::io::Write;
use std::time::Instant;

/// Ticks between cooperative yields to the async runtime.
const YIELD_EVERY: u64 = 64;

/// Runner-level options that do not affect the physics.
#[derive(Debug, Clone)]
pub struct RunSettings {
    /// Stop after this many ticks. `None` runs until shutdown or extinction.
    pub max_ticks: Option<u64>,
    /// Ticks between progress reports. `0` disables them.
    pub report_interval: u64,
    /// Print every event as a JSON line on stdout.
    pub emit_events: bool,
    /// Stop when the population reaches zero.
    pub stop_on_extinction: bool,
}

impl Default for RunSettings {
    fn default() -> Self {
        Self {
            max_ticks: None,
            report_interval: 1000,
            emit_events: false,
            stop_on_extinction: true,
        }
    }
}

/// Why a run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    TickLimit,
    Extinction,
    Shutdown,
}

pub struct App {
    pub ctx: SimulationContext,
    pub metrics: Metrics,
    pub shutdown: ShutdownManager,
    pub settings: RunSettings,
}

impl App {
    pub fn new(config: AppConfig, settings: RunSettings) -> Result<Self> {
        let ctx = SimulationContext::new(config)?;
        Ok(Self {
            ctx,
            metrics: Metrics::new(),
            shutdown: ShutdownManager::new(),
            settings,
        })
    }

    /// Runs one tick and feeds its timing to the governor and counters.
    pub fn step(&mut self) -> Result<Vec<OceanEvent>> {
        let started = Instant::now();
        let events = self.ctx.tick()?;
        let duration = started.elapsed();

        self.ctx.record_frame_time(duration);
        self.metrics.record_events(&events);
        self.metrics.record_tick(duration, self.ctx.population());

        let interval = self.settings.report_interval;
        if interval > 0 && self.ctx.frame().is_multiple_of(interval) {
            Report::capture(&self.ctx, &self.metrics).log();
        }
        Ok(events)
    }

    fn stop_reason(&self) -> Option<StopReason> {
        if self.shutdown.is_shutdown_requested() {
            return Some(StopReason::Shutdown);
        }
        if self
            .settings
            .max_ticks
            .is_some_and(|max| self.ctx.frame() >= max)
        {
            return Some(StopReason::TickLimit);
        }
        if self.settings.stop_on_extinction && self.ctx.population() == 0 {
            return Some(StopReason::Extinction);
        }
        None
    }

    /// Ticks until a stop condition holds, then returns a final report.
    pub async fn run(&mut self) -> Result<(StopReason, Report)> {
        self.shutdown.listen_for_ctrl_c();
        let stdout = std::io::stdout();

        let reason = loop {
            if let Some(reason) = self.stop_reason() {
                break reason;
            }
            let events = self.step()?;
            if self.settings.emit_events && !events.is_empty() {
                let mut out = stdout.lock();
                for event in &events {
                    writeln!(out, "{}", event.to_json()?)?;
                }
            }
            if self.ctx.frame().is_multiple_of(YIELD_EVERY) {
                tokio::task::yield_now().await;
            }
        };

        let report = Report::capture(&self.ctx, &self.metrics);
        tracing::info!(
            reason = ?reason,
            frame = report.frame,
            population = report.population,
            "Run finished"
        );
        Ok((reason, report))
    }
}
