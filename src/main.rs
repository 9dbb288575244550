use anyhow::Result;
use clap::Parser;
use ocean_core::config::ExecutionMode;
use ocean_core::{init_logging, AppConfig};
use primordial_ocean_lib::app::{App, RunSettings, StopReason};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Config file path. Missing files fall back to defaults.
    #[arg(short, long, default_value = "ocean.toml")]
    config: String,

    /// Stop after this many ticks (0 runs until extinction or Ctrl-C)
    #[arg(short, long)]
    ticks: Option<u64>,

    /// Override the world seed
    #[arg(short, long)]
    seed: Option<u64>,

    /// Override the execution mode
    #[arg(short, long, value_enum)]
    mode: Option<Mode>,

    /// Ticks between progress reports (0 disables)
    #[arg(long, default_value_t = 1000)]
    report_interval: u64,

    /// Print every event as a JSON line on stdout
    #[arg(long)]
    events: bool,

    /// Keep ticking after the population dies out
    #[arg(long)]
    keep_empty: bool,
}

#[derive(clap::ValueEnum, Clone, Copy, Debug)]
enum Mode {
    Development,
    Production,
    SingleCell,
    SingleVent,
}

impl From<Mode> for ExecutionMode {
    fn from(mode: Mode) -> Self {
        match mode {
            Mode::Development => ExecutionMode::Development,
            Mode::Production => ExecutionMode::Production,
            Mode::SingleCell => ExecutionMode::SingleCell,
            Mode::SingleVent => ExecutionMode::SingleVent,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    init_logging();
    let args = Args::parse();

    let mut config = AppConfig::load(&args.config)?;
    if let Some(seed) = args.seed {
        config.world.seed = Some(seed);
    }
    if let Some(mode) = args.mode {
        config.world.execution_mode = mode.into();
    }

    let settings = RunSettings {
        max_ticks: args.ticks.filter(|&t| t > 0),
        report_interval: args.report_interval,
        emit_events: args.events,
        stop_on_extinction: !args.keep_empty,
    };
    let mut app = App::new(config, settings)?;
    let (reason, report) = app.run().await?;

    if reason == StopReason::Extinction {
        eprintln!("Population extinct at frame {}", report.frame);
    }
    eprintln!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
