//! corridor — run a small fleet down an open road and flag speeding.
//!
//! By default three vehicles start at a random 20–60 km/h, jitter their
//! speed every 10 simulated seconds, run for 5 s at 1 s resolution, export
//! `data_log.csv` / `data_log.json`, and print an alert for every record
//! above 40 km/h.  Set `RUST_LOG=traffic=debug` to see every record.

mod scenario;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::Parser;

use ts_core::{SimRng, TracingSink};
use ts_output::{DEFAULT_CSV_PATH, DEFAULT_JSON_PATH, FileExporter};
use ts_sim::{DurationPolicy, Pacing, SpeedAlert, SystemConfig, TrafficSystemBuilder};

use scenario::Scenario;

#[derive(Debug, Parser)]
#[command(name = "corridor", about = "Discrete-time traffic run with transponder logging")]
struct Args {
    /// Number of generated vehicles (ignored with --scenario)
    #[arg(long, default_value_t = 3)]
    vehicles: usize,
    /// Lowest generated initial speed, km/h
    #[arg(long, default_value_t = 20)]
    min_speed: u32,
    /// Highest generated initial speed, km/h
    #[arg(long, default_value_t = 60)]
    max_speed: u32,
    /// JSON file listing vehicles explicitly
    #[arg(long)]
    scenario: Option<PathBuf>,
    /// Master seed for initial speeds and per-vehicle behavior
    #[arg(long, default_value_t = 42)]
    seed: u64,
    /// Simulated seconds to run
    #[arg(long, default_value_t = 5.0)]
    duration: f64,
    /// Seconds per tick
    #[arg(long, default_value_t = 1.0)]
    dt: f64,
    /// Sleep dt wall-clock seconds between ticks
    #[arg(long)]
    realtime: bool,
    /// Reject durations that are not a whole multiple of dt
    #[arg(long)]
    exact: bool,
    #[arg(long, default_value = DEFAULT_CSV_PATH)]
    csv: PathBuf,
    #[arg(long, default_value = DEFAULT_JSON_PATH)]
    json: PathBuf,
    /// Skip writing the CSV/JSON logs
    #[arg(long)]
    no_export: bool,
    /// Speed above which a record raises an alert, km/h
    #[arg(long, default_value_t = 40.0)]
    alert_above: f64,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let args = Args::parse();

    let scenario = match &args.scenario {
        Some(path) => Scenario::load(path)?,
        None => {
            let mut rng = SimRng::new(args.seed);
            Scenario::generated(args.vehicles, args.min_speed, args.max_speed, &mut rng)?
        }
    };

    let config = SystemConfig {
        seed:            args.seed,
        duration_policy: if args.exact { DurationPolicy::Exact } else { DurationPolicy::Truncate },
    };

    let mut builder = TrafficSystemBuilder::new()
        .config(config)
        .log_sink(Arc::new(TracingSink))
        .vehicles(scenario.build_vehicles()?);
    if !args.no_export {
        builder = builder.exporter(FileExporter::new(&args.csv, &args.json));
    }
    let mut system = builder.build()?;

    let summary = system.simulate(args.duration, args.dt, Pacing::from(args.realtime))?;

    let mut alert = SpeedAlert::new(args.alert_above);
    system.analyze(|record| alert.inspect(record));
    for a in alert.alerts() {
        println!("{a}");
    }

    println!(
        "done: {} ticks, {} records, {} behavior failures, {} alerts",
        summary.steps,
        summary.records_appended,
        summary.behavior_failures,
        alert.alerts().len()
    );
    Ok(())
}
