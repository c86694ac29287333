//! elevator_up — estimate elevator-bank metrics over many simulated days.
//!
//! ```text
//! elevator_up <FLOORS> <ELEVATORS> <DEVIATES> <DAYS> [-v...] [--json]
//! ```
//!
//! `DEVIATES` is a text file with one uniform(0, 1) value per line; every
//! random decision in the run is read from it in order.  The report goes to
//! stdout; log lines go to stderr.  Any failure to open or read the deviate
//! file exits with status 1 and prints nothing on stdout.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::Level;

use lift_core::{DeviateSource, DeviateStream, Tick};
use lift_sim::{BuildingConfig, DayObserver, DayOutcome, Experiment};

#[derive(Parser, Debug)]
#[clap(about, long_about = None)]
struct Args {
    /// Floors above ground.
    #[clap(value_parser = clap::value_parser!(u32).range(1..))]
    floors: u32,

    /// Elevators in the bank.
    #[clap(value_parser = clap::value_parser!(u32).range(1..))]
    elevators: u32,

    /// File of uniform(0, 1) deviates, one per line.
    deviates: PathBuf,

    /// Simulated days to run.
    #[clap(value_parser = clap::value_parser!(u32).range(1..))]
    days: u32,

    /// Print the report as JSON instead of text.
    #[clap(long)]
    json: bool,

    /// Log to stderr; repeat for more detail (-v debug, -vv trace).
    #[clap(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

// ── Progress logging ──────────────────────────────────────────────────────────

/// Logs one line per finished day.
struct DayLogger {
    groups: u64,
}

impl DayObserver for DayLogger {
    fn on_group_arrival(&mut self, _tick: Tick, _size: u32, _placed: u32) {
        self.groups += 1;
    }

    fn on_day_end(&mut self, outcome: &DayOutcome) {
        tracing::info!(
            day = outcome.day,
            ticks = outcome.final_tick.0,
            groups = self.groups,
            riders = outcome.passengers,
            max_queue = outcome.max_waiting,
            "day complete"
        );
        self.groups = 0;
    }
}

// ── main ──────────────────────────────────────────────────────────────────────

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(args: &Args) -> Result<String> {
    let mut source = DeviateStream::open(&args.deviates)
        .with_context(|| format!("cannot open deviate file {}", args.deviates.display()))?;

    let config = BuildingConfig::new(args.floors, args.elevators);
    let experiment = Experiment::new(config, args.days)?;
    let report = experiment.run(&mut source, &mut DayLogger { groups: 0 })?;
    tracing::debug!(deviates = source.drawn(), "run finished");

    if args.json {
        Ok(serde_json::to_string_pretty(&report)?)
    } else {
        Ok(report.to_string())
    }
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.verbose);

    match run(&args) {
        Ok(report) => {
            println!("{report}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::from(1)
        }
    }
}
