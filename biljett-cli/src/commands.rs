use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use tracing::info;

use biljett_config::BiljettConfig;
use biljett_engine::{run_simulation_mode, SimulationReport};
use biljett_telemetry::metrics::MetricsRecorder;

#[derive(Parser)]
#[command(version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the reservation simulation until the wall-clock budget elapses
    Simulate(SimulateArgs),
}

#[derive(Args, Debug, Clone)]
pub struct SimulateArgs {
    /// Configuration file; when omitted, defaults merged with
    /// config/biljett.yaml and BILJETT_* environment variables apply.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Override the worker pool size
    #[arg(long)]
    pub workers: Option<usize>,

    /// Override the simulation duration in seconds
    #[arg(long)]
    pub duration_secs: Option<u64>,

    /// Override the base RNG seed
    #[arg(long)]
    pub seed: Option<u64>,

    /// Dump Prometheus metrics after the run
    #[arg(long, default_value_t = false)]
    pub print_metrics: bool,
}

pub async fn run_simulation(
    args: SimulateArgs,
    metrics: MetricsRecorder,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let mut config = match &args.config {
        Some(path) => BiljettConfig::load_from_path(path)?,
        None => BiljettConfig::load()?,
    };

    if let Some(workers) = args.workers {
        config.workload.workers = workers;
    }
    if let Some(duration_secs) = args.duration_secs {
        config.workload.duration_secs = duration_secs;
    }
    if let Some(seed) = args.seed {
        config.workload.seed = seed;
    }

    let report = run_simulation_mode(config, metrics.clone()).await?;
    print_report(&report);

    if args.print_metrics {
        println!("{}", metrics.gather_metrics()?);
    }

    Ok(())
}

fn print_report(report: &SimulationReport) {
    for (event_id, remaining) in report.remaining.iter().enumerate() {
        println!("Event {}, remaining seats {}", event_id, remaining);
    }
    println!("State digest: {}", report.digest);

    let bookings: u64 = report.workers.iter().map(|w| w.bookings).sum();
    let cancellations: u64 = report.workers.iter().map(|w| w.cancellations).sum();
    let inquiries: u64 = report.workers.iter().map(|w| w.inquiries).sum();
    let rejections: u64 = report
        .workers
        .iter()
        .map(|w| w.rejected_bookings + w.rejected_cancellations)
        .sum();

    info!(
        inquiries,
        bookings,
        cancellations,
        rejections,
        admitted = report.admission.admitted,
        conflicts = report.admission.conflicts,
        full_waits = report.admission.full_waits,
        conserved = report.is_conserved(),
        "simulation finished"
    );
}
