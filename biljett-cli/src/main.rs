//! ## biljett-cli
//! **Operational interface for the reservation simulator**
//!
//! Loads configuration, spins up the worker pool, and prints the final
//! per-event seat counts once every worker has observed the timeout and
//! been joined.

use clap::Parser;

use biljett_telemetry::logging::EventLogger;
use biljett_telemetry::metrics::MetricsRecorder;

mod commands;

use commands::{Cli, Commands};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    EventLogger::init();
    let metrics = MetricsRecorder::new();
    let cli = Cli::parse();

    match cli.command {
        Commands::Simulate(args) => commands::run_simulation(args, metrics).await,
    }
}
