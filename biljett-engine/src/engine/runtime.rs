//! Simulation runtime core - builds the admission table, capacity store, and
//! executor from configuration, then drives the worker pool to its wall-clock
//! deadline.
//!
//! Workers are OS threads (`spawn_blocking`): they park inside `acquire` and
//! sleep through pauses and booking delays, so the async runtime only
//! coordinates startup, the shutdown timer, and the joins. Shutdown is
//! eventual by design - the flag is observed once per loop iteration, after
//! the cycle in progress has finished.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use rand::rngs::SmallRng;
use rand::SeedableRng;
use tokio::task::spawn_blocking;
use tokio::time::sleep;
use tracing::{debug, info, warn};

use biljett_config::BiljettConfig;
use biljett_core::admission::AdmissionTable;
use biljett_core::ops::OpKind;
use biljett_core::store::CapacityStore;
use biljett_simulator::{Ledger, Workload};
use biljett_telemetry::MetricsRecorder;

use crate::engine::error::SimulationError;
use crate::engine::executor::{Executor, Outcome};
use crate::engine::report::{SimulationReport, WorkerSummary};

/// Coordinates one simulation run: shared state construction, worker
/// lifecycle, and the final report.
pub struct SimulationRuntime {
    config: Arc<BiljettConfig>,
    table: Arc<AdmissionTable>,
    store: Arc<CapacityStore>,
    executor: Arc<Executor>,
}

impl SimulationRuntime {
    /// Creates a runtime with all shared state initialized from `config`.
    pub fn new(config: BiljettConfig, metrics: MetricsRecorder) -> Result<Self, SimulationError> {
        info!("Initializing simulation runtime");
        debug!("Venue config: {:?}", config.venue);
        debug!("Admission config: {:?}", config.admission);

        let table = Arc::new(AdmissionTable::with_slots(config.admission.slots)?);
        let store = Arc::new(CapacityStore::new(
            config.venue.events,
            config.venue.capacity,
        ));
        let executor = Arc::new(Executor::new(
            table.clone(),
            store.clone(),
            Duration::from_millis(config.admission.booking_delay_ms),
            Arc::new(metrics),
        ));

        Ok(Self {
            config: Arc::new(config),
            table,
            store,
            executor,
        })
    }

    /// Runs the worker pool until the configured wall-clock budget elapses,
    /// joins every worker, and returns the final report.
    pub async fn run(&self) -> Result<SimulationReport, SimulationError> {
        let workload = Workload::new(
            self.config.venue.events,
            self.config.workload.seats_min,
            self.config.workload.seats_max,
            self.config.workload.max_pause_ms,
        );
        let shutdown = Arc::new(AtomicBool::new(false));

        info!(
            "Starting {} workers for {}s",
            self.config.workload.workers, self.config.workload.duration_secs
        );

        let handles: Vec<_> = (0..self.config.workload.workers)
            .map(|worker_id| {
                let executor = self.executor.clone();
                let workload = workload.clone();
                let shutdown = shutdown.clone();
                let seed = self.config.workload.seed + worker_id as u64;

                spawn_blocking(move || worker_loop(worker_id, seed, &executor, &workload, &shutdown))
            })
            .collect();

        sleep(Duration::from_secs(self.config.workload.duration_secs)).await;
        info!("Simulation budget elapsed, signalling workers");
        shutdown.store(true, Ordering::Release);

        let mut summaries = Vec::with_capacity(handles.len());
        for handle in handles {
            summaries.push(handle.await?);
        }
        info!("All workers joined");

        Ok(SimulationReport::new(
            self.store.capacity(),
            self.store.snapshot(),
            summaries,
            self.table.stats(),
        ))
    }
}

/// Runs a full simulation from configuration. The single entry point used by
/// the CLI.
pub async fn run_simulation_mode(
    config: BiljettConfig,
    metrics: MetricsRecorder,
) -> Result<SimulationReport, SimulationError> {
    let runtime = SimulationRuntime::new(config, metrics)?;
    runtime.run().await
}

/// One worker's lifetime: pause, pick an operation, execute it, keep the
/// private ledger in step with confirmed outcomes, observe the shutdown flag.
fn worker_loop(
    worker_id: usize,
    seed: u64,
    executor: &Executor,
    workload: &Workload,
    shutdown: &AtomicBool,
) -> WorkerSummary {
    let mut rng = SmallRng::seed_from_u64(seed);
    let mut ledger = Ledger::new();
    let mut summary = WorkerSummary::new(worker_id);

    loop {
        thread::sleep(workload.next_pause(&mut rng));

        match workload.next_kind(&mut rng) {
            OpKind::Inquire => {
                let event_id = workload.next_event(&mut rng);
                match executor.inquire(worker_id, event_id) {
                    Ok(_) => summary.inquiries += 1,
                    Err(err) => {
                        warn!(worker = worker_id, event = event_id, %err, "inquiry failed");
                        summary.failures += 1;
                    }
                }
            }
            OpKind::Book => {
                let event_id = workload.next_event(&mut rng);
                let seats = workload.next_seats(&mut rng);
                match executor.book(worker_id, event_id, seats) {
                    Ok(Outcome::Confirmed { seats }) => {
                        ledger.record(event_id, seats);
                        summary.bookings += 1;
                        summary.seats_booked += u64::from(seats);
                    }
                    Ok(Outcome::Rejected { .. }) => summary.rejected_bookings += 1,
                    Err(err) => {
                        warn!(worker = worker_id, event = event_id, %err, "booking failed");
                        summary.failures += 1;
                    }
                }
            }
            OpKind::Cancel => match ledger.pick(&mut rng) {
                None => {
                    debug!(worker = worker_id, "nothing booked, skipping cancellation");
                    summary.skipped_cancellations += 1;
                }
                Some(target) => match executor.cancel(worker_id, target.event_id, target.seats) {
                    Ok(Outcome::Confirmed { seats }) => {
                        ledger.settle(target.event_id, seats);
                        summary.cancellations += 1;
                        summary.seats_cancelled += u64::from(seats);
                    }
                    Ok(Outcome::Rejected { .. }) => summary.rejected_cancellations += 1,
                    Err(err) => {
                        warn!(
                            worker = worker_id,
                            event = target.event_id,
                            %err,
                            "cancellation failed"
                        );
                        summary.failures += 1;
                    }
                },
            },
        }

        if shutdown.load(Ordering::Acquire) {
            debug!(worker = worker_id, "timeout observed, stopping");
            break;
        }
    }

    summary.seats_outstanding = ledger.seats_held();
    summary
}
