//! End-of-run accounting: per-worker tallies, the final seat snapshot, and a
//! digest of the final state for cross-run comparison.

use biljett_core::admission::AdmissionStats;

/// What one worker did over its lifetime. Returned from the worker thread at
/// join time; aggregated into the [`SimulationReport`].
#[derive(Debug, Clone, Default)]
pub struct WorkerSummary {
    pub worker_id: usize,
    pub inquiries: u64,
    pub bookings: u64,
    pub rejected_bookings: u64,
    pub cancellations: u64,
    pub rejected_cancellations: u64,
    pub skipped_cancellations: u64,
    pub failures: u64,
    pub seats_booked: u64,
    pub seats_cancelled: u64,
    /// Seats still held in the worker's ledger at shutdown.
    pub seats_outstanding: u64,
}

impl WorkerSummary {
    pub fn new(worker_id: usize) -> Self {
        Self {
            worker_id,
            ..Self::default()
        }
    }
}

/// Final state of a finished simulation.
#[derive(Debug)]
pub struct SimulationReport {
    /// Per-event seat capacity the run started from.
    pub capacity: u32,
    /// Remaining seats per event at shutdown.
    pub remaining: Vec<u32>,
    /// One summary per worker, in worker-id order.
    pub workers: Vec<WorkerSummary>,
    /// Cumulative admission table activity.
    pub admission: AdmissionStats,
    /// blake3 hex digest of `remaining`.
    pub digest: String,
}

impl SimulationReport {
    pub fn new(
        capacity: u32,
        remaining: Vec<u32>,
        mut workers: Vec<WorkerSummary>,
        admission: AdmissionStats,
    ) -> Self {
        workers.sort_by_key(|summary| summary.worker_id);
        let digest = digest_seats(&remaining);
        Self {
            capacity,
            remaining,
            workers,
            admission,
            digest,
        }
    }

    /// Net seats removed from the pool, computed from the store side.
    pub fn seats_sold(&self) -> u64 {
        self.remaining
            .iter()
            .map(|&left| u64::from(self.capacity - left))
            .sum()
    }

    /// Net seats held across all worker ledgers, computed from the worker
    /// side.
    pub fn seats_outstanding(&self) -> u64 {
        self.workers
            .iter()
            .map(|summary| summary.seats_outstanding)
            .sum()
    }

    /// Conservation: every seat missing from the pool is held by exactly one
    /// worker ledger.
    pub fn is_conserved(&self) -> bool {
        self.seats_sold() == self.seats_outstanding()
    }
}

/// Deterministic digest of a seat snapshot.
pub fn digest_seats(remaining: &[u32]) -> String {
    let mut hasher = blake3::Hasher::new();
    for count in remaining {
        hasher.update(&count.to_le_bytes());
    }
    hex::encode(hasher.finalize().as_bytes())
}
