//! Operation executor - runs one admitted operation against the capacity
//! store and reports the business outcome.
//!
//! The executor is the only code path that touches the store, and it only
//! does so between `acquire` and the guard drop. Rejections are expected
//! outcomes, not faults: a booking that finds too few seats and a
//! cancellation that would overshoot capacity both come back as
//! `Outcome::Rejected` with the counter untouched.

use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use tracing::debug;

use biljett_core::admission::{AdmissionGuard, AdmissionTable};
use biljett_core::ops::{OpKind, Operation};
use biljett_core::store::CapacityStore;
use biljett_core::ReservationError;
use biljett_telemetry::{EventLogger, MetricsRecorder};

/// Result of a booking or cancellation attempt. A definite rejection is
/// never retried; the caller logs it and moves on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Confirmed { seats: u32 },
    Rejected { reason: RejectReason },
}

impl Outcome {
    pub fn is_confirmed(&self) -> bool {
        matches!(self, Outcome::Confirmed { .. })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    /// Booking demand exceeded the remaining seats.
    InsufficientSeats { requested: u32, available: u32 },
    /// Cancellation would have pushed the counter past capacity.
    ExceedsCapacity { requested: u32, remaining: u32 },
}

pub struct Executor {
    table: Arc<AdmissionTable>,
    store: Arc<CapacityStore>,
    booking_delay: Duration,
    metrics: Arc<MetricsRecorder>,
}

impl Executor {
    pub fn new(
        table: Arc<AdmissionTable>,
        store: Arc<CapacityStore>,
        booking_delay: Duration,
        metrics: Arc<MetricsRecorder>,
    ) -> Self {
        Self {
            table,
            store,
            booking_delay,
            metrics,
        }
    }

    /// Shared-admission read of the remaining seat count.
    pub fn inquire(&self, worker_id: usize, event_id: usize) -> Result<u32, ReservationError> {
        let guard = self.admit(Operation::new(event_id, OpKind::Inquire, worker_id));
        let remaining = self.store.read(event_id)?;
        drop(guard);

        self.metrics.inquiries.inc();
        debug!(worker = worker_id, event = event_id, remaining, "inquiry");
        Ok(remaining)
    }

    /// Exclusive-admission booking of `seats` seats.
    ///
    /// The configured confirmation delay runs while the admission is held,
    /// so the whole confirm window is protected from interference on this
    /// event; workers on other events proceed in parallel.
    pub fn book(
        &self,
        worker_id: usize,
        event_id: usize,
        seats: u32,
    ) -> Result<Outcome, ReservationError> {
        let guard = self.admit(Operation::new(event_id, OpKind::Book, worker_id));

        if !self.booking_delay.is_zero() {
            thread::sleep(self.booking_delay);
        }

        let outcome = if self.store.try_book(event_id, seats)? {
            self.metrics.bookings.inc();
            EventLogger::log_outcome("book", worker_id, event_id, seats, "booking confirmed");
            Outcome::Confirmed { seats }
        } else {
            let available = self.store.read(event_id)?;
            self.metrics.rejections.inc();
            EventLogger::log_outcome("book", worker_id, event_id, seats, "booking rejected");
            Outcome::Rejected {
                reason: RejectReason::InsufficientSeats {
                    requested: seats,
                    available,
                },
            }
        };

        drop(guard);
        Ok(outcome)
    }

    /// Exclusive-admission cancellation returning `seats` seats to the pool.
    pub fn cancel(
        &self,
        worker_id: usize,
        event_id: usize,
        seats: u32,
    ) -> Result<Outcome, ReservationError> {
        let guard = self.admit(Operation::new(event_id, OpKind::Cancel, worker_id));

        let outcome = if self.store.try_cancel(event_id, seats)? {
            self.metrics.cancellations.inc();
            EventLogger::log_outcome("cancel", worker_id, event_id, seats, "cancellation confirmed");
            Outcome::Confirmed { seats }
        } else {
            let remaining = self.store.read(event_id)?;
            self.metrics.rejections.inc();
            EventLogger::log_outcome("cancel", worker_id, event_id, seats, "cancellation rejected");
            Outcome::Rejected {
                reason: RejectReason::ExceedsCapacity {
                    requested: seats,
                    remaining,
                },
            }
        };

        drop(guard);
        Ok(outcome)
    }

    fn admit(&self, op: Operation) -> AdmissionGuard<'_> {
        let start = Instant::now();
        let guard = self.table.acquire(op);
        self.metrics
            .admission_wait
            .observe(start.elapsed().as_secs_f64());
        guard
    }
}
