//! ## biljett-core::admission
//! **Bounded admission table with conflict detection**
//!
//! A fixed set of K slots records every operation currently allowed to touch
//! the capacity store. `acquire` blocks the calling thread until the request
//! is compatible with all occupied slots AND a slot is free; the returned
//! guard releases the slot on drop and wakes every waiter.
//!
//! ## Protocol
//! 1. **Conflict scan** - an occupied slot on the same event conflicts unless
//!    both operations are inquiries
//! 2. **Slot claim** - first free slot wins; the global count of occupied
//!    slots never exceeds K (backpressure across all events)
//! 3. **Wake-all release** - waiters re-run the full scan from scratch on
//!    every wake, so spurious and simultaneous wake-ups are harmless
//!
//! No ordering is promised between waiters. Any of them may win the race
//! after a release; liveness, not fairness.

use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::{Condvar, Mutex};
use tracing::{debug, trace};

use crate::error::ReservationError;
use crate::ops::Operation;

/// Bounded table of in-flight operations. Shared between all workers for the
/// lifetime of the process; the slot array and active count are the only data
/// behind the mutex.
pub struct AdmissionTable {
    slots: Mutex<SlotTable>,
    released: Condvar,
    admitted: AtomicU64,
    conflicts: AtomicU64,
    full_waits: AtomicU64,
}

struct SlotTable {
    entries: Box<[Option<Operation>]>,
    active: usize,
}

impl SlotTable {
    /// An occupied slot on the same event conflicts unless both sides are
    /// inquiries. Book and Cancel exclude everything, including each other.
    fn conflicts_with(&self, op: &Operation) -> bool {
        self.entries.iter().flatten().any(|occupied| {
            occupied.event_id == op.event_id
                && (occupied.kind.is_exclusive() || op.kind.is_exclusive())
        })
    }

    fn free_slot(&self) -> Option<usize> {
        self.entries.iter().position(Option::is_none)
    }
}

impl AdmissionTable {
    /// Creates a table with `slots` concurrent-operation slots.
    pub fn with_slots(slots: usize) -> Result<Self, ReservationError> {
        if slots == 0 {
            return Err(ReservationError::InvalidSlotCount);
        }

        Ok(Self {
            slots: Mutex::new(SlotTable {
                entries: (0..slots).map(|_| None).collect(),
                active: 0,
            }),
            released: Condvar::new(),
            admitted: AtomicU64::new(0),
            conflicts: AtomicU64::new(0),
            full_waits: AtomicU64::new(0),
        })
    }

    /// Blocks until `op` may proceed, then records it into a free slot.
    ///
    /// Two conditions must hold atomically: no occupied slot conflicts with
    /// `op`, and fewer than K slots are occupied. Either failure parks the
    /// caller on the shared condition variable; every release re-tests both
    /// conditions from scratch. The capacity store is untouched here.
    pub fn acquire(&self, op: Operation) -> AdmissionGuard<'_> {
        let mut table = self.slots.lock();

        loop {
            if table.conflicts_with(&op) {
                debug!(
                    event = op.event_id,
                    worker = op.worker_id,
                    kind = ?op.kind,
                    "conflict, waiting for release"
                );
                self.conflicts.fetch_add(1, Ordering::Relaxed);
                self.released.wait(&mut table);
                continue;
            }

            if let Some(slot) = table.free_slot() {
                table.entries[slot] = Some(op);
                table.active += 1;
                self.admitted.fetch_add(1, Ordering::Relaxed);
                trace!(
                    event = op.event_id,
                    worker = op.worker_id,
                    slot,
                    "inserting into admission table"
                );
                return AdmissionGuard {
                    table: self,
                    slot,
                    op,
                };
            }

            debug!(
                event = op.event_id,
                worker = op.worker_id,
                "table full, waiting"
            );
            self.full_waits.fetch_add(1, Ordering::Relaxed);
            self.released.wait(&mut table);
        }
    }

    /// Number of slots occupied right now.
    pub fn active(&self) -> usize {
        self.slots.lock().active
    }

    /// Total slot count K.
    pub fn slots(&self) -> usize {
        self.slots.lock().entries.len()
    }

    /// Cumulative table activity since construction.
    pub fn stats(&self) -> AdmissionStats {
        AdmissionStats {
            admitted: self.admitted.load(Ordering::Relaxed),
            conflicts: self.conflicts.load(Ordering::Relaxed),
            full_waits: self.full_waits.load(Ordering::Relaxed),
        }
    }

    fn release(&self, slot: usize) {
        let mut table = self.slots.lock();
        table.entries[slot] = None;
        table.active -= 1;
        self.released.notify_all();
    }
}

/// Cumulative counters for diagnostics and the end-of-run report.
#[derive(Clone, Copy, Debug, Default)]
pub struct AdmissionStats {
    /// Operations that made it into a slot.
    pub admitted: u64,
    /// Times a request parked because of an incompatible operation.
    pub conflicts: u64,
    /// Times a request parked because all K slots were occupied.
    pub full_waits: u64,
}

/// Grant for one admitted operation. Holding the guard is the permission to
/// touch the capacity store for `operation().event_id`; dropping it clears
/// the slot and wakes all blocked acquirers.
#[must_use = "the admission slot stays occupied until the guard is dropped"]
pub struct AdmissionGuard<'a> {
    table: &'a AdmissionTable,
    slot: usize,
    op: Operation,
}

impl AdmissionGuard<'_> {
    pub fn operation(&self) -> Operation {
        self.op
    }

    pub fn slot(&self) -> usize {
        self.slot
    }
}

impl Drop for AdmissionGuard<'_> {
    fn drop(&mut self) {
        trace!(
            event = self.op.event_id,
            worker = self.op.worker_id,
            slot = self.slot,
            "releasing admission slot"
        );
        self.table.release(self.slot);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ops::OpKind;
    use std::sync::mpsc;
    use std::time::Duration;

    fn op(event_id: usize, kind: OpKind, worker_id: usize) -> Operation {
        Operation::new(event_id, kind, worker_id)
    }

    #[test]
    fn with_slots_rejects_zero() {
        assert!(matches!(
            AdmissionTable::with_slots(0),
            Err(ReservationError::InvalidSlotCount)
        ));
    }

    #[test]
    fn inquiries_share_an_event() {
        let table = AdmissionTable::with_slots(4).unwrap();

        let first = table.acquire(op(7, OpKind::Inquire, 1));
        let second = table.acquire(op(7, OpKind::Inquire, 2));

        assert_eq!(table.active(), 2);
        drop(first);
        drop(second);
        assert_eq!(table.active(), 0);
    }

    #[test]
    fn distinct_events_admit_concurrently() {
        let table = AdmissionTable::with_slots(4).unwrap();

        let _book_a = table.acquire(op(0, OpKind::Book, 1));
        let _book_b = table.acquire(op(1, OpKind::Book, 2));

        assert_eq!(table.active(), 2);
    }

    #[test]
    fn guard_drop_frees_the_slot() {
        let table = AdmissionTable::with_slots(1).unwrap();

        let guard = table.acquire(op(3, OpKind::Cancel, 1));
        assert_eq!(table.active(), 1);
        drop(guard);
        assert_eq!(table.active(), 0);

        // The freed slot is reusable immediately.
        let _again = table.acquire(op(3, OpKind::Book, 1));
        assert_eq!(table.active(), 1);
    }

    /// Spawns a thread that acquires `blocked` and signals once admitted,
    /// releasing straight away.
    fn acquire_in_thread<'env>(
        scope: &crossbeam::thread::Scope<'env>,
        table: &'env AdmissionTable,
        blocked: Operation,
    ) -> mpsc::Receiver<()> {
        let (tx, rx) = mpsc::channel();
        scope.spawn(move |_| {
            let guard = table.acquire(blocked);
            tx.send(()).unwrap();
            drop(guard);
        });
        rx
    }

    #[test]
    fn exclusive_holder_blocks_inquiry_on_same_event() {
        let table = AdmissionTable::with_slots(4).unwrap();
        let holder = table.acquire(op(5, OpKind::Book, 1));

        crossbeam::thread::scope(|s| {
            let admitted = acquire_in_thread(s, &table, op(5, OpKind::Inquire, 2));

            // The inquiry must still be parked while the booking is active.
            assert!(admitted.recv_timeout(Duration::from_millis(100)).is_err());

            drop(holder);
            admitted
                .recv_timeout(Duration::from_secs(5))
                .expect("waiter admitted after release");
        })
        .unwrap();
    }

    #[test]
    fn inquiry_holder_blocks_exclusive_on_same_event() {
        let table = AdmissionTable::with_slots(4).unwrap();
        let holder = table.acquire(op(2, OpKind::Inquire, 1));

        crossbeam::thread::scope(|s| {
            let admitted = acquire_in_thread(s, &table, op(2, OpKind::Cancel, 2));

            assert!(admitted.recv_timeout(Duration::from_millis(100)).is_err());

            drop(holder);
            admitted
                .recv_timeout(Duration::from_secs(5))
                .expect("waiter admitted after release");
        })
        .unwrap();
    }

    #[test]
    fn full_table_blocks_even_for_distinct_events() {
        let table = AdmissionTable::with_slots(1).unwrap();
        let holder = table.acquire(op(0, OpKind::Inquire, 1));

        crossbeam::thread::scope(|s| {
            // Different event, no conflict, but the single slot is taken.
            let admitted = acquire_in_thread(s, &table, op(1, OpKind::Inquire, 2));

            assert!(admitted.recv_timeout(Duration::from_millis(100)).is_err());
            assert!(table.stats().full_waits > 0);

            drop(holder);
            admitted
                .recv_timeout(Duration::from_secs(5))
                .expect("waiter admitted after release");
        })
        .unwrap();
    }

    #[test]
    fn release_eventually_admits_every_waiter() {
        let table = AdmissionTable::with_slots(4).unwrap();
        let holder = table.acquire(op(9, OpKind::Book, 0));

        crossbeam::thread::scope(|s| {
            let waiters: Vec<_> = (1..=3)
                .map(|worker| acquire_in_thread(s, &table, op(9, OpKind::Book, worker)))
                .collect();

            drop(holder);

            // No ordering promised, but every waiter must get through: each
            // releases on completion, waking the rest.
            for waiter in waiters {
                waiter
                    .recv_timeout(Duration::from_secs(10))
                    .expect("every blocked waiter is eventually admitted");
            }
        })
        .unwrap();

        assert_eq!(table.active(), 0);
        assert_eq!(table.stats().admitted, 4);
    }
}
