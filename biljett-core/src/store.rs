//! ## biljett-core::store
//! **Per-event seat counters**
//!
//! The store holds one counter per event, each bounded in `[0, capacity]`.
//! It performs no locking of its own: callers must hold an admission grant
//! for the event (an exclusive one for `try_book`/`try_cancel`). The plain
//! load/store pairs below are race-free only under that discipline; the
//! admission table's mutex provides the happens-before edges between
//! successive holders.

use std::sync::atomic::{AtomicU32, Ordering};

use crate::error::ReservationError;

pub struct CapacityStore {
    seats: Box<[AtomicU32]>,
    capacity: u32,
}

impl CapacityStore {
    /// Creates `events` counters, each starting at full `capacity`.
    pub fn new(events: usize, capacity: u32) -> Self {
        Self {
            seats: (0..events).map(|_| AtomicU32::new(capacity)).collect(),
            capacity,
        }
    }

    /// Number of events tracked.
    pub fn events(&self) -> usize {
        self.seats.len()
    }

    /// Per-event seat capacity C.
    pub fn capacity(&self) -> u32 {
        self.capacity
    }

    /// Current remaining seats. Caller must hold admission of any kind for
    /// `event_id`.
    pub fn read(&self, event_id: usize) -> Result<u32, ReservationError> {
        Ok(self.counter(event_id)?.load(Ordering::Acquire))
    }

    /// Books `seats` seats iff enough remain. Caller must hold exclusive
    /// admission for `event_id`. Returns whether the booking went through.
    pub fn try_book(&self, event_id: usize, seats: u32) -> Result<bool, ReservationError> {
        let counter = self.counter(event_id)?;
        let remaining = counter.load(Ordering::Acquire);
        if remaining >= seats {
            counter.store(remaining - seats, Ordering::Release);
            Ok(true)
        } else {
            Ok(false)
        }
    }

    /// Returns `seats` seats iff that stays within capacity. Caller must hold
    /// exclusive admission for `event_id`. Returns whether the cancellation
    /// went through.
    pub fn try_cancel(&self, event_id: usize, seats: u32) -> Result<bool, ReservationError> {
        let counter = self.counter(event_id)?;
        let remaining = counter.load(Ordering::Acquire);
        match remaining.checked_add(seats) {
            Some(total) if total <= self.capacity => {
                counter.store(total, Ordering::Release);
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    /// Copies out all counters, e.g. for the end-of-run report.
    pub fn snapshot(&self) -> Vec<u32> {
        self.seats
            .iter()
            .map(|counter| counter.load(Ordering::Acquire))
            .collect()
    }

    fn counter(&self, event_id: usize) -> Result<&AtomicU32, ReservationError> {
        self.seats
            .get(event_id)
            .ok_or(ReservationError::UnknownEvent(event_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn counters_start_full() {
        let store = CapacityStore::new(3, 500);
        assert_eq!(store.events(), 3);
        assert_eq!(store.read(0).unwrap(), 500);
        assert_eq!(store.snapshot(), vec![500, 500, 500]);
    }

    #[test]
    fn booking_decrements_until_insufficient() {
        let store = CapacityStore::new(1, 500);

        assert!(store.try_book(0, 300).unwrap());
        assert_eq!(store.read(0).unwrap(), 200);

        // 200 < 300: rejected, counter untouched.
        assert!(!store.try_book(0, 300).unwrap());
        assert_eq!(store.read(0).unwrap(), 200);
    }

    #[test]
    fn cancellation_never_exceeds_capacity() {
        let store = CapacityStore::new(1, 500);

        assert!(!store.try_cancel(0, 50).unwrap());
        assert_eq!(store.read(0).unwrap(), 500);

        assert!(store.try_book(0, 50).unwrap());
        assert!(store.try_cancel(0, 50).unwrap());
        assert_eq!(store.read(0).unwrap(), 500);
    }

    #[test]
    fn unknown_event_is_an_error() {
        let store = CapacityStore::new(2, 500);
        assert!(matches!(
            store.read(2),
            Err(ReservationError::UnknownEvent(2))
        ));
        assert!(matches!(
            store.try_book(9, 1),
            Err(ReservationError::UnknownEvent(9))
        ));
    }

    proptest! {
        /// Arbitrary interleavings of book/cancel keep every counter within
        /// `[0, capacity]` (u32 rules out underflow; the upper bound is the
        /// interesting half).
        #[test]
        fn counters_stay_in_bounds(
            ops in proptest::collection::vec(
                (0usize..4, 0u32..=600, any::<bool>()),
                0..64,
            )
        ) {
            let store = CapacityStore::new(4, 500);

            for (event_id, seats, book) in ops {
                if book {
                    store.try_book(event_id, seats).unwrap();
                } else {
                    store.try_cancel(event_id, seats).unwrap();
                }
                prop_assert!(store.read(event_id).unwrap() <= 500);
            }
        }
    }
}
