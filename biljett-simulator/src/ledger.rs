//! ## biljett-simulator::ledger
//! **Worker-private booking record**
//!
//! Each worker remembers which events it holds seats on so cancellations
//! target something it actually booked. The ledger is owned by exactly one
//! worker and needs no synchronization. It is not authoritative: the shared
//! counters can drift from it through other workers' bookings, which only
//! affects which cancellation gets attempted, never counter correctness.

use rand::Rng;

/// Per-worker mapping from event id to seats currently held.
#[derive(Debug, Default)]
pub struct Ledger {
    entries: Vec<LedgerEntry>,
}

#[derive(Debug, Clone, Copy)]
struct LedgerEntry {
    event_id: usize,
    seats: u32,
}

/// A cancellation candidate drawn from the ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CancelTarget {
    pub event_id: usize,
    pub seats: u32,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of distinct events with seats held.
    pub fn events_held(&self) -> usize {
        self.entries.len()
    }

    /// Seats held on one event.
    pub fn held(&self, event_id: usize) -> u32 {
        self.entries
            .iter()
            .find(|entry| entry.event_id == event_id)
            .map_or(0, |entry| entry.seats)
    }

    /// Total seats held across all events.
    pub fn seats_held(&self) -> u64 {
        self.entries.iter().map(|entry| u64::from(entry.seats)).sum()
    }

    /// Adds a confirmed booking, merging with an existing entry for the event.
    pub fn record(&mut self, event_id: usize, seats: u32) {
        match self
            .entries
            .iter_mut()
            .find(|entry| entry.event_id == event_id)
        {
            Some(entry) => entry.seats += seats,
            None => self.entries.push(LedgerEntry { event_id, seats }),
        }
    }

    /// Picks a random held event and a random seat count in `[1, held]`.
    /// Returns `None` when nothing is booked.
    pub fn pick(&self, rng: &mut impl Rng) -> Option<CancelTarget> {
        if self.entries.is_empty() {
            return None;
        }

        let entry = self.entries[rng.random_range(0..self.entries.len())];
        Some(CancelTarget {
            event_id: entry.event_id,
            seats: rng.random_range(1..=entry.seats),
        })
    }

    /// Deducts a confirmed cancellation; entries that reach zero are dropped.
    pub fn settle(&mut self, event_id: usize, seats: u32) {
        if let Some(index) = self
            .entries
            .iter()
            .position(|entry| entry.event_id == event_id)
        {
            let entry = &mut self.entries[index];
            entry.seats = entry.seats.saturating_sub(seats);
            if entry.seats == 0 {
                self.entries.swap_remove(index);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    #[test]
    fn record_merges_per_event() {
        let mut ledger = Ledger::new();
        ledger.record(4, 5);
        ledger.record(4, 7);
        ledger.record(9, 3);

        assert_eq!(ledger.events_held(), 2);
        assert_eq!(ledger.held(4), 12);
        assert_eq!(ledger.seats_held(), 15);
    }

    #[test]
    fn empty_ledger_yields_no_target() {
        let ledger = Ledger::new();
        let mut rng = SmallRng::seed_from_u64(0);
        assert_eq!(ledger.pick(&mut rng), None);
    }

    #[test]
    fn pick_stays_within_holdings() {
        let mut ledger = Ledger::new();
        ledger.record(2, 8);
        ledger.record(5, 3);

        let mut rng = SmallRng::seed_from_u64(11);
        for _ in 0..100 {
            let target = ledger.pick(&mut rng).unwrap();
            assert!(target.seats >= 1);
            assert!(target.seats <= ledger.held(target.event_id));
        }
    }

    #[test]
    fn settle_drops_emptied_entries() {
        let mut ledger = Ledger::new();
        ledger.record(1, 10);

        ledger.settle(1, 4);
        assert_eq!(ledger.held(1), 6);

        ledger.settle(1, 6);
        assert!(ledger.is_empty());

        // Settling an unknown event is a no-op.
        ledger.settle(7, 3);
        assert!(ledger.is_empty());
    }
}
