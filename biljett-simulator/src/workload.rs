//! Randomized operation stream, uniform over the three operation kinds.

use std::time::Duration;

use rand::Rng;

use biljett_core::ops::OpKind;

/// Generator for one worker's stream of operations. Stateless; feed it the
/// worker's own seeded RNG for a deterministic stream.
#[derive(Debug, Clone)]
pub struct Workload {
    events: usize,
    seats_min: u32,
    seats_max: u32,
    max_pause_ms: u64,
}

impl Workload {
    pub fn new(events: usize, seats_min: u32, seats_max: u32, max_pause_ms: u64) -> Self {
        Self {
            events,
            seats_min,
            seats_max,
            max_pause_ms,
        }
    }

    /// Uniform pick over Inquire/Book/Cancel.
    pub fn next_kind(&self, rng: &mut impl Rng) -> OpKind {
        match rng.random_range(0..3) {
            0 => OpKind::Inquire,
            1 => OpKind::Book,
            _ => OpKind::Cancel,
        }
    }

    /// Uniform event id in `0..events`.
    pub fn next_event(&self, rng: &mut impl Rng) -> usize {
        rng.random_range(0..self.events)
    }

    /// Uniform seat request in `[seats_min, seats_max]`.
    pub fn next_seats(&self, rng: &mut impl Rng) -> u32 {
        rng.random_range(self.seats_min..=self.seats_max)
    }

    /// Random pause between a worker's operations, at most `max_pause_ms`.
    pub fn next_pause(&self, rng: &mut impl Rng) -> Duration {
        Duration::from_millis(rng.random_range(1..=self.max_pause_ms))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    #[test]
    fn generated_values_stay_in_range() {
        let workload = Workload::new(10, 5, 10, 50);
        let mut rng = SmallRng::seed_from_u64(1);

        for _ in 0..200 {
            assert!(workload.next_event(&mut rng) < 10);
            let seats = workload.next_seats(&mut rng);
            assert!((5..=10).contains(&seats));
            let pause = workload.next_pause(&mut rng);
            assert!(pause >= Duration::from_millis(1));
            assert!(pause <= Duration::from_millis(50));
        }
    }

    #[test]
    fn same_seed_same_stream() {
        let workload = Workload::new(100, 5, 10, 1000);
        let mut a = SmallRng::seed_from_u64(42);
        let mut b = SmallRng::seed_from_u64(42);

        for _ in 0..100 {
            assert_eq!(workload.next_kind(&mut a), workload.next_kind(&mut b));
            assert_eq!(workload.next_event(&mut a), workload.next_event(&mut b));
            assert_eq!(workload.next_seats(&mut a), workload.next_seats(&mut b));
        }
    }

    #[test]
    fn all_kinds_show_up() {
        let workload = Workload::new(10, 1, 2, 10);
        let mut rng = SmallRng::seed_from_u64(3);

        let mut seen = [false; 3];
        for _ in 0..100 {
            match workload.next_kind(&mut rng) {
                OpKind::Inquire => seen[0] = true,
                OpKind::Book => seen[1] = true,
                OpKind::Cancel => seen[2] = true,
            }
        }
        assert_eq!(seen, [true, true, true]);
    }
}
