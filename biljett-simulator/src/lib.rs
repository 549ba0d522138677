/*!
# Biljett Simulator

Workload generation for the reservation engine: seedable random operation
streams and the worker-private booking ledger used to pick plausible
cancellation targets.

## Key Components:
- **Workload:** uniform kind/event/seat-count/pause generators, deterministic
  for a fixed seed.
- **Ledger:** per-worker record of confirmed bookings. Advisory only; it
  chooses *which* cancellation a worker attempts, never the correctness of
  the shared counters.
*/

pub mod ledger;
pub mod workload;

pub use ledger::{CancelTarget, Ledger};
pub use workload::Workload;
