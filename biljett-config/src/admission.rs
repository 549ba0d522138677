//! Admission table parameters.

use serde::{Deserialize, Serialize};
use validator::{self, Validate};

/// Admission control configuration: the global in-flight operation budget and
/// the simulated booking-confirmation latency held inside it.
#[derive(Debug, Serialize, Deserialize, Validate, Clone)]
pub struct AdmissionConfig {
    /// Slot count K: upper bound on simultaneously admitted operations
    /// across all events.
    #[serde(default = "default_slots")]
    #[validate(range(min = 1, max = 4096))]
    pub slots: usize,

    /// Simulated booking-confirmation delay. Deliberately held while the
    /// exclusive admission is active, widening the contention window.
    #[serde(default = "default_booking_delay_ms")]
    #[validate(range(max = 60000))]
    pub booking_delay_ms: u64,
}

fn default_slots() -> usize {
    5
}

fn default_booking_delay_ms() -> u64 {
    2000
}

impl Default for AdmissionConfig {
    fn default() -> Self {
        Self {
            slots: default_slots(),
            booking_delay_ms: default_booking_delay_ms(),
        }
    }
}
