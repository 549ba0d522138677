//! Worker pool and operation mix parameters.

use serde::{Deserialize, Serialize};
use validator::{self, Validate};

use crate::validation;

/// Workload configuration: how many workers run, what they ask for, and for
/// how long the simulation lasts.
#[derive(Debug, Serialize, Deserialize, Validate, Clone)]
#[validate(schema(function = validation::validate_seat_range))]
pub struct WorkloadConfig {
    /// Worker pool size.
    #[serde(default = "default_workers")]
    #[validate(range(min = 1, max = 4096))]
    pub workers: usize,

    /// Fewest seats a single booking may request.
    #[serde(default = "default_seats_min")]
    #[validate(range(min = 1))]
    pub seats_min: u32,

    /// Most seats a single booking may request.
    #[serde(default = "default_seats_max")]
    #[validate(range(min = 1))]
    pub seats_max: u32,

    /// Upper bound on the random pause between a worker's operations.
    #[serde(default = "default_max_pause_ms")]
    #[validate(range(min = 1))]
    pub max_pause_ms: u64,

    /// Wall-clock simulation budget. Workers observe expiry once per loop
    /// iteration, after finishing the cycle in progress.
    #[serde(default = "default_duration_secs")]
    #[validate(range(min = 1))]
    pub duration_secs: u64,

    /// Base seed; worker `i` derives its RNG from `seed + i`.
    #[serde(default = "default_seed")]
    pub seed: u64,
}

fn default_workers() -> usize {
    20
}

fn default_seats_min() -> u32 {
    5
}

fn default_seats_max() -> u32 {
    10
}

fn default_max_pause_ms() -> u64 {
    20000
}

fn default_duration_secs() -> u64 {
    600
}

fn default_seed() -> u64 {
    42
}

impl Default for WorkloadConfig {
    fn default() -> Self {
        Self {
            workers: default_workers(),
            seats_min: default_seats_min(),
            seats_max: default_seats_max(),
            max_pause_ms: default_max_pause_ms(),
            duration_secs: default_duration_secs(),
            seed: default_seed(),
        }
    }
}
