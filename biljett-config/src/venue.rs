//! Venue sizing parameters.
//!
//! How many reservable events exist and how many seats each one holds.

use serde::{Deserialize, Serialize};
use validator::{self, Validate};

/// Venue configuration: the fixed pool of events under simulation.
#[derive(Debug, Serialize, Deserialize, Validate, Clone)]
pub struct VenueConfig {
    /// Number of reservable events, ids `0..events`.
    #[serde(default = "default_events")]
    #[validate(range(min = 1, max = 100000))]
    pub events: usize,

    /// Seat capacity per event; counters live in `[0, capacity]`.
    #[serde(default = "default_capacity")]
    #[validate(range(min = 1, max = 1000000))]
    pub capacity: u32,
}

fn default_events() -> usize {
    100
}

fn default_capacity() -> u32 {
    500
}

impl Default for VenueConfig {
    fn default() -> Self {
        Self {
            events: default_events(),
            capacity: default_capacity(),
        }
    }
}
