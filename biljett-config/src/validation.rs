//! Custom validation functions for configuration.
//!
//! Cross-field checks that the derive-level range attributes cannot express.

use validator::ValidationError;

use crate::workload::WorkloadConfig;

/// The seat request range must not be inverted.
pub fn validate_seat_range(config: &WorkloadConfig) -> Result<(), ValidationError> {
    if config.seats_min > config.seats_max {
        return Err(ValidationError::new("seats_min_exceeds_seats_max"));
    }
    Ok(())
}
