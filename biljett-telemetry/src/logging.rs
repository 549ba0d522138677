//! ## biljett-telemetry::logging
//! **Structured logging for the worker pool**
//!
//! The simulation's diagnostic trace (conflicts, waits, inserts, releases,
//! bookings, cancellations) is emitted through `tracing`. Thread names are
//! enabled because the worker thread is the unit of interest when reading an
//! interleaved trace.

use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Clone)]
pub struct EventLogger;

impl EventLogger {
    pub fn init() {
        fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
            )
            .with_thread_names(true)
            .init()
    }

    /// One line per settled operation, uniform across the executor so the
    /// interleaved trace stays greppable by operation name.
    pub fn log_outcome(operation: &str, worker_id: usize, event_id: usize, seats: u32, detail: &str) {
        info!(
            operation = operation,
            worker = worker_id,
            event = event_id,
            seats,
            "{detail}"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing_test::traced_test;

    #[traced_test]
    #[test]
    fn test_logging() {
        EventLogger::log_outcome("book", 1, 3, 6, "booking confirmed");
        assert!(logs_contain("booking confirmed"));
    }
}
