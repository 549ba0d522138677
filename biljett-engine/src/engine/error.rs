use thiserror::Error;
use tokio::task::JoinError;

use biljett_config::ConfigError;
use biljett_core::ReservationError;

#[derive(Debug, Error)]
pub enum SimulationError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Reservation error: {0}")]
    Reservation(#[from] ReservationError),

    #[error("Worker task failed: {0}")]
    Worker(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<JoinError> for SimulationError {
    fn from(err: JoinError) -> Self {
        SimulationError::Worker(err.to_string())
    }
}
