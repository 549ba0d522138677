use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReservationError {
    #[error("Unknown event id: {0}")]
    UnknownEvent(usize),

    #[error("Admission table requires at least one slot")]
    InvalidSlotCount,
}
