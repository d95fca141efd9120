//! Availability service errors.

use sqlx::Error;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AvailabilityServiceError {
    #[error("end date is before start date")]
    EndBeforeStart,

    #[error("date range exceeds the allowed window")]
    DateRangeExceeded,

    #[error("store not found")]
    StoreNotFound,

    #[error("stylist not found")]
    StylistNotFound,

    #[error("store is not active")]
    StoreNotActive,

    #[error("storage error")]
    Sql(#[source] Error),
}

impl From<Error> for AvailabilityServiceError {
    fn from(error: Error) -> Self {
        Self::Sql(error)
    }
}
