//! Schedules service errors.

use sqlx::{
    Error,
    error::{DatabaseError, ErrorKind},
};
use thiserror::Error;

use crate::{auth::gate::GateError, domain::intervals::IntervalError};

#[derive(Debug, Error)]
pub enum SchedulesServiceError {
    #[error("store not found")]
    StoreNotFound,

    #[error("stylist not found")]
    StylistNotFound,

    #[error("store is not active")]
    StoreNotActive,

    #[error("permission denied")]
    PermissionDenied,

    #[error("request contains the same work date twice")]
    DuplicateWorkDate,

    #[error("a schedule already exists for this store, stylist, and date")]
    ScheduleAlreadyExists,

    #[error("time range end must be after start")]
    InvalidTimeRange,

    #[error("time slot overlaps an existing slot")]
    TimeSlotConflict,

    #[error("schedule not found")]
    ScheduleNotFound,

    #[error("schedule does not belong to this store")]
    ScheduleNotBelongToStore,

    #[error("schedule does not belong to this stylist")]
    ScheduleNotBelongToStylist,

    #[error("schedule has a booked time slot and cannot be deleted")]
    ScheduleAlreadyBooked,

    #[error("time slot not found")]
    TimeSlotNotFound,

    #[error("time slot is booked and cannot be updated")]
    AlreadyBookedDoNotUpdate,

    #[error("time slot is booked and cannot be deleted")]
    AlreadyBookedDoNotDelete,

    #[error("no fields provided to update")]
    AllFieldsEmpty,

    #[error("start and end time must be updated together")]
    CannotUpdateSeparately,

    #[error("related resource not found")]
    InvalidReference,

    #[error("storage error")]
    Sql(#[source] Error),
}

impl From<Error> for SchedulesServiceError {
    fn from(error: Error) -> Self {
        if matches!(error, Error::RowNotFound) {
            return Self::ScheduleNotFound;
        }

        // The unique index on (store_id, stylist_id, work_date) is the
        // authoritative guard against concurrent bulk-creates; the
        // service-level existence pre-check only improves the error
        // message when there is no race.
        match error.as_database_error().map(DatabaseError::kind) {
            Some(ErrorKind::UniqueViolation) => Self::ScheduleAlreadyExists,
            Some(ErrorKind::ForeignKeyViolation) => Self::InvalidReference,
            Some(ErrorKind::CheckViolation) => Self::InvalidTimeRange,
            _ => Self::Sql(error),
        }
    }
}

impl From<GateError> for SchedulesServiceError {
    fn from(error: GateError) -> Self {
        match error {
            GateError::PermissionDenied => Self::PermissionDenied,
            GateError::StoreNotActive => Self::StoreNotActive,
        }
    }
}

impl From<IntervalError> for SchedulesServiceError {
    fn from(error: IntervalError) -> Self {
        match error {
            IntervalError::InvalidRange => Self::InvalidTimeRange,
            IntervalError::Overlap => Self::TimeSlotConflict,
        }
    }
}
