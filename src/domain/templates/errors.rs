//! Templates service errors.

use sqlx::{
    Error,
    error::{DatabaseError, ErrorKind},
};
use thiserror::Error;

use crate::domain::intervals::IntervalError;

#[derive(Debug, Error)]
pub enum TemplatesServiceError {
    #[error("template not found")]
    TemplateNotFound,

    #[error("template item not found")]
    TemplateItemNotFound,

    #[error("time range end must be after start")]
    InvalidTimeRange,

    #[error("time range overlaps an existing item")]
    TimeSlotConflict,

    #[error("invalid data")]
    InvalidData,

    #[error("storage error")]
    Sql(#[source] Error),
}

impl From<Error> for TemplatesServiceError {
    fn from(error: Error) -> Self {
        if matches!(error, Error::RowNotFound) {
            return Self::TemplateNotFound;
        }

        match error.as_database_error().map(DatabaseError::kind) {
            Some(ErrorKind::ForeignKeyViolation) => Self::TemplateNotFound,
            Some(ErrorKind::CheckViolation | ErrorKind::NotNullViolation) => Self::InvalidData,
            _ => Self::Sql(error),
        }
    }
}

impl From<IntervalError> for TemplatesServiceError {
    fn from(error: IntervalError) -> Self {
        match error {
            IntervalError::InvalidRange => Self::InvalidTimeRange,
            IntervalError::Overlap => Self::TimeSlotConflict,
        }
    }
}
