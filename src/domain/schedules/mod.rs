//! Schedules

pub mod errors;
pub mod models;
pub(crate) mod repositories;
pub mod service;

pub use errors::SchedulesServiceError;
pub use service::*;
