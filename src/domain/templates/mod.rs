//! Time Slot Templates

pub mod errors;
pub mod models;
pub(crate) mod repository;
pub mod service;

pub use errors::TemplatesServiceError;
pub use service::*;
