//! Stylists

pub mod errors;
pub mod records;
pub(crate) mod repository;
pub mod service;

pub use errors::StylistsServiceError;
pub use service::*;
