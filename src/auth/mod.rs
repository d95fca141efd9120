//! Request identity and authorization.
//!
//! Staff and customer contexts are supplied per request by the external
//! auth collaborators and are never persisted here; they exist only as
//! inputs to the [`gate::PermissionGate`] and the blacklist checks.

pub mod gate;
pub mod models;

pub use gate::{GateError, PermissionGate};
pub use models::*;
