//! Schedule and time-slot availability engine for a salon appointment backend.

pub mod auth;
pub mod context;
pub mod database;
pub mod domain;
pub mod ids;

#[cfg(test)]
mod test;
