//! Scheduling Domain Concerns

pub mod availability;
pub mod intervals;
pub mod schedules;
pub mod stores;
pub mod stylists;
pub mod templates;
