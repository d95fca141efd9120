//! Availability read models.
//!
//! These are the customer-facing shapes; dates and times serialize in
//! their ISO forms at the transport boundary.

use jiff::civil::{Date, Time};
use serde::Serialize;

use crate::domain::schedules::models::{ScheduleId, TimeSlotId};

/// Inclusive calendar date window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: Date,
    pub end: Date,
}

/// One date with at least one open slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DateAvailability {
    pub date: Date,
    pub available_slots: i64,
}

/// One date with its open schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct OpenScheduleDate {
    pub date: Date,
    pub schedule_id: ScheduleId,
}

/// One currently-available slot of a schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct OpenSlot {
    pub id: TimeSlotId,
    pub start_time: Time,
    pub end_time: Time,
    pub duration_minutes: i64,
}

/// Whole minutes between two times of the same day.
#[must_use]
pub(crate) fn minutes_between(start: Time, end: Time) -> i64 {
    let start_minutes = i64::from(start.hour()) * 60 + i64::from(start.minute());
    let end_minutes = i64::from(end.hour()) * 60 + i64::from(end.minute());

    end_minutes - start_minutes
}
