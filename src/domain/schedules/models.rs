//! Schedule Models

use jiff::{
    Timestamp,
    civil::{Date, Time},
};

use crate::{
    domain::{stores::records::StoreId, stylists::records::StylistId},
    ids::TypedId,
};

/// Schedule id.
pub type ScheduleId = TypedId<Schedule>;

/// Time slot id.
pub type TimeSlotId = TypedId<TimeSlot>;

/// One stylist's working day at one store.
///
/// At most one schedule exists per (store, stylist, work date); the
/// schedule owns its time slots and is only ever deleted together with
/// them.
#[derive(Debug, Clone)]
pub struct Schedule {
    pub id: ScheduleId,
    pub store_id: StoreId,
    pub stylist_id: StylistId,
    pub work_date: Date,
    pub note: Option<String>,
    pub time_slots: Vec<TimeSlot>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A bookable sub-interval of a schedule.
///
/// `is_available` is flipped by the external booking collaborator; this
/// engine only reads it as a mutation guard.
#[derive(Debug, Clone)]
pub struct TimeSlot {
    pub id: TimeSlotId,
    pub schedule_id: ScheduleId,
    pub start_time: Time,
    pub end_time: Time,
    pub is_available: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// One requested schedule in a bulk create.
#[derive(Debug, Clone, PartialEq)]
pub struct NewSchedule {
    pub work_date: Date,
    pub note: Option<String>,
    pub time_slots: Vec<NewTimeSlot>,
}

/// A requested time slot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NewTimeSlot {
    pub start_time: Time,
    pub end_time: Time,
}

/// Partial update for a time slot.
///
/// Start and end must be given together or not at all; the service
/// rejects half-specified ranges.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TimeSlotUpdate {
    pub start_time: Option<Time>,
    pub end_time: Option<Time>,
    pub is_available: Option<bool>,
}

impl TimeSlotUpdate {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.start_time.is_none() && self.end_time.is_none() && self.is_available.is_none()
    }
}
