//! Schedules service.
//!
//! Staff-facing write paths for schedules and their time slots. Every
//! operation resolves the stylist/store chain, consults the permission
//! gate, funnels intervals through the validator, and runs its writes in
//! one transaction.

use async_trait::async_trait;
use mockall::automock;
use rustc_hash::{FxHashMap, FxHashSet};
use sqlx::{Postgres, Transaction};

use crate::{
    auth::{gate::PermissionGate, models::StaffContext},
    database::Db,
    domain::{
        intervals::{self, Interval},
        schedules::{
            errors::SchedulesServiceError,
            models::{NewSchedule, NewTimeSlot, Schedule, ScheduleId, TimeSlot, TimeSlotId,
                TimeSlotUpdate},
            repositories::{PgSchedulesRepository, PgTimeSlotsRepository},
        },
        stores::{records::StoreId, repository::PgStoresRepository},
        stylists::{records::StylistId, repository::PgStylistsRepository},
    },
};

#[derive(Debug, Clone)]
pub struct PgSchedulesService {
    db: Db,
    gate: PermissionGate,
    schedules: PgSchedulesRepository,
    slots: PgTimeSlotsRepository,
    stores: PgStoresRepository,
    stylists: PgStylistsRepository,
}

impl PgSchedulesService {
    #[must_use]
    pub fn new(db: Db, gate: PermissionGate) -> Self {
        Self {
            db,
            gate,
            schedules: PgSchedulesRepository::new(),
            slots: PgTimeSlotsRepository::new(),
            stores: PgStoresRepository::new(),
            stylists: PgStylistsRepository::new(),
        }
    }

    /// Resolve the store/stylist pair and apply the permission gate.
    async fn authorize_store_stylist(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        staff: &StaffContext,
        store: StoreId,
        stylist: StylistId,
    ) -> Result<(), SchedulesServiceError> {
        let store = self
            .stores
            .get_store(tx, store)
            .await?
            .ok_or(SchedulesServiceError::StoreNotFound)?;

        let stylist = self
            .stylists
            .get_stylist(tx, stylist)
            .await?
            .ok_or(SchedulesServiceError::StylistNotFound)?;

        self.gate.authorize(staff, stylist.staff_user_id, &store)?;

        Ok(())
    }

    /// Load a schedule and authorize the caller against its owner chain.
    async fn authorize_schedule(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        staff: &StaffContext,
        schedule: ScheduleId,
    ) -> Result<Schedule, SchedulesServiceError> {
        let schedule = self
            .schedules
            .get_schedule(tx, schedule)
            .await?
            .ok_or(SchedulesServiceError::ScheduleNotFound)?;

        self.authorize_store_stylist(tx, staff, schedule.store_id, schedule.stylist_id)
            .await?;

        Ok(schedule)
    }
}

fn requested_intervals(slots: &[NewTimeSlot]) -> Result<Vec<Interval>, SchedulesServiceError> {
    slots
        .iter()
        .map(|slot| Interval::new(slot.start_time, slot.end_time).map_err(Into::into))
        .collect()
}

fn persisted_intervals(slots: &[TimeSlot]) -> Result<Vec<Interval>, SchedulesServiceError> {
    slots
        .iter()
        .map(|slot| Interval::new(slot.start_time, slot.end_time).map_err(Into::into))
        .collect()
}

#[async_trait]
impl SchedulesService for PgSchedulesService {
    #[tracing::instrument(
        name = "schedules.service.create_schedules",
        skip(self, staff, schedules),
        fields(
            store_id = %store,
            stylist_id = %stylist,
            schedule_count = schedules.len()
        ),
        err
    )]
    async fn create_schedules(
        &self,
        staff: &StaffContext,
        store: StoreId,
        stylist: StylistId,
        schedules: Vec<NewSchedule>,
    ) -> Result<Vec<Schedule>, SchedulesServiceError> {
        let Some(first) = schedules.first() else {
            return Ok(Vec::new());
        };

        // Reject duplicate dates and interval conflicts before any I/O.
        let mut dates = FxHashSet::default();

        for schedule in &schedules {
            if !dates.insert(schedule.work_date) {
                return Err(SchedulesServiceError::DuplicateWorkDate);
            }

            let intervals = requested_intervals(&schedule.time_slots)?;
            intervals::validate_disjoint(&intervals)?;
        }

        let (min_date, max_date) = schedules.iter().fold(
            (first.work_date, first.work_date),
            |(min, max), schedule| {
                (
                    min.min(schedule.work_date),
                    max.max(schedule.work_date),
                )
            },
        );

        let mut tx = self.db.begin().await?;

        self.authorize_store_stylist(&mut tx, staff, store, stylist)
            .await?;

        // Friendlier error than the unique-violation mapping when there
        // is no concurrent writer.
        let occupied = self
            .schedules
            .find_work_dates(&mut tx, store, stylist, min_date, max_date)
            .await?;

        if occupied.iter().any(|date| dates.contains(date)) {
            return Err(SchedulesServiceError::ScheduleAlreadyExists);
        }

        let created = self
            .schedules
            .insert_schedules(&mut tx, store, stylist, &schedules)
            .await?;

        let id_by_date: FxHashMap<_, _> = created
            .iter()
            .map(|schedule| (schedule.work_date, schedule.id))
            .collect();

        let mut slot_rows = Vec::new();

        for schedule in &schedules {
            let Some(&schedule_id) = id_by_date.get(&schedule.work_date) else {
                return Err(SchedulesServiceError::ScheduleNotFound);
            };

            for slot in &schedule.time_slots {
                slot_rows.push((schedule_id, *slot));
            }
        }

        let created_slots = self.slots.insert_slots(&mut tx, &slot_rows).await?;

        tx.commit().await?;

        let mut slots_by_schedule: FxHashMap<ScheduleId, Vec<TimeSlot>> = FxHashMap::default();

        for slot in created_slots {
            slots_by_schedule
                .entry(slot.schedule_id)
                .or_default()
                .push(slot);
        }

        let mut hydrated = created;

        for schedule in &mut hydrated {
            if let Some(slots) = slots_by_schedule.remove(&schedule.id) {
                schedule.time_slots = slots;
            }
        }

        hydrated.sort_by_key(|schedule| schedule.work_date);

        Ok(hydrated)
    }

    #[tracing::instrument(
        name = "schedules.service.delete_schedules",
        skip(self, staff, schedules),
        fields(
            store_id = %store,
            stylist_id = %stylist,
            schedule_count = schedules.len()
        ),
        err
    )]
    async fn delete_schedules(
        &self,
        staff: &StaffContext,
        store: StoreId,
        stylist: StylistId,
        schedules: Vec<ScheduleId>,
    ) -> Result<Vec<ScheduleId>, SchedulesServiceError> {
        if schedules.is_empty() {
            return Ok(Vec::new());
        }

        let mut tx = self.db.begin().await?;

        self.authorize_store_stylist(&mut tx, staff, store, stylist)
            .await?;

        let found = self
            .schedules
            .get_schedules_by_ids(&mut tx, &schedules)
            .await?;

        if found.len() != schedules.len() {
            return Err(SchedulesServiceError::ScheduleNotFound);
        }

        for schedule in &found {
            if schedule.store_id != store {
                return Err(SchedulesServiceError::ScheduleNotBelongToStore);
            }

            if schedule.stylist_id != stylist {
                return Err(SchedulesServiceError::ScheduleNotBelongToStylist);
            }
        }

        // One booked slot anywhere in the batch blocks the whole delete.
        let slots = self
            .slots
            .get_slots_for_schedules(&mut tx, &schedules)
            .await?;

        if slots.iter().any(|slot| !slot.is_available) {
            return Err(SchedulesServiceError::ScheduleAlreadyBooked);
        }

        // Children first to satisfy referential ordering.
        self.slots
            .delete_slots_for_schedules(&mut tx, &schedules)
            .await?;

        self.schedules.delete_schedules(&mut tx, &schedules).await?;

        tx.commit().await?;

        Ok(schedules)
    }

    async fn create_time_slot(
        &self,
        staff: &StaffContext,
        schedule: ScheduleId,
        slot: NewTimeSlot,
    ) -> Result<TimeSlot, SchedulesServiceError> {
        let candidate = Interval::new(slot.start_time, slot.end_time)?;

        let mut tx = self.db.begin().await?;

        let schedule = self.authorize_schedule(&mut tx, staff, schedule).await?;

        let existing = self
            .slots
            .get_slots_for_schedule(&mut tx, schedule.id)
            .await?;

        intervals::validate_against(candidate, &persisted_intervals(&existing)?)?;

        let created = self.slots.insert_slot(&mut tx, schedule.id, slot).await?;

        tx.commit().await?;

        Ok(created)
    }

    async fn update_time_slot(
        &self,
        staff: &StaffContext,
        schedule: ScheduleId,
        slot: TimeSlotId,
        update: TimeSlotUpdate,
    ) -> Result<TimeSlot, SchedulesServiceError> {
        if update.is_empty() {
            return Err(SchedulesServiceError::AllFieldsEmpty);
        }

        let candidate = match (update.start_time, update.end_time) {
            (Some(start), Some(end)) => Some(Interval::new(start, end)?),
            (None, None) => None,
            _ => return Err(SchedulesServiceError::CannotUpdateSeparately),
        };

        let mut tx = self.db.begin().await?;

        let schedule = self.authorize_schedule(&mut tx, staff, schedule).await?;

        let target = self
            .slots
            .get_slot(&mut tx, schedule.id, slot)
            .await?
            .ok_or(SchedulesServiceError::TimeSlotNotFound)?;

        // Booking and release belong to the booking collaborator; a
        // booked slot is immutable through this path, including
        // availability-only toggles.
        if !target.is_available {
            return Err(SchedulesServiceError::AlreadyBookedDoNotUpdate);
        }

        if let Some(candidate) = candidate {
            let siblings: Vec<TimeSlot> = self
                .slots
                .get_slots_for_schedule(&mut tx, schedule.id)
                .await?
                .into_iter()
                .filter(|other| other.id != target.id)
                .collect();

            intervals::validate_against(candidate, &persisted_intervals(&siblings)?)?;
        }

        let updated = self.slots.update_slot(&mut tx, target.id, update).await?;

        tx.commit().await?;

        Ok(updated)
    }

    async fn delete_time_slot(
        &self,
        staff: &StaffContext,
        schedule: ScheduleId,
        slot: TimeSlotId,
    ) -> Result<(), SchedulesServiceError> {
        let mut tx = self.db.begin().await?;

        let schedule = self.authorize_schedule(&mut tx, staff, schedule).await?;

        let target = self
            .slots
            .get_slot(&mut tx, schedule.id, slot)
            .await?
            .ok_or(SchedulesServiceError::TimeSlotNotFound)?;

        if !target.is_available {
            return Err(SchedulesServiceError::AlreadyBookedDoNotDelete);
        }

        self.slots.delete_slot(&mut tx, target.id).await?;

        tx.commit().await?;

        Ok(())
    }
}

#[automock]
#[async_trait]
pub trait SchedulesService: Send + Sync {
    /// Create many schedules (with their time slots) for one stylist at
    /// one store, all-or-nothing.
    async fn create_schedules(
        &self,
        staff: &StaffContext,
        store: StoreId,
        stylist: StylistId,
        schedules: Vec<NewSchedule>,
    ) -> Result<Vec<Schedule>, SchedulesServiceError>;

    /// Delete many schedules and their slots, refusing if any slot in
    /// the batch is booked. Returns the deleted ids.
    async fn delete_schedules(
        &self,
        staff: &StaffContext,
        store: StoreId,
        stylist: StylistId,
        schedules: Vec<ScheduleId>,
    ) -> Result<Vec<ScheduleId>, SchedulesServiceError>;

    /// Add one slot to an existing schedule.
    async fn create_time_slot(
        &self,
        staff: &StaffContext,
        schedule: ScheduleId,
        slot: NewTimeSlot,
    ) -> Result<TimeSlot, SchedulesServiceError>;

    /// Patch one slot; start/end only together, never while booked.
    async fn update_time_slot(
        &self,
        staff: &StaffContext,
        schedule: ScheduleId,
        slot: TimeSlotId,
        update: TimeSlotUpdate,
    ) -> Result<TimeSlot, SchedulesServiceError>;

    /// Remove one slot, never while booked.
    async fn delete_time_slot(
        &self,
        staff: &StaffContext,
        schedule: ScheduleId,
        slot: TimeSlotId,
    ) -> Result<(), SchedulesServiceError>;
}
