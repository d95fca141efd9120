//! Time Slots Repository

use jiff_sqlx::{Time as SqlxTime, Timestamp as SqlxTimestamp};
use sqlx::{FromRow, Postgres, QueryBuilder, Row, Transaction, postgres::PgRow, query, query_as};

use crate::domain::schedules::models::{
    NewTimeSlot, ScheduleId, TimeSlot, TimeSlotId, TimeSlotUpdate,
};

const GET_SLOTS_FOR_SCHEDULE_SQL: &str = include_str!("../sql/get_slots_for_schedule.sql");
const GET_SLOTS_FOR_SCHEDULES_SQL: &str = include_str!("../sql/get_slots_for_schedules.sql");
const GET_TIME_SLOT_SQL: &str = include_str!("../sql/get_time_slot.sql");
const CREATE_TIME_SLOT_SQL: &str = include_str!("../sql/create_time_slot.sql");
const UPDATE_TIME_SLOT_SQL: &str = include_str!("../sql/update_time_slot.sql");
const DELETE_TIME_SLOT_SQL: &str = include_str!("../sql/delete_time_slot.sql");
const DELETE_SLOTS_FOR_SCHEDULES_SQL: &str =
    include_str!("../sql/delete_slots_for_schedules.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgTimeSlotsRepository;

impl PgTimeSlotsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn get_slots_for_schedule(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        schedule: ScheduleId,
    ) -> Result<Vec<TimeSlot>, sqlx::Error> {
        query_as::<Postgres, TimeSlot>(GET_SLOTS_FOR_SCHEDULE_SQL)
            .bind(schedule.into_i64())
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn get_slots_for_schedules(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        schedules: &[ScheduleId],
    ) -> Result<Vec<TimeSlot>, sqlx::Error> {
        let ids: Vec<i64> = schedules.iter().map(|id| id.into_i64()).collect();

        query_as::<Postgres, TimeSlot>(GET_SLOTS_FOR_SCHEDULES_SQL)
            .bind(ids)
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn get_slot(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        schedule: ScheduleId,
        slot: TimeSlotId,
    ) -> Result<Option<TimeSlot>, sqlx::Error> {
        query_as::<Postgres, TimeSlot>(GET_TIME_SLOT_SQL)
            .bind(slot.into_i64())
            .bind(schedule.into_i64())
            .fetch_optional(&mut **tx)
            .await
    }

    pub(crate) async fn insert_slot(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        schedule: ScheduleId,
        slot: NewTimeSlot,
    ) -> Result<TimeSlot, sqlx::Error> {
        query_as::<Postgres, TimeSlot>(CREATE_TIME_SLOT_SQL)
            .bind(schedule.into_i64())
            .bind(SqlxTime::from(slot.start_time))
            .bind(SqlxTime::from(slot.end_time))
            .fetch_one(&mut **tx)
            .await
    }

    /// Insert slots for many schedules as one multi-row statement.
    pub(crate) async fn insert_slots(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        slots: &[(ScheduleId, NewTimeSlot)],
    ) -> Result<Vec<TimeSlot>, sqlx::Error> {
        if slots.is_empty() {
            return Ok(Vec::new());
        }

        let mut builder = QueryBuilder::<Postgres>::new(
            "INSERT INTO time_slots (schedule_id, start_time, end_time) ",
        );

        builder.push_values(slots, |mut row, (schedule, slot)| {
            row.push_bind(schedule.into_i64())
                .push_bind(SqlxTime::from(slot.start_time))
                .push_bind(SqlxTime::from(slot.end_time));
        });

        builder.push(
            " RETURNING id, schedule_id, start_time, end_time, is_available, created_at, \
             updated_at",
        );

        builder
            .build_query_as::<TimeSlot>()
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn update_slot(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        slot: TimeSlotId,
        update: TimeSlotUpdate,
    ) -> Result<TimeSlot, sqlx::Error> {
        query_as::<Postgres, TimeSlot>(UPDATE_TIME_SLOT_SQL)
            .bind(slot.into_i64())
            .bind(update.start_time.map(SqlxTime::from))
            .bind(update.end_time.map(SqlxTime::from))
            .bind(update.is_available)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn delete_slot(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        slot: TimeSlotId,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DELETE_TIME_SLOT_SQL)
            .bind(slot.into_i64())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    pub(crate) async fn delete_slots_for_schedules(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        schedules: &[ScheduleId],
    ) -> Result<u64, sqlx::Error> {
        let ids: Vec<i64> = schedules.iter().map(|id| id.into_i64()).collect();

        let rows_affected = query(DELETE_SLOTS_FOR_SCHEDULES_SQL)
            .bind(ids)
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }
}

impl<'r> FromRow<'r, PgRow> for TimeSlot {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            id: TimeSlotId::from_i64(row.try_get("id")?),
            schedule_id: ScheduleId::from_i64(row.try_get("schedule_id")?),
            start_time: row.try_get::<SqlxTime, _>("start_time")?.to_jiff(),
            end_time: row.try_get::<SqlxTime, _>("end_time")?.to_jiff(),
            is_available: row.try_get("is_available")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}
