//! Availability Repository

use jiff::civil::Date;
use jiff_sqlx::{Date as SqlxDate, Time as SqlxTime};
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query_as};

use crate::domain::{
    availability::models::{DateAvailability, OpenScheduleDate, OpenSlot, minutes_between},
    schedules::models::{ScheduleId, TimeSlotId},
    stores::records::StoreId,
    stylists::records::StylistId,
};

const LIST_AVAILABLE_DATES_SQL: &str = include_str!("sql/list_available_dates.sql");
const LIST_OPEN_SCHEDULE_DATES_SQL: &str = include_str!("sql/list_open_schedule_dates.sql");
const LIST_OPEN_SLOTS_SQL: &str = include_str!("sql/list_open_slots.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgAvailabilityRepository;

impl PgAvailabilityRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn list_available_dates(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        store: StoreId,
        stylist: StylistId,
        from: Date,
        to: Date,
    ) -> Result<Vec<DateAvailability>, sqlx::Error> {
        query_as::<Postgres, DateAvailability>(LIST_AVAILABLE_DATES_SQL)
            .bind(store.into_i64())
            .bind(stylist.into_i64())
            .bind(SqlxDate::from(from))
            .bind(SqlxDate::from(to))
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn list_open_schedule_dates(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        store: StoreId,
        stylist: StylistId,
        from: Date,
        to: Date,
    ) -> Result<Vec<OpenScheduleDate>, sqlx::Error> {
        query_as::<Postgres, OpenScheduleDate>(LIST_OPEN_SCHEDULE_DATES_SQL)
            .bind(store.into_i64())
            .bind(stylist.into_i64())
            .bind(SqlxDate::from(from))
            .bind(SqlxDate::from(to))
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn list_open_slots(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        schedule: ScheduleId,
    ) -> Result<Vec<OpenSlot>, sqlx::Error> {
        query_as::<Postgres, OpenSlot>(LIST_OPEN_SLOTS_SQL)
            .bind(schedule.into_i64())
            .fetch_all(&mut **tx)
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for DateAvailability {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            date: row.try_get::<SqlxDate, _>("work_date")?.to_jiff(),
            available_slots: row.try_get("available_slots")?,
        })
    }
}

impl<'r> FromRow<'r, PgRow> for OpenScheduleDate {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            date: row.try_get::<SqlxDate, _>("work_date")?.to_jiff(),
            schedule_id: ScheduleId::from_i64(row.try_get("schedule_id")?),
        })
    }
}

impl<'r> FromRow<'r, PgRow> for OpenSlot {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let start_time = row.try_get::<SqlxTime, _>("start_time")?.to_jiff();
        let end_time = row.try_get::<SqlxTime, _>("end_time")?.to_jiff();

        Ok(Self {
            id: TimeSlotId::from_i64(row.try_get("id")?),
            start_time,
            end_time,
            duration_minutes: minutes_between(start_time, end_time),
        })
    }
}
