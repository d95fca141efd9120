//! Schedules Repository

use jiff::civil::Date;
use jiff_sqlx::{Date as SqlxDate, Timestamp as SqlxTimestamp};
use sqlx::{FromRow, Postgres, QueryBuilder, Row, Transaction, postgres::PgRow, query, query_as,
    query_scalar};

use crate::domain::{
    schedules::models::{NewSchedule, Schedule, ScheduleId},
    stores::records::StoreId,
    stylists::records::StylistId,
};

const GET_SCHEDULE_SQL: &str = include_str!("../sql/get_schedule.sql");
const GET_SCHEDULES_BY_IDS_SQL: &str = include_str!("../sql/get_schedules_by_ids.sql");
const FIND_WORK_DATES_SQL: &str = include_str!("../sql/find_work_dates.sql");
const DELETE_SCHEDULES_SQL: &str = include_str!("../sql/delete_schedules.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgSchedulesRepository;

impl PgSchedulesRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn get_schedule(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        schedule: ScheduleId,
    ) -> Result<Option<Schedule>, sqlx::Error> {
        query_as::<Postgres, Schedule>(GET_SCHEDULE_SQL)
            .bind(schedule.into_i64())
            .fetch_optional(&mut **tx)
            .await
    }

    pub(crate) async fn get_schedules_by_ids(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        schedules: &[ScheduleId],
    ) -> Result<Vec<Schedule>, sqlx::Error> {
        let ids: Vec<i64> = schedules.iter().map(|id| id.into_i64()).collect();

        query_as::<Postgres, Schedule>(GET_SCHEDULES_BY_IDS_SQL)
            .bind(ids)
            .fetch_all(&mut **tx)
            .await
    }

    /// Work dates already occupied for this store/stylist within the
    /// inclusive date window.
    pub(crate) async fn find_work_dates(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        store: StoreId,
        stylist: StylistId,
        from: Date,
        to: Date,
    ) -> Result<Vec<Date>, sqlx::Error> {
        let dates: Vec<SqlxDate> = query_scalar(FIND_WORK_DATES_SQL)
            .bind(store.into_i64())
            .bind(stylist.into_i64())
            .bind(SqlxDate::from(from))
            .bind(SqlxDate::from(to))
            .fetch_all(&mut **tx)
            .await?;

        Ok(dates.into_iter().map(SqlxDate::to_jiff).collect())
    }

    /// Insert all requested schedules as one multi-row statement.
    pub(crate) async fn insert_schedules(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        store: StoreId,
        stylist: StylistId,
        schedules: &[NewSchedule],
    ) -> Result<Vec<Schedule>, sqlx::Error> {
        if schedules.is_empty() {
            return Ok(Vec::new());
        }

        let mut builder = QueryBuilder::<Postgres>::new(
            "INSERT INTO schedules (store_id, stylist_id, work_date, note) ",
        );

        builder.push_values(schedules, |mut row, schedule| {
            row.push_bind(store.into_i64())
                .push_bind(stylist.into_i64())
                .push_bind(SqlxDate::from(schedule.work_date))
                .push_bind(schedule.note.clone());
        });

        builder.push(
            " RETURNING id, store_id, stylist_id, work_date, note, created_at, updated_at",
        );

        builder
            .build_query_as::<Schedule>()
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn delete_schedules(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        schedules: &[ScheduleId],
    ) -> Result<u64, sqlx::Error> {
        let ids: Vec<i64> = schedules.iter().map(|id| id.into_i64()).collect();

        let rows_affected = query(DELETE_SCHEDULES_SQL)
            .bind(ids)
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }
}

impl<'r> FromRow<'r, PgRow> for Schedule {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            id: ScheduleId::from_i64(row.try_get("id")?),
            store_id: StoreId::from_i64(row.try_get("store_id")?),
            stylist_id: StylistId::from_i64(row.try_get("stylist_id")?),
            work_date: row.try_get::<SqlxDate, _>("work_date")?.to_jiff(),
            note: row.try_get("note")?,
            // Child slots are loaded separately and attached by the service.
            time_slots: Vec::new(),
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}
