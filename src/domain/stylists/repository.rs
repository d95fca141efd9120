//! Stylists Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query_as};

use crate::{
    auth::models::StaffUserId,
    domain::stylists::records::{NewStylist, StylistId, StylistRecord},
};

const GET_STYLIST_SQL: &str = include_str!("sql/get_stylist.sql");
const CREATE_STYLIST_SQL: &str = include_str!("sql/create_stylist.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgStylistsRepository;

impl PgStylistsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn get_stylist(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        stylist: StylistId,
    ) -> Result<Option<StylistRecord>, sqlx::Error> {
        query_as::<Postgres, StylistRecord>(GET_STYLIST_SQL)
            .bind(stylist.into_i64())
            .fetch_optional(&mut **tx)
            .await
    }

    pub(crate) async fn create_stylist(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        stylist: NewStylist,
    ) -> Result<StylistRecord, sqlx::Error> {
        query_as::<Postgres, StylistRecord>(CREATE_STYLIST_SQL)
            .bind(stylist.staff_user_id.into_i64())
            .bind(stylist.name)
            .fetch_one(&mut **tx)
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for StylistRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            id: StylistId::from_i64(row.try_get("id")?),
            staff_user_id: StaffUserId::from_i64(row.try_get("staff_user_id")?),
            name: row.try_get("name")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}
