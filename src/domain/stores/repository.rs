//! Stores Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query_as};

use crate::domain::stores::records::{NewStore, StoreId, StoreRecord};

const GET_STORE_SQL: &str = include_str!("sql/get_store.sql");
const CREATE_STORE_SQL: &str = include_str!("sql/create_store.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgStoresRepository;

impl PgStoresRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn get_store(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        store: StoreId,
    ) -> Result<Option<StoreRecord>, sqlx::Error> {
        query_as::<Postgres, StoreRecord>(GET_STORE_SQL)
            .bind(store.into_i64())
            .fetch_optional(&mut **tx)
            .await
    }

    pub(crate) async fn create_store(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        store: NewStore,
    ) -> Result<StoreRecord, sqlx::Error> {
        query_as::<Postgres, StoreRecord>(CREATE_STORE_SQL)
            .bind(store.name)
            .bind(store.is_active)
            .fetch_one(&mut **tx)
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for StoreRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            id: StoreId::from_i64(row.try_get("id")?),
            name: row.try_get("name")?,
            is_active: row.try_get("is_active")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}
