//! Templates Repository

use jiff_sqlx::{Time as SqlxTime, Timestamp as SqlxTimestamp};
use sqlx::{FromRow, Postgres, QueryBuilder, Row, Transaction, postgres::PgRow, query, query_as};

use crate::{
    auth::models::StaffUserId,
    domain::templates::models::{
        NewTemplateItem, TemplateId, TemplateItemId, TimeSlotTemplate, TimeSlotTemplateItem,
    },
};

const GET_TEMPLATE_SQL: &str = include_str!("sql/get_template.sql");
const LIST_TEMPLATES_SQL: &str = include_str!("sql/list_templates.sql");
const CREATE_TEMPLATE_SQL: &str = include_str!("sql/create_template.sql");
const TOUCH_TEMPLATE_SQL: &str = include_str!("sql/touch_template.sql");
const GET_ITEMS_SQL: &str = include_str!("sql/get_template_items.sql");
const GET_ITEM_SQL: &str = include_str!("sql/get_template_item.sql");
const CREATE_ITEM_SQL: &str = include_str!("sql/create_template_item.sql");
const UPDATE_ITEM_SQL: &str = include_str!("sql/update_template_item.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgTemplatesRepository;

impl PgTemplatesRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn get_template(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        template: TemplateId,
    ) -> Result<Option<TimeSlotTemplate>, sqlx::Error> {
        query_as::<Postgres, TimeSlotTemplate>(GET_TEMPLATE_SQL)
            .bind(template.into_i64())
            .fetch_optional(&mut **tx)
            .await
    }

    pub(crate) async fn list_templates(
        &self,
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<Vec<TimeSlotTemplate>, sqlx::Error> {
        query_as::<Postgres, TimeSlotTemplate>(LIST_TEMPLATES_SQL)
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn create_template(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        name: &str,
        note: Option<&str>,
        updated_by: StaffUserId,
    ) -> Result<TimeSlotTemplate, sqlx::Error> {
        query_as::<Postgres, TimeSlotTemplate>(CREATE_TEMPLATE_SQL)
            .bind(name)
            .bind(note)
            .bind(updated_by.into_i64())
            .fetch_one(&mut **tx)
            .await
    }

    /// Record who last touched the template; item writes call this so
    /// the parent's updater stays accurate.
    pub(crate) async fn touch_template(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        template: TemplateId,
        updated_by: StaffUserId,
    ) -> Result<(), sqlx::Error> {
        query(TOUCH_TEMPLATE_SQL)
            .bind(template.into_i64())
            .bind(updated_by.into_i64())
            .execute(&mut **tx)
            .await?;

        Ok(())
    }

    pub(crate) async fn get_items(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        template: TemplateId,
    ) -> Result<Vec<TimeSlotTemplateItem>, sqlx::Error> {
        query_as::<Postgres, TimeSlotTemplateItem>(GET_ITEMS_SQL)
            .bind(template.into_i64())
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn get_item(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        template: TemplateId,
        item: TemplateItemId,
    ) -> Result<Option<TimeSlotTemplateItem>, sqlx::Error> {
        query_as::<Postgres, TimeSlotTemplateItem>(GET_ITEM_SQL)
            .bind(item.into_i64())
            .bind(template.into_i64())
            .fetch_optional(&mut **tx)
            .await
    }

    pub(crate) async fn insert_item(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        template: TemplateId,
        item: NewTemplateItem,
    ) -> Result<TimeSlotTemplateItem, sqlx::Error> {
        query_as::<Postgres, TimeSlotTemplateItem>(CREATE_ITEM_SQL)
            .bind(template.into_i64())
            .bind(SqlxTime::from(item.start_time))
            .bind(SqlxTime::from(item.end_time))
            .fetch_one(&mut **tx)
            .await
    }

    /// Insert all items of a new template as one multi-row statement.
    pub(crate) async fn insert_items(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        template: TemplateId,
        items: &[NewTemplateItem],
    ) -> Result<Vec<TimeSlotTemplateItem>, sqlx::Error> {
        if items.is_empty() {
            return Ok(Vec::new());
        }

        let mut builder = QueryBuilder::<Postgres>::new(
            "INSERT INTO time_slot_template_items (template_id, start_time, end_time) ",
        );

        builder.push_values(items, |mut row, item| {
            row.push_bind(template.into_i64())
                .push_bind(SqlxTime::from(item.start_time))
                .push_bind(SqlxTime::from(item.end_time));
        });

        builder.push(
            " RETURNING id, template_id, start_time, end_time, created_at, updated_at",
        );

        builder
            .build_query_as::<TimeSlotTemplateItem>()
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn update_item(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        item: TemplateItemId,
        update: NewTemplateItem,
    ) -> Result<TimeSlotTemplateItem, sqlx::Error> {
        query_as::<Postgres, TimeSlotTemplateItem>(UPDATE_ITEM_SQL)
            .bind(item.into_i64())
            .bind(SqlxTime::from(update.start_time))
            .bind(SqlxTime::from(update.end_time))
            .fetch_one(&mut **tx)
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for TimeSlotTemplate {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            id: TemplateId::from_i64(row.try_get("id")?),
            name: row.try_get("name")?,
            note: row.try_get("note")?,
            updated_by: StaffUserId::from_i64(row.try_get("updated_by")?),
            // Items are loaded separately and attached by the service.
            items: Vec::new(),
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}

impl<'r> FromRow<'r, PgRow> for TimeSlotTemplateItem {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            id: TemplateItemId::from_i64(row.try_get("id")?),
            template_id: TemplateId::from_i64(row.try_get("template_id")?),
            start_time: row.try_get::<SqlxTime, _>("start_time")?.to_jiff(),
            end_time: row.try_get::<SqlxTime, _>("end_time")?.to_jiff(),
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}
