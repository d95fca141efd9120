//! Templates service.
//!
//! Templates carry the same interval invariants as schedules but no
//! calendar date, no booking state, and no stylist owner — any
//! authenticated staff member may maintain them, so the permission gate
//! is not consulted here.

use async_trait::async_trait;
use mockall::automock;

use crate::{
    auth::models::StaffContext,
    database::Db,
    domain::{
        intervals::{self, Interval},
        templates::{
            errors::TemplatesServiceError,
            models::{
                NewTemplate, NewTemplateItem, TemplateId, TemplateItemId, TimeSlotTemplate,
                TimeSlotTemplateItem,
            },
            repository::PgTemplatesRepository,
        },
    },
};

#[derive(Debug, Clone)]
pub struct PgTemplatesService {
    db: Db,
    repository: PgTemplatesRepository,
}

impl PgTemplatesService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgTemplatesRepository::new(),
        }
    }
}

fn item_intervals(items: &[TimeSlotTemplateItem]) -> Result<Vec<Interval>, TemplatesServiceError> {
    items
        .iter()
        .map(|item| Interval::new(item.start_time, item.end_time).map_err(Into::into))
        .collect()
}

#[async_trait]
impl TemplatesService for PgTemplatesService {
    #[tracing::instrument(
        name = "templates.service.create_template",
        skip(self, staff, template),
        fields(item_count = template.items.len()),
        err
    )]
    async fn create_template(
        &self,
        staff: &StaffContext,
        template: NewTemplate,
    ) -> Result<TimeSlotTemplate, TemplatesServiceError> {
        let intervals: Vec<Interval> = template
            .items
            .iter()
            .map(|item| Interval::new(item.start_time, item.end_time).map_err(Into::into))
            .collect::<Result<_, TemplatesServiceError>>()?;

        intervals::validate_disjoint(&intervals)?;

        let mut tx = self.db.begin().await?;

        let mut created = self
            .repository
            .create_template(
                &mut tx,
                &template.name,
                template.note.as_deref(),
                staff.staff_user_id,
            )
            .await?;

        let items = self
            .repository
            .insert_items(&mut tx, created.id, &template.items)
            .await?;

        tx.commit().await?;

        created.items = items;

        Ok(created)
    }

    async fn get_template(
        &self,
        template: TemplateId,
    ) -> Result<TimeSlotTemplate, TemplatesServiceError> {
        let mut tx = self.db.begin().await?;

        let mut found = self
            .repository
            .get_template(&mut tx, template)
            .await?
            .ok_or(TemplatesServiceError::TemplateNotFound)?;

        let items = self.repository.get_items(&mut tx, template).await?;

        tx.commit().await?;

        found.items = items;

        Ok(found)
    }

    async fn list_templates(&self) -> Result<Vec<TimeSlotTemplate>, TemplatesServiceError> {
        let mut tx = self.db.begin().await?;

        let templates = self.repository.list_templates(&mut tx).await?;

        tx.commit().await?;

        Ok(templates)
    }

    async fn create_template_item(
        &self,
        staff: &StaffContext,
        template: TemplateId,
        item: NewTemplateItem,
    ) -> Result<TimeSlotTemplateItem, TemplatesServiceError> {
        let candidate = Interval::new(item.start_time, item.end_time)?;

        let mut tx = self.db.begin().await?;

        let template = self
            .repository
            .get_template(&mut tx, template)
            .await?
            .ok_or(TemplatesServiceError::TemplateNotFound)?;

        let existing = self.repository.get_items(&mut tx, template.id).await?;

        intervals::validate_against(candidate, &item_intervals(&existing)?)?;

        let created = self
            .repository
            .insert_item(&mut tx, template.id, item)
            .await?;

        self.repository
            .touch_template(&mut tx, template.id, staff.staff_user_id)
            .await?;

        tx.commit().await?;

        Ok(created)
    }

    async fn update_template_item(
        &self,
        staff: &StaffContext,
        template: TemplateId,
        item: TemplateItemId,
        update: NewTemplateItem,
    ) -> Result<TimeSlotTemplateItem, TemplatesServiceError> {
        let candidate = Interval::new(update.start_time, update.end_time)?;

        let mut tx = self.db.begin().await?;

        let template = self
            .repository
            .get_template(&mut tx, template)
            .await?
            .ok_or(TemplatesServiceError::TemplateNotFound)?;

        let target = self
            .repository
            .get_item(&mut tx, template.id, item)
            .await?
            .ok_or(TemplatesServiceError::TemplateItemNotFound)?;

        let siblings: Vec<TimeSlotTemplateItem> = self
            .repository
            .get_items(&mut tx, template.id)
            .await?
            .into_iter()
            .filter(|other| other.id != target.id)
            .collect();

        intervals::validate_against(candidate, &item_intervals(&siblings)?)?;

        let updated = self.repository.update_item(&mut tx, target.id, update).await?;

        self.repository
            .touch_template(&mut tx, template.id, staff.staff_user_id)
            .await?;

        tx.commit().await?;

        Ok(updated)
    }
}

#[automock]
#[async_trait]
pub trait TemplatesService: Send + Sync {
    /// Create a template and its items, all-or-nothing.
    async fn create_template(
        &self,
        staff: &StaffContext,
        template: NewTemplate,
    ) -> Result<TimeSlotTemplate, TemplatesServiceError>;

    /// Retrieve one template with its items ordered by start time.
    async fn get_template(
        &self,
        template: TemplateId,
    ) -> Result<TimeSlotTemplate, TemplatesServiceError>;

    /// List all templates (without items).
    async fn list_templates(&self) -> Result<Vec<TimeSlotTemplate>, TemplatesServiceError>;

    /// Add an item to an existing template.
    async fn create_template_item(
        &self,
        staff: &StaffContext,
        template: TemplateId,
        item: NewTemplateItem,
    ) -> Result<TimeSlotTemplateItem, TemplatesServiceError>;

    /// Replace an item's interval.
    async fn update_template_item(
        &self,
        staff: &StaffContext,
        template: TemplateId,
        item: TemplateItemId,
        update: NewTemplateItem,
    ) -> Result<TimeSlotTemplateItem, TemplatesServiceError>;
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::test::{
        TestContext,
        helpers::{new_template, template_item},
    };

    use super::*;

    #[tokio::test]
    async fn create_template_round_trips_items() -> TestResult {
        let ctx = TestContext::new().await;
        let staff = ctx.admin_staff();

        let created = ctx
            .templates
            .create_template(
                &staff,
                new_template("Standard Tuesday", &[((9, 0), (12, 0)), ((13, 0), (18, 0))]),
            )
            .await?;

        assert_eq!(created.name, "Standard Tuesday");
        assert_eq!(created.items.len(), 2);
        assert_eq!(created.updated_by, staff.staff_user_id);

        let fetched = ctx.templates.get_template(created.id).await?;

        assert_eq!(fetched.items.len(), 2);

        Ok(())
    }

    #[tokio::test]
    async fn create_template_rejects_overlapping_items() {
        let ctx = TestContext::new().await;
        let staff = ctx.admin_staff();

        let result = ctx
            .templates
            .create_template(
                &staff,
                new_template("Broken", &[((9, 0), (10, 30)), ((10, 0), (11, 0))]),
            )
            .await;

        assert!(
            matches!(result, Err(TemplatesServiceError::TimeSlotConflict)),
            "expected TimeSlotConflict, got {result:?}"
        );
    }

    #[tokio::test]
    async fn create_template_item_requires_existing_template() {
        let ctx = TestContext::new().await;
        let staff = ctx.admin_staff();

        let result = ctx
            .templates
            .create_template_item(
                &staff,
                TemplateId::from_i64(999_999),
                template_item((9, 0), (10, 0)),
            )
            .await;

        assert!(
            matches!(result, Err(TemplatesServiceError::TemplateNotFound)),
            "expected TemplateNotFound, got {result:?}"
        );
    }

    #[tokio::test]
    async fn create_template_item_checks_sibling_conflicts() -> TestResult {
        let ctx = TestContext::new().await;
        let staff = ctx.admin_staff();

        let created = ctx
            .templates
            .create_template(&staff, new_template("Morning", &[((9, 0), (10, 30))]))
            .await?;

        let result = ctx
            .templates
            .create_template_item(&staff, created.id, template_item((10, 0), (11, 0)))
            .await;

        assert!(
            matches!(result, Err(TemplatesServiceError::TimeSlotConflict)),
            "expected TimeSlotConflict, got {result:?}"
        );

        // Touching is allowed, same rule as schedule slots.
        let item = ctx
            .templates
            .create_template_item(&staff, created.id, template_item((10, 30), (11, 30)))
            .await?;

        assert_eq!(item.template_id, created.id);

        Ok(())
    }

    #[tokio::test]
    async fn update_template_item_excludes_itself() -> TestResult {
        let ctx = TestContext::new().await;
        let staff = ctx.admin_staff();

        let created = ctx
            .templates
            .create_template(
                &staff,
                new_template("Day", &[((9, 0), (10, 0)), ((11, 0), (12, 0))]),
            )
            .await?;

        let first = created.items[0].id;

        let updated = ctx
            .templates
            .update_template_item(&staff, created.id, first, template_item((9, 30), (11, 0)))
            .await?;

        assert_eq!(updated.start_time, jiff::civil::time(9, 30, 0, 0));

        let result = ctx
            .templates
            .update_template_item(&staff, created.id, first, template_item((11, 30), (12, 30)))
            .await;

        assert!(
            matches!(result, Err(TemplatesServiceError::TimeSlotConflict)),
            "expected TimeSlotConflict, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn update_template_item_unknown_item_returns_item_not_found() -> TestResult {
        let ctx = TestContext::new().await;
        let staff = ctx.admin_staff();

        let created = ctx
            .templates
            .create_template(&staff, new_template("Sparse", &[]))
            .await?;

        let result = ctx
            .templates
            .update_template_item(
                &staff,
                created.id,
                TemplateItemId::from_i64(999_999),
                template_item((9, 0), (10, 0)),
            )
            .await;

        assert!(
            matches!(result, Err(TemplatesServiceError::TemplateItemNotFound)),
            "expected TemplateItemNotFound, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn item_writes_record_the_updater() -> TestResult {
        let ctx = TestContext::new().await;
        let staff = ctx.admin_staff();

        let created = ctx
            .templates
            .create_template(&staff, new_template("Handover", &[]))
            .await?;

        let other = ctx.second_admin_staff();

        ctx.templates
            .create_template_item(&other, created.id, template_item((9, 0), (10, 0)))
            .await?;

        let fetched = ctx.templates.get_template(created.id).await?;

        assert_eq!(fetched.updated_by, other.staff_user_id);

        Ok(())
    }
}
