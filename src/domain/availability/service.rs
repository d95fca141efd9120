//! Customer-facing availability reads.
//!
//! Blacklisted customers get empty results before any database work, and
//! an unknown schedule reads as empty rather than erroring. Staff-side
//! validation failures (bad range, unknown store or stylist, inactive
//! store) remain hard errors so callers can surface them.

use async_trait::async_trait;
use jiff::{Zoned, civil::Date};
use mockall::automock;

use crate::{
    auth::models::CustomerContext,
    database::Db,
    domain::{
        availability::{
            errors::AvailabilityServiceError,
            models::{DateAvailability, DateRange, OpenScheduleDate, OpenSlot},
            repository::PgAvailabilityRepository,
        },
        schedules::models::ScheduleId,
        stores::{records::StoreId, repository::PgStoresRepository},
        stylists::{records::StylistId, repository::PgStylistsRepository},
    },
};

/// Longest window a customer may scan for per-date slot counts.
const AVAILABLE_DATES_MAX_DAYS: i64 = 31;

/// Longest window for the date-to-schedule listing.
const OPEN_SCHEDULE_DATES_MAX_DAYS: i64 = 60;

#[derive(Debug, Clone)]
pub struct PgAvailabilityService {
    db: Db,
    repository: PgAvailabilityRepository,
    stores: PgStoresRepository,
    stylists: PgStylistsRepository,
}

impl PgAvailabilityService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgAvailabilityRepository::new(),
            stores: PgStoresRepository::new(),
            stylists: PgStylistsRepository::new(),
        }
    }

    /// Validates the requested window and clamps its start forward to
    /// today. Returns `None` when the whole window is in the past.
    fn clamped_window(
        range: DateRange,
        max_days: i64,
    ) -> Result<Option<(Date, Date)>, AvailabilityServiceError> {
        if range.end < range.start {
            return Err(AvailabilityServiceError::EndBeforeStart);
        }

        if i64::from((range.end - range.start).get_days()) > max_days {
            return Err(AvailabilityServiceError::DateRangeExceeded);
        }

        let today = Zoned::now().date();
        let start = range.start.max(today);

        if start > range.end {
            return Ok(None);
        }

        Ok(Some((start, range.end)))
    }

    async fn check_store_and_stylist(
        &self,
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        store: StoreId,
        stylist: StylistId,
    ) -> Result<(), AvailabilityServiceError> {
        let store = self
            .stores
            .get_store(tx, store)
            .await?
            .ok_or(AvailabilityServiceError::StoreNotFound)?;

        if !store.is_active {
            return Err(AvailabilityServiceError::StoreNotActive);
        }

        self.stylists
            .get_stylist(tx, stylist)
            .await?
            .ok_or(AvailabilityServiceError::StylistNotFound)?;

        Ok(())
    }
}

#[async_trait]
impl AvailabilityService for PgAvailabilityService {
    async fn list_available_dates(
        &self,
        customer: CustomerContext,
        store: StoreId,
        stylist: StylistId,
        range: DateRange,
    ) -> Result<Vec<DateAvailability>, AvailabilityServiceError> {
        if customer.is_blacklisted {
            return Ok(Vec::new());
        }

        let Some((from, to)) = Self::clamped_window(range, AVAILABLE_DATES_MAX_DAYS)? else {
            return Ok(Vec::new());
        };

        let mut tx = self.db.begin().await?;

        self.check_store_and_stylist(&mut tx, store, stylist)
            .await?;

        let dates = self
            .repository
            .list_available_dates(&mut tx, store, stylist, from, to)
            .await?;

        tx.commit().await?;

        Ok(dates)
    }

    async fn list_open_schedule_dates(
        &self,
        customer: CustomerContext,
        store: StoreId,
        stylist: StylistId,
        range: DateRange,
    ) -> Result<Vec<OpenScheduleDate>, AvailabilityServiceError> {
        if customer.is_blacklisted {
            return Ok(Vec::new());
        }

        let Some((from, to)) = Self::clamped_window(range, OPEN_SCHEDULE_DATES_MAX_DAYS)? else {
            return Ok(Vec::new());
        };

        let mut tx = self.db.begin().await?;

        self.check_store_and_stylist(&mut tx, store, stylist)
            .await?;

        let dates = self
            .repository
            .list_open_schedule_dates(&mut tx, store, stylist, from, to)
            .await?;

        tx.commit().await?;

        Ok(dates)
    }

    async fn list_open_slots(
        &self,
        customer: CustomerContext,
        schedule: ScheduleId,
    ) -> Result<Vec<OpenSlot>, AvailabilityServiceError> {
        if customer.is_blacklisted {
            return Ok(Vec::new());
        }

        let mut tx = self.db.begin().await?;

        let slots = self.repository.list_open_slots(&mut tx, schedule).await?;

        tx.commit().await?;

        Ok(slots)
    }
}

#[automock]
#[async_trait]
pub trait AvailabilityService: Send + Sync {
    /// Dates in the window with at least one open slot, with counts.
    async fn list_available_dates(
        &self,
        customer: CustomerContext,
        store: StoreId,
        stylist: StylistId,
        range: DateRange,
    ) -> Result<Vec<DateAvailability>, AvailabilityServiceError>;

    /// Dates in the window with an open schedule, paired with the
    /// schedule id to drill into.
    async fn list_open_schedule_dates(
        &self,
        customer: CustomerContext,
        store: StoreId,
        stylist: StylistId,
        range: DateRange,
    ) -> Result<Vec<OpenScheduleDate>, AvailabilityServiceError>;

    /// Open slots of one schedule, ordered by start time.
    async fn list_open_slots(
        &self,
        customer: CustomerContext,
        schedule: ScheduleId,
    ) -> Result<Vec<OpenSlot>, AvailabilityServiceError>;
}

#[cfg(test)]
mod tests {
    use jiff::civil::date;
    use testresult::TestResult;

    use crate::{
        domain::schedules::{models::TimeSlotUpdate, service::SchedulesService},
        test::{TestContext, helpers::new_schedule},
    };

    use super::*;

    fn far_future_range(days: i64) -> DateRange {
        let start = date(2026, 12, 1);

        DateRange {
            start,
            end: start.saturating_add(jiff::Span::new().days(days)),
        }
    }

    #[tokio::test]
    async fn blacklisted_customer_sees_no_dates() -> TestResult {
        let ctx = TestContext::new().await;

        ctx.schedules
            .create_schedules(
                &ctx.admin_staff(),
                ctx.store_id,
                ctx.stylist_id,
                vec![new_schedule(date(2026, 12, 1), &[((9, 0), (10, 0))])],
            )
            .await?;

        let dates = ctx
            .availability
            .list_available_dates(
                ctx.blacklisted_customer(),
                ctx.store_id,
                ctx.stylist_id,
                far_future_range(14),
            )
            .await?;

        assert!(dates.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn blacklisted_customer_sees_no_slots() -> TestResult {
        let ctx = TestContext::new().await;

        let created = ctx
            .schedules
            .create_schedules(
                &ctx.admin_staff(),
                ctx.store_id,
                ctx.stylist_id,
                vec![new_schedule(date(2026, 12, 1), &[((9, 0), (10, 0))])],
            )
            .await?;

        let slots = ctx
            .availability
            .list_open_slots(ctx.blacklisted_customer(), created[0].id)
            .await?;

        assert!(slots.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn end_before_start_is_rejected() {
        let ctx = TestContext::new().await;

        let range = DateRange {
            start: date(2026, 12, 10),
            end: date(2026, 12, 1),
        };

        let result = ctx
            .availability
            .list_available_dates(ctx.customer(), ctx.store_id, ctx.stylist_id, range)
            .await;

        assert!(
            matches!(result, Err(AvailabilityServiceError::EndBeforeStart)),
            "expected EndBeforeStart, got {result:?}"
        );
    }

    #[tokio::test]
    async fn date_window_caps_are_enforced() {
        let ctx = TestContext::new().await;

        let result = ctx
            .availability
            .list_available_dates(
                ctx.customer(),
                ctx.store_id,
                ctx.stylist_id,
                far_future_range(32),
            )
            .await;

        assert!(
            matches!(result, Err(AvailabilityServiceError::DateRangeExceeded)),
            "expected DateRangeExceeded, got {result:?}"
        );

        let result = ctx
            .availability
            .list_open_schedule_dates(
                ctx.customer(),
                ctx.store_id,
                ctx.stylist_id,
                far_future_range(61),
            )
            .await;

        assert!(
            matches!(result, Err(AvailabilityServiceError::DateRangeExceeded)),
            "expected DateRangeExceeded, got {result:?}"
        );
    }

    #[tokio::test]
    async fn open_schedule_window_allows_sixty_days() -> TestResult {
        let ctx = TestContext::new().await;

        let dates = ctx
            .availability
            .list_open_schedule_dates(
                ctx.customer(),
                ctx.store_id,
                ctx.stylist_id,
                far_future_range(60),
            )
            .await?;

        assert!(dates.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn unknown_store_is_a_hard_error() {
        let ctx = TestContext::new().await;

        let result = ctx
            .availability
            .list_available_dates(
                ctx.customer(),
                StoreId::from_i64(999_999),
                ctx.stylist_id,
                far_future_range(7),
            )
            .await;

        assert!(
            matches!(result, Err(AvailabilityServiceError::StoreNotFound)),
            "expected StoreNotFound, got {result:?}"
        );
    }

    #[tokio::test]
    async fn inactive_store_is_a_hard_error() -> TestResult {
        let ctx = TestContext::new().await;

        let closed = ctx.create_store("Shuttered", false).await?;

        let result = ctx
            .availability
            .list_available_dates(
                ctx.customer(),
                closed,
                ctx.stylist_id,
                far_future_range(7),
            )
            .await;

        assert!(
            matches!(result, Err(AvailabilityServiceError::StoreNotActive)),
            "expected StoreNotActive, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn unknown_stylist_is_a_hard_error() {
        let ctx = TestContext::new().await;

        let result = ctx
            .availability
            .list_available_dates(
                ctx.customer(),
                ctx.store_id,
                StylistId::from_i64(999_999),
                far_future_range(7),
            )
            .await;

        assert!(
            matches!(result, Err(AvailabilityServiceError::StylistNotFound)),
            "expected StylistNotFound, got {result:?}"
        );
    }

    #[tokio::test]
    async fn counts_track_bookings_per_date() -> TestResult {
        let ctx = TestContext::new().await;

        let created = ctx
            .schedules
            .create_schedules(
                &ctx.admin_staff(),
                ctx.store_id,
                ctx.stylist_id,
                vec![
                    new_schedule(date(2026, 12, 1), &[((9, 0), (10, 0)), ((10, 0), (11, 0))]),
                    new_schedule(date(2026, 12, 2), &[((9, 0), (10, 0))]),
                ],
            )
            .await?;

        let range = far_future_range(7);

        let dates = ctx
            .availability
            .list_available_dates(ctx.customer(), ctx.store_id, ctx.stylist_id, range)
            .await?;

        assert_eq!(dates.len(), 2);
        assert_eq!(dates[0].date, date(2026, 12, 1));
        assert_eq!(dates[0].available_slots, 2);
        assert_eq!(dates[1].available_slots, 1);

        // Booking every slot of a date removes it from the listing.
        let second_day = &created[1];
        ctx.schedules
            .update_time_slot(
                &ctx.admin_staff(),
                second_day.id,
                second_day.time_slots[0].id,
                TimeSlotUpdate {
                    start_time: None,
                    end_time: None,
                    is_available: Some(false),
                },
            )
            .await?;

        let dates = ctx
            .availability
            .list_available_dates(ctx.customer(), ctx.store_id, ctx.stylist_id, range)
            .await?;

        assert_eq!(dates.len(), 1);
        assert_eq!(dates[0].date, date(2026, 12, 1));

        Ok(())
    }

    #[tokio::test]
    async fn open_schedule_dates_pair_date_with_schedule() -> TestResult {
        let ctx = TestContext::new().await;

        let created = ctx
            .schedules
            .create_schedules(
                &ctx.admin_staff(),
                ctx.store_id,
                ctx.stylist_id,
                vec![new_schedule(date(2026, 12, 3), &[((9, 0), (10, 0))])],
            )
            .await?;

        let dates = ctx
            .availability
            .list_open_schedule_dates(
                ctx.customer(),
                ctx.store_id,
                ctx.stylist_id,
                far_future_range(14),
            )
            .await?;

        assert_eq!(dates.len(), 1);
        assert_eq!(dates[0].date, date(2026, 12, 3));
        assert_eq!(dates[0].schedule_id, created[0].id);

        Ok(())
    }

    #[tokio::test]
    async fn open_slots_are_ordered_with_durations() -> TestResult {
        let ctx = TestContext::new().await;

        let created = ctx
            .schedules
            .create_schedules(
                &ctx.admin_staff(),
                ctx.store_id,
                ctx.stylist_id,
                vec![new_schedule(
                    date(2026, 12, 1),
                    &[((13, 0), (14, 30)), ((9, 0), (10, 0))],
                )],
            )
            .await?;

        let slots = ctx
            .availability
            .list_open_slots(ctx.customer(), created[0].id)
            .await?;

        assert_eq!(slots.len(), 2);
        assert_eq!(slots[0].start_time, jiff::civil::time(9, 0, 0, 0));
        assert_eq!(slots[0].duration_minutes, 60);
        assert_eq!(slots[1].duration_minutes, 90);

        Ok(())
    }

    #[tokio::test]
    async fn unknown_schedule_reads_as_empty() -> TestResult {
        let ctx = TestContext::new().await;

        let slots = ctx
            .availability
            .list_open_slots(ctx.customer(), ScheduleId::from_i64(999_999))
            .await?;

        assert!(slots.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn past_window_clamps_to_empty() -> TestResult {
        let ctx = TestContext::new().await;

        let range = DateRange {
            start: date(2020, 1, 1),
            end: date(2020, 1, 14),
        };

        let dates = ctx
            .availability
            .list_available_dates(ctx.customer(), ctx.store_id, ctx.stylist_id, range)
            .await?;

        assert!(dates.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn booked_slots_are_hidden_from_customers() -> TestResult {
        let ctx = TestContext::new().await;

        let created = ctx
            .schedules
            .create_schedules(
                &ctx.admin_staff(),
                ctx.store_id,
                ctx.stylist_id,
                vec![new_schedule(
                    date(2026, 12, 1),
                    &[((9, 0), (10, 0)), ((10, 0), (11, 0))],
                )],
            )
            .await?;

        let schedule = &created[0];
        ctx.schedules
            .update_time_slot(
                &ctx.admin_staff(),
                schedule.id,
                schedule.time_slots[0].id,
                TimeSlotUpdate {
                    start_time: None,
                    end_time: None,
                    is_available: Some(false),
                },
            )
            .await?;

        let slots = ctx
            .availability
            .list_open_slots(ctx.customer(), schedule.id)
            .await?;

        assert_eq!(slots.len(), 1);
        assert_eq!(slots[0].id, schedule.time_slots[1].id);

        Ok(())
    }
}
