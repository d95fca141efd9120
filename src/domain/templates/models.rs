//! Template Models

use jiff::{Timestamp, civil::Time};

use crate::{auth::models::StaffUserId, ids::TypedId};

/// Template id.
pub type TemplateId = TypedId<TimeSlotTemplate>;

/// Template item id.
pub type TemplateItemId = TypedId<TimeSlotTemplateItem>;

/// A reusable, date-independent interval set (e.g. "standard Tuesday")
/// used to stamp out time slots later. Templates are never booked.
#[derive(Debug, Clone)]
pub struct TimeSlotTemplate {
    pub id: TemplateId,
    pub name: String,
    pub note: Option<String>,

    /// Staff account that last touched the template or its items.
    pub updated_by: StaffUserId,

    pub items: Vec<TimeSlotTemplateItem>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// One interval of a template.
#[derive(Debug, Clone)]
pub struct TimeSlotTemplateItem {
    pub id: TemplateItemId,
    pub template_id: TemplateId,
    pub start_time: Time,
    pub end_time: Time,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// New template payload.
#[derive(Debug, Clone, PartialEq)]
pub struct NewTemplate {
    pub name: String,
    pub note: Option<String>,
    pub items: Vec<NewTemplateItem>,
}

/// A requested template item.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NewTemplateItem {
    pub start_time: Time,
    pub end_time: Time,
}
