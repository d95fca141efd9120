//! Stylist Records

use jiff::Timestamp;

use crate::{auth::models::StaffUserId, ids::TypedId};

/// Stylist id.
pub type StylistId = TypedId<StylistRecord>;

/// Stylist Record
#[derive(Debug, Clone)]
pub struct StylistRecord {
    pub id: StylistId,

    /// Staff account this stylist logs in as; the ownership side of the
    /// permission gate compares against this.
    pub staff_user_id: StaffUserId,

    pub name: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// New Stylist payload.
#[derive(Debug, Clone, PartialEq)]
pub struct NewStylist {
    pub staff_user_id: StaffUserId,
    pub name: String,
}
