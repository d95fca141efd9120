//! Store Records

use jiff::Timestamp;

use crate::ids::TypedId;

/// Store id.
pub type StoreId = TypedId<StoreRecord>;

/// Store Record
#[derive(Debug, Clone)]
pub struct StoreRecord {
    pub id: StoreId,
    pub name: String,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// New Store payload.
#[derive(Debug, Clone, PartialEq)]
pub struct NewStore {
    pub name: String,
    pub is_active: bool,
}
