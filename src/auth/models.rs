//! Auth data models.

use rustc_hash::FxHashSet;

use crate::{domain::stores::records::StoreId, ids::TypedId};

/// Marker for staff account ids issued by the staff collaborator.
#[derive(Debug)]
pub struct StaffUser;

/// Staff account id.
pub type StaffUserId = TypedId<StaffUser>;

/// Marker for customer ids issued by the customer collaborator.
#[derive(Debug)]
pub struct Customer;

/// Customer id.
pub type CustomerId = TypedId<Customer>;

/// Staff role, closed set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StaffRole {
    Stylist,
    Manager,
    Admin,
    SuperAdmin,
}

/// Authenticated staff identity for one request.
#[derive(Debug, Clone)]
pub struct StaffContext {
    pub staff_user_id: StaffUserId,
    pub role: StaffRole,

    /// Stores this staff member is authorized to act on.
    pub store_ids: FxHashSet<StoreId>,
}

impl StaffContext {
    #[must_use]
    pub fn new(staff_user_id: StaffUserId, role: StaffRole, store_ids: FxHashSet<StoreId>) -> Self {
        Self {
            staff_user_id,
            role,
            store_ids,
        }
    }
}

/// Authenticated customer identity for one request.
#[derive(Debug, Clone, Copy)]
pub struct CustomerContext {
    pub customer_id: CustomerId,
    pub is_blacklisted: bool,
}
