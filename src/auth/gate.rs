//! Role/ownership/store-membership authorization.

use thiserror::Error;

use crate::{
    auth::models::{StaffContext, StaffRole, StaffUserId},
    domain::stores::records::StoreRecord,
};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GateError {
    #[error("permission denied")]
    PermissionDenied,

    #[error("store is not active")]
    StoreNotActive,
}

/// Authorization check applied to every mutating schedule/slot operation.
///
/// The gate is stateless: callers resolve the target's owning stylist and
/// store from the aggregate first, then ask for a decision.
#[derive(Debug, Clone)]
pub struct PermissionGate {
    /// Roles exempt from the store-membership check.
    blanket_roles: Vec<StaffRole>,
}

impl Default for PermissionGate {
    fn default() -> Self {
        Self {
            blanket_roles: vec![StaffRole::SuperAdmin],
        }
    }
}

impl PermissionGate {
    #[must_use]
    pub fn new(blanket_roles: Vec<StaffRole>) -> Self {
        Self { blanket_roles }
    }

    /// Decide whether `staff` may act on an aggregate owned by the stylist
    /// linked to `owner_staff_user_id` at `store`.
    ///
    /// # Errors
    ///
    /// - [`GateError::PermissionDenied`] when a stylist targets someone
    ///   else's aggregate, or the store is outside the caller's
    ///   authorized set.
    /// - [`GateError::StoreNotActive`] when the store is inactive.
    pub fn authorize(
        &self,
        staff: &StaffContext,
        owner_staff_user_id: StaffUserId,
        store: &StoreRecord,
    ) -> Result<(), GateError> {
        match staff.role {
            StaffRole::Stylist => {
                if staff.staff_user_id != owner_staff_user_id {
                    return Err(GateError::PermissionDenied);
                }
            }
            StaffRole::Manager | StaffRole::Admin | StaffRole::SuperAdmin => {}
        }

        if !self.blanket_roles.contains(&staff.role) && !staff.store_ids.contains(&store.id) {
            return Err(GateError::PermissionDenied);
        }

        if !store.is_active {
            return Err(GateError::StoreNotActive);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use jiff::Timestamp;
    use rustc_hash::FxHashSet;

    use crate::domain::stores::records::StoreId;

    use super::*;

    fn store(id: i64, is_active: bool) -> StoreRecord {
        StoreRecord {
            id: StoreId::from_i64(id),
            name: "Main Street".to_string(),
            is_active,
            created_at: Timestamp::UNIX_EPOCH,
            updated_at: Timestamp::UNIX_EPOCH,
        }
    }

    fn staff(id: i64, role: StaffRole, stores: &[i64]) -> StaffContext {
        let store_ids: FxHashSet<StoreId> =
            stores.iter().map(|&s| StoreId::from_i64(s)).collect();

        StaffContext::new(StaffUserId::from_i64(id), role, store_ids)
    }

    #[test]
    fn stylist_may_act_on_own_aggregate() {
        let gate = PermissionGate::default();
        let ctx = staff(7, StaffRole::Stylist, &[1]);

        let result = gate.authorize(&ctx, StaffUserId::from_i64(7), &store(1, true));

        assert_eq!(result, Ok(()));
    }

    #[test]
    fn stylist_denied_on_someone_elses_aggregate() {
        let gate = PermissionGate::default();
        // Store membership alone is not enough for a stylist.
        let ctx = staff(7, StaffRole::Stylist, &[1]);

        let result = gate.authorize(&ctx, StaffUserId::from_i64(8), &store(1, true));

        assert_eq!(result, Err(GateError::PermissionDenied));
    }

    #[test]
    fn manager_denied_outside_authorized_stores() {
        let gate = PermissionGate::default();
        let ctx = staff(7, StaffRole::Manager, &[2, 3]);

        let result = gate.authorize(&ctx, StaffUserId::from_i64(8), &store(1, true));

        assert_eq!(result, Err(GateError::PermissionDenied));
    }

    #[test]
    fn admin_allowed_on_authorized_store() {
        let gate = PermissionGate::default();
        let ctx = staff(7, StaffRole::Admin, &[1]);

        let result = gate.authorize(&ctx, StaffUserId::from_i64(8), &store(1, true));

        assert_eq!(result, Ok(()));
    }

    #[test]
    fn super_admin_bypasses_store_membership() {
        let gate = PermissionGate::default();
        let ctx = staff(7, StaffRole::SuperAdmin, &[]);

        let result = gate.authorize(&ctx, StaffUserId::from_i64(8), &store(1, true));

        assert_eq!(result, Ok(()));
    }

    #[test]
    fn blanket_roles_are_configuration() {
        let gate = PermissionGate::new(vec![StaffRole::Admin, StaffRole::SuperAdmin]);
        let ctx = staff(7, StaffRole::Admin, &[]);

        let result = gate.authorize(&ctx, StaffUserId::from_i64(8), &store(1, true));

        assert_eq!(result, Ok(()));
    }

    #[test]
    fn inactive_store_is_distinct_from_permission_denied() {
        let gate = PermissionGate::default();
        let ctx = staff(7, StaffRole::Admin, &[1]);

        let result = gate.authorize(&ctx, StaffUserId::from_i64(8), &store(1, false));

        assert_eq!(result, Err(GateError::StoreNotActive));
    }
}
