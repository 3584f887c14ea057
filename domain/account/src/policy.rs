//! Capability-based authorization. Every gated operation names one
//! capability and runs through [`authorize`] instead of comparing roles at
//! the call site.

use uuid::Uuid;

use crate::exception::{AccountException, AccountResult};
use crate::model::entity::profile::{Profile, Role};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    /// Create staff accounts for a dealership.
    ManageUsers,
    /// Create, update and delete work orders.
    ManageWorkOrders,
    /// Set a work order status without a transition check.
    ForceWorkOrderStatus,
    /// Maintain the parts catalog, customers and RVs.
    ManageCatalog,
    /// Read and update dealership settings.
    ManageSettings,
    /// See part and labor pricing.
    ViewPricing,
    /// Send approval requests to customers.
    SendApprovalRequests,
}

impl Role {
    pub fn grants(&self, capability: Capability) -> bool {
        match self {
            Role::Owner => true,
            Role::Manager => !matches!(capability, Capability::ManageUsers),
            Role::Technician => matches!(capability, Capability::ManageWorkOrders),
        }
    }
}

/// Checks that `profile` may exercise `capability` against `dealership_id`.
/// Rejects before any write: inactive callers, cross-dealership access and
/// missing grants each fail with their own error.
pub fn authorize(
    profile: &Profile,
    dealership_id: Uuid,
    capability: Capability,
) -> AccountResult<()> {
    if !profile.is_active() {
        return Err(AccountException::InactiveProfile);
    }
    if profile.dealership_id != dealership_id {
        return Err(AccountException::WrongDealership);
    }
    if !profile.role.grants(capability) {
        return Err(AccountException::CapabilityNotGranted {
            role: profile.role,
            capability,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::entity::profile::ProfileStatus;

    fn profile(role: Role, status: ProfileStatus) -> Profile {
        Profile {
            id: Uuid::new_v4(),
            dealership_id: Uuid::new_v4(),
            name: "Sam".into(),
            email: "sam@example.com".into(),
            role,
            status,
        }
    }

    #[test]
    fn owner_holds_every_capability() {
        let p = profile(Role::Owner, ProfileStatus::Active);
        for capability in [
            Capability::ManageUsers,
            Capability::ManageWorkOrders,
            Capability::ForceWorkOrderStatus,
            Capability::ManageCatalog,
            Capability::ManageSettings,
            Capability::ViewPricing,
            Capability::SendApprovalRequests,
        ] {
            assert!(authorize(&p, p.dealership_id, capability).is_ok());
        }
    }

    #[test]
    fn manager_cannot_manage_users() {
        let p = profile(Role::Manager, ProfileStatus::Active);
        assert!(matches!(
            authorize(&p, p.dealership_id, Capability::ManageUsers),
            Err(AccountException::CapabilityNotGranted { .. })
        ));
        assert!(authorize(&p, p.dealership_id, Capability::ForceWorkOrderStatus).is_ok());
    }

    #[test]
    fn technician_only_works_orders() {
        let p = profile(Role::Technician, ProfileStatus::Active);
        assert!(authorize(&p, p.dealership_id, Capability::ManageWorkOrders).is_ok());
        assert!(authorize(&p, p.dealership_id, Capability::ViewPricing).is_err());
        assert!(authorize(&p, p.dealership_id, Capability::ManageUsers).is_err());
    }

    #[test]
    fn inactive_profile_is_rejected_before_grant_check() {
        let p = profile(Role::Owner, ProfileStatus::Inactive);
        assert!(matches!(
            authorize(&p, p.dealership_id, Capability::ManageWorkOrders),
            Err(AccountException::InactiveProfile)
        ));
    }

    #[test]
    fn cross_dealership_access_is_rejected() {
        let p = profile(Role::Owner, ProfileStatus::Active);
        assert!(matches!(
            authorize(&p, Uuid::new_v4(), Capability::ManageWorkOrders),
            Err(AccountException::WrongDealership)
        ));
    }
}
