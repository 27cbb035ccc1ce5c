//! The role to permission table.

use handyhub_core::permissions::{Capability, PermissionSet};

use crate::roles::Role;

const ADMIN: PermissionSet = PermissionSet::NONE
    .grant(Capability::ManageCategories)
    .grant(Capability::ManageTypes)
    .grant(Capability::ManageAllServices)
    .grant(Capability::ApproveProviders)
    .grant(Capability::ManageUsers)
    .grant(Capability::ViewAllBookings)
    .grant(Capability::ViewAnalytics)
    .grant(Capability::BrowseServices);

const SERVICE_PROVIDER: PermissionSet = PermissionSet::NONE
    .grant(Capability::ManageOwnServices)
    .grant(Capability::BrowseServices)
    .grant(Capability::ViewOwnBookings);

const USER: PermissionSet = PermissionSet::NONE
    .grant(Capability::BrowseServices)
    .grant(Capability::BookServices)
    .grant(Capability::ViewOwnBookings)
    .grant(Capability::LeaveReviews);

/// One [`PermissionSet`] per [`Role`].
///
/// Built once at startup and shared read-only through application state.
/// There is no setter: a new capability means a new column in
/// [`PermissionSet`] and a new `grant` line here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RolePermissions {
    admin: PermissionSet,
    service_provider: PermissionSet,
    user: PermissionSet,
}

impl RolePermissions {
    pub const fn standard() -> Self {
        Self {
            admin: ADMIN,
            service_provider: SERVICE_PROVIDER,
            user: USER,
        }
    }

    pub const fn permissions_for(&self, role: Role) -> &PermissionSet {
        match role {
            Role::Admin => &self.admin,
            Role::ServiceProvider => &self.service_provider,
            Role::User => &self.user,
        }
    }

    pub const fn has_permission(&self, role: Role, capability: Capability) -> bool {
        self.permissions_for(role).allows(capability)
    }
}

impl Default for RolePermissions {
    fn default() -> Self {
        Self::standard()
    }
}
