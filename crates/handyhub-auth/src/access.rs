//! The authorization gate.
//!
//! [`AccessControl`] bundles the permission table and the portal policy. It
//! is constructed once at startup, stored behind an `Arc` in application
//! state, and is the only place privileged entry points ask "may this caller
//! do this?".

use handyhub_config::PortalConfig;
use handyhub_core::errors::AccessError;
use handyhub_core::permissions::{Capability, PermissionSet};
use uuid::Uuid;

use crate::error::PortalPolicyError;
use crate::policy::RolePermissions;
use crate::portal::PortalPolicy;
use crate::roles::Role;

/// The authenticated caller: account id and normalized role.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Principal {
    pub user_id: Uuid,
    pub role: Role,
}

impl Principal {
    pub fn new(user_id: Uuid, role: Role) -> Self {
        Self { user_id, role }
    }
}

#[derive(Debug, Clone)]
pub struct AccessControl {
    permissions: RolePermissions,
    portals: PortalPolicy,
}

impl AccessControl {
    pub fn new(permissions: RolePermissions, portals: PortalPolicy) -> Self {
        Self {
            permissions,
            portals,
        }
    }

    pub fn standard() -> Self {
        Self::new(RolePermissions::standard(), PortalPolicy::standard())
    }

    pub fn from_config(config: &PortalConfig) -> Result<Self, PortalPolicyError> {
        Ok(Self::new(
            RolePermissions::standard(),
            PortalPolicy::from_config(config)?,
        ))
    }

    pub fn permissions_for(&self, role: Role) -> &PermissionSet {
        self.permissions.permissions_for(role)
    }

    pub fn has_permission(&self, role: Role, capability: Capability) -> bool {
        self.permissions.has_permission(role, capability)
    }

    pub fn require(&self, principal: &Principal, capability: Capability) -> Result<(), AccessError> {
        if self.has_permission(principal.role, capability) {
            Ok(())
        } else {
            Err(AccessError::InsufficientPermission(capability))
        }
    }

    /// Checks an action on an owned resource.
    ///
    /// `bypass` grants the action regardless of ownership. Each entry of
    /// `owners` pairs a capability with the account that owns the resource
    /// under it; the caller passes if it holds one of those capabilities and
    /// is the matching owner.
    ///
    /// Fails with [`AccessError::InsufficientPermission`] when the caller
    /// holds none of the capabilities, and [`AccessError::OwnershipViolation`]
    /// when it holds one but owns nothing it covers.
    pub fn authorize_owned(
        &self,
        principal: &Principal,
        bypass: Capability,
        owners: &[(Capability, Uuid)],
    ) -> Result<(), AccessError> {
        if self.has_permission(principal.role, bypass) {
            return Ok(());
        }

        let mut held = owners
            .iter()
            .filter(|(capability, _)| self.has_permission(principal.role, *capability))
            .peekable();

        if held.peek().is_none() {
            let missing = owners.first().map(|(capability, _)| *capability).unwrap_or(bypass);
            return Err(AccessError::InsufficientPermission(missing));
        }

        if held.any(|(_, owner)| *owner == principal.user_id) {
            Ok(())
        } else {
            Err(AccessError::OwnershipViolation)
        }
    }

    pub fn is_role_allowed_for_portal(&self, portal: Option<&str>, role: Option<&str>) -> bool {
        self.portals.is_role_allowed_for_portal(portal, role)
    }

    /// Portal admission as a `Result`, shared by registration and login.
    pub fn admit(&self, portal: Option<&str>, role: Option<&str>) -> Result<(), AccessError> {
        if self.is_role_allowed_for_portal(portal, role) {
            Ok(())
        } else {
            Err(AccessError::PortalDenied)
        }
    }
}

impl Default for AccessControl {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn principal(role: Role) -> Principal {
        Principal::new(Uuid::new_v4(), role)
    }

    #[test]
    fn test_require() {
        let access = AccessControl::standard();
        assert!(access.require(&principal(Role::User), Capability::BookServices).is_ok());
        assert_eq!(
            access.require(&principal(Role::User), Capability::ManageUsers),
            Err(AccessError::InsufficientPermission(Capability::ManageUsers))
        );
    }

    #[test]
    fn test_authorize_owned_bypass() {
        let access = AccessControl::standard();
        let admin = principal(Role::Admin);
        let someone_else = Uuid::new_v4();
        assert!(
            access
                .authorize_owned(
                    &admin,
                    Capability::ManageAllServices,
                    &[(Capability::ManageOwnServices, someone_else)],
                )
                .is_ok()
        );
    }

    #[test]
    fn test_authorize_owned_owner_passes() {
        let access = AccessControl::standard();
        let provider = principal(Role::ServiceProvider);
        assert!(
            access
                .authorize_owned(
                    &provider,
                    Capability::ManageAllServices,
                    &[(Capability::ManageOwnServices, provider.user_id)],
                )
                .is_ok()
        );
    }

    #[test]
    fn test_authorize_owned_non_owner_is_ownership_violation() {
        let access = AccessControl::standard();
        let provider = principal(Role::ServiceProvider);
        assert_eq!(
            access.authorize_owned(
                &provider,
                Capability::ManageAllServices,
                &[(Capability::ManageOwnServices, Uuid::new_v4())],
            ),
            Err(AccessError::OwnershipViolation)
        );
    }

    #[test]
    fn test_authorize_owned_without_capability_is_insufficient() {
        let access = AccessControl::standard();
        let user = principal(Role::User);
        assert_eq!(
            access.authorize_owned(
                &user,
                Capability::ManageAllServices,
                &[(Capability::ManageOwnServices, user.user_id)],
            ),
            Err(AccessError::InsufficientPermission(
                Capability::ManageOwnServices
            ))
        );
    }

    #[test]
    fn test_owner_capability_must_match_owner_entry() {
        let access = AccessControl::standard();
        let user = principal(Role::User);
        // Matching the provider entry counts for nothing without the provider capability.
        assert_eq!(
            access.authorize_owned(
                &user,
                Capability::ManageAllServices,
                &[
                    (Capability::ManageOwnServices, user.user_id),
                    (Capability::BookServices, Uuid::new_v4()),
                ],
            ),
            Err(AccessError::OwnershipViolation)
        );
    }

    #[test]
    fn test_admit_uses_predicate() {
        let access = AccessControl::standard();
        assert!(access.admit(Some("admin-panel"), Some("admin")).is_ok());
        assert_eq!(
            access.admit(Some("admin-panel"), Some("user")),
            Err(AccessError::PortalDenied)
        );
        assert_eq!(access.admit(None, Some("admin")), Err(AccessError::PortalDenied));
    }
}
