use thiserror::Error;

use crate::portal::Portal;
use crate::roles::Role;

/// Strict-parse failures for identifiers.
///
/// Request handling never surfaces these: roles normalize to
/// [`Role::User`] and unknown portals are denied. They exist for
/// configuration, where a typo must not pass silently.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IdentityError {
    #[error("unknown role: {0}")]
    UnknownRole(String),
    #[error("unknown portal: {0}")]
    UnknownPortal(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PortalPolicyError {
    #[error(transparent)]
    Identity(#[from] IdentityError),
    #[error("role {role} may not be admitted through {portal}")]
    ForbiddenAdmission { portal: Portal, role: Role },
}
