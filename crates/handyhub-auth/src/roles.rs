//! Account roles.
//!
//! Raw role strings arrive from registration bodies, JWT claims and stored
//! rows. They are turned into a [`Role`] once, at the boundary, with
//! [`normalize_role`]; everything past that point handles the typed value.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::IdentityError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Admin,
    #[serde(alias = "partner")]
    ServiceProvider,
    User,
}

impl Role {
    pub const ALL: [Role; 3] = [Role::Admin, Role::ServiceProvider, Role::User];

    /// Canonical name, as stored and as placed in token claims.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::ServiceProvider => "service_provider",
            Self::User => "user",
        }
    }

    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Admin => "Administrator",
            Self::ServiceProvider => "Service Provider",
            Self::User => "Customer",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = IdentityError;

    /// Case-insensitive strict parse. The provider role is accepted under
    /// each spelling the client apps use.
    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "admin" => Ok(Self::Admin),
            "service_provider" | "service-provider" | "serviceprovider" | "provider"
            | "partner" => Ok(Self::ServiceProvider),
            "user" => Ok(Self::User),
            _ => Err(IdentityError::UnknownRole(raw.to_string())),
        }
    }
}

/// Resolves an untrusted role string.
///
/// Anything unrecognised, and a missing value, resolves to [`Role::User`],
/// the least privileged role.
pub fn normalize_role(raw: Option<&str>) -> Role {
    raw.and_then(|raw| raw.parse().ok()).unwrap_or(Role::User)
}
