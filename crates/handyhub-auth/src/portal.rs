//! Client portals and the admission predicate.
//!
//! A portal is the client surface a request comes from, announced in the
//! `x-portal` header. Registration and login both decide admission through
//! [`PortalPolicy::is_role_allowed_for_portal`] so that "who may sign up
//! here" and "who may sign in here" cannot drift apart.

use std::fmt;
use std::str::FromStr;

use handyhub_config::PortalConfig;
use serde::Serialize;
use utoipa::ToSchema;

use crate::error::{IdentityError, PortalPolicyError};
use crate::roles::{Role, normalize_role};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, ToSchema)]
#[serde(rename_all = "kebab-case")]
pub enum Portal {
    Frontend,
    AdminPanel,
    PartnerApp,
}

impl Portal {
    pub const ALL: [Portal; 3] = [Portal::Frontend, Portal::AdminPanel, Portal::PartnerApp];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Frontend => "frontend",
            Self::AdminPanel => "admin-panel",
            Self::PartnerApp => "partner-app",
        }
    }
}

impl fmt::Display for Portal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Portal {
    type Err = IdentityError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "frontend" => Ok(Self::Frontend),
            "admin-panel" | "admin_panel" => Ok(Self::AdminPanel),
            "partner-app" | "partner_app" => Ok(Self::PartnerApp),
            _ => Err(IdentityError::UnknownPortal(raw.to_string())),
        }
    }
}

/// Role allow-list per portal.
///
/// Construction enforces the partition: `user` is never admitted through
/// the admin panel, and only `admin` and `service_provider` are admitted
/// through the partner app.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PortalPolicy {
    frontend: Vec<Role>,
    admin_panel: Vec<Role>,
    partner_app: Vec<Role>,
}

impl PortalPolicy {
    pub fn new(
        frontend: Vec<Role>,
        admin_panel: Vec<Role>,
        partner_app: Vec<Role>,
    ) -> Result<Self, PortalPolicyError> {
        let policy = Self {
            frontend,
            admin_panel,
            partner_app,
        };

        for portal in Portal::ALL {
            for role in policy.allow_list(portal) {
                if !admissible(portal, *role) {
                    return Err(PortalPolicyError::ForbiddenAdmission {
                        portal,
                        role: *role,
                    });
                }
            }
        }

        Ok(policy)
    }

    pub fn standard() -> Self {
        Self {
            frontend: vec![Role::User],
            admin_panel: vec![Role::Admin],
            partner_app: vec![Role::ServiceProvider, Role::Admin],
        }
    }

    /// Builds the policy from configured role names, parsed strictly.
    pub fn from_config(config: &PortalConfig) -> Result<Self, PortalPolicyError> {
        Self::new(
            parse_roles(&config.frontend)?,
            parse_roles(&config.admin_panel)?,
            parse_roles(&config.partner_app)?,
        )
    }

    fn allow_list(&self, portal: Portal) -> &[Role] {
        match portal {
            Portal::Frontend => &self.frontend,
            Portal::AdminPanel => &self.admin_panel,
            Portal::PartnerApp => &self.partner_app,
        }
    }

    pub fn allows(&self, portal: Portal, role: Role) -> bool {
        self.allow_list(portal).contains(&role)
    }

    /// Admission predicate over raw header and role strings.
    ///
    /// An unrecognised or a missing portal is denied. The role goes through
    /// [`normalize_role`] first.
    pub fn is_role_allowed_for_portal(&self, portal: Option<&str>, role: Option<&str>) -> bool {
        match portal.map(str::parse::<Portal>) {
            Some(Ok(portal)) => self.allows(portal, normalize_role(role)),
            _ => false,
        }
    }
}

impl Default for PortalPolicy {
    fn default() -> Self {
        Self::standard()
    }
}

fn admissible(portal: Portal, role: Role) -> bool {
    match portal {
        Portal::Frontend => true,
        Portal::AdminPanel => role != Role::User,
        Portal::PartnerApp => matches!(role, Role::Admin | Role::ServiceProvider),
    }
}

fn parse_roles(names: &[String]) -> Result<Vec<Role>, IdentityError> {
    names.iter().map(|name| name.parse()).collect()
}
