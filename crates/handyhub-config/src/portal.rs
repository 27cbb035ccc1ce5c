//! Portal allow-list configuration.
//!
//! Each client surface has a comma separated list of role names that may
//! authenticate through it. The lists are raw strings here; the auth crate
//! parses and checks them when it builds its portal policy, and refuses to
//! start on a list that names an unknown role.
//!
//! # Environment Variables
//!
//! - `PORTAL_FRONTEND_ROLES` (default: `user`)
//! - `PORTAL_ADMIN_PANEL_ROLES` (default: `admin`)
//! - `PORTAL_PARTNER_APP_ROLES` (default: `service_provider,admin`)

use std::env;

use crate::split_list;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PortalConfig {
    pub frontend: Vec<String>,
    pub admin_panel: Vec<String>,
    pub partner_app: Vec<String>,
}

impl Default for PortalConfig {
    fn default() -> Self {
        Self {
            frontend: vec!["user".to_string()],
            admin_panel: vec!["admin".to_string()],
            partner_app: vec!["service_provider".to_string(), "admin".to_string()],
        }
    }
}

impl PortalConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            frontend: list_from_env("PORTAL_FRONTEND_ROLES").unwrap_or(defaults.frontend),
            admin_panel: list_from_env("PORTAL_ADMIN_PANEL_ROLES").unwrap_or(defaults.admin_panel),
            partner_app: list_from_env("PORTAL_PARTNER_APP_ROLES").unwrap_or(defaults.partner_app),
        }
    }
}

fn list_from_env(key: &str) -> Option<Vec<String>> {
    env::var(key).ok().map(|raw| split_list(&raw))
}
