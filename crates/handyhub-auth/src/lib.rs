//! # HandyHub Auth
//!
//! Who may do what, and through which client surface.
//!
//! - [`roles`]: The [`Role`] identity and boundary normalization
//! - [`policy`]: The immutable role to [`PermissionSet`](handyhub_core::PermissionSet) table
//! - [`portal`]: [`Portal`] parsing and the admission predicate
//! - [`access`]: [`AccessControl`], the single authorization gate, and [`Principal`]
//! - [`claims`] / [`jwt`]: Access token structure, creation and verification
//!
//! # Example
//!
//! ```ignore
//! use handyhub_auth::{AccessControl, Principal, Role, normalize_role};
//! use handyhub_core::Capability;
//!
//! let access = AccessControl::standard();
//! let role = normalize_role(Some("Partner"));
//! assert_eq!(role, Role::ServiceProvider);
//! assert!(access.has_permission(role, Capability::ManageOwnServices));
//! assert!(access.is_role_allowed_for_portal(Some("partner-app"), Some("partner")));
//! ```

pub mod access;
pub mod claims;
pub mod error;
pub mod jwt;
pub mod policy;
pub mod portal;
pub mod roles;

pub use access::{AccessControl, Principal};
pub use claims::Claims;
pub use error::{IdentityError, PortalPolicyError};
pub use jwt::{create_access_token, verify_token};
pub use policy::RolePermissions;
pub use portal::{Portal, PortalPolicy};
pub use roles::{Role, normalize_role};
