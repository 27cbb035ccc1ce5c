//! # HandyHub Core
//!
//! Core types, errors, and utilities for the HandyHub API.
//!
//! This crate provides foundational types used throughout the marketplace:
//!
//! - [`errors`]: Application and access-control error types with HTTP response conversion
//! - [`permissions`]: The capability vocabulary and the per-role [`PermissionSet`] record
//! - [`password`]: Secure password hashing and verification
//!
//! # Example
//!
//! ```ignore
//! use handyhub_core::errors::{AccessError, AppError};
//! use handyhub_core::permissions::Capability;
//!
//! let denied: AppError = AccessError::InsufficientPermission(Capability::BookServices).into();
//! let hash = handyhub_core::hash_password("secure_password")?;
//! ```

pub mod errors;
pub mod password;
pub mod permissions;

// Re-export commonly used types at crate root
pub use errors::{AccessError, AppError};
pub use password::{hash_password, verify_password};
pub use permissions::{Capability, PermissionSet};
