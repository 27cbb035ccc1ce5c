//! Request extractors.
//!
//! - [`auth`]: Bearer token validation and capability-gated extractors
//! - [`portal`]: The `x-portal` header naming the client surface
//!
//! # Example
//!
//! ```ignore
//! use crate::middleware::auth::{AuthUser, RequireBookServices};
//!
//! // Any valid token
//! async fn me(auth_user: AuthUser) -> impl IntoResponse { /* ... */ }
//!
//! // Only roles holding canBookServices
//! async fn book(RequireBookServices(auth_user): RequireBookServices) -> impl IntoResponse {
//!     /* ... */
//! }
//! ```

pub mod auth;
pub mod portal;
