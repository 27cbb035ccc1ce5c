//! Authentication DTOs.
//!
//! Registration and login travel with an `x-portal` header naming the client
//! surface; it is read by the controller, not part of these bodies.

use handyhub_auth::Role;
use handyhub_core::PermissionSet;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::ids::UserId;
use crate::users::User;

/// Registration body.
///
/// `role` is taken as an untrusted string and normalized by the service; an
/// absent or unrecognised role registers a customer.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct RegisterRequest {
    #[validate(length(min = 1, max = 100, message = "First name is required"))]
    pub first_name: String,
    #[validate(length(min = 1, max = 100, message = "Last name is required"))]
    pub last_name: String,
    #[validate(email(message = "Email must be a valid email address"))]
    pub email: String,
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    #[schema(example = "password123")]
    pub password: String,
    #[schema(example = "service_provider")]
    pub role: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1))]
    #[schema(example = "password123")]
    pub password: String,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct LoginResponse {
    pub access_token: String,
    pub user: User,
    pub permissions: PermissionSet,
}

/// What the client apps need to decide which screens to render.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct MeResponse {
    pub user_id: UserId,
    pub email: String,
    pub role: Role,
    pub role_display_name: String,
    pub permissions: PermissionSet,
}
