//! Services offered by providers.
//!
//! A service's `provider_id` is the owning partner account. It decides who
//! may manage the service and, through bookings, who may complete or cancel
//! work booked against it.

use chrono::{DateTime, Utc};
use handyhub_auth::{AccessControl, Principal};
use handyhub_core::{AccessError, AppError, Capability};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::ids::{ServiceId, UserId};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct Service {
    pub id: ServiceId,
    pub provider_id: UserId,
    pub name: String,
    pub description: Option<String>,
    pub price_cents: i64,
    pub is_available: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewService {
    pub provider_id: UserId,
    pub name: String,
    pub description: Option<String>,
    pub price_cents: i64,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateServiceDto {
    #[validate(length(min = 1, max = 200, message = "Name must be between 1 and 200 characters"))]
    pub name: String,
    #[validate(length(max = 2000, message = "Description must not exceed 2000 characters"))]
    pub description: Option<String>,
    #[validate(range(min = 0, message = "Price must not be negative"))]
    pub price_cents: i64,
    /// Owning provider. Only callers who manage all services may set this to
    /// someone other than themselves.
    pub provider_id: Option<UserId>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct UpdateAvailabilityDto {
    pub is_available: bool,
}

/// Decides which account will own a new service.
///
/// Creating on behalf of another account needs `canManageAllServices`.
/// Creating for oneself needs `canManageOwnServices`. A caller that manages
/// all services but owns none must name the provider.
pub fn resolve_service_owner(
    access: &AccessControl,
    actor: &Principal,
    requested: Option<UserId>,
) -> Result<UserId, AppError> {
    let me = UserId::from_uuid(actor.user_id);

    match requested {
        Some(provider) if provider != me => {
            access.require(actor, Capability::ManageAllServices)?;
            Ok(provider)
        }
        _ if access.has_permission(actor.role, Capability::ManageOwnServices) => Ok(me),
        _ if access.has_permission(actor.role, Capability::ManageAllServices) => Err(
            AppError::unprocessable("provider_id is required when creating a service for a provider"),
        ),
        _ => Err(AccessError::InsufficientPermission(Capability::ManageOwnServices).into()),
    }
}

/// Gate for changing an existing service.
pub fn authorize_service_management(
    access: &AccessControl,
    actor: &Principal,
    service: &Service,
) -> Result<(), AccessError> {
    access.authorize_owned(
        actor,
        Capability::ManageAllServices,
        &[(Capability::ManageOwnServices, service.provider_id.into_inner())],
    )
}
