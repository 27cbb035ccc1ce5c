use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use handyhub_core::AppError;
use handyhub_models::{CreateServiceDto, Service, ServiceId, UpdateAvailabilityDto};
use tracing::instrument;

use super::service::CatalogService;
use crate::middleware::auth::{AuthUser, RequireBrowseServices};
use crate::modules::auth::controller::ErrorResponse;
use crate::state::AppState;
use crate::validator::ValidatedJson;

/// List bookable services
#[utoipa::path(
    get,
    path = "/api/services",
    responses(
        (status = 200, description = "Services", body = Vec<Service>),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Missing canBrowseServices", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Services"
)]
#[instrument(skip(state))]
pub async fn list_services(
    State(state): State<AppState>,
    RequireBrowseServices(auth_user): RequireBrowseServices,
) -> Result<Json<Vec<Service>>, AppError> {
    let services = CatalogService::list_services(&state, &auth_user).await?;
    Ok(Json(services))
}

/// Create a service
///
/// Providers create services they own. Administrators create services on
/// behalf of a provider by naming `provider_id`.
#[utoipa::path(
    post,
    path = "/api/services",
    request_body = CreateServiceDto,
    responses(
        (status = 201, description = "Service created", body = Service),
        (status = 403, description = "Not allowed to manage services", body = ErrorResponse),
        (status = 404, description = "Provider not found", body = ErrorResponse),
        (status = 422, description = "Validation error", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Services"
)]
#[instrument(skip(state, dto))]
pub async fn create_service(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ValidatedJson(dto): ValidatedJson<CreateServiceDto>,
) -> Result<(StatusCode, Json<Service>), AppError> {
    let service = CatalogService::create_service(&state, &auth_user, dto).await?;
    Ok((StatusCode::CREATED, Json(service)))
}

/// Toggle whether a service can be booked
#[utoipa::path(
    patch,
    path = "/api/services/{id}/availability",
    params(("id" = ServiceId, Path, description = "Service ID")),
    request_body = UpdateAvailabilityDto,
    responses(
        (status = 200, description = "Service updated", body = Service),
        (status = 403, description = "Not the owner", body = ErrorResponse),
        (status = 404, description = "Service not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Services"
)]
#[instrument(skip(state, dto))]
pub async fn update_availability(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<ServiceId>,
    ValidatedJson(dto): ValidatedJson<UpdateAvailabilityDto>,
) -> Result<Json<Service>, AppError> {
    let service = CatalogService::update_availability(&state, &auth_user, id, dto).await?;
    Ok(Json(service))
}
