use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use handyhub_core::AppError;
use handyhub_models::{LoginRequest, LoginResponse, MeResponse, RegisterRequest, User};
use tracing::instrument;
use utoipa::ToSchema;

use super::service::AuthService;
use crate::middleware::auth::AuthUser;
use crate::middleware::portal::PortalHeader;
use crate::state::AppState;
use crate::validator::ValidatedJson;

#[derive(ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

/// Register a new account through a portal
#[utoipa::path(
    post,
    path = "/api/auth/register",
    request_body = RegisterRequest,
    params(
        ("x-portal" = String, Header, description = "Client surface: frontend, admin-panel or partner-app")
    ),
    responses(
        (status = 201, description = "User registered successfully", body = User),
        (status = 400, description = "Malformed request body", body = ErrorResponse),
        (status = 403, description = "Role not allowed for this portal", body = ErrorResponse),
        (status = 409, description = "Email already registered", body = ErrorResponse),
        (status = 422, description = "Validation error", body = ErrorResponse)
    ),
    tag = "Authentication"
)]
#[instrument(skip(state, dto))]
pub async fn register_user(
    State(state): State<AppState>,
    portal: PortalHeader,
    ValidatedJson(dto): ValidatedJson<RegisterRequest>,
) -> Result<(StatusCode, Json<User>), AppError> {
    let user = AuthService::register_user(&state, portal.as_deref(), dto).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

/// Login and receive an access token with the role's permission set
#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginRequest,
    params(
        ("x-portal" = String, Header, description = "Client surface: frontend, admin-panel or partner-app")
    ),
    responses(
        (status = 200, description = "Login successful", body = LoginResponse),
        (status = 401, description = "Invalid credentials", body = ErrorResponse),
        (status = 403, description = "Role not allowed for this portal", body = ErrorResponse),
        (status = 422, description = "Validation error", body = ErrorResponse)
    ),
    tag = "Authentication"
)]
#[instrument(skip(state, dto))]
pub async fn login_user(
    State(state): State<AppState>,
    portal: PortalHeader,
    ValidatedJson(dto): ValidatedJson<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    let response = AuthService::login_user(&state, portal.as_deref(), dto).await?;
    Ok(Json(response))
}

/// Current caller, role and permission set
#[utoipa::path(
    get,
    path = "/api/auth/me",
    responses(
        (status = 200, description = "Caller profile", body = MeResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Authentication"
)]
#[instrument(skip(state))]
pub async fn get_me(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> Result<Json<MeResponse>, AppError> {
    let response = AuthService::me(&state, &auth_user).await?;
    Ok(Json(response))
}
