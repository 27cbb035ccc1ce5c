use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use handyhub_core::AppError;
use handyhub_models::{Booking, BookingId, CreateBookingDto, UpdateBookingStatusDto};
use tracing::instrument;

use super::service::BookingService;
use crate::middleware::auth::{AuthUser, RequireBookServices};
use crate::modules::auth::controller::ErrorResponse;
use crate::state::AppState;
use crate::validator::ValidatedJson;

/// Book a service
#[utoipa::path(
    post,
    path = "/api/bookings",
    request_body = CreateBookingDto,
    responses(
        (status = 201, description = "Booking created as upcoming", body = Booking),
        (status = 403, description = "Missing canBookServices", body = ErrorResponse),
        (status = 404, description = "Service not found", body = ErrorResponse),
        (status = 409, description = "Service unavailable or slot taken", body = ErrorResponse),
        (status = 422, description = "Validation error", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Bookings"
)]
#[instrument(skip(state, dto))]
pub async fn create_booking(
    State(state): State<AppState>,
    RequireBookServices(auth_user): RequireBookServices,
    ValidatedJson(dto): ValidatedJson<CreateBookingDto>,
) -> Result<(StatusCode, Json<Booking>), AppError> {
    let booking = BookingService::create_booking(&state, &auth_user, dto).await?;
    Ok((StatusCode::CREATED, Json(booking)))
}

/// List the bookings visible to the caller
#[utoipa::path(
    get,
    path = "/api/bookings",
    responses(
        (status = 200, description = "Bookings", body = Vec<Booking>),
        (status = 403, description = "No booking visibility", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Bookings"
)]
#[instrument(skip(state))]
pub async fn list_bookings(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> Result<Json<Vec<Booking>>, AppError> {
    let bookings = BookingService::list_bookings(&state, &auth_user).await?;
    Ok(Json(bookings))
}

/// Get one booking
#[utoipa::path(
    get,
    path = "/api/bookings/{id}",
    params(("id" = BookingId, Path, description = "Booking ID")),
    responses(
        (status = 200, description = "Booking", body = Booking),
        (status = 403, description = "Not your booking", body = ErrorResponse),
        (status = 404, description = "Booking not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Bookings"
)]
#[instrument(skip(state))]
pub async fn get_booking(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<BookingId>,
) -> Result<Json<Booking>, AppError> {
    let booking = BookingService::get_booking(&state, &auth_user, id).await?;
    Ok(Json(booking))
}

/// Complete or cancel a booking
#[utoipa::path(
    patch,
    path = "/api/bookings/{id}/status",
    params(("id" = BookingId, Path, description = "Booking ID")),
    request_body = UpdateBookingStatusDto,
    responses(
        (status = 200, description = "Status changed", body = Booking),
        (status = 403, description = "Missing capability or not the owner", body = ErrorResponse),
        (status = 404, description = "Booking not found", body = ErrorResponse),
        (status = 409, description = "Booking already completed or cancelled", body = ErrorResponse),
        (status = 422, description = "Unsupported target status", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Bookings"
)]
#[instrument(skip(state, dto))]
pub async fn update_booking_status(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<BookingId>,
    ValidatedJson(dto): ValidatedJson<UpdateBookingStatusDto>,
) -> Result<Json<Booking>, AppError> {
    let booking = BookingService::update_status(&state, &auth_user, id, dto).await?;
    Ok(Json(booking))
}
