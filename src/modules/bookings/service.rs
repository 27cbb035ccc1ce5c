use handyhub_core::{AccessError, AppError};
use handyhub_db::StoreError;
use handyhub_models::{
    Booking, BookingAction, BookingId, BookingScope, CreateBookingDto, NewBooking,
    UpdateBookingStatusDto, check_booking_creation, plan_transition,
};
use tracing::instrument;

use crate::middleware::auth::{AuthUser, log_access_denied};
use crate::state::AppState;

pub struct BookingService;

/// A store conflict on a booking means a competing write got there first.
fn conflict_as_state(err: StoreError) -> AppError {
    match err {
        StoreError::Conflict(reason) => AccessError::StateConflict(reason).into(),
        other => other.into(),
    }
}

impl BookingService {
    #[instrument(skip(state, auth_user, dto), fields(user_id = %auth_user.principal.user_id, service_id = %dto.service_id))]
    pub async fn create_booking(
        state: &AppState,
        auth_user: &AuthUser,
        dto: CreateBookingDto,
    ) -> Result<Booking, AppError> {
        let service = state.store.get_service(dto.service_id).await?;

        check_booking_creation(&state.access, &auth_user.principal, &service)
            .inspect_err(|err| log_access_denied(&auth_user.principal, err, "booking.create"))?;

        let booking = state
            .store
            .create_booking(NewBooking {
                user_id: auth_user.user_id(),
                service_id: service.id,
                provider_id: service.provider_id,
                date: dto.date,
                time: dto.time,
                address: dto.address.trim().to_string(),
                special_instructions: dto.special_instructions,
                price_cents: service.price_cents,
            })
            .await
            .map_err(conflict_as_state)?;

        tracing::info!(booking_id = %booking.id, provider_id = %booking.provider_id, "Booking created");
        Ok(booking)
    }

    #[instrument(skip(state, auth_user), fields(user_id = %auth_user.principal.user_id))]
    pub async fn list_bookings(
        state: &AppState,
        auth_user: &AuthUser,
    ) -> Result<Vec<Booking>, AppError> {
        let scope = BookingScope::for_principal(&state.access, &auth_user.principal)
            .inspect_err(|err| log_access_denied(&auth_user.principal, err, "booking.list"))?;

        Ok(state.store.list_bookings(scope).await?)
    }

    #[instrument(skip(state, auth_user), fields(user_id = %auth_user.principal.user_id))]
    pub async fn get_booking(
        state: &AppState,
        auth_user: &AuthUser,
        id: BookingId,
    ) -> Result<Booking, AppError> {
        let scope = BookingScope::for_principal(&state.access, &auth_user.principal)
            .inspect_err(|err| log_access_denied(&auth_user.principal, err, "booking.get"))?;

        let booking = state.store.get_booking(id).await?;

        if !scope.includes(&booking) {
            let err = AccessError::OwnershipViolation;
            log_access_denied(&auth_user.principal, &err, "booking.get");
            return Err(err.into());
        }

        Ok(booking)
    }

    /// Authorizes, checks the state machine, then writes with a
    /// compare-and-swap on the status that was read.
    #[instrument(skip(state, auth_user, dto), fields(user_id = %auth_user.principal.user_id, target = %dto.status))]
    pub async fn update_status(
        state: &AppState,
        auth_user: &AuthUser,
        id: BookingId,
        dto: UpdateBookingStatusDto,
    ) -> Result<Booking, AppError> {
        let action = BookingAction::for_target(dto.status).ok_or_else(|| {
            AppError::unprocessable("status must be either completed or cancelled")
        })?;

        let booking = state.store.get_booking(id).await?;

        let change = plan_transition(&state.access, &auth_user.principal, &booking, action)
            .inspect_err(|err| log_access_denied(&auth_user.principal, err, "booking.transition"))?;

        let updated = state
            .store
            .transition_status(change)
            .await
            .map_err(conflict_as_state)?;

        tracing::info!(
            booking_id = %updated.id,
            from = %change.from,
            to = %change.to,
            "Booking status changed"
        );
        Ok(updated)
    }
}
