//! Booking lifecycle rules.
//!
//! Every transition is decided here in the same order: who the caller is,
//! what they may do, whether they own the booking, and only then whether the
//! booking's current status permits the move. The storage layer applies the
//! resulting [`StatusChange`] as a compare-and-swap on `from`.

use handyhub_auth::{AccessControl, Principal};
use handyhub_core::{AccessError, Capability};

use crate::bookings::{Booking, BookingAction, BookingStatus};
use crate::ids::BookingId;
use crate::services::Service;

/// A transition that passed every check and awaits the conditional write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusChange {
    pub booking_id: BookingId,
    pub from: BookingStatus,
    pub to: BookingStatus,
}

/// Authorization for `action` on `booking`, independent of its status.
///
/// Completing is provider work: the owning provider or anyone managing all
/// services. Cancelling additionally admits the customer who booked.
pub fn authorize_transition(
    access: &AccessControl,
    actor: &Principal,
    booking: &Booking,
    action: BookingAction,
) -> Result<(), AccessError> {
    let provider = (Capability::ManageOwnServices, booking.provider_id.into_inner());

    match action {
        BookingAction::Complete => {
            access.authorize_owned(actor, Capability::ManageAllServices, &[provider])
        }
        BookingAction::Cancel => access.authorize_owned(
            actor,
            Capability::ManageAllServices,
            &[provider, (Capability::BookServices, booking.user_id.into_inner())],
        ),
    }
}

pub fn plan_transition(
    access: &AccessControl,
    actor: &Principal,
    booking: &Booking,
    action: BookingAction,
) -> Result<StatusChange, AccessError> {
    authorize_transition(access, actor, booking, action)?;
    let to = booking.status.apply(action)?;

    Ok(StatusChange {
        booking_id: booking.id,
        from: booking.status,
        to,
    })
}

/// Preconditions for booking `service` that do not need the slot table.
pub fn check_booking_creation(
    access: &AccessControl,
    actor: &Principal,
    service: &Service,
) -> Result<(), AccessError> {
    access.require(actor, Capability::BookServices)?;

    if !service.is_available {
        return Err(AccessError::StateConflict(
            "Service is not available for booking".to_string(),
        ));
    }

    Ok(())
}
