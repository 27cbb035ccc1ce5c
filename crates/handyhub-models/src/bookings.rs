//! Bookings and their status.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use handyhub_auth::{AccessControl, Principal};
use handyhub_core::{AccessError, Capability};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;
use validator::Validate;

use crate::ids::{BookingId, ServiceId, UserId};

/// Status of a booking. Exactly one holds at a time.
///
/// `Upcoming` is the initial state; `Completed` and `Cancelled` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    Upcoming,
    Completed,
    Cancelled,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown booking status: {0}")]
pub struct UnknownStatus(pub String);

impl BookingStatus {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Upcoming => "upcoming",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }

    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Cancelled)
    }

    /// The status `action` leads to from `self`.
    ///
    /// Fails with [`AccessError::StateConflict`] from a terminal status.
    pub fn apply(self, action: BookingAction) -> Result<BookingStatus, AccessError> {
        match (self, action) {
            (Self::Upcoming, BookingAction::Complete) => Ok(Self::Completed),
            (Self::Upcoming, BookingAction::Cancel) => Ok(Self::Cancelled),
            (terminal, _) => Err(AccessError::StateConflict(format!(
                "Booking is already {terminal}"
            ))),
        }
    }
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BookingStatus {
    type Err = UnknownStatus;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw {
            "upcoming" => Ok(Self::Upcoming),
            "completed" => Ok(Self::Completed),
            "cancelled" => Ok(Self::Cancelled),
            other => Err(UnknownStatus(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BookingAction {
    Complete,
    Cancel,
}

impl BookingAction {
    /// The action that moves a booking into `target`. There is none for
    /// `Upcoming`: bookings are only ever created in that state.
    pub const fn for_target(target: BookingStatus) -> Option<Self> {
        match target {
            BookingStatus::Completed => Some(Self::Complete),
            BookingStatus::Cancelled => Some(Self::Cancel),
            BookingStatus::Upcoming => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct Booking {
    pub id: BookingId,
    /// The customer who booked.
    pub user_id: UserId,
    pub service_id: ServiceId,
    /// Owner of the booked service.
    pub provider_id: UserId,
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub address: String,
    pub special_instructions: Option<String>,
    pub price_cents: i64,
    pub status: BookingStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewBooking {
    pub user_id: UserId,
    pub service_id: ServiceId,
    pub provider_id: UserId,
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub address: String,
    pub special_instructions: Option<String>,
    pub price_cents: i64,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateBookingDto {
    pub service_id: ServiceId,
    #[schema(value_type = String, format = Date, example = "2026-11-02")]
    pub date: NaiveDate,
    #[schema(value_type = String, example = "14:30:00")]
    pub time: NaiveTime,
    #[validate(length(min = 1, max = 500, message = "Address must be between 1 and 500 characters"))]
    pub address: String,
    #[validate(length(max = 1000, message = "Special instructions must not exceed 1000 characters"))]
    pub special_instructions: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct UpdateBookingStatusDto {
    pub status: BookingStatus,
}

/// Which bookings a caller may see.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookingScope {
    All,
    /// Bookings made by this customer.
    Customer(UserId),
    /// Bookings against services owned by this provider.
    Provider(UserId),
}

impl BookingScope {
    pub fn for_principal(access: &AccessControl, actor: &Principal) -> Result<Self, AccessError> {
        let me = UserId::from_uuid(actor.user_id);

        if access.has_permission(actor.role, Capability::ViewAllBookings) {
            Ok(Self::All)
        } else if !access.has_permission(actor.role, Capability::ViewOwnBookings) {
            Err(AccessError::InsufficientPermission(Capability::ViewOwnBookings))
        } else if access.has_permission(actor.role, Capability::ManageOwnServices) {
            Ok(Self::Provider(me))
        } else {
            Ok(Self::Customer(me))
        }
    }

    pub fn includes(&self, booking: &Booking) -> bool {
        match self {
            Self::All => true,
            Self::Customer(user_id) => booking.user_id == *user_id,
            Self::Provider(provider_id) => booking.provider_id == *provider_id,
        }
    }
}
