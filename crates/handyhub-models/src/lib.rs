//! # HandyHub Models
//!
//! Domain models, DTOs and the booking lifecycle for the HandyHub API.
//!
//! # Modules
//!
//! - [`ids`]: Typed entity identifiers
//! - [`users`]: Accounts
//! - [`auth`]: Registration and login DTOs
//! - [`services`]: Services offered by providers, and who may manage them
//! - [`bookings`]: Bookings, statuses and booking visibility
//! - [`lifecycle`]: Authorization and transition rules for booking status changes

pub mod auth;
pub mod bookings;
pub mod ids;
pub mod lifecycle;
pub mod services;
pub mod users;

pub use auth::{LoginRequest, LoginResponse, MeResponse, RegisterRequest};
pub use bookings::{
    Booking, BookingAction, BookingScope, BookingStatus, CreateBookingDto, NewBooking,
    UnknownStatus, UpdateBookingStatusDto,
};
pub use ids::{BookingId, ServiceId, UserId};
pub use lifecycle::{StatusChange, authorize_transition, check_booking_creation, plan_transition};
pub use services::{
    CreateServiceDto, NewService, Service, UpdateAvailabilityDto, authorize_service_management,
    resolve_service_owner,
};
pub use users::{NewUser, User, UserCredentials};
