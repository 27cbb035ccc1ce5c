//! The storage seam.
//!
//! Handlers talk to a `dyn MarketplaceStore` held in application state. Both
//! backends give the same guarantees for the two operations that race:
//! booking creation never hands out a provider slot twice, and
//! [`MarketplaceStore::transition_status`] only writes when the stored status
//! still equals the expected one.

use async_trait::async_trait;
use handyhub_core::AppError;
use handyhub_models::{
    Booking, BookingId, BookingScope, NewBooking, NewService, NewUser, Service, ServiceId,
    StatusChange, User, UserCredentials, UserId,
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("{0} not found")]
    NotFound(String),
    #[error("{0}")]
    Conflict(String),
    #[error(transparent)]
    Database(#[from] sqlx::Error),
    #[error(transparent)]
    Migrate(#[from] sqlx::migrate::MigrateError),
    #[error(transparent)]
    Unexpected(#[from] anyhow::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(what) => AppError::not_found(format!("{what} not found")),
            StoreError::Conflict(reason) => AppError::conflict(reason),
            StoreError::Database(err) => AppError::internal(err),
            StoreError::Migrate(err) => AppError::internal(err),
            StoreError::Unexpected(err) => AppError::internal(err),
        }
    }
}

pub const SLOT_TAKEN: &str = "Requested time slot is not available";

#[async_trait]
pub trait MarketplaceStore: Send + Sync {
    /// Fails with [`StoreError::Conflict`] when the email is taken.
    async fn create_user(&self, user: NewUser) -> StoreResult<User>;
    async fn find_credentials_by_email(&self, email: &str) -> StoreResult<Option<UserCredentials>>;
    async fn get_user(&self, id: UserId) -> StoreResult<User>;

    async fn create_service(&self, service: NewService) -> StoreResult<Service>;
    async fn get_service(&self, id: ServiceId) -> StoreResult<Service>;
    async fn list_services(&self, only_available: bool) -> StoreResult<Vec<Service>>;
    async fn set_service_availability(
        &self,
        id: ServiceId,
        is_available: bool,
    ) -> StoreResult<Service>;

    /// Inserts an `upcoming` booking.
    ///
    /// Fails with [`StoreError::Conflict`] ([`SLOT_TAKEN`]) when the provider
    /// already has an upcoming booking at the same date and time.
    async fn create_booking(&self, booking: NewBooking) -> StoreResult<Booking>;
    async fn get_booking(&self, id: BookingId) -> StoreResult<Booking>;
    async fn list_bookings(&self, scope: BookingScope) -> StoreResult<Vec<Booking>>;

    /// Compare-and-swap on booking status.
    ///
    /// Writes `change.to` and a fresh `updated_at` only if the stored status
    /// is still `change.from`. Otherwise fails with [`StoreError::Conflict`]
    /// and leaves the row untouched.
    async fn transition_status(&self, change: StatusChange) -> StoreResult<Booking>;

    async fn health_check(&self) -> StoreResult<()>;
    fn backend_name(&self) -> &'static str;
}

pub(crate) fn lost_race(booking_id: BookingId) -> StoreError {
    StoreError::Conflict(format!(
        "Booking {booking_id} was modified concurrently; status unchanged"
    ))
}
