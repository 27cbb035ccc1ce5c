//! In-memory implementation of [`MarketplaceStore`].
//!
//! All state lives behind a single `tokio::sync::RwLock`, so every mutation
//! that checks and then writes (slot availability, status compare-and-swap)
//! does both under one write guard. Not durable: state is lost on restart.
//! Used for local development and by the integration tests.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use handyhub_models::{
    Booking, BookingId, BookingScope, BookingStatus, NewBooking, NewService, NewUser, Service,
    ServiceId, StatusChange, User, UserCredentials, UserId,
};
use tokio::sync::RwLock;

use crate::store::{MarketplaceStore, SLOT_TAKEN, StoreError, StoreResult, lost_race};

#[derive(Default)]
struct State {
    users: HashMap<UserId, UserCredentials>,
    services: HashMap<ServiceId, Service>,
    bookings: HashMap<BookingId, Booking>,
}

#[derive(Clone, Default)]
pub struct InMemoryStore {
    state: Arc<RwLock<State>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl MarketplaceStore for InMemoryStore {
    async fn create_user(&self, user: NewUser) -> StoreResult<User> {
        let mut state = self.state.write().await;

        if state.users.values().any(|c| c.user.email == user.email) {
            return Err(StoreError::Conflict("Email already registered".into()));
        }

        let created = User {
            id: UserId::new(),
            first_name: user.first_name,
            last_name: user.last_name,
            email: user.email,
            role: user.role,
            created_at: Utc::now(),
        };
        state.users.insert(
            created.id,
            UserCredentials {
                user: created.clone(),
                password_hash: user.password_hash,
            },
        );
        Ok(created)
    }

    async fn find_credentials_by_email(&self, email: &str) -> StoreResult<Option<UserCredentials>> {
        let state = self.state.read().await;
        Ok(state.users.values().find(|c| c.user.email == email).cloned())
    }

    async fn get_user(&self, id: UserId) -> StoreResult<User> {
        let state = self.state.read().await;
        state
            .users
            .get(&id)
            .map(|c| c.user.clone())
            .ok_or_else(|| StoreError::NotFound("User".into()))
    }

    async fn create_service(&self, service: NewService) -> StoreResult<Service> {
        let mut state = self.state.write().await;

        if !state.users.contains_key(&service.provider_id) {
            return Err(StoreError::NotFound("Provider".into()));
        }

        let now = Utc::now();
        let created = Service {
            id: ServiceId::new(),
            provider_id: service.provider_id,
            name: service.name,
            description: service.description,
            price_cents: service.price_cents,
            is_available: true,
            created_at: now,
            updated_at: now,
        };
        state.services.insert(created.id, created.clone());
        Ok(created)
    }

    async fn get_service(&self, id: ServiceId) -> StoreResult<Service> {
        let state = self.state.read().await;
        state
            .services
            .get(&id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound("Service".into()))
    }

    async fn list_services(&self, only_available: bool) -> StoreResult<Vec<Service>> {
        let state = self.state.read().await;
        let mut services: Vec<Service> = state
            .services
            .values()
            .filter(|s| !only_available || s.is_available)
            .cloned()
            .collect();
        services.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.name.cmp(&b.name)));
        Ok(services)
    }

    async fn set_service_availability(
        &self,
        id: ServiceId,
        is_available: bool,
    ) -> StoreResult<Service> {
        let mut state = self.state.write().await;
        let service = state
            .services
            .get_mut(&id)
            .ok_or_else(|| StoreError::NotFound("Service".into()))?;
        service.is_available = is_available;
        service.updated_at = Utc::now();
        Ok(service.clone())
    }

    async fn create_booking(&self, booking: NewBooking) -> StoreResult<Booking> {
        let mut state = self.state.write().await;

        if !state.services.contains_key(&booking.service_id) {
            return Err(StoreError::NotFound("Service".into()));
        }

        let taken = state.bookings.values().any(|b| {
            b.provider_id == booking.provider_id
                && b.date == booking.date
                && b.time == booking.time
                && b.status == BookingStatus::Upcoming
        });
        if taken {
            return Err(StoreError::Conflict(SLOT_TAKEN.into()));
        }

        let now = Utc::now();
        let created = Booking {
            id: BookingId::new(),
            user_id: booking.user_id,
            service_id: booking.service_id,
            provider_id: booking.provider_id,
            date: booking.date,
            time: booking.time,
            address: booking.address,
            special_instructions: booking.special_instructions,
            price_cents: booking.price_cents,
            status: BookingStatus::Upcoming,
            created_at: now,
            updated_at: now,
        };
        state.bookings.insert(created.id, created.clone());
        Ok(created)
    }

    async fn get_booking(&self, id: BookingId) -> StoreResult<Booking> {
        let state = self.state.read().await;
        state
            .bookings
            .get(&id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound("Booking".into()))
    }

    async fn list_bookings(&self, scope: BookingScope) -> StoreResult<Vec<Booking>> {
        let state = self.state.read().await;
        let mut bookings: Vec<Booking> = state
            .bookings
            .values()
            .filter(|b| scope.includes(b))
            .cloned()
            .collect();
        bookings.sort_by(|a, b| {
            (a.date, a.time, a.created_at).cmp(&(b.date, b.time, b.created_at))
        });
        Ok(bookings)
    }

    async fn transition_status(&self, change: StatusChange) -> StoreResult<Booking> {
        let mut state = self.state.write().await;
        let booking = state
            .bookings
            .get_mut(&change.booking_id)
            .ok_or_else(|| StoreError::NotFound("Booking".into()))?;

        if booking.status != change.from {
            return Err(lost_race(change.booking_id));
        }

        booking.status = change.to;
        booking.updated_at = Utc::now();
        Ok(booking.clone())
    }

    async fn health_check(&self) -> StoreResult<()> {
        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}
