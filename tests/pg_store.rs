//! Postgres store tests. Run with a database:
//! `DATABASE_URL=postgres://... cargo test --test pg_store -- --ignored`

use chrono::{NaiveDate, NaiveTime};
use handyhub_auth::Role;
use handyhub_db::{MarketplaceStore, PgStore, SLOT_TAKEN, StoreError};
use handyhub_models::{
    BookingScope, BookingStatus, NewBooking, NewService, NewUser, Service, StatusChange, User,
};
use sqlx::PgPool;
use uuid::Uuid;

async fn user(store: &PgStore, role: Role) -> User {
    store
        .create_user(NewUser {
            first_name: "Pg".to_string(),
            last_name: "Test".to_string(),
            email: format!("pg_{}@example.com", Uuid::new_v4().simple()),
            password_hash: "not-a-real-hash".to_string(),
            role,
        })
        .await
        .unwrap()
}

async fn service(store: &PgStore, provider: &User) -> Service {
    store
        .create_service(NewService {
            provider_id: provider.id,
            name: "Gutter cleaning".to_string(),
            description: None,
            price_cents: 8000,
        })
        .await
        .unwrap()
}

fn new_booking(customer: &User, service: &Service, hour: u32) -> NewBooking {
    NewBooking {
        user_id: customer.id,
        service_id: service.id,
        provider_id: service.provider_id,
        date: NaiveDate::from_ymd_opt(2026, 11, 2).unwrap(),
        time: NaiveTime::from_hms_opt(hour, 0, 0).unwrap(),
        address: "1 Test Lane".to_string(),
        special_instructions: None,
        price_cents: service.price_cents,
    }
}

#[sqlx::test(migrations = "./migrations")]
#[ignore]
async fn test_duplicate_email_conflicts(pool: PgPool) {
    let store = PgStore::new(pool);
    let existing = user(&store, Role::User).await;

    let err = store
        .create_user(NewUser {
            first_name: "Again".to_string(),
            last_name: "User".to_string(),
            email: existing.email.clone(),
            password_hash: "not-a-real-hash".to_string(),
            role: Role::User,
        })
        .await
        .unwrap_err();

    assert!(matches!(err, StoreError::Conflict(_)));
}

#[sqlx::test(migrations = "./migrations")]
#[ignore]
async fn test_slot_conflict_until_cancelled(pool: PgPool) {
    let store = PgStore::new(pool);
    let provider = user(&store, Role::ServiceProvider).await;
    let customer = user(&store, Role::User).await;
    let service = service(&store, &provider).await;

    let booking = store.create_booking(new_booking(&customer, &service, 9)).await.unwrap();
    assert_eq!(booking.status, BookingStatus::Upcoming);
    assert_eq!(booking.provider_id, provider.id);

    let err = store
        .create_booking(new_booking(&customer, &service, 9))
        .await
        .unwrap_err();
    assert!(matches!(err, StoreError::Conflict(ref reason) if reason == SLOT_TAKEN));

    store
        .transition_status(StatusChange {
            booking_id: booking.id,
            from: BookingStatus::Upcoming,
            to: BookingStatus::Cancelled,
        })
        .await
        .unwrap();

    store.create_booking(new_booking(&customer, &service, 9)).await.unwrap();
}

#[sqlx::test(migrations = "./migrations")]
#[ignore]
async fn test_transition_is_compare_and_swap(pool: PgPool) {
    let store = PgStore::new(pool);
    let provider = user(&store, Role::ServiceProvider).await;
    let customer = user(&store, Role::User).await;
    let service = service(&store, &provider).await;
    let booking = store.create_booking(new_booking(&customer, &service, 10)).await.unwrap();

    let completed = store
        .transition_status(StatusChange {
            booking_id: booking.id,
            from: BookingStatus::Upcoming,
            to: BookingStatus::Completed,
        })
        .await
        .unwrap();
    assert_eq!(completed.status, BookingStatus::Completed);
    assert!(completed.updated_at >= booking.updated_at);

    let err = store
        .transition_status(StatusChange {
            booking_id: booking.id,
            from: BookingStatus::Upcoming,
            to: BookingStatus::Cancelled,
        })
        .await
        .unwrap_err();
    assert!(matches!(err, StoreError::Conflict(_)));

    let current = store.get_booking(booking.id).await.unwrap();
    assert_eq!(current.status, BookingStatus::Completed);
}

#[sqlx::test(migrations = "./migrations")]
#[ignore]
async fn test_list_bookings_by_scope(pool: PgPool) {
    let store = PgStore::new(pool);
    let provider = user(&store, Role::ServiceProvider).await;
    let customer = user(&store, Role::User).await;
    let other = user(&store, Role::User).await;
    let service = service(&store, &provider).await;

    store.create_booking(new_booking(&customer, &service, 9)).await.unwrap();
    store.create_booking(new_booking(&other, &service, 11)).await.unwrap();

    assert_eq!(store.list_bookings(BookingScope::All).await.unwrap().len(), 2);
    assert_eq!(
        store
            .list_bookings(BookingScope::Customer(customer.id))
            .await
            .unwrap()
            .len(),
        1
    );
    assert_eq!(
        store
            .list_bookings(BookingScope::Provider(provider.id))
            .await
            .unwrap()
            .len(),
        2
    );
}
