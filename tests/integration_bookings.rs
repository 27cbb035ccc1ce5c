mod common;

use axum::http::StatusCode;
use common::{TestApp, TestUser, json_request, seed_service, seed_user, send, setup_test_app};
use handyhub_auth::Role;
use handyhub_models::{Service, ServiceId};
use serde_json::{Value, json};
use tower::ServiceExt;

fn booking_body(service_id: ServiceId, date: &str, time: &str) -> Value {
    json!({
        "service_id": service_id,
        "date": date,
        "time": time,
        "address": "12 Harbour Street",
        "special_instructions": "Ring the side door"
    })
}

async fn book(app: &TestApp, customer: &TestUser, service: &Service, time: &str) -> (StatusCode, Value) {
    send(
        app,
        json_request(
            "POST",
            "/api/bookings",
            Some(&customer.token),
            None,
            Some(booking_body(service.id, "2026-11-02", time)),
        ),
    )
    .await
}

async fn set_status(app: &TestApp, actor: &TestUser, booking_id: &str, status: &str) -> (StatusCode, Value) {
    send(
        app,
        json_request(
            "PATCH",
            &format!("/api/bookings/{booking_id}/status"),
            Some(&actor.token),
            None,
            Some(json!({ "status": status })),
        ),
    )
    .await
}

fn id_of(body: &Value) -> String {
    body["id"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn test_booking_lifecycle_complete_then_cancel_conflicts() {
    let app = setup_test_app();
    let provider = seed_user(&app, Role::ServiceProvider).await;
    let customer = seed_user(&app, Role::User).await;
    let service = seed_service(&app, &provider, 12_500).await;

    let (status, body) = book(&app, &customer, &service, "10:00:00").await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["status"], "upcoming");
    assert_eq!(body["price_cents"], 12_500);
    assert_eq!(body["user_id"], customer.user.id.to_string());
    assert_eq!(body["provider_id"], provider.user.id.to_string());
    let booking_id = id_of(&body);

    let (status, body) = set_status(&app, &provider, &booking_id, "completed").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "completed");

    let (status, body) = set_status(&app, &customer, &booking_id, "cancelled").await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "Booking is already completed");

    let (status, body) = send(
        &app,
        json_request(
            "GET",
            &format!("/api/bookings/{booking_id}"),
            Some(&customer.token),
            None,
            None,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "completed");
}

#[tokio::test]
async fn test_other_provider_cannot_complete() {
    let app = setup_test_app();
    let provider = seed_user(&app, Role::ServiceProvider).await;
    let other = seed_user(&app, Role::ServiceProvider).await;
    let customer = seed_user(&app, Role::User).await;
    let service = seed_service(&app, &provider, 5000).await;

    let (_, body) = book(&app, &customer, &service, "09:00:00").await;
    let booking_id = id_of(&body);

    let (status, body) = set_status(&app, &other, &booking_id, "completed").await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"], "Access denied. You do not own this resource");
}

#[tokio::test]
async fn test_customer_cannot_complete_their_booking() {
    let app = setup_test_app();
    let provider = seed_user(&app, Role::ServiceProvider).await;
    let customer = seed_user(&app, Role::User).await;
    let service = seed_service(&app, &provider, 5000).await;

    let (_, body) = book(&app, &customer, &service, "09:00:00").await;

    let (status, body) = set_status(&app, &customer, &id_of(&body), "completed").await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(
        body["error"],
        "Access denied. Missing required permission: canManageOwnServices"
    );
}

#[tokio::test]
async fn test_customer_cannot_cancel_someone_elses_booking() {
    let app = setup_test_app();
    let provider = seed_user(&app, Role::ServiceProvider).await;
    let customer = seed_user(&app, Role::User).await;
    let stranger = seed_user(&app, Role::User).await;
    let service = seed_service(&app, &provider, 5000).await;

    let (_, body) = book(&app, &customer, &service, "09:00:00").await;
    let booking_id = id_of(&body);

    let (status, _) = set_status(&app, &stranger, &booking_id, "cancelled").await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = set_status(&app, &customer, &booking_id, "cancelled").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "cancelled");
}

#[tokio::test]
async fn test_admin_may_cancel_any_booking() {
    let app = setup_test_app();
    let provider = seed_user(&app, Role::ServiceProvider).await;
    let customer = seed_user(&app, Role::User).await;
    let admin = seed_user(&app, Role::Admin).await;
    let service = seed_service(&app, &provider, 5000).await;

    let (_, body) = book(&app, &customer, &service, "09:00:00").await;

    let (status, body) = set_status(&app, &admin, &id_of(&body), "cancelled").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "cancelled");
}

#[tokio::test]
async fn test_providers_and_admins_cannot_book() {
    let app = setup_test_app();
    let provider = seed_user(&app, Role::ServiceProvider).await;
    let admin = seed_user(&app, Role::Admin).await;
    let service = seed_service(&app, &provider, 5000).await;

    for actor in [&provider, &admin] {
        let (status, body) = book(&app, actor, &service, "09:00:00").await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(
            body["error"],
            "Access denied. Missing required permission: canBookServices"
        );
    }
}

#[tokio::test]
async fn test_unavailable_service_cannot_be_booked() {
    let app = setup_test_app();
    let provider = seed_user(&app, Role::ServiceProvider).await;
    let customer = seed_user(&app, Role::User).await;
    let service = seed_service(&app, &provider, 5000).await;

    send(
        &app,
        json_request(
            "PATCH",
            &format!("/api/services/{}/availability", service.id),
            Some(&provider.token),
            None,
            Some(json!({ "is_available": false })),
        ),
    )
    .await;

    let (status, body) = book(&app, &customer, &service, "09:00:00").await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "Service is not available for booking");
}

#[tokio::test]
async fn test_unknown_service_is_not_found() {
    let app = setup_test_app();
    let customer = seed_user(&app, Role::User).await;

    let (status, _) = send(
        &app,
        json_request(
            "POST",
            "/api/bookings",
            Some(&customer.token),
            None,
            Some(booking_body(
                ServiceId::from_uuid(uuid::Uuid::new_v4()),
                "2026-11-02",
                "09:00:00",
            )),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_slot_is_exclusive_until_cancelled() {
    let app = setup_test_app();
    let provider = seed_user(&app, Role::ServiceProvider).await;
    let first = seed_user(&app, Role::User).await;
    let second = seed_user(&app, Role::User).await;
    let service = seed_service(&app, &provider, 5000).await;

    let (status, body) = book(&app, &first, &service, "15:30:00").await;
    assert_eq!(status, StatusCode::CREATED);
    let booking_id = id_of(&body);

    let (status, body) = book(&app, &second, &service, "15:30:00").await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "Requested time slot is not available");

    let (status, _) = book(&app, &second, &service, "16:30:00").await;
    assert_eq!(status, StatusCode::CREATED);

    set_status(&app, &first, &booking_id, "cancelled").await;

    let (status, _) = book(&app, &second, &service, "15:30:00").await;
    assert_eq!(status, StatusCode::CREATED);
}

#[tokio::test]
async fn test_booking_validation() {
    let app = setup_test_app();
    let provider = seed_user(&app, Role::ServiceProvider).await;
    let customer = seed_user(&app, Role::User).await;
    let service = seed_service(&app, &provider, 5000).await;

    let mut body = booking_body(service.id, "2026-11-02", "09:00:00");
    body["address"] = json!("");
    let (status, _) = send(
        &app,
        json_request("POST", "/api/bookings", Some(&customer.token), None, Some(body)),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let (status, _) = send(
        &app,
        json_request(
            "POST",
            "/api/bookings",
            Some(&customer.token),
            None,
            Some(booking_body(service.id, "not-a-date", "09:00:00")),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_get_booking_respects_visibility() {
    let app = setup_test_app();
    let provider = seed_user(&app, Role::ServiceProvider).await;
    let other_provider = seed_user(&app, Role::ServiceProvider).await;
    let customer = seed_user(&app, Role::User).await;
    let stranger = seed_user(&app, Role::User).await;
    let admin = seed_user(&app, Role::Admin).await;
    let service = seed_service(&app, &provider, 5000).await;

    let (_, body) = book(&app, &customer, &service, "09:00:00").await;
    let uri = format!("/api/bookings/{}", id_of(&body));

    for (actor, expected) in [
        (&customer, StatusCode::OK),
        (&provider, StatusCode::OK),
        (&admin, StatusCode::OK),
        (&stranger, StatusCode::FORBIDDEN),
        (&other_provider, StatusCode::FORBIDDEN),
    ] {
        let (status, _) = send(&app, json_request("GET", &uri, Some(&actor.token), None, None)).await;
        assert_eq!(status, expected, "{}", actor.user.email);
    }
}

#[tokio::test]
async fn test_list_bookings_is_scoped() {
    let app = setup_test_app();
    let provider_a = seed_user(&app, Role::ServiceProvider).await;
    let provider_b = seed_user(&app, Role::ServiceProvider).await;
    let customer_a = seed_user(&app, Role::User).await;
    let customer_b = seed_user(&app, Role::User).await;
    let admin = seed_user(&app, Role::Admin).await;
    let service_a = seed_service(&app, &provider_a, 5000).await;
    let service_b = seed_service(&app, &provider_b, 7000).await;

    book(&app, &customer_a, &service_a, "09:00:00").await;
    book(&app, &customer_a, &service_b, "09:00:00").await;
    book(&app, &customer_b, &service_b, "11:00:00").await;

    let count = |body: &Value| body.as_array().map(Vec::len).unwrap_or_default();

    for (actor, expected) in [
        (&customer_a, 2),
        (&customer_b, 1),
        (&provider_a, 1),
        (&provider_b, 2),
        (&admin, 3),
    ] {
        let (status, body) = send(
            &app,
            json_request("GET", "/api/bookings", Some(&actor.token), None, None),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(count(&body), expected, "{}", actor.user.email);
    }
}

#[tokio::test]
async fn test_unsupported_target_statuses() {
    let app = setup_test_app();
    let provider = seed_user(&app, Role::ServiceProvider).await;
    let customer = seed_user(&app, Role::User).await;
    let service = seed_service(&app, &provider, 5000).await;

    let (_, body) = book(&app, &customer, &service, "09:00:00").await;
    let booking_id = id_of(&body);

    let (status, body) = set_status(&app, &provider, &booking_id, "upcoming").await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"], "status must be either completed or cancelled");

    let (status, _) = set_status(&app, &provider, &booking_id, "pending").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_concurrent_complete_and_cancel_has_one_winner() {
    let app = setup_test_app();
    let provider = seed_user(&app, Role::ServiceProvider).await;
    let customer = seed_user(&app, Role::User).await;
    let service = seed_service(&app, &provider, 5000).await;

    let (_, body) = book(&app, &customer, &service, "09:00:00").await;
    let uri = format!("/api/bookings/{}/status", id_of(&body));

    let complete = json_request(
        "PATCH",
        &uri,
        Some(&provider.token),
        None,
        Some(json!({ "status": "completed" })),
    );
    let cancel = json_request(
        "PATCH",
        &uri,
        Some(&customer.token),
        None,
        Some(json!({ "status": "cancelled" })),
    );

    let first = tokio::spawn(app.router.clone().oneshot(complete));
    let second = tokio::spawn(app.router.clone().oneshot(cancel));

    let mut statuses = vec![
        first.await.unwrap().unwrap().status().as_u16(),
        second.await.unwrap().unwrap().status().as_u16(),
    ];
    statuses.sort_unstable();

    assert_eq!(statuses, vec![200, 409]);

    let (_, body) = send(
        &app,
        json_request(
            "GET",
            &format!("/api/bookings/{}", id_of(&body)),
            Some(&customer.token),
            None,
            None,
        ),
    )
    .await;
    assert_ne!(body["status"], "upcoming");
}
