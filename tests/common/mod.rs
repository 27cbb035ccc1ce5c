use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use handyhub::router::init_router;
use handyhub::state::AppState;
use handyhub_auth::{AccessControl, Role, create_access_token};
use handyhub_config::{CorsConfig, JwtConfig};
use handyhub_db::{InMemoryStore, MarketplaceStore};
use handyhub_models::{NewService, NewUser, Service, User};
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;
use uuid::Uuid;

pub const FRONTEND: &str = "frontend";
#[allow(dead_code)]
pub const ADMIN_PANEL: &str = "admin-panel";
#[allow(dead_code)]
pub const PARTNER_APP: &str = "partner-app";

pub struct TestApp {
    pub router: Router,
    pub state: AppState,
    #[allow(dead_code)]
    pub store: InMemoryStore,
}

/// A seeded account and a valid token for it.
#[allow(dead_code)]
pub struct TestUser {
    pub user: User,
    pub token: String,
}

pub fn test_jwt_config() -> JwtConfig {
    JwtConfig {
        secret: "test_secret_key_for_testing_purposes".to_string(),
        access_token_expiry: 3600,
    }
}

pub fn setup_test_app() -> TestApp {
    let store = InMemoryStore::new();
    let state = AppState::new(
        Arc::new(store.clone()),
        AccessControl::standard(),
        test_jwt_config(),
        CorsConfig {
            allowed_origins: vec!["http://localhost:3000".to_string()],
        },
    );
    TestApp {
        router: init_router(state.clone()),
        state,
        store,
    }
}

pub fn generate_unique_email() -> String {
    format!("test_{}@example.com", Uuid::new_v4().simple())
}

pub fn json_request(
    method: &str,
    uri: &str,
    token: Option<&str>,
    portal: Option<&str>,
    body: Option<Value>,
) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json");
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }
    if let Some(portal) = portal {
        builder = builder.header("x-portal", portal);
    }
    let body = body.map(|b| Body::from(b.to_string())).unwrap_or_else(Body::empty);
    builder.body(body).unwrap()
}

pub async fn send(app: &TestApp, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

/// Inserts an account straight into the store, skipping bcrypt, and mints
/// a token for it.
#[allow(dead_code)]
pub async fn seed_user(app: &TestApp, role: Role) -> TestUser {
    let user = app
        .store
        .create_user(NewUser {
            first_name: "Test".to_string(),
            last_name: role.display_name().to_string(),
            email: generate_unique_email(),
            password_hash: "not-a-real-hash".to_string(),
            role,
        })
        .await
        .unwrap();
    let token =
        create_access_token(user.id.into_inner(), &user.email, role, &app.state.jwt_config).unwrap();
    TestUser { user, token }
}

#[allow(dead_code)]
pub async fn seed_service(app: &TestApp, provider: &TestUser, price_cents: i64) -> Service {
    app.store
        .create_service(NewService {
            provider_id: provider.user.id,
            name: "Boiler repair".to_string(),
            description: Some("Diagnosis and repair of gas boilers".to_string()),
            price_cents,
        })
        .await
        .unwrap()
}
