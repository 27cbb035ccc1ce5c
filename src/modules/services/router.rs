use axum::{
    Router,
    routing::{get, patch},
};

use super::controller::{create_service, list_services, update_availability};
use crate::state::AppState;

pub fn init_services_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_services).post(create_service))
        .route("/{id}/availability", patch(update_availability))
}
