use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts},
};
use handyhub_auth::{Principal, Role, normalize_role, verify_token};
use handyhub_core::{AccessError, AppError};
use handyhub_models::UserId;
use uuid::Uuid;

use crate::state::AppState;

/// The caller behind a valid bearer token.
///
/// The role claim is normalized once here; handlers only ever see a typed
/// [`Role`].
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub principal: Principal,
    pub email: String,
}

impl AuthUser {
    pub fn user_id(&self) -> UserId {
        UserId::from_uuid(self.principal.user_id)
    }

    pub fn role(&self) -> Role {
        self.principal.role
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| AppError::unauthorized("Missing authorization header"))?;

        let token = auth_header
            .strip_prefix("Bearer ")
            .ok_or_else(|| AppError::unauthorized("Invalid authorization header format"))?;

        let claims = verify_token(token, &state.jwt_config)?;
        let user_id = Uuid::parse_str(&claims.sub)
            .map_err(|_| AppError::unauthorized("Invalid user ID in token"))?;

        Ok(AuthUser {
            principal: Principal::new(user_id, normalize_role(Some(&claims.role))),
            email: claims.email,
        })
    }
}

/// Logs a rejected authorization. Allow-lists never appear in the event.
pub fn log_access_denied(principal: &Principal, err: &AccessError, operation: &'static str) {
    match err {
        AccessError::InsufficientPermission(capability) => tracing::warn!(
            user_id = %principal.user_id,
            role = %principal.role,
            capability = %capability,
            operation,
            "Missing capability"
        ),
        AccessError::OwnershipViolation => tracing::warn!(
            user_id = %principal.user_id,
            role = %principal.role,
            operation,
            "Ownership check failed"
        ),
        AccessError::PortalDenied => tracing::warn!(
            role = %principal.role,
            operation,
            "Portal admission denied"
        ),
        AccessError::StateConflict(reason) => tracing::info!(
            user_id = %principal.user_id,
            operation,
            reason = %reason,
            "State conflict"
        ),
    }
}

/// Declares an extractor that admits only callers whose role holds a
/// capability, checked through the shared [`AccessControl`](handyhub_auth::AccessControl).
#[macro_export]
macro_rules! require_capability {
    ($name:ident, $capability:expr) => {
        #[derive(Debug, Clone)]
        pub struct $name(pub $crate::middleware::auth::AuthUser);

        impl axum::extract::FromRequestParts<$crate::state::AppState> for $name {
            type Rejection = handyhub_core::AppError;

            async fn from_request_parts(
                parts: &mut axum::http::request::Parts,
                state: &$crate::state::AppState,
            ) -> Result<Self, Self::Rejection> {
                let auth_user = <$crate::middleware::auth::AuthUser as axum::extract::FromRequestParts<
                    $crate::state::AppState,
                >>::from_request_parts(parts, state)
                .await?;

                state
                    .access
                    .require(&auth_user.principal, $capability)
                    .inspect_err(|err| {
                        $crate::middleware::auth::log_access_denied(
                            &auth_user.principal,
                            err,
                            stringify!($name),
                        )
                    })?;

                Ok($name(auth_user))
            }
        }
    };
}

require_capability!(RequireBrowseServices, handyhub_core::Capability::BrowseServices);
require_capability!(RequireBookServices, handyhub_core::Capability::BookServices);
