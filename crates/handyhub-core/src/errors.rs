//! Error types shared by every HandyHub crate.
//!
//! [`AppError`] is what handlers return; it carries an HTTP status and an
//! [`anyhow::Error`] message. [`AccessError`] is the authorization taxonomy
//! produced by the role, portal and lifecycle checks. It converts into
//! [`AppError`] with the matching status.

use anyhow::{Error, anyhow};
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error as ThisError;

use crate::permissions::Capability;

/// Authorization failures.
///
/// None of these variants are retried or recovered locally. They propagate
/// to the caller as explicit rejections.
#[derive(Debug, Clone, PartialEq, Eq, ThisError)]
pub enum AccessError {
    /// The role may not authenticate through the requested portal.
    ///
    /// The message is deliberately generic and never lists the allowed roles.
    #[error("Role not allowed for this portal")]
    PortalDenied,

    /// The role lacks the capability the operation requires.
    #[error("Access denied. Missing required permission: {0}")]
    InsufficientPermission(Capability),

    /// The role holds the capability but the caller does not own the target.
    #[error("Access denied. You do not own this resource")]
    OwnershipViolation,

    /// The target is in a state that forbids the operation, or a conditional
    /// update lost against a concurrent writer.
    #[error("{0}")]
    StateConflict(String),
}

impl AccessError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::PortalDenied | Self::InsufficientPermission(_) | Self::OwnershipViolation => {
                StatusCode::FORBIDDEN
            }
            Self::StateConflict(_) => StatusCode::CONFLICT,
        }
    }
}

#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub error: Error,
}

impl AppError {
    pub fn new<E>(status: StatusCode, err: E) -> Self
    where
        E: Into<Error>,
    {
        Self {
            status,
            error: err.into(),
        }
    }

    pub fn internal<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, err)
    }

    pub fn internal_error(message: impl Into<String>) -> Self {
        Self::internal(anyhow!(message.into()))
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, anyhow!(message.into()))
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, anyhow!(message.into()))
    }

    pub fn unprocessable(message: impl Into<String>) -> Self {
        Self::new(StatusCode::UNPROCESSABLE_ENTITY, anyhow!(message.into()))
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, anyhow!(message.into()))
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::new(StatusCode::FORBIDDEN, anyhow!(message.into()))
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(StatusCode::CONFLICT, anyhow!(message.into()))
    }

    /// Returns the access error this response was built from, if any.
    pub fn access_error(&self) -> Option<&AccessError> {
        self.error.downcast_ref::<AccessError>()
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let message = if self.status.is_server_error() {
            tracing::error!(status = %self.status.as_u16(), error = ?self.error, "Request failed");
            "Internal server error".to_string()
        } else {
            self.error.to_string()
        };

        let body = Json(json!({ "error": message }));

        (self.status, body).into_response()
    }
}

impl From<AccessError> for AppError {
    fn from(err: AccessError) -> Self {
        Self::new(err.status(), err)
    }
}

impl From<Error> for AppError {
    fn from(err: Error) -> Self {
        Self::internal(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_access_error_statuses() {
        assert_eq!(AccessError::PortalDenied.status(), StatusCode::FORBIDDEN);
        assert_eq!(
            AccessError::InsufficientPermission(Capability::BookServices).status(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(AccessError::OwnershipViolation.status(), StatusCode::FORBIDDEN);
        assert_eq!(
            AccessError::StateConflict("Booking is already completed".to_string()).status(),
            StatusCode::CONFLICT
        );
    }

    #[test]
    fn test_portal_denied_message_is_generic() {
        let message = AccessError::PortalDenied.to_string();
        assert_eq!(message, "Role not allowed for this portal");
        assert!(!message.contains("admin"));
        assert!(!message.contains("user"));
    }

    #[test]
    fn test_app_error_from_access_error_keeps_variant() {
        let err: AppError = AccessError::OwnershipViolation.into();
        assert_eq!(err.status, StatusCode::FORBIDDEN);
        assert_eq!(err.access_error(), Some(&AccessError::OwnershipViolation));
    }

    #[test]
    fn test_server_errors_hide_details() {
        let response = AppError::internal_error("connection refused").into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_constructors_set_status() {
        assert_eq!(AppError::not_found("x").status, StatusCode::NOT_FOUND);
        assert_eq!(AppError::bad_request("x").status, StatusCode::BAD_REQUEST);
        assert_eq!(AppError::unauthorized("x").status, StatusCode::UNAUTHORIZED);
        assert_eq!(AppError::conflict("x").status, StatusCode::CONFLICT);
        assert_eq!(
            AppError::unprocessable("x").status,
            StatusCode::UNPROCESSABLE_ENTITY
        );
    }
}
