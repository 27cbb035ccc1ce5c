use std::convert::Infallible;

use axum::{extract::FromRequestParts, http::request::Parts};

pub const PORTAL_HEADER: &str = "x-portal";

/// The raw `x-portal` header, if present and valid UTF-8.
///
/// Interpreting it is left to the admission predicate, which denies unknown
/// or absent portals.
#[derive(Debug, Clone, Default)]
pub struct PortalHeader(pub Option<String>);

impl PortalHeader {
    pub fn as_deref(&self) -> Option<&str> {
        self.0.as_deref()
    }
}

impl<S> FromRequestParts<S> for PortalHeader
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(PortalHeader(
            parts
                .headers
                .get(PORTAL_HEADER)
                .and_then(|v| v.to_str().ok())
                .map(str::to_string),
        ))
    }
}
