//! Token extractor for Axum.

use crate::error::ApiError;
use axum::{extract::FromRequestParts, http::request::Parts};

/// Request header carrying the session token.
pub const TOKEN_HEADER: &str = "x-auth-token";

/// Extractor for the presented session token.
///
/// Only checks that a token was sent. Whether it names a live session is
/// decided by the gateway call the handler makes with it.
#[derive(Debug)]
pub struct AuthToken(pub String);

impl<S> FromRequestParts<S> for AuthToken
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get(TOKEN_HEADER)
            .and_then(|value| value.to_str().ok())
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .ok_or(ApiError::Unauthenticated)?;

        Ok(AuthToken(token.to_string()))
    }
}
