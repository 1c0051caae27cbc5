//! Authentication routes for login, session check, and logout.

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use super::{AppState, AuthToken};
use crate::error::{AUTHENTICATION_FAILURE, ApiError};

/// Login request body. Missing fields count as blank.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    username: String,
    #[serde(default)]
    password: String,
}

/// Login response body, used for both outcomes.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    token: String,
    error: &'static str,
}

/// Exchanges a username and password for a session token.
///
/// A body that is not a JSON login request fails like bad credentials.
pub async fn login(
    State(state): State<Arc<AppState>>,
    request: Result<Json<LoginRequest>, JsonRejection>,
) -> Response {
    let Json(request) = match request {
        Ok(request) => request,
        Err(rejection) => {
            tracing::debug!(error = %rejection, "unusable login request body");
            return login_failure();
        }
    };

    match state
        .gateway
        .authenticate(&request.username, &request.password)
        .await
    {
        Ok(token) => Json(LoginResponse {
            token: token.to_string(),
            error: "",
        })
        .into_response(),
        Err(_) => login_failure(),
    }
}

fn login_failure() -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(LoginResponse {
            token: String::new(),
            error: AUTHENTICATION_FAILURE,
        }),
    )
        .into_response()
}

/// Confirms the token names a live session.
pub async fn session(
    State(state): State<Arc<AppState>>,
    AuthToken(token): AuthToken,
) -> Result<StatusCode, ApiError> {
    state.gateway.is_authenticated(&token)?;
    Ok(StatusCode::NO_CONTENT)
}

/// Ends the session named by the token.
pub async fn logout(
    State(state): State<Arc<AppState>>,
    AuthToken(token): AuthToken,
) -> Result<StatusCode, ApiError> {
    state.gateway.logout(&token)?;
    Ok(StatusCode::NO_CONTENT)
}
