//! HTTP error responses.
//!
//! Every authentication failure renders the same body so a client cannot
//! tell an unknown user from a wrong password or an expired token.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use reportgate_access::{AccessError, AuthenticationError, AuthorizationError};
use serde::Serialize;
use std::fmt;

/// Message returned for every authentication failure.
pub const AUTHENTICATION_FAILURE: &str = "Authentication failure";

/// Message returned for every authorization failure.
pub const AUTHORIZATION_FAILURE: &str = "Authorization failure";

/// Errors a route handler can return.
#[derive(Debug)]
pub enum ApiError {
    /// No live session, or credentials were rejected.
    Unauthenticated,
    /// The session may not access the requested report.
    Forbidden { report_id: String },
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unauthenticated => write!(f, "not authenticated"),
            Self::Forbidden { report_id } => {
                write!(f, "access to report '{report_id}' forbidden")
            }
        }
    }
}

impl std::error::Error for ApiError {}

impl From<AuthenticationError> for ApiError {
    fn from(_: AuthenticationError) -> Self {
        Self::Unauthenticated
    }
}

impl From<AccessError> for ApiError {
    fn from(err: AccessError) -> Self {
        match err {
            AccessError::Authentication(_) => Self::Unauthenticated,
            AccessError::Authorization(AuthorizationError::ReportDenied { report_id }) => {
                Self::Forbidden { report_id }
            }
        }
    }
}

#[derive(Serialize)]
struct ErrorBody {
    error: &'static str,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            Self::Unauthenticated => (
                StatusCode::UNAUTHORIZED,
                Json(ErrorBody {
                    error: AUTHENTICATION_FAILURE,
                }),
            )
                .into_response(),
            Self::Forbidden { .. } => (
                StatusCode::FORBIDDEN,
                Json(ErrorBody {
                    error: AUTHORIZATION_FAILURE,
                }),
            )
                .into_response(),
        }
    }
}
