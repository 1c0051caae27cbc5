//! Error types for the access crate.
//!
//! - `AuthenticationError`: the caller is not (or could not become) logged in
//! - `AuthorizationError`: the caller is logged in but lacks access
//! - `AccessError`: either of the above, for checks that can fail both ways
//! - `ResolveError`: internal lookup failures in the resolver
//!
//! Authentication failures deliberately carry no detail about which check
//! failed. The reason is logged where it is known and never surfaced.

use std::fmt;

/// Errors from authentication operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthenticationError {
    /// Login was refused: blank input, unknown user, or wrong password.
    CredentialsRejected,
    /// The token is unknown, malformed, logged out, or expired.
    NotLoggedIn,
}

impl fmt::Display for AuthenticationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CredentialsRejected => write!(f, "user was not logged in"),
            Self::NotLoggedIn => write!(f, "user is not logged in"),
        }
    }
}

impl std::error::Error for AuthenticationError {}

/// Errors from authorization checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthorizationError {
    /// None of the user's groups grants the report.
    ReportDenied { report_id: String },
}

impl fmt::Display for AuthorizationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ReportDenied { report_id } => {
                write!(f, "access to report '{report_id}' denied")
            }
        }
    }
}

impl std::error::Error for AuthorizationError {}

/// Failure of an operation that both authenticates and authorizes.
///
/// Lets a client tell "log in again" apart from "you lack permission".
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccessError {
    /// The token did not identify a live session.
    Authentication(AuthenticationError),
    /// The session is live but not allowed to perform the request.
    Authorization(AuthorizationError),
}

impl fmt::Display for AccessError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Authentication(err) => write!(f, "authentication failed: {err}"),
            Self::Authorization(err) => write!(f, "authorization failed: {err}"),
        }
    }
}

impl std::error::Error for AccessError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Authentication(err) => Some(err),
            Self::Authorization(err) => Some(err),
        }
    }
}

impl From<AuthenticationError> for AccessError {
    fn from(err: AuthenticationError) -> Self {
        Self::Authentication(err)
    }
}

impl From<AuthorizationError> for AccessError {
    fn from(err: AuthorizationError) -> Self {
        Self::Authorization(err)
    }
}

/// Errors from resolving a user's reports.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolveError {
    /// The username is not in the current snapshot.
    UnknownUser { username: String },
}

impl fmt::Display for ResolveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownUser { username } => write!(f, "user '{username}' does not exist"),
        }
    }
}

impl std::error::Error for ResolveError {}
