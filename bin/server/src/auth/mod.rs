//! Authentication routes and extractors for the reportgate server.
//!
//! Sessions are opaque tokens issued by [`AuthGateway::authenticate`] and
//! presented on later requests in the [`TOKEN_HEADER`] header. All session
//! state lives in the gateway's in-memory store.

pub mod middleware;
pub mod routes;

use reportgate_access::AuthGateway;

pub use middleware::{AuthToken, TOKEN_HEADER};
pub use routes::{login, logout, session};

/// Shared application state.
pub struct AppState {
    /// Gateway handling every auth and report access decision.
    pub gateway: AuthGateway,
}

impl AppState {
    /// Creates a new application state.
    pub fn new(gateway: AuthGateway) -> Self {
        Self { gateway }
    }
}
