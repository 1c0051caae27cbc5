//! reportgate HTTP server.
//!
//! Exposes the [`AuthGateway`] over JSON-over-HTTP. Routes:
//!
//! | Method | Path | Success |
//! |---|---|---|
//! | POST | `/auth/login` | 200 `{"token": ..., "error": ""}` |
//! | GET | `/auth/session` | 204 |
//! | POST | `/auth/logout` | 204 |
//! | GET | `/reports` | 200, array of report ids |
//! | GET | `/reports/detailed` | 200, object of report id -> details |
//! | GET | `/reports/{report_id}/access` | 204 |
//!
//! Tokens travel in the `x-auth-token` header.

pub mod auth;
pub mod config;
pub mod error;
pub mod reports;

use auth::AppState;
use axum::{
    Router,
    routing::{get, post},
};
use crate::config::ServerConfig;
use reportgate_access::{AuthGateway, SessionStore};
use reportgate_directory::{CredentialDirectory, YamlCredentialSource, YamlReportCatalog};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tower_http::trace::TraceLayer;

/// Builds a gateway reading YAML documents from `config.config_path`.
pub fn build_gateway(config: &ServerConfig) -> AuthGateway {
    let source = YamlCredentialSource::new(&config.config_path);
    let directory = CredentialDirectory::new(Arc::new(source), config.directory.reload_policy());
    let catalog = YamlReportCatalog::new(&config.config_path);

    AuthGateway::new(
        SessionStore::new(config.session.ttl()),
        directory,
        Arc::new(catalog),
    )
}

/// Builds the application router.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/auth/login", post(auth::login))
        .route("/auth/session", get(auth::session))
        .route("/auth/logout", post(auth::logout))
        .route("/reports", get(reports::list))
        .route("/reports/detailed", get(reports::detailed))
        .route("/reports/{report_id}/access", get(reports::access))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Spawns a task that sweeps expired sessions every `every`.
///
/// # Panics
///
/// The task panics if `every` is zero. [`ServerConfig::from_env`] rejects a
/// zero sweep interval.
pub fn spawn_session_sweeper(state: Arc<AppState>, every: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(every);
        loop {
            interval.tick().await;
            let removed = state.gateway.sweep_expired();
            tracing::debug!(
                removed,
                remaining = state.gateway.sessions().len(),
                "periodic session sweep"
            );
        }
    })
}
