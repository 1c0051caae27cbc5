use reportgate_server::{
    auth::AppState, build_gateway, config::ServerConfig, router, spawn_session_sweeper,
};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration from file and environment
    let config = ServerConfig::from_env().expect("failed to load configuration");
    tracing::info!(
        config_path = %config.config_path.display(),
        reload = ?config.directory.reload,
        ttl_minutes = config.session.ttl_minutes,
        "Loaded configuration"
    );

    let app_state = Arc::new(AppState::new(build_gateway(&config)));

    // Spawn periodic session sweep task
    let sweeper = spawn_session_sweeper(app_state.clone(), config.session.sweep_interval());

    let app = router(app_state);

    let listener = tokio::net::TcpListener::bind(config.bind_address)
        .await
        .expect("failed to bind to address");

    tracing::info!("listening on http://{}", config.bind_address);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("server error");

    sweeper.abort();
    tracing::info!("server stopped");
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown signal received");
}
