//! HTTP server initialization and runtime setup.
//!
//! Wires the configured store, spawns the click worker and runs Axum until a
//! shutdown signal arrives.

use crate::application::click_worker::run_click_worker;
use crate::config::{Config, StoreBackend};
use crate::domain::repositories::{UrlRepository, UserRepository};
use crate::infrastructure::persistence::{
    InMemoryUrlRepository, InMemoryUserRepository, MongoUrlRepository, MongoUserRepository,
    StoreConnection,
};
use crate::routes::app_router;
use crate::state::AppState;

use anyhow::Result;
use axum::ServiceExt;
use axum::extract::Request;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::sync::mpsc;

/// Repository handles for the configured backend.
pub struct Repositories {
    pub urls: Arc<dyn UrlRepository>,
    pub users: Arc<dyn UserRepository>,
}

/// Builds repositories for the configured backend.
///
/// For MongoDB both repositories share one [`StoreConnection`]; nothing
/// connects until the first query.
pub fn build_repositories(config: &Config) -> Repositories {
    match config.store_backend {
        StoreBackend::MongoDb => {
            let connection = Arc::new(StoreConnection::new(
                config.mongodb_uri.clone(),
                config.mongodb_database.clone(),
            ));
            Repositories {
                urls: Arc::new(MongoUrlRepository::new(connection.clone())),
                users: Arc::new(MongoUserRepository::new(connection)),
            }
        }
        StoreBackend::Memory => Repositories {
            urls: Arc::new(InMemoryUrlRepository::new()),
            users: Arc::new(InMemoryUserRepository::new()),
        },
    }
}

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - Store repositories (connection is lazy)
/// - Background click worker
/// - Axum HTTP server with graceful shutdown on Ctrl+C
///
/// # Errors
///
/// Returns an error if:
/// - The listen address is invalid
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let repositories = build_repositories(&config);

    let (click_tx, click_rx) = mpsc::channel(config.click_queue_capacity);

    let state = AppState::new(
        repositories.urls,
        repositories.users,
        click_tx,
        config.public_base_url.clone(),
        config.recent_limit_max,
    );

    // Warm the store connection; failure is not fatal, the next request retries
    if let Err(e) = state.url_service.ping().await {
        tracing::warn!("Store not reachable at startup: {}", e);
    }

    tokio::spawn(run_click_worker(click_rx, state.url_service.clone()));
    tracing::info!("Click worker started");

    let app = app_router(state);

    let addr: SocketAddr = config.listen_addr.parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(
        listener,
        ServiceExt::<Request>::into_make_service_with_connect_info::<SocketAddr>(app),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
