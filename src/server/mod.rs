pub mod api;

use crate::error::Result;
use crate::services::{SharedHealthStats, SharedLatestView};
use axum::{extract::FromRef, routing::get, Router};
use std::net::SocketAddr;
use std::time::Instant;
use tower_http::trace::TraceLayer;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub latest: SharedLatestView,
    pub health: SharedHealthStats,
    pub started_at: Instant,
}

impl FromRef<AppState> for SharedLatestView {
    fn from_ref(app_state: &AppState) -> SharedLatestView {
        app_state.latest.clone()
    }
}

impl FromRef<AppState> for SharedHealthStats {
    fn from_ref(app_state: &AppState) -> SharedHealthStats {
        app_state.health.clone()
    }
}

/// Start the axum server. Blocks for the process lifetime; there is no
/// graceful-shutdown procedure.
pub async fn serve(
    latest: SharedLatestView,
    health: SharedHealthStats,
    port: u16,
) -> Result<()> {
    let app_state = AppState {
        latest,
        health,
        started_at: Instant::now(),
    };

    tracing::info!("Registering routes:");
    tracing::info!("  GET|POST /        (latest treemap, auto-refreshing)");
    tracing::info!("  GET      /health  (worker health stats)");

    let app = Router::new()
        .route("/", get(api::treemap_handler).post(api::treemap_handler))
        .route("/health", get(api::health_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(app_state);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!(%addr, "Server listening");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
