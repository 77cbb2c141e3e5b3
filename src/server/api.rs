use crate::constants::{INITIALIZING_PLACEHOLDER, PAGE_REFRESH_SECS};
use crate::server::AppState;
use crate::services::{HealthStats, SharedHealthStats, SharedLatestView};
use axum::{extract::State, response::Html, Json};
use tracing::debug;

/// GET/POST `/` — the latest rendered treemap, wrapped in a client-side
/// refresh directive. Before the first successful refresh this serves a
/// placeholder instead of failing. Never waits on the worker: it only reads
/// whatever the slot currently holds.
pub async fn treemap_handler(State(latest): State<SharedLatestView>) -> Html<String> {
    let body = match latest.current().await {
        Some(html) => html.as_ref().clone(),
        None => INITIALIZING_PLACEHOLDER.to_string(),
    };

    Html(format!(
        "<meta http-equiv=\"refresh\" content=\"{}\" />\n{}",
        PAGE_REFRESH_SECS, body
    ))
}

/// GET `/health` — worker counters plus process uptime.
pub async fn health_handler(
    State(health): State<SharedHealthStats>,
    State(app_state): State<AppState>,
) -> Json<HealthStats> {
    debug!("Received request for health stats");

    let mut stats = health.read().await.clone();
    stats.uptime_secs = app_state.started_at.elapsed().as_secs();
    Json(stats)
}
