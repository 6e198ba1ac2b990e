//! Liveness check for the planner service and its SQLite store.

use axum::extract::State;
use axum::{routing::get, Json, Router};
use planner_db::repositories::EventRepo;
use serde::Serialize;

use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// `ok`, or `degraded` when the event store cannot be queried.
    pub status: &'static str,
    pub version: &'static str,
    pub db_healthy: bool,
    /// Stored events; `null` when the store is unreachable.
    pub event_count: Option<i64>,
}

/// GET /health
async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let event_count = match planner_db::health_check(&state.pool).await {
        Ok(()) => EventRepo::count(&state.pool).await,
        Err(e) => Err(e),
    };

    let event_count = event_count
        .inspect_err(|e| tracing::warn!(error = %e, "Event store health check failed"))
        .ok();
    let db_healthy = event_count.is_some();

    Json(HealthResponse {
        status: if db_healthy { "ok" } else { "degraded" },
        version: env!("CARGO_PKG_VERSION"),
        db_healthy,
        event_count,
    })
}

/// `/health`, mounted beside `/api` rather than under it.
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health))
}
