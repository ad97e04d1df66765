use std::sync::{Arc, OnceLock};
use std::time::Instant;

use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::config::StorageMode;
use crate::repo::TodoRepository;

static START_TIME: OnceLock<Instant> = OnceLock::new();

/// Record the application start time. Call once during startup.
pub fn record_start_time() {
    START_TIME.get_or_init(Instant::now);
}

/// Health check response.
#[derive(Debug, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    /// `ok`, or `degraded` when storage is unreachable.
    pub status: String,
    pub storage: String,
    pub uptime_seconds: u64,
    pub version: String,
}

/// Health check handler.
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service is up", body = HealthResponse)
    ),
    tag = "health"
)]
pub async fn health_check(
    State(repo): State<Arc<dyn TodoRepository>>,
    State(mode): State<StorageMode>,
) -> Json<HealthResponse> {
    let (status, storage) = match repo.count().await {
        Ok(_) => ("ok", format!("{}: connected", mode.as_str())),
        Err(e) => ("degraded", format!("{}: error: {}", mode.as_str(), e.message)),
    };

    let uptime = START_TIME.get().map(|t| t.elapsed().as_secs()).unwrap_or(0);

    Json(HealthResponse {
        status: status.to_string(),
        storage,
        uptime_seconds: uptime,
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}
