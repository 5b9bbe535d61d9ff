//! Service status and record counts.

use axum::Json;
use axum::extract::State;
use serde::Serialize;

use hbnb_app::ports::Storage;
use hbnb_app::services::stats_service::Stats;

use crate::error::ApiError;
use crate::state::AppState;

/// Body of `GET /api/v1/status`.
#[derive(Serialize)]
pub struct Status {
    status: &'static str,
}

/// `GET /api/v1/status`
pub async fn status() -> Json<Status> {
    Json(Status { status: "OK" })
}

/// `GET /api/v1/stats`
pub async fn stats<S>(State(state): State<AppState<S>>) -> Result<Json<Stats>, ApiError>
where
    S: Storage + 'static,
{
    let stats = state.stats_service.stats().await?;
    Ok(Json(stats))
}
