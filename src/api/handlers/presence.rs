//! Presence endpoint: current viewer count snapshot.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;
use utoipa::ToSchema;

use crate::app_state::AppState;

/// Snapshot of the current presence state.
#[derive(Debug, Serialize, ToSchema)]
struct PresenceResponse {
    /// Number of currently connected viewers.
    watching: u64,
    /// Whether the frame pipeline is currently producing frames.
    stream_active: bool,
}

/// `GET /api/v1/presence` — Current viewer presence.
#[utoipa::path(
    get,
    path = "/api/v1/presence",
    tag = "Presence",
    summary = "Current viewer presence",
    description = "Returns the number of connected viewers and whether the frame pipeline is running.",
    responses(
        (status = 200, description = "Presence snapshot", body = PresenceResponse),
    )
)]
pub async fn presence_handler(State(state): State<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(PresenceResponse {
            watching: state.presence.current_count(),
            stream_active: state.stream_enabled && state.presence.gate().is_watched(),
        }),
    )
}

/// Presence routes mounted under `/api/v1`.
pub fn routes() -> Router<AppState> {
    Router::new().route("/presence", get(presence_handler))
}
