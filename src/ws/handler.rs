//! Axum WebSocket upgrade handler.

use axum::extract::State;
use axum::extract::ws::WebSocketUpgrade;
use axum::response::IntoResponse;

use super::connection::run_connection;
use crate::app_state::AppState;

/// `GET /ws` — Upgrade HTTP connection to the presence channel.
///
/// The event bus is subscribed here, before the upgrade completes and
/// the join is recorded, so the new viewer receives the count change
/// caused by its own arrival.
pub async fn ws_handler(ws: WebSocketUpgrade, State(state): State<AppState>) -> impl IntoResponse {
    let event_rx = state.event_bus.subscribe();
    let presence = std::sync::Arc::clone(&state.presence);

    ws.on_upgrade(move |socket| run_connection(socket, event_rx, presence))
}
