//! Per-connection WebSocket loop.
//!
//! Each connection is one viewer: joining is recorded when the loop
//! starts and leaving when it ends, however it ends. In between, the
//! loop forwards presence events from the [`broadcast::Receiver`] to
//! the client as JSON event frames.

use std::sync::Arc;

use axum::extract::ws::{Message, WebSocket};
use futures_util::{SinkExt, StreamExt};
use tokio::sync::broadcast;

use super::messages::EventFrame;
use crate::domain::{PresenceEvent, ViewerId};
use crate::service::PresenceService;

/// Runs the read/write loop for a single WebSocket connection.
///
/// The receiver must have been subscribed before the join is recorded,
/// so the viewer sees the `count_change` its own arrival caused.
pub async fn run_connection(
    socket: WebSocket,
    mut event_rx: broadcast::Receiver<PresenceEvent>,
    presence: Arc<PresenceService>,
) {
    let viewer_id = ViewerId::new();
    presence.viewer_joined(viewer_id);

    let (mut ws_tx, mut ws_rx) = socket.split();

    loop {
        tokio::select! {
            // Incoming message from client
            msg = ws_rx.next() => {
                match msg {
                    Some(Ok(Message::Text(text))) => {
                        // The presence channel defines no client commands.
                        tracing::trace!(%viewer_id, len = text.len(), "ignoring client text frame");
                    }
                    Some(Ok(Message::Close(_))) | Some(Err(_)) | None => break,
                    _ => {}
                }
            }
            // Event from EventBus
            event = event_rx.recv() => {
                match event {
                    Ok(presence_event) => {
                        let frame = EventFrame::from_event(&presence_event);
                        let json = serde_json::to_string(&frame).unwrap_or_default();
                        if ws_tx.send(Message::text(json)).await.is_err() {
                            break;
                        }
                    }
                    Err(broadcast::error::RecvError::Lagged(n)) => {
                        tracing::warn!(%viewer_id, lagged = n, "ws client lagged behind event bus");
                    }
                    Err(broadcast::error::RecvError::Closed) => break,
                }
            }
        }
    }

    presence.viewer_left(viewer_id);
    tracing::debug!(%viewer_id, "ws connection closed");
}
