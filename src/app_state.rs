//! Shared application state injected into all Axum handlers.

use std::sync::Arc;

use axum::body::Bytes;
use tokio::sync::broadcast;

use crate::domain::EventBus;
use crate::service::PresenceService;

/// Shared application state available to all handlers via Axum's
/// `State` extractor.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Presence service tracking connected viewers.
    pub presence: Arc<PresenceService>,
    /// Event bus for WebSocket broadcasts.
    pub event_bus: EventBus,
    /// Broadcast channel carrying JPEG frames for `/video_feed`.
    pub frames: broadcast::Sender<Bytes>,
    /// Whether a frame source is configured for this deployment.
    pub stream_enabled: bool,
}
