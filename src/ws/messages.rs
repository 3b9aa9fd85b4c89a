//! Wire frames pushed to WebSocket clients.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::PresenceEvent;

/// Server → client event frame.
///
/// Clients dispatch on the `event` name and read variant-specific data
/// from `payload`; for `count_change` the payload is `{"data": <count>}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventFrame {
    /// Server-generated frame ID.
    pub id: String,
    /// Wire-level event name (e.g. `"count_change"`).
    pub event: String,
    /// ISO-8601 timestamp.
    pub timestamp: DateTime<Utc>,
    /// Event-specific payload.
    pub payload: serde_json::Value,
}

impl EventFrame {
    /// Builds the wire frame for a domain event.
    #[must_use]
    pub fn from_event(event: &PresenceEvent) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            event: event.event_name().to_string(),
            timestamp: event.timestamp(),
            payload: event.wire_payload(),
        }
    }
}
