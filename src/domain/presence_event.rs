//! Domain events reflecting viewer-presence changes.
//!
//! Every presence mutation emits a [`PresenceEvent`] through the
//! [`super::EventBus`]. Events are broadcast to all WebSocket
//! connections, which serialize them into wire frames for clients.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Domain event emitted after every presence mutation.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "event_type", rename_all = "snake_case")]
pub enum PresenceEvent {
    /// Emitted whenever the number of connected viewers changes.
    CountChanged {
        /// The new viewer count. Carried on the wire as the `data`
        /// field of a `count_change` event.
        data: u64,
        /// When the change was recorded.
        timestamp: DateTime<Utc>,
    },
}

impl PresenceEvent {
    /// Builds a `CountChanged` event stamped with the current time.
    #[must_use]
    pub fn count_changed(count: u64) -> Self {
        Self::CountChanged {
            data: count,
            timestamp: Utc::now(),
        }
    }

    /// Returns the wire-level event name clients subscribe to.
    #[must_use]
    pub const fn event_name(&self) -> &'static str {
        match self {
            Self::CountChanged { .. } => "count_change",
        }
    }

    /// Returns the timestamp the event was recorded at.
    #[must_use]
    pub const fn timestamp(&self) -> DateTime<Utc> {
        match self {
            Self::CountChanged { timestamp, .. } => *timestamp,
        }
    }

    /// Returns the wire-level payload attached to the event.
    ///
    /// For `CountChanged` this is `{"data": <count>}`, the shape the
    /// viewer client reads its count from.
    #[must_use]
    pub fn wire_payload(&self) -> serde_json::Value {
        match self {
            Self::CountChanged { data, .. } => serde_json::json!({ "data": data }),
        }
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn count_changed_carries_count() {
        let event = PresenceEvent::count_changed(7);
        let PresenceEvent::CountChanged { data, .. } = event;
        assert_eq!(data, 7);
    }

    #[test]
    fn wire_name_is_count_change() {
        let event = PresenceEvent::count_changed(1);
        assert_eq!(event.event_name(), "count_change");
    }

    #[test]
    fn wire_payload_has_data_field() {
        let event = PresenceEvent::count_changed(3);
        let payload = event.wire_payload();
        assert_eq!(payload.get("data").and_then(serde_json::Value::as_u64), Some(3));
    }
}
