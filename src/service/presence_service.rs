//! Presence service: orchestrates viewer join/leave and emits events.

use crate::domain::{EventBus, PresenceCounter, PresenceEvent, ViewerId, WatchGate};

/// Orchestration layer for viewer presence.
///
/// Stateless coordinator: owns the [`PresenceCounter`] for the count,
/// the [`WatchGate`] for idling the frame pipeline, and the [`EventBus`]
/// for event emission. Every mutation follows the pattern: update
/// counter → toggle gate on 0↔1 transitions → emit event → log.
#[derive(Debug)]
pub struct PresenceService {
    counter: PresenceCounter,
    gate: WatchGate,
    event_bus: EventBus,
}

impl PresenceService {
    /// Creates a new `PresenceService`.
    #[must_use]
    pub fn new(gate: WatchGate, event_bus: EventBus) -> Self {
        Self {
            counter: PresenceCounter::new(),
            gate,
            event_bus,
        }
    }

    /// Returns a reference to the inner [`EventBus`].
    #[must_use]
    pub fn event_bus(&self) -> &EventBus {
        &self.event_bus
    }

    /// Returns a reference to the inner [`WatchGate`].
    #[must_use]
    pub fn gate(&self) -> &WatchGate {
        &self.gate
    }

    /// Returns the current viewer count.
    #[must_use]
    pub fn current_count(&self) -> u64 {
        self.counter.current()
    }

    /// Records a viewer joining and broadcasts the new count.
    ///
    /// Opens the watch gate when the count leaves zero. Returns the new
    /// count.
    pub fn viewer_joined(&self, viewer_id: ViewerId) -> u64 {
        let count = self.counter.join();
        if count == 1 {
            self.gate.set_watched(true);
            tracing::info!("first viewer connected, stream resumed");
        }
        let _ = self.event_bus.publish(PresenceEvent::count_changed(count));
        tracing::info!(%viewer_id, count, "viewer connected");
        count
    }

    /// Records a viewer leaving and broadcasts the new count.
    ///
    /// Closes the watch gate when the count reaches zero. Returns the
    /// new count, floored at zero.
    pub fn viewer_left(&self, viewer_id: ViewerId) -> u64 {
        let count = self.counter.leave();
        if count == 0 {
            self.gate.set_watched(false);
            tracing::info!("last viewer disconnected, stream idle");
        }
        let _ = self.event_bus.publish(PresenceEvent::count_changed(count));
        tracing::info!(%viewer_id, count, "viewer disconnected");
        count
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    fn service() -> PresenceService {
        PresenceService::new(WatchGate::new(), EventBus::new(16))
    }

    #[tokio::test]
    async fn join_publishes_count_change() {
        let service = service();
        let mut rx = service.event_bus().subscribe();

        let count = service.viewer_joined(ViewerId::new());
        assert_eq!(count, 1);

        let Ok(PresenceEvent::CountChanged { data, .. }) = rx.recv().await else {
            panic!("expected count_change event");
        };
        assert_eq!(data, 1);
    }

    #[tokio::test]
    async fn leave_publishes_floored_count() {
        let service = service();
        let mut rx = service.event_bus().subscribe();

        let count = service.viewer_left(ViewerId::new());
        assert_eq!(count, 0);

        let Ok(PresenceEvent::CountChanged { data, .. }) = rx.recv().await else {
            panic!("expected count_change event");
        };
        assert_eq!(data, 0);
    }

    #[test]
    fn gate_follows_count_transitions() {
        let service = service();
        assert!(!service.gate().is_watched());

        let a = ViewerId::new();
        let b = ViewerId::new();

        service.viewer_joined(a);
        assert!(service.gate().is_watched());

        service.viewer_joined(b);
        assert!(service.gate().is_watched());

        service.viewer_left(a);
        assert!(service.gate().is_watched());

        service.viewer_left(b);
        assert!(!service.gate().is_watched());
    }
}
