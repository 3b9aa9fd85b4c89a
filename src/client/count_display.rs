//! Live count projection.
//!
//! [`CountDisplay`] subscribes to the single event named
//! [`COUNT_EVENT`] and, on each delivery, writes the payload's `data`
//! field as text into its display surface, prefixed with a fixed label.
//! It keeps no count state of its own: the surface always shows exactly
//! the most recently delivered value.

use std::fmt;
use std::sync::Arc;

use super::channel::EventDispatcher;
use super::display::DisplaySurface;

/// Wire-level event name the projection subscribes to.
pub const COUNT_EVENT: &str = "count_change";

/// Label prefixed to the rendered count.
const LABEL: &str = "People watching: ";

/// Projects the latest received viewer count onto a display surface.
pub struct CountDisplay {
    surface: Arc<dyn DisplaySurface>,
}

impl CountDisplay {
    /// Creates the projection over the given surface.
    #[must_use]
    pub fn new(surface: Arc<dyn DisplaySurface>) -> Self {
        Self { surface }
    }

    /// Registers the projection's handler for [`COUNT_EVENT`].
    pub fn attach(self, events: &mut EventDispatcher) {
        events.on(COUNT_EVENT, move |payload| self.on_count_change(payload));
    }

    /// Inbound port: handles one `count_change` payload.
    ///
    /// Synchronous and non-suspending. A payload without a `data` field
    /// renders the `undefined` placeholder; no payload shape is an
    /// error.
    pub fn on_count_change(&self, payload: &serde_json::Value) {
        let rendered = render_value(payload.get("data"));
        self.surface.set_text(&format!("{LABEL}{rendered}"));
    }
}

impl fmt::Debug for CountDisplay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CountDisplay")
            .field("surface", &self.surface.id())
            .finish()
    }
}

/// Textual rendering of the payload field.
///
/// Strings render without quotes, everything else through its JSON
/// text, and an absent field as the `undefined` placeholder.
fn render_value(value: Option<&serde_json::Value>) -> String {
    match value {
        None => "undefined".to_string(),
        Some(serde_json::Value::String(text)) => text.clone(),
        Some(other) => other.to_string(),
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::client::display::{COUNT_SURFACE_ID, TextSurface};

    fn display() -> (CountDisplay, Arc<TextSurface>) {
        let surface = Arc::new(TextSurface::new(COUNT_SURFACE_ID));
        (CountDisplay::new(Arc::<TextSurface>::clone(&surface)), surface)
    }

    #[test]
    fn renders_numeric_count() {
        let (display, surface) = display();
        display.on_count_change(&json!({ "data": 0 }));
        assert_eq!(surface.text(), "People watching: 0");
        display.on_count_change(&json!({ "data": 42 }));
        assert_eq!(surface.text(), "People watching: 42");
    }

    #[test]
    fn renders_string_count_without_quotes() {
        let (display, surface) = display();
        display.on_count_change(&json!({ "data": "5" }));
        assert_eq!(surface.text(), "People watching: 5");
    }

    #[test]
    fn missing_field_renders_placeholder() {
        let (display, surface) = display();
        display.on_count_change(&json!({}));
        assert_eq!(surface.text(), "People watching: undefined");
    }

    #[test]
    fn null_field_renders_null() {
        let (display, surface) = display();
        display.on_count_change(&json!({ "data": null }));
        assert_eq!(surface.text(), "People watching: null");
    }

    #[test]
    fn redelivery_is_idempotent() {
        let (display, surface) = display();
        display.on_count_change(&json!({ "data": 7 }));
        let first = surface.text();
        display.on_count_change(&json!({ "data": 7 }));
        assert_eq!(surface.text(), first);
    }

    #[test]
    fn latest_delivery_wins() {
        let (display, surface) = display();
        for value in [1, 2, 3] {
            display.on_count_change(&json!({ "data": value }));
        }
        assert_eq!(surface.text(), "People watching: 3");
    }

    #[test]
    fn attached_handler_receives_dispatched_frames() {
        let surface = Arc::new(TextSurface::new(COUNT_SURFACE_ID));
        let mut events = EventDispatcher::new();
        CountDisplay::new(Arc::<TextSurface>::clone(&surface)).attach(&mut events);

        let frame = json!({
            "id": "1",
            "event": "count_change",
            "timestamp": "2026-01-01T00:00:00Z",
            "payload": { "data": 12 }
        });
        let Ok(text) = serde_json::to_string(&frame) else {
            panic!("frame serialization failed");
        };
        assert!(events.dispatch(&text));
        assert_eq!(surface.text(), "People watching: 12");
    }
}
