//! Type-safe viewer identifier.
//!
//! [`ViewerId`] wraps a [`uuid::Uuid`] (v4) so that a WebSocket viewer's
//! identity cannot be confused with other UUIDs floating through the
//! system. It exists for structured logging and diagnostics only; the
//! presence counter itself is anonymous.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Identity assigned to a WebSocket viewer for the lifetime of its
/// connection.
///
/// Generated at upgrade time and carried through every log line emitted
/// for that connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ViewerId(uuid::Uuid);

impl ViewerId {
    /// Creates a new random `ViewerId` (UUID v4).
    #[must_use]
    pub fn new() -> Self {
        Self(uuid::Uuid::new_v4())
    }

    /// Returns the inner [`uuid::Uuid`].
    #[must_use]
    pub const fn as_uuid(&self) -> &uuid::Uuid {
        &self.0
    }
}

impl Default for ViewerId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ViewerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn new_generates_unique_ids() {
        let a = ViewerId::new();
        let b = ViewerId::new();
        assert_ne!(a, b);
    }

    #[test]
    fn display_is_uuid_format() {
        let id = ViewerId::new();
        let s = format!("{id}");
        assert_eq!(s.len(), 36);
        assert!(s.contains('-'));
    }

    #[test]
    fn serde_is_transparent() {
        let id = ViewerId::new();
        let json = serde_json::to_string(&id).ok();
        let Some(json) = json else {
            panic!("serialization failed");
        };
        assert_eq!(json, format!("\"{id}\""));
    }
}
