//! Display surface abstraction.
//!
//! The viewer renders into a [`DisplaySurface`] handed to it at
//! construction time instead of reaching for an ambient global. The
//! count projection writes to a surface with the fixed identifier
//! [`COUNT_SURFACE_ID`].

use std::sync::Mutex;

/// Identifier of the surface the count projection writes to.
pub const COUNT_SURFACE_ID: &str = "count";

/// A text region the client can write into.
///
/// The surface's text content is the only observable output of the
/// components that hold one.
pub trait DisplaySurface: Send + Sync {
    /// Returns the fixed identifier of this surface.
    fn id(&self) -> &str;

    /// Replaces the surface's text content.
    fn set_text(&self, text: &str);

    /// Returns the current text content.
    fn text(&self) -> String;
}

/// In-memory display surface.
#[derive(Debug)]
pub struct TextSurface {
    id: String,
    content: Mutex<String>,
}

impl TextSurface {
    /// Creates an empty surface with the given identifier.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            content: Mutex::new(String::new()),
        }
    }
}

impl DisplaySurface for TextSurface {
    fn id(&self) -> &str {
        &self.id
    }

    fn set_text(&self, text: &str) {
        if let Ok(mut content) = self.content.lock() {
            text.clone_into(&mut content);
        }
    }

    fn text(&self) -> String {
        self.content
            .lock()
            .map(|content| content.clone())
            .unwrap_or_default()
    }
}
