//! Viewer client: event channel, display surfaces, and the count
//! projection.
//!
//! A viewer connects an [`EventChannel`] to the gateway, attaches a
//! [`CountDisplay`] over a [`DisplaySurface`], and runs the channel;
//! every `count_change` event updates the surface's text.

pub mod channel;
pub mod count_display;
pub mod display;

pub use channel::{EventChannel, EventDispatcher};
pub use count_display::{COUNT_EVENT, CountDisplay};
pub use display::{COUNT_SURFACE_ID, DisplaySurface, TextSurface};

/// Client-side errors.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// Failure in the underlying WebSocket transport.
    #[error("websocket transport error: {0}")]
    Transport(#[from] tokio_tungstenite::tungstenite::Error),
}
