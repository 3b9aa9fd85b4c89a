//! # watchcast-gateway
//!
//! WebSocket presence gateway and viewer client for a live MJPEG stream.
//!
//! The server counts connected viewers, broadcasts a `count_change`
//! event to every WebSocket client after each change, and only pumps
//! frames from its source while at least one viewer is watching. The
//! client side connects to the same channel and projects the latest
//! count onto a text display surface.
//!
//! ## Architecture
//!
//! ```text
//! Viewers (WebSocket, HTTP)
//!     │
//!     ├── REST Handlers (api/)
//!     ├── WS Handler (ws/)
//!     ├── MJPEG Feed (stream/)
//!     │
//!     ├── PresenceService (service/)
//!     ├── EventBus + WatchGate (domain/)
//!     │
//!     └── FrameSource (stream/)
//!
//! Viewer client (client/)
//!     EventChannel ── EventDispatcher ── CountDisplay ── DisplaySurface
//! ```

pub mod api;
pub mod app_state;
pub mod client;
pub mod config;
pub mod domain;
pub mod error;
pub mod service;
pub mod stream;
pub mod ws;
