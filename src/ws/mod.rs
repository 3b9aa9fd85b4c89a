//! WebSocket layer: connection handling and wire frames.
//!
//! The WebSocket endpoint at `/ws` is the presence channel: connecting
//! counts as a viewer joining, disconnecting as leaving, and every
//! presence change is pushed to all connected clients as a named event
//! frame.

pub mod connection;
pub mod handler;
pub mod messages;
