//! Client side of the presence channel.
//!
//! [`EventChannel`] connects to the gateway's WebSocket endpoint and
//! feeds incoming event frames to an [`EventDispatcher`], which routes
//! each frame's payload to the handler registered for its event name.
//! There is no retry or reconnect: transport failures end the run loop
//! and are returned to the caller.

use std::collections::HashMap;
use std::fmt;

use futures_util::{SinkExt, StreamExt};
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, connect_async};

use super::ClientError;
use crate::ws::messages::EventFrame;

type Handler = Box<dyn FnMut(&serde_json::Value) + Send>;

/// Routes named events to registered handlers.
#[derive(Default)]
pub struct EventDispatcher {
    handlers: HashMap<String, Handler>,
}

impl EventDispatcher {
    /// Creates a dispatcher with no handlers.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a handler for the given event name, replacing any
    /// previous handler for that name.
    pub fn on<F>(&mut self, event: impl Into<String>, handler: F)
    where
        F: FnMut(&serde_json::Value) + Send + 'static,
    {
        self.handlers.insert(event.into(), Box::new(handler));
    }

    /// Parses a wire frame and invokes the matching handler.
    ///
    /// Returns `true` if a handler ran. Unparseable frames and events
    /// with no registered handler are logged and dropped.
    pub fn dispatch(&mut self, text: &str) -> bool {
        let Ok(frame) = serde_json::from_str::<EventFrame>(text) else {
            tracing::debug!(len = text.len(), "ignoring unparseable frame");
            return false;
        };
        match self.handlers.get_mut(&frame.event) {
            Some(handler) => {
                handler(&frame.payload);
                true
            }
            None => {
                tracing::trace!(event = %frame.event, "no handler registered");
                false
            }
        }
    }
}

impl fmt::Debug for EventDispatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventDispatcher")
            .field("events", &self.handlers.keys().collect::<Vec<_>>())
            .finish()
    }
}

/// A connected presence channel.
pub struct EventChannel {
    stream: WebSocketStream<MaybeTlsStream<tokio::net::TcpStream>>,
    events: EventDispatcher,
}

impl EventChannel {
    /// Connects to the gateway's WebSocket endpoint.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Transport`] if the handshake fails.
    pub async fn connect(url: &str) -> Result<Self, ClientError> {
        let (stream, _response) = connect_async(url).await?;
        tracing::debug!(url, "event channel connected");
        Ok(Self {
            stream,
            events: EventDispatcher::new(),
        })
    }

    /// Registers a handler for the given event name.
    pub fn on<F>(&mut self, event: impl Into<String>, handler: F)
    where
        F: FnMut(&serde_json::Value) + Send + 'static,
    {
        self.events.on(event, handler);
    }

    /// Returns the dispatcher, for components that attach themselves.
    pub fn events_mut(&mut self) -> &mut EventDispatcher {
        &mut self.events
    }

    /// Reads frames until the connection closes, dispatching each text
    /// frame to its handler.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Transport`] when the connection fails;
    /// a clean close from the server returns `Ok(())`.
    pub async fn run(mut self) -> Result<(), ClientError> {
        while let Some(message) = self.stream.next().await {
            match message? {
                Message::Text(text) => {
                    self.events.dispatch(text.as_str());
                }
                Message::Ping(payload) => {
                    self.stream.send(Message::Pong(payload)).await?;
                }
                Message::Close(_) => break,
                _ => {}
            }
        }
        tracing::debug!("event channel closed");
        Ok(())
    }
}

impl fmt::Debug for EventChannel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventChannel")
            .field("events", &self.events)
            .finish_non_exhaustive()
    }
}
