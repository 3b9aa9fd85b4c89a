//! Terminal viewer for the watchcast gateway.
//!
//! Connects to the presence channel, subscribes to `count_change`, and
//! prints the live count line on every update.

use std::sync::{Arc, Mutex};

use tracing_subscriber::EnvFilter;

use watchcast_gateway::client::{COUNT_SURFACE_ID, CountDisplay, DisplaySurface, EventChannel};

/// Display surface that mirrors every update to stdout.
#[derive(Debug)]
struct TermSurface {
    id: String,
    last: Mutex<String>,
}

impl TermSurface {
    fn new(id: &str) -> Self {
        Self {
            id: id.to_string(),
            last: Mutex::new(String::new()),
        }
    }
}

impl DisplaySurface for TermSurface {
    fn id(&self) -> &str {
        &self.id
    }

    fn set_text(&self, text: &str) {
        println!("{text}");
        if let Ok(mut last) = self.last.lock() {
            text.clone_into(&mut last);
        }
    }

    fn text(&self) -> String {
        self.last
            .lock()
            .map(|last| last.clone())
            .unwrap_or_default()
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let url = std::env::var("GATEWAY_WS_URL")
        .unwrap_or_else(|_| "ws://127.0.0.1:3000/ws".to_string());
    tracing::info!(%url, "connecting to gateway");

    let mut channel = EventChannel::connect(&url).await?;
    let surface = Arc::new(TermSurface::new(COUNT_SURFACE_ID));
    CountDisplay::new(surface).attach(channel.events_mut());

    channel.run().await?;
    Ok(())
}
