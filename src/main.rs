//! watchcast-gateway server entry point.
//!
//! Starts the Axum HTTP server with the presence WebSocket, the MJPEG
//! feed, and the REST endpoints.

use std::sync::Arc;

use axum::Router;
use axum::routing::get;
use tokio::sync::broadcast;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use watchcast_gateway::api;
use watchcast_gateway::app_state::AppState;
use watchcast_gateway::config::GatewayConfig;
use watchcast_gateway::domain::{EventBus, WatchGate};
use watchcast_gateway::service::PresenceService;
use watchcast_gateway::stream::{self, JpegDirSource};
use watchcast_gateway::ws::handler::ws_handler;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Load configuration
    let config = GatewayConfig::from_env()?;
    tracing::info!(addr = %config.listen_addr, "starting watchcast-gateway");

    // Build domain layer
    let gate = WatchGate::new();
    let event_bus = EventBus::new(config.event_bus_capacity);

    // Build service layer
    let presence = Arc::new(PresenceService::new(gate.clone(), event_bus.clone()));

    // Frame pipeline, enabled only when a frames directory is configured
    let (frames, _) = broadcast::channel(config.frame_buffer_frames.max(1));
    let stream_enabled = match &config.stream_frames_dir {
        Some(dir) => {
            let source = JpegDirSource::new(dir)?;
            tracing::info!(
                dir = %dir.display(),
                frames = source.len(),
                fps = config.stream_fps,
                "frame pipeline enabled"
            );
            let _pump = stream::spawn_frame_pump(
                Box::new(source),
                gate.clone(),
                frames.clone(),
                config.stream_fps,
            );
            true
        }
        None => {
            tracing::info!("no frames directory configured, /video_feed disabled");
            false
        }
    };

    // Build application state
    let app_state = AppState {
        presence,
        event_bus,
        frames,
        stream_enabled,
    };

    // Build router
    let app = Router::new()
        .merge(api::build_router())
        .route("/ws", get(ws_handler))
        .route("/video_feed", get(stream::video_feed))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(app_state);

    // Start server
    let listener = tokio::net::TcpListener::bind(config.listen_addr).await?;
    tracing::info!(addr = %config.listen_addr, "server listening");

    axum::serve(listener, app).await?;

    Ok(())
}
