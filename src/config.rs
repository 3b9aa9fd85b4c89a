//! Gateway configuration loaded from environment variables.
//!
//! Follows 12-factor style: all settings come from environment variables
//! (or a `.env` file via `dotenvy`), with defaults for everything except
//! the frames directory, which is optional and disables the frame
//! pipeline when unset.

use std::net::SocketAddr;
use std::path::PathBuf;

/// Top-level gateway configuration.
///
/// Loaded once at startup via [`GatewayConfig::from_env`].
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// Socket address to bind the HTTP server to (e.g. `0.0.0.0:3000`).
    pub listen_addr: SocketAddr,

    /// Capacity of the presence event broadcast channel.
    pub event_bus_capacity: usize,

    /// Directory of JPEG frames to serve. `None` disables `/video_feed`.
    pub stream_frames_dir: Option<PathBuf>,

    /// Frames per second produced by the frame pump.
    pub stream_fps: u32,

    /// Capacity of the frame broadcast channel, in frames.
    pub frame_buffer_frames: usize,
}

impl GatewayConfig {
    /// Loads configuration from environment variables.
    ///
    /// Falls back to sensible defaults when a variable is not set.
    /// Calls `dotenvy::dotenv().ok()` to optionally load a `.env` file.
    ///
    /// # Errors
    ///
    /// Returns an error if `LISTEN_ADDR` is set but cannot be parsed as
    /// a [`SocketAddr`].
    pub fn from_env() -> Result<Self, Box<dyn std::error::Error>> {
        dotenvy::dotenv().ok();

        let listen_addr: SocketAddr = std::env::var("LISTEN_ADDR")
            .unwrap_or_else(|_| "0.0.0.0:3000".to_string())
            .parse()?;

        let event_bus_capacity = parse_env("EVENT_BUS_CAPACITY", 256);

        let stream_frames_dir = std::env::var("STREAM_FRAMES_DIR").ok().map(PathBuf::from);
        let stream_fps = parse_env("STREAM_FPS", 30);
        let frame_buffer_frames = parse_env("FRAME_BUFFER_FRAMES", 8);

        Ok(Self {
            listen_addr,
            event_bus_capacity,
            stream_frames_dir,
            stream_fps,
            frame_buffer_frames,
        })
    }
}

/// Parses an environment variable as `T`, returning `default` on missing
/// or invalid values.
fn parse_env<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
