//! MJPEG feed: the frame pump task and the `/video_feed` endpoint.
//!
//! The pump reads frames from a [`FrameSource`] only while the
//! [`WatchGate`] is open and broadcasts them; `/video_feed` wraps each
//! broadcast frame as one part of a `multipart/x-mixed-replace`
//! response, the format browsers render as a live image.

use std::time::Duration;

use axum::body::{Body, Bytes};
use axum::extract::State;
use axum::http::header;
use axum::response::Response;
use tokio::sync::broadcast;

use super::source::FrameSource;
use crate::app_state::AppState;
use crate::domain::WatchGate;
use crate::error::GatewayError;

/// Multipart boundary token used by the feed.
pub const BOUNDARY: &str = "frame";

/// Wraps one JPEG frame as a multipart part.
#[must_use]
pub fn multipart_chunk(jpeg: &Bytes) -> Bytes {
    let header = format!(
        "--{BOUNDARY}\r\nContent-Type: image/jpeg\r\nContent-Length: {}\r\n\r\n",
        jpeg.len()
    );
    let mut buf = Vec::with_capacity(header.len() + jpeg.len() + 2);
    buf.extend_from_slice(header.as_bytes());
    buf.extend_from_slice(jpeg);
    buf.extend_from_slice(b"\r\n");
    Bytes::from(buf)
}

/// Spawns the frame pump task.
///
/// The pump parks on the gate whenever nobody is watching, then reads
/// frames at the configured rate and broadcasts them. Source failures
/// are logged and retried after a pause.
pub fn spawn_frame_pump(
    mut source: Box<dyn FrameSource>,
    gate: WatchGate,
    frames: broadcast::Sender<Bytes>,
    fps: u32,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let period = Duration::from_secs_f64(1.0 / f64::from(fps.max(1)));
        let mut ticker = tokio::time::interval(period);
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

        loop {
            gate.watched().await;
            ticker.tick().await;
            match source.next_frame() {
                Ok(frame) => {
                    let _ = frames.send(frame);
                }
                Err(err) => {
                    tracing::warn!(error = %err, "frame source failed");
                    tokio::time::sleep(Duration::from_secs(1)).await;
                }
            }
        }
    })
}

/// `GET /video_feed` — live MJPEG stream.
///
/// Streams every broadcast frame to the client; lagging clients skip
/// dropped frames rather than stalling the feed.
///
/// # Errors
///
/// Returns [`GatewayError::StreamDisabled`] when no frame source is
/// configured.
#[utoipa::path(
    get,
    path = "/video_feed",
    tag = "Stream",
    summary = "Live MJPEG stream",
    description = "Multipart JPEG stream of the live feed. Only produces frames while at least one viewer is connected.",
    responses(
        (status = 200, description = "MJPEG multipart stream", content_type = "multipart/x-mixed-replace"),
        (status = 503, description = "Frame pipeline not configured"),
    )
)]
pub async fn video_feed(State(state): State<AppState>) -> Result<Response, GatewayError> {
    if !state.stream_enabled {
        return Err(GatewayError::StreamDisabled);
    }

    let rx = state.frames.subscribe();
    let stream = futures_util::stream::unfold(rx, |mut rx| async move {
        loop {
            match rx.recv().await {
                Ok(frame) => {
                    let chunk: Result<Bytes, std::convert::Infallible> =
                        Ok(multipart_chunk(&frame));
                    return Some((chunk, rx));
                }
                Err(broadcast::error::RecvError::Lagged(n)) => {
                    tracing::debug!(lagged = n, "video feed skipped frames");
                }
                Err(broadcast::error::RecvError::Closed) => return None,
            }
        }
    });

    Response::builder()
        .header(
            header::CONTENT_TYPE,
            format!("multipart/x-mixed-replace; boundary={BOUNDARY}"),
        )
        .body(Body::from_stream(stream))
        .map_err(|err| GatewayError::Internal(err.to_string()))
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn chunk_wraps_frame_with_boundary_and_length() {
        let chunk = multipart_chunk(&Bytes::from_static(b"jpegdata"));
        let text = String::from_utf8_lossy(&chunk);
        assert!(text.starts_with("--frame\r\nContent-Type: image/jpeg\r\nContent-Length: 8\r\n\r\n"));
        assert!(text.ends_with("jpegdata\r\n"));
    }

    struct CountingSource(u8);

    impl FrameSource for CountingSource {
        fn next_frame(&mut self) -> Result<Bytes, GatewayError> {
            self.0 = self.0.wrapping_add(1);
            Ok(Bytes::from(vec![self.0]))
        }
    }

    #[tokio::test]
    async fn pump_broadcasts_while_watched() {
        let gate = WatchGate::new();
        let (frames, mut rx) = broadcast::channel(8);
        let pump = spawn_frame_pump(Box::new(CountingSource(0)), gate.clone(), frames, 100);

        gate.set_watched(true);
        let frame = tokio::time::timeout(Duration::from_secs(2), rx.recv()).await;
        let Ok(Ok(frame)) = frame else {
            panic!("expected a frame while watched");
        };
        assert!(!frame.is_empty());

        pump.abort();
    }

    #[tokio::test]
    async fn pump_idles_while_unwatched() {
        let gate = WatchGate::new();
        let (frames, mut rx) = broadcast::channel(8);
        let pump = spawn_frame_pump(Box::new(CountingSource(0)), gate.clone(), frames, 100);

        let result = tokio::time::timeout(Duration::from_millis(200), rx.recv()).await;
        assert!(result.is_err(), "no frames should flow while unwatched");

        pump.abort();
    }
}
