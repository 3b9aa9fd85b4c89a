//! Frame acquisition behind a trait seam.
//!
//! Camera capture, transcoding, or motion detection all sit behind
//! [`FrameSource`]; the gateway only ever sees JPEG-encoded bytes. The
//! shipped [`JpegDirSource`] cycles through the JPEG files of a
//! directory, which is enough to drive the feed on machines without a
//! capture device.

use std::path::{Path, PathBuf};

use axum::body::Bytes;

use crate::error::GatewayError;

/// Produces JPEG-encoded frames for the video feed.
pub trait FrameSource: Send {
    /// Returns the next frame as JPEG bytes.
    ///
    /// # Errors
    ///
    /// Returns a [`GatewayError`] when the frame cannot be produced;
    /// the frame pump logs the failure and retries.
    fn next_frame(&mut self) -> Result<Bytes, GatewayError>;
}

/// Cycles through the `.jpg`/`.jpeg` files of a directory, in name order.
#[derive(Debug)]
pub struct JpegDirSource {
    files: Vec<PathBuf>,
    next: usize,
}

impl JpegDirSource {
    /// Scans `dir` for JPEG files.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Io`] if the directory cannot be read and
    /// [`GatewayError::NoFrames`] if it contains no JPEG files.
    pub fn new(dir: &Path) -> Result<Self, GatewayError> {
        let mut files: Vec<PathBuf> = std::fs::read_dir(dir)?
            .filter_map(Result::ok)
            .map(|entry| entry.path())
            .filter(|path| {
                matches!(
                    path.extension().and_then(|ext| ext.to_str()),
                    Some("jpg" | "jpeg")
                )
            })
            .collect();
        files.sort();

        if files.is_empty() {
            return Err(GatewayError::NoFrames(dir.display().to_string()));
        }

        Ok(Self { files, next: 0 })
    }

    /// Returns the number of frames in the cycle.
    #[must_use]
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// Returns `true` if the source holds no frames. Never true after a
    /// successful [`JpegDirSource::new`].
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

impl FrameSource for JpegDirSource {
    fn next_frame(&mut self) -> Result<Bytes, GatewayError> {
        let path = self
            .files
            .get(self.next)
            .ok_or_else(|| GatewayError::Internal("frame index out of range".to_string()))?;
        let bytes = std::fs::read(path)?;
        self.next = (self.next + 1) % self.files.len();
        Ok(Bytes::from(bytes))
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    fn temp_frames_dir(names: &[(&str, &[u8])]) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("watchcast-frames-{}", uuid::Uuid::new_v4()));
        let Ok(()) = std::fs::create_dir_all(&dir) else {
            panic!("failed to create temp dir");
        };
        for (name, contents) in names {
            let Ok(()) = std::fs::write(dir.join(name), contents) else {
                panic!("failed to write frame file");
            };
        }
        dir
    }

    #[test]
    fn empty_dir_is_rejected() {
        let dir = temp_frames_dir(&[]);
        let result = JpegDirSource::new(&dir);
        assert!(matches!(result, Err(GatewayError::NoFrames(_))));
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn non_jpeg_files_are_ignored() {
        let dir = temp_frames_dir(&[("a.jpg", b"aa"), ("notes.txt", b"xx"), ("b.jpeg", b"bb")]);
        let Ok(source) = JpegDirSource::new(&dir) else {
            panic!("source creation failed");
        };
        assert_eq!(source.len(), 2);
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn frames_cycle_in_name_order() {
        let dir = temp_frames_dir(&[("1.jpg", b"one"), ("2.jpg", b"two")]);
        let Ok(mut source) = JpegDirSource::new(&dir) else {
            panic!("source creation failed");
        };

        let frames: Vec<Bytes> = (0..3)
            .map(|_| {
                let Ok(frame) = source.next_frame() else {
                    panic!("frame read failed");
                };
                frame
            })
            .collect();
        assert_eq!(frames, vec![
            Bytes::from_static(b"one"),
            Bytes::from_static(b"two"),
            Bytes::from_static(b"one"),
        ]);
        let _ = std::fs::remove_dir_all(&dir);
    }
}
