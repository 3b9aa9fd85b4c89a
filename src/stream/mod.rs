//! Frame pipeline: source seam, pump task, and the MJPEG endpoint.

pub mod mjpeg;
pub mod source;

pub use mjpeg::{spawn_frame_pump, video_feed};
pub use source::{FrameSource, JpegDirSource};
