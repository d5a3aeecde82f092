//! Capture trait definitions
//!
//! Platform-agnostic traits for camera sources and the streams they hand out.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while acquiring a camera stream
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CaptureError {
    /// Permission denied, or no usable camera present
    #[error("Camera unavailable: {0}")]
    DeviceUnavailable(String),
}

pub type CaptureResult<T> = Result<T, CaptureError>;

/// Information about a camera/webcam
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CameraInfo {
    /// Unique device ID
    pub id: String,

    /// Device name
    pub name: String,

    /// Supported resolutions
    pub supported_resolutions: Vec<Resolution>,
}

/// Video resolution
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resolution {
    pub width: u32,
    pub height: u32,
}

/// Constraints passed along with a stream request
///
/// The resolution is a hint; a source may deliver something else.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoConstraints {
    /// Preferred capture resolution
    pub ideal: Resolution,

    /// Device to open (None = default camera)
    pub device_id: Option<String>,
}

impl Default for VideoConstraints {
    fn default() -> Self {
        Self {
            ideal: Resolution {
                width: 1280,
                height: 720,
            },
            device_id: None,
        }
    }
}

/// Kind of a media track
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrackKind {
    Video,
}

/// Description of one track within a stream
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackInfo {
    pub id: String,
    pub kind: TrackKind,
    pub label: String,
    /// Whether the track still holds the device
    pub live: bool,
}

/// A live camera stream
///
/// The stream keeps the device busy until `stop_all` is called.
pub trait MediaStream: Send + Sync {
    /// Stream identifier
    fn id(&self) -> &str;

    /// Tracks carried by this stream
    fn tracks(&self) -> Vec<TrackInfo>;

    /// Stop every track and release the device. Must be idempotent.
    fn stop_all(&self);

    /// Resolution actually delivered by the device
    fn resolution(&self) -> Resolution;
}

/// Something that can hand out camera streams
#[async_trait]
pub trait CameraSource: Send + Sync {
    /// Enumerate cameras visible to this source
    fn list_cameras(&self) -> Vec<CameraInfo>;

    /// Request a video-only stream
    async fn acquire(&self, constraints: &VideoConstraints) -> CaptureResult<Box<dyn MediaStream>>;
}

/// Where a live stream is rendered (the preview element on the video page)
pub trait VideoSink: Send + Sync {
    /// Attach a stream for display
    fn bind(&self, stream: &dyn MediaStream);

    /// Detach whatever is currently displayed
    fn unbind(&self);
}

/// Sink that renders nothing
#[derive(Debug, Default)]
pub struct NullSink;

impl VideoSink for NullSink {
    fn bind(&self, stream: &dyn MediaStream) {
        tracing::debug!("Preview bound to stream {}", stream.id());
    }

    fn unbind(&self) {
        tracing::debug!("Preview unbound");
    }
}
