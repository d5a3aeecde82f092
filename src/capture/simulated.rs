//! Simulated camera source
//!
//! Hands out streams that hold no real device. Used by the demo binary when
//! no native backend is compiled in, and by tests to observe stream lifetimes.

use super::traits::{
    CameraInfo, CameraSource, CaptureError, CaptureResult, MediaStream, Resolution, TrackInfo,
    TrackKind, VideoConstraints,
};
use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Camera source backed by nothing
#[derive(Clone)]
pub struct SimulatedCamera {
    /// Whether the "user" grants access
    permission_granted: Arc<AtomicBool>,

    /// Number of streams handed out and not yet stopped
    live_streams: Arc<AtomicUsize>,

    /// Number of acquire calls, successful or not
    requests: Arc<AtomicUsize>,

    /// Time spent "waiting for the permission prompt"
    latency: Duration,
}

impl SimulatedCamera {
    /// Create a source that grants access immediately
    pub fn new() -> Self {
        Self {
            permission_granted: Arc::new(AtomicBool::new(true)),
            live_streams: Arc::new(AtomicUsize::new(0)),
            requests: Arc::new(AtomicUsize::new(0)),
            latency: Duration::ZERO,
        }
    }

    /// Create a source that always refuses access
    pub fn denied() -> Self {
        let camera = Self::new();
        camera.set_permission(false);
        camera
    }

    /// Delay every acquisition by `latency`
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    pub fn set_permission(&self, granted: bool) {
        self.permission_granted.store(granted, Ordering::SeqCst);
    }

    /// Streams handed out and not yet stopped
    pub fn live_streams(&self) -> usize {
        self.live_streams.load(Ordering::SeqCst)
    }

    /// Total acquire calls so far
    pub fn requests(&self) -> usize {
        self.requests.load(Ordering::SeqCst)
    }
}

impl Default for SimulatedCamera {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CameraSource for SimulatedCamera {
    fn list_cameras(&self) -> Vec<CameraInfo> {
        vec![CameraInfo {
            id: "simulated-0".to_string(),
            name: "Simulated Camera".to_string(),
            supported_resolutions: vec![
                Resolution {
                    width: 1280,
                    height: 720,
                },
                Resolution {
                    width: 640,
                    height: 480,
                },
            ],
        }]
    }

    async fn acquire(&self, constraints: &VideoConstraints) -> CaptureResult<Box<dyn MediaStream>> {
        self.requests.fetch_add(1, Ordering::SeqCst);

        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }

        if !self.permission_granted.load(Ordering::SeqCst) {
            return Err(CaptureError::DeviceUnavailable(
                "Permission denied".to_string(),
            ));
        }

        if let Some(device_id) = &constraints.device_id {
            if device_id != "simulated-0" {
                return Err(CaptureError::DeviceUnavailable(format!(
                    "No camera with id {device_id}"
                )));
            }
        }

        self.live_streams.fetch_add(1, Ordering::SeqCst);
        let stream = SimulatedStream {
            id: uuid::Uuid::new_v4().to_string(),
            resolution: constraints.ideal,
            stopped: AtomicBool::new(false),
            live_streams: self.live_streams.clone(),
        };

        tracing::debug!(
            "Simulated stream {} opened at {}x{}",
            stream.id,
            stream.resolution.width,
            stream.resolution.height
        );
        Ok(Box::new(stream))
    }
}

/// Stream handed out by [`SimulatedCamera`]
struct SimulatedStream {
    id: String,
    resolution: Resolution,
    stopped: AtomicBool,
    live_streams: Arc<AtomicUsize>,
}

impl MediaStream for SimulatedStream {
    fn id(&self) -> &str {
        &self.id
    }

    fn tracks(&self) -> Vec<TrackInfo> {
        vec![TrackInfo {
            id: format!("{}-video", self.id),
            kind: TrackKind::Video,
            label: "Simulated Camera".to_string(),
            live: !self.stopped.load(Ordering::SeqCst),
        }]
    }

    fn stop_all(&self) {
        if !self.stopped.swap(true, Ordering::SeqCst) {
            self.live_streams.fetch_sub(1, Ordering::SeqCst);
            tracing::debug!("Simulated stream {} stopped", self.id);
        }
    }

    fn resolution(&self) -> Resolution {
        self.resolution
    }
}
