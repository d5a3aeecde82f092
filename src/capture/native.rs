//! Native webcam access using nokhwa
//!
//! The camera is owned by a dedicated thread that drains frames until the
//! stream is stopped. Frames are discarded; the posture detector is simulated.

use super::traits::{
    CameraInfo, CameraSource, CaptureError, CaptureResult, MediaStream, Resolution, TrackInfo,
    TrackKind, VideoConstraints,
};
use async_trait::async_trait;
use nokhwa::pixel_format::RgbAFormat;
use nokhwa::utils::{ApiBackend, CameraIndex, RequestedFormat, RequestedFormatType};
use nokhwa::Camera;
use parking_lot::Mutex as ParkingMutex;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::oneshot;

/// Camera source backed by the platform's native capture API
#[derive(Debug, Default, Clone)]
pub struct NativeCamera;

impl NativeCamera {
    pub fn new() -> Self {
        Self
    }

    fn camera_index(device_id: Option<&str>) -> CameraIndex {
        match device_id {
            Some(id) => {
                if let Ok(idx) = id.parse::<u32>() {
                    CameraIndex::Index(idx)
                } else {
                    CameraIndex::String(id.to_string())
                }
            }
            None => CameraIndex::Index(0),
        }
    }
}

#[async_trait]
impl CameraSource for NativeCamera {
    fn list_cameras(&self) -> Vec<CameraInfo> {
        match nokhwa::query(ApiBackend::Auto) {
            Ok(cameras) => cameras
                .into_iter()
                .map(|info| {
                    let id = match info.index() {
                        CameraIndex::Index(i) => i.to_string(),
                        CameraIndex::String(s) => s.to_string(),
                    };

                    CameraInfo {
                        id,
                        name: info.human_name().to_string(),
                        supported_resolutions: vec![
                            Resolution {
                                width: 1920,
                                height: 1080,
                            },
                            Resolution {
                                width: 1280,
                                height: 720,
                            },
                            Resolution {
                                width: 640,
                                height: 480,
                            },
                        ],
                    }
                })
                .collect(),
            Err(e) => {
                tracing::warn!("Failed to enumerate cameras: {:?}", e);
                Vec::new()
            }
        }
    }

    async fn acquire(&self, constraints: &VideoConstraints) -> CaptureResult<Box<dyn MediaStream>> {
        if self.list_cameras().is_empty() {
            return Err(CaptureError::DeviceUnavailable(
                "No cameras found".to_string(),
            ));
        }

        let camera_index = Self::camera_index(constraints.device_id.as_deref());
        let ideal = constraints.ideal;
        let running = Arc::new(AtomicBool::new(true));
        let (opened_tx, opened_rx) = oneshot::channel::<CaptureResult<Resolution>>();

        let thread_running = running.clone();
        let handle = std::thread::spawn(move || {
            let format = RequestedFormat::new::<RgbAFormat>(RequestedFormatType::HighestResolution(
                nokhwa::utils::Resolution::new(ideal.width, ideal.height),
            ));

            let mut camera = match Camera::new(camera_index.clone(), format) {
                Ok(c) => c,
                Err(e) => {
                    let _ = opened_tx.send(Err(CaptureError::DeviceUnavailable(format!(
                        "Failed to open camera {camera_index:?}: {e}"
                    ))));
                    return;
                }
            };

            if let Err(e) = camera.open_stream() {
                let _ = opened_tx.send(Err(CaptureError::DeviceUnavailable(format!(
                    "Failed to open camera stream: {e}"
                ))));
                return;
            }

            let actual = camera.camera_format().resolution();
            let _ = opened_tx.send(Ok(Resolution {
                width: actual.width(),
                height: actual.height(),
            }));

            while thread_running.load(Ordering::SeqCst) {
                // Blocks until the camera delivers the next frame
                if let Err(e) = camera.frame() {
                    tracing::debug!("Failed to capture frame: {:?}", e);
                }
            }

            if let Err(e) = camera.stop_stream() {
                tracing::warn!("Error stopping camera stream: {:?}", e);
            }
            tracing::info!("Webcam capture thread stopped");
        });

        let resolution = match opened_rx.await {
            Ok(result) => result?,
            Err(_) => {
                return Err(CaptureError::DeviceUnavailable(
                    "Capture thread exited before opening the camera".to_string(),
                ))
            }
        };

        tracing::info!(
            "Webcam opened: {}x{} (requested {}x{})",
            resolution.width,
            resolution.height,
            ideal.width,
            ideal.height
        );

        Ok(Box::new(NativeStream {
            id: uuid::Uuid::new_v4().to_string(),
            resolution,
            running,
            capture_thread: ParkingMutex::new(Some(handle)),
        }))
    }
}

/// Stream owned by a capture thread
struct NativeStream {
    id: String,
    resolution: Resolution,
    running: Arc<AtomicBool>,
    capture_thread: ParkingMutex<Option<std::thread::JoinHandle<()>>>,
}

impl MediaStream for NativeStream {
    fn id(&self) -> &str {
        &self.id
    }

    fn tracks(&self) -> Vec<TrackInfo> {
        vec![TrackInfo {
            id: format!("{}-video", self.id),
            kind: TrackKind::Video,
            label: "Webcam".to_string(),
            live: self.running.load(Ordering::SeqCst),
        }]
    }

    fn stop_all(&self) {
        self.running.store(false, Ordering::SeqCst);

        // Wait for the capture thread so the device is free when we return
        if let Some(handle) = self.capture_thread.lock().take() {
            let _ = handle.join();
        }
    }

    fn resolution(&self) -> Resolution {
        self.resolution
    }
}
