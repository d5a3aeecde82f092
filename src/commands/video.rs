//! Video page commands
//!
//! Camera failures never escape this layer: they are logged and surfaced in
//! the returned view while the camera stays inactive.
//!
//! Only start and stop take the controller lock. Everything else reads the
//! session through its [`SessionMonitor`], so a pending permission prompt does
//! not stall the page.

use crate::capture::{CameraInfo, CameraSource, NullSink};
use crate::posture::{BadgeVariant, PostureStatus, RandomStatusSource};
use crate::session::{
    alert_message, CameraSessionController, DetectionControls, SessionConfig, SessionMonitor,
};
use crate::utils::{AppError, ErrorResponse};
use parking_lot::Mutex as ParkingMutex;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::Mutex;

/// Tips listed next to the live feed
pub const POSTURE_TIPS: [&str; 5] = [
    "Keep your back straight against the chair",
    "Feet flat on the floor",
    "Monitor at eye level",
    "Shoulders relaxed",
    "Take breaks every 30 minutes",
];

/// Application state for the video page
pub struct VideoState {
    pub controller: Arc<Mutex<CameraSessionController>>,
    monitor: SessionMonitor,
    camera: Arc<dyn CameraSource>,

    /// Last failed start, cleared on success
    last_error: ParkingMutex<Option<ErrorResponse>>,
}

impl VideoState {
    pub fn new(controller: CameraSessionController) -> Self {
        Self {
            monitor: controller.monitor(),
            camera: controller.camera().clone(),
            controller: Arc::new(Mutex::new(controller)),
            last_error: ParkingMutex::new(None),
        }
    }

    /// Controller over the platform camera with the random detector
    pub fn with_camera(camera: Arc<dyn CameraSource>) -> Self {
        Self::new(CameraSessionController::new(
            SessionConfig::default(),
            camera,
            Arc::new(NullSink),
            Box::new(RandomStatusSource::from_entropy()),
        ))
    }

    pub fn monitor(&self) -> &SessionMonitor {
        &self.monitor
    }

    pub fn last_error(&self) -> Option<ErrorResponse> {
        self.last_error.lock().clone()
    }
}

impl Default for VideoState {
    fn default() -> Self {
        Self::with_camera(default_camera())
    }
}

/// Native webcam when compiled in, simulated otherwise
pub fn default_camera() -> Arc<dyn CameraSource> {
    #[cfg(feature = "native-camera")]
    {
        Arc::new(crate::capture::NativeCamera::new())
    }

    #[cfg(not(feature = "native-camera"))]
    {
        Arc::new(crate::capture::SimulatedCamera::new())
    }
}

/// Everything the video page renders
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoView {
    pub streaming: bool,
    pub status: PostureStatus,
    pub status_text: String,
    pub badge: BadgeVariant,

    /// Banner text while the alert is visible
    pub alert: Option<String>,

    pub controls: DetectionControls,
    pub monitoring_text: String,
    pub last_error: Option<ErrorResponse>,
    pub tips: Vec<String>,
}

fn render(state: &VideoState) -> VideoView {
    let snapshot = state.monitor.snapshot();
    let streaming = snapshot.is_active();

    VideoView {
        streaming,
        status: snapshot.status,
        status_text: snapshot.status.label().to_string(),
        badge: snapshot.status.badge(),
        alert: snapshot.alert.map(alert_message),
        controls: snapshot.controls,
        monitoring_text: if streaming {
            "Monitoring active".to_string()
        } else {
            "Monitoring paused".to_string()
        },
        last_error: state.last_error(),
        tips: POSTURE_TIPS.iter().map(|t| t.to_string()).collect(),
    }
}

/// Start the camera
pub async fn start_camera(state: &VideoState) -> VideoView {
    let result = state.controller.lock().await.start().await;

    match result {
        Ok(()) => {
            *state.last_error.lock() = None;
        }
        Err(e) => {
            tracing::error!("Error accessing camera: {}", e);
            *state.last_error.lock() = Some(AppError::from(e).into());
        }
    }

    render(state)
}

/// Stop the camera
pub async fn stop_camera(state: &VideoState) -> VideoView {
    state.controller.lock().await.stop().await;
    render(state)
}

/// Start when stopped, stop when streaming
pub async fn toggle_camera(state: &VideoState) -> VideoView {
    if state.monitor.is_active() {
        stop_camera(state).await
    } else {
        start_camera(state).await
    }
}

/// Get the current video page state
pub async fn get_video_state(state: &VideoState) -> VideoView {
    render(state)
}

pub async fn set_alerts_enabled(state: &VideoState, enabled: bool) -> VideoView {
    state.monitor.set_alerts_enabled(enabled);
    render(state)
}

pub async fn set_audio_enabled(state: &VideoState, enabled: bool) -> VideoView {
    state.monitor.set_audio_enabled(enabled);
    render(state)
}

/// Get list of available cameras
pub async fn get_cameras(state: &VideoState) -> Vec<CameraInfo> {
    state.camera.list_cameras()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capture::SimulatedCamera;
    use crate::posture::ScriptedStatusSource;
    use std::time::Duration;

    fn state(camera: &SimulatedCamera, script: Vec<PostureStatus>) -> VideoState {
        VideoState::new(CameraSessionController::new(
            SessionConfig::default(),
            Arc::new(camera.clone()),
            Arc::new(NullSink),
            Box::new(ScriptedStatusSource::new(script)),
        ))
    }

    #[tokio::test]
    async fn test_denied_camera_is_surfaced() {
        let camera = SimulatedCamera::denied();
        let state = state(&camera, vec![]);

        let view = start_camera(&state).await;
        assert!(!view.streaming);
        assert_eq!(view.monitoring_text, "Monitoring paused");
        let error = view.last_error.unwrap();
        assert_eq!(error.code, "DEVICE_UNAVAILABLE");
        assert!(error.message.contains("Permission denied"));

        // Granting access and retrying clears the error
        camera.set_permission(true);
        let view = start_camera(&state).await;
        assert!(view.streaming);
        assert!(view.last_error.is_none());

        stop_camera(&state).await;
        assert_eq!(camera.live_streams(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_alert_text_and_toggle() {
        let camera = SimulatedCamera::new();
        let state = state(&camera, vec![PostureStatus::Warning]);

        let view = toggle_camera(&state).await;
        assert!(view.streaming);
        assert_eq!(view.status_text, "Good Posture");
        assert_eq!(view.tips.len(), 5);

        tokio::time::sleep(Duration::from_millis(4100)).await;
        let view = get_video_state(&state).await;
        assert_eq!(view.status_text, "Slouching Detected");
        assert_eq!(view.badge, BadgeVariant::Warning);
        assert_eq!(view.alert.as_deref(), Some("Posture Alert: Slouching Detected"));

        let view = toggle_camera(&state).await;
        assert!(!view.streaming);
        assert!(view.alert.is_none());
        assert_eq!(camera.live_streams(), 0);
    }

    #[tokio::test]
    async fn test_controls() {
        let camera = SimulatedCamera::new();
        let state = state(&camera, vec![]);

        let view = get_video_state(&state).await;
        assert!(view.controls.alerts_enabled);
        assert!(!view.controls.audio_enabled);

        set_alerts_enabled(&state, false).await;
        let view = set_audio_enabled(&state, true).await;
        assert!(!view.controls.alerts_enabled);
        assert!(view.controls.audio_enabled);

        assert_eq!(get_cameras(&state).await.len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_reads_while_permission_prompt_pending() {
        let camera = SimulatedCamera::new().with_latency(Duration::from_secs(10));
        let state = state(&camera, vec![]);

        let (started, _) = tokio::join!(start_camera(&state), async {
            tokio::time::sleep(Duration::from_secs(1)).await;

            let view = tokio::time::timeout(Duration::from_secs(1), get_video_state(&state))
                .await
                .expect("video state blocked behind the camera start");
            assert!(!view.streaming);

            let view = tokio::time::timeout(
                Duration::from_secs(1),
                set_alerts_enabled(&state, false),
            )
            .await
            .expect("alert toggle blocked behind the camera start");
            assert!(!view.controls.alerts_enabled);

            let cameras = tokio::time::timeout(Duration::from_secs(1), get_cameras(&state))
                .await
                .expect("camera list blocked behind the camera start");
            assert_eq!(cameras.len(), 1);
        });

        assert!(started.streaming);
        assert!(!started.controls.alerts_enabled);

        stop_camera(&state).await;
        assert_eq!(camera.live_streams(), 0);
    }
}
