//! Camera session controller
//!
//! Owns the camera stream while a session is active and drives the posture
//! status ticker. The ticker is a single task that owns both the tick
//! interval and the alert hide deadline, so aborting it cancels every
//! pending timer at once.

use super::alert::AlertBanner;
use super::state::{MonitorSnapshot, SessionConfig, SessionEvent, SessionInfo, SessionState};
use crate::capture::{CameraSource, CaptureResult, MediaStream, VideoSink};
use crate::posture::StatusSource;
use parking_lot::{Mutex as ParkingMutex, RwLock};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};

type SharedSource = Arc<ParkingMutex<Box<dyn StatusSource>>>;

/// Read and toggle handle over a controller's state
///
/// Does not go through the controller, so it stays usable while a start is
/// waiting on the camera.
#[derive(Clone)]
pub struct SessionMonitor {
    snapshot: Arc<RwLock<MonitorSnapshot>>,
    event_tx: broadcast::Sender<SessionEvent>,
}

impl SessionMonitor {
    pub fn snapshot(&self) -> MonitorSnapshot {
        self.snapshot.read().clone()
    }

    pub fn is_active(&self) -> bool {
        self.snapshot.read().is_active()
    }

    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.event_tx.subscribe()
    }

    /// Toggle the alert banner. Takes effect on the next tick.
    pub fn set_alerts_enabled(&self, enabled: bool) {
        self.snapshot.write().controls.alerts_enabled = enabled;
        tracing::debug!("Visual alerts {}", if enabled { "enabled" } else { "disabled" });
    }

    pub fn set_audio_enabled(&self, enabled: bool) {
        self.snapshot.write().controls.audio_enabled = enabled;
        tracing::debug!("Audio notifications {}", if enabled { "enabled" } else { "disabled" });
    }
}

/// Binds the UI to a camera stream and publishes posture statuses
pub struct CameraSessionController {
    config: SessionConfig,

    camera: Arc<dyn CameraSource>,

    /// Preview the stream is rendered into
    sink: Arc<dyn VideoSink>,

    /// Status producer, kept across sessions
    source: SharedSource,

    /// State shared with the ticker task
    snapshot: Arc<RwLock<MonitorSnapshot>>,

    /// Held stream; present iff the session is active
    stream: Option<Box<dyn MediaStream>>,

    /// Status ticker; present iff the session is active
    ticker: Option<JoinHandle<()>>,

    event_tx: broadcast::Sender<SessionEvent>,
}

impl CameraSessionController {
    pub fn new(
        mut config: SessionConfig,
        camera: Arc<dyn CameraSource>,
        sink: Arc<dyn VideoSink>,
        source: Box<dyn StatusSource>,
    ) -> Self {
        if config.tick_period.is_zero() {
            let fallback = SessionConfig::default().tick_period;
            tracing::warn!("Zero tick period, using {:?}", fallback);
            config.tick_period = fallback;
        }

        let (event_tx, _) = broadcast::channel(100);
        Self {
            config,
            camera,
            sink,
            source: Arc::new(ParkingMutex::new(source)),
            snapshot: Arc::new(RwLock::new(MonitorSnapshot::default())),
            stream: None,
            ticker: None,
            event_tx,
        }
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn camera(&self) -> &Arc<dyn CameraSource> {
        &self.camera
    }

    pub fn state(&self) -> SessionState {
        self.snapshot.read().state
    }

    pub fn is_active(&self) -> bool {
        self.stream.is_some()
    }

    /// Copy of the current state
    pub fn snapshot(&self) -> MonitorSnapshot {
        self.snapshot.read().clone()
    }

    /// Subscribe to session events
    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.event_tx.subscribe()
    }

    /// Handle for reading state and toggling controls without the controller
    pub fn monitor(&self) -> SessionMonitor {
        SessionMonitor {
            snapshot: self.snapshot.clone(),
            event_tx: self.event_tx.clone(),
        }
    }

    /// Number of stream handles currently held (0 or 1)
    pub fn held_streams(&self) -> usize {
        usize::from(self.stream.is_some())
    }

    /// Toggle the alert banner. Takes effect on the next tick.
    pub fn set_alerts_enabled(&self, enabled: bool) {
        self.monitor().set_alerts_enabled(enabled);
    }

    pub fn set_audio_enabled(&self, enabled: bool) {
        self.monitor().set_audio_enabled(enabled);
    }

    /// Acquire the camera and start monitoring
    ///
    /// No-op if a session is already active. On failure the controller stays
    /// idle and the error is returned to the caller; nothing is retried.
    pub async fn start(&mut self) -> CaptureResult<()> {
        if self.stream.is_some() {
            tracing::debug!("Session already active, ignoring start");
            return Ok(());
        }

        let constraints = &self.config.constraints;
        tracing::info!(
            "Requesting camera stream ({}x{})",
            constraints.ideal.width,
            constraints.ideal.height
        );

        let stream = match self.camera.acquire(constraints).await {
            Ok(stream) => stream,
            Err(e) => {
                tracing::warn!("Camera request failed: {}", e);
                let _ = self.event_tx.send(SessionEvent::Error(e.to_string()));
                return Err(e);
            }
        };

        self.sink.bind(stream.as_ref());
        let info = SessionInfo::new(stream.id(), stream.resolution());
        tracing::info!(
            "Session {} started on stream {} ({}x{})",
            info.id,
            info.stream_id,
            info.resolution.width,
            info.resolution.height
        );

        {
            let mut snapshot = self.snapshot.write();
            snapshot.state = SessionState::Active;
            snapshot.alert = None;
            snapshot.session = Some(info);
        }
        self.stream = Some(stream);
        self.ticker = Some(self.spawn_ticker());

        let _ = self.event_tx.send(SessionEvent::Started);
        Ok(())
    }

    /// Release the camera and stop monitoring. Idempotent.
    pub async fn stop(&mut self) {
        if let Some(ticker) = self.ticker.take() {
            ticker.abort();
            // Wait until the task is gone so no tick lands after this returns
            if let Err(e) = ticker.await {
                if !e.is_cancelled() {
                    tracing::error!("Status ticker failed: {}", e);
                }
            }
        }

        let Some(stream) = self.stream.take() else {
            tracing::debug!("No active session, ignoring stop");
            return;
        };

        self.release(stream);
        let _ = self.event_tx.send(SessionEvent::Stopped);
    }

    fn release(&mut self, stream: Box<dyn MediaStream>) {
        stream.stop_all();
        self.sink.unbind();

        let mut snapshot = self.snapshot.write();
        if let Some(info) = snapshot.session.take() {
            tracing::info!("Session {} stopped", info.id);
        }
        snapshot.state = SessionState::Idle;
        snapshot.alert = None;
    }

    fn spawn_ticker(&self) -> JoinHandle<()> {
        tokio::spawn(run_ticker(
            self.config.tick_period,
            self.config.alert_window,
            self.source.clone(),
            self.snapshot.clone(),
            self.event_tx.clone(),
        ))
    }
}

impl Drop for CameraSessionController {
    fn drop(&mut self) {
        if let Some(ticker) = self.ticker.take() {
            ticker.abort();
        }
        if let Some(stream) = self.stream.take() {
            tracing::debug!("Controller dropped with an active session, releasing camera");
            self.release(stream);
        }
    }
}

/// Periodic status draw plus alert banner expiry
async fn run_ticker(
    period: Duration,
    alert_window: Duration,
    source: SharedSource,
    snapshot: Arc<RwLock<MonitorSnapshot>>,
    event_tx: broadcast::Sender<SessionEvent>,
) {
    // First draw one full period after start
    let mut interval = tokio::time::interval_at(Instant::now() + period, period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
    let mut banner = AlertBanner::new(alert_window);

    loop {
        let deadline = banner.deadline();

        tokio::select! {
            biased;

            _ = tokio::time::sleep_until(deadline.unwrap_or_else(Instant::now)), if deadline.is_some() => {
                if banner.expire(Instant::now()) {
                    snapshot.write().alert = None;
                    let _ = event_tx.send(SessionEvent::AlertHidden);
                }
            }

            _ = interval.tick() => {
                let status = source.lock().next_status();
                let alerts_enabled = {
                    let mut snapshot = snapshot.write();
                    snapshot.status = status;
                    snapshot.controls.alerts_enabled
                };
                tracing::debug!("Posture status: {:?}", status);
                let _ = event_tx.send(SessionEvent::Status(status));

                if status.needs_attention() && alerts_enabled {
                    banner.trigger(status, Instant::now());
                    snapshot.write().alert = Some(status);
                    let _ = event_tx.send(SessionEvent::AlertShown(status));
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capture::{CaptureError, SimulatedCamera};
    use crate::posture::{PostureStatus, ScriptedStatusSource};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tokio::sync::broadcast::error::TryRecvError;
    use tokio::time::sleep;

    /// Sink that remembers which stream it shows
    #[derive(Default)]
    struct RecordingSink {
        bound: ParkingMutex<Option<String>>,
    }

    impl VideoSink for RecordingSink {
        fn bind(&self, stream: &dyn MediaStream) {
            *self.bound.lock() = Some(stream.id().to_string());
        }

        fn unbind(&self) {
            *self.bound.lock() = None;
        }
    }

    /// Source that counts draws
    struct CountingSource {
        draws: Arc<AtomicUsize>,
    }

    impl StatusSource for CountingSource {
        fn next_status(&mut self) -> PostureStatus {
            self.draws.fetch_add(1, Ordering::SeqCst);
            PostureStatus::Warning
        }
    }

    fn controller(
        camera: &SimulatedCamera,
        sink: Arc<RecordingSink>,
        script: Vec<PostureStatus>,
    ) -> CameraSessionController {
        CameraSessionController::new(
            SessionConfig::default(),
            Arc::new(camera.clone()),
            sink,
            Box::new(ScriptedStatusSource::new(script)),
        )
    }

    fn drain(events: &mut broadcast::Receiver<SessionEvent>) -> Vec<SessionEvent> {
        let mut out = Vec::new();
        while let Ok(event) = events.try_recv() {
            out.push(event);
        }
        out
    }

    #[tokio::test(start_paused = true)]
    async fn test_bad_draw_scenario() {
        let camera = SimulatedCamera::new();
        let sink = Arc::new(RecordingSink::default());
        let mut controller = controller(&camera, sink.clone(), vec![PostureStatus::Bad]);
        let mut events = controller.subscribe();

        controller.start().await.unwrap();
        assert!(controller.is_active());
        assert_eq!(controller.state(), SessionState::Active);
        assert_eq!(camera.live_streams(), 1);
        assert!(sink.bound.lock().is_some());

        sleep(Duration::from_millis(4010)).await;
        let snapshot = controller.snapshot();
        assert_eq!(snapshot.status, PostureStatus::Bad);
        assert_eq!(snapshot.alert, Some(PostureStatus::Bad));

        sleep(Duration::from_secs(3)).await;
        assert_eq!(controller.snapshot().alert, None);

        controller.stop().await;
        assert!(!controller.is_active());
        assert_eq!(camera.live_streams(), 0);
        assert!(sink.bound.lock().is_none());

        assert_eq!(
            drain(&mut events),
            vec![
                SessionEvent::Started,
                SessionEvent::Status(PostureStatus::Bad),
                SessionEvent::AlertShown(PostureStatus::Bad),
                SessionEvent::AlertHidden,
                SessionEvent::Stopped,
            ]
        );

        sleep(Duration::from_secs(20)).await;
        assert!(matches!(events.try_recv(), Err(TryRecvError::Empty)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_no_draws_after_stop() {
        let camera = SimulatedCamera::new();
        let draws = Arc::new(AtomicUsize::new(0));
        let mut controller = CameraSessionController::new(
            SessionConfig::default(),
            Arc::new(camera.clone()),
            Arc::new(RecordingSink::default()),
            Box::new(CountingSource {
                draws: draws.clone(),
            }),
        );

        // Nothing runs while idle
        sleep(Duration::from_secs(10)).await;
        assert_eq!(draws.load(Ordering::SeqCst), 0);

        controller.start().await.unwrap();
        sleep(Duration::from_millis(8010)).await;
        assert_eq!(draws.load(Ordering::SeqCst), 2);

        controller.stop().await;
        let status = controller.snapshot().status;
        sleep(Duration::from_secs(40)).await;

        assert_eq!(draws.load(Ordering::SeqCst), 2);
        assert_eq!(controller.snapshot().status, status);
    }

    #[tokio::test(start_paused = true)]
    async fn test_retrigger_resets_window() {
        let camera = SimulatedCamera::new();
        let config = SessionConfig {
            alert_window: Duration::from_secs(6),
            ..SessionConfig::default()
        };
        let mut controller = CameraSessionController::new(
            config,
            Arc::new(camera.clone()),
            Arc::new(RecordingSink::default()),
            Box::new(ScriptedStatusSource::new([
                PostureStatus::Bad,
                PostureStatus::Warning,
            ])),
        );

        controller.start().await.unwrap();

        // Bad at 4s, Warning at 8s restarts the window: hides at 14s
        sleep(Duration::from_millis(10_500)).await;
        assert_eq!(controller.snapshot().alert, Some(PostureStatus::Warning));

        sleep(Duration::from_millis(3_400)).await;
        assert_eq!(controller.snapshot().alert, Some(PostureStatus::Warning));

        sleep(Duration::from_millis(200)).await;
        assert_eq!(controller.snapshot().alert, None);

        controller.stop().await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_alerts_disabled() {
        let camera = SimulatedCamera::new();
        let mut controller = controller(
            &camera,
            Arc::new(RecordingSink::default()),
            vec![PostureStatus::Bad],
        );
        controller.set_alerts_enabled(false);

        controller.start().await.unwrap();
        sleep(Duration::from_millis(4010)).await;

        let snapshot = controller.snapshot();
        assert_eq!(snapshot.status, PostureStatus::Bad);
        assert_eq!(snapshot.alert, None);
        assert!(!snapshot.controls.alerts_enabled);

        controller.stop().await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_start_failure_stays_idle() {
        let camera = SimulatedCamera::denied();
        let mut controller = controller(&camera, Arc::new(RecordingSink::default()), vec![]);
        let mut events = controller.subscribe();

        let result = controller.start().await;
        assert!(matches!(result, Err(CaptureError::DeviceUnavailable(_))));
        assert!(!controller.is_active());
        assert_eq!(controller.state(), SessionState::Idle);
        assert_eq!(controller.held_streams(), 0);

        sleep(Duration::from_secs(20)).await;
        assert_eq!(camera.requests(), 1);

        let events = drain(&mut events);
        assert_eq!(events.len(), 1);
        assert!(matches!(events[0], SessionEvent::Error(_)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_start_stop_interleavings() {
        let camera = SimulatedCamera::new();
        let mut controller = controller(&camera, Arc::new(RecordingSink::default()), vec![]);

        // Stop without start
        controller.stop().await;
        assert_eq!(camera.live_streams(), 0);

        // Double start holds one stream
        controller.start().await.unwrap();
        controller.start().await.unwrap();
        assert_eq!(camera.requests(), 1);
        assert_eq!(camera.live_streams(), 1);

        // Rapid double stop
        controller.stop().await;
        controller.stop().await;
        assert_eq!(camera.live_streams(), 0);
        assert_eq!(controller.held_streams(), 0);

        for _ in 0..5 {
            controller.start().await.unwrap();
            sleep(Duration::from_millis(4500)).await;
            controller.stop().await;
            assert_eq!(camera.live_streams(), 0);
        }
        assert_eq!(camera.requests(), 6);
    }

    #[tokio::test(start_paused = true)]
    async fn test_drop_releases_stream() {
        let camera = SimulatedCamera::new();
        let sink = Arc::new(RecordingSink::default());
        let mut controller = controller(&camera, sink.clone(), vec![PostureStatus::Bad]);

        controller.start().await.unwrap();
        assert_eq!(camera.live_streams(), 1);

        let mut events = controller.subscribe();
        drop(controller);
        assert_eq!(camera.live_streams(), 0);
        assert!(sink.bound.lock().is_none());

        // The aborted ticker never fires
        sleep(Duration::from_secs(10)).await;
        assert!(drain(&mut events).is_empty());
        assert!(matches!(events.try_recv(), Err(TryRecvError::Closed)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_zero_tick_period_falls_back() {
        let camera = SimulatedCamera::new();
        let config = SessionConfig {
            tick_period: Duration::ZERO,
            ..SessionConfig::default()
        };
        let mut controller = CameraSessionController::new(
            config,
            Arc::new(camera.clone()),
            Arc::new(RecordingSink::default()),
            Box::new(ScriptedStatusSource::new([PostureStatus::Bad])),
        );
        assert_eq!(controller.config().tick_period, Duration::from_secs(4));

        controller.start().await.unwrap();
        sleep(Duration::from_millis(4010)).await;
        assert_eq!(controller.snapshot().status, PostureStatus::Bad);

        controller.stop().await;
        assert_eq!(camera.live_streams(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_monitor_reads_without_controller() {
        let camera = SimulatedCamera::new();
        let mut controller = controller(
            &camera,
            Arc::new(RecordingSink::default()),
            vec![PostureStatus::Bad],
        );
        let monitor = controller.monitor();

        monitor.set_audio_enabled(true);
        controller.start().await.unwrap();
        assert!(monitor.is_active());
        assert!(controller.snapshot().controls.audio_enabled);

        sleep(Duration::from_millis(4010)).await;
        assert_eq!(monitor.snapshot().alert, Some(PostureStatus::Bad));

        controller.stop().await;
        assert!(!monitor.is_active());
    }

    #[tokio::test(start_paused = true)]
    async fn test_stop_hides_visible_alert() {
        let camera = SimulatedCamera::new();
        let mut controller = controller(
            &camera,
            Arc::new(RecordingSink::default()),
            vec![PostureStatus::Warning],
        );

        controller.start().await.unwrap();
        sleep(Duration::from_millis(4500)).await;
        assert_eq!(controller.snapshot().alert, Some(PostureStatus::Warning));

        controller.stop().await;
        let snapshot = controller.snapshot();
        assert_eq!(snapshot.alert, None);
        assert!(snapshot.session.is_none());
        assert_eq!(snapshot.state, SessionState::Idle);
    }
}
