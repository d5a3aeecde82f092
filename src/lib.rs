//! PostureGuard - posture monitoring dashboard backend.
//!
//! This is the main library crate for PostureGuard. It provides the camera
//! session lifecycle, the simulated posture detector and the state behind the
//! dashboard, video and settings pages.

pub mod capture;
pub mod commands;
pub mod dashboard;
pub mod posture;
pub mod routes;
pub mod session;
pub mod settings;
pub mod utils;

use commands::{navigation, video, AppState};
use session::SessionEvent;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize tracing/logging
pub fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "posture_guard=debug,posture_guard_lib=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Run a monitoring session on the video page until Ctrl-C
pub async fn run() -> anyhow::Result<()> {
    init_tracing();

    tracing::info!("Starting PostureGuard v{}", env!("CARGO_PKG_VERSION"));

    let state = AppState::default();

    for camera in video::get_cameras(&state.video).await {
        tracing::info!("Found camera {} ({})", camera.name, camera.id);
    }

    let page = navigation::navigate(&state.navigation, &state.video, "/video".to_string())
        .await
        .map_err(|e| anyhow::anyhow!("{}: {}", e.code, e.message))?;
    tracing::info!("Showing page: {}", page.title);

    let mut events = state.video.monitor().subscribe();
    let view = video::start_camera(&state.video).await;
    if let Some(error) = view.last_error {
        tracing::warn!("Camera not active: {}", error.message);
        return Ok(());
    }

    let shutdown = tokio::signal::ctrl_c();
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            _ = &mut shutdown => {
                tracing::info!("Shutting down");
                break;
            }
            event = events.recv() => match event {
                Ok(SessionEvent::Status(status)) => {
                    tracing::info!("Posture: {}", status.label());
                }
                Ok(SessionEvent::AlertShown(status)) => {
                    tracing::warn!("{}", session::alert_message(status));
                }
                Ok(event) => {
                    tracing::debug!("Session event: {}", serde_json::to_string(&event)?);
                }
                Err(tokio::sync::broadcast::error::RecvError::Lagged(skipped)) => {
                    tracing::warn!("Dropped {} session events", skipped);
                }
                Err(tokio::sync::broadcast::error::RecvError::Closed) => break,
            }
        }
    }

    // Leaving the page releases the camera
    navigation::navigate(&state.navigation, &state.video, "/".to_string())
        .await
        .map_err(|e| anyhow::anyhow!("{}: {}", e.code, e.message))?;

    Ok(())
}
