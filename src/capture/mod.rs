//! Camera capture
//!
//! A platform-agnostic camera abstraction with a simulated source that is
//! always available and a native source behind the `native-camera` feature.

pub mod simulated;
pub mod traits;

#[cfg(feature = "native-camera")]
pub mod native;

pub use simulated::SimulatedCamera;
pub use traits::{
    CameraInfo, CameraSource, CaptureError, CaptureResult, MediaStream, NullSink, Resolution,
    TrackInfo, TrackKind, VideoConstraints, VideoSink,
};

#[cfg(feature = "native-camera")]
pub use native::NativeCamera;
