//! Posture classification and the collaborators that produce it

pub mod source;
pub mod status;

pub use source::{RandomStatusSource, ScriptedStatusSource, StatusSource, STATUS_POOL};
pub use status::{BadgeVariant, PostureStatus};
