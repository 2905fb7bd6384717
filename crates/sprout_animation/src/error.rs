//! Error types for sprout_animation

use thiserror::Error;

/// Errors raised by animation playback
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AnimationError {
    /// `play()` was called while a previous playback was still running
    #[error("animation is already playing")]
    AlreadyPlaying,
}

/// Result type for animation operations
pub type Result<T> = std::result::Result<T, AnimationError>;
