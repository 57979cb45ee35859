//! Audio-related small types shared between the player backends and the
//! transport controller.

use std::path::PathBuf;

use thiserror::Error;

/// Lifecycle notifications sent by a player over its event channel.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum PlayerEvent {
    /// The source was opened and its duration (if any) is known.
    Opened,
    /// The current source played to the end.
    Ended,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlayerError {
    #[error("audio output device unavailable: {0}")]
    Device(String),

    #[error("cannot load {}: {reason}", .path.display())]
    Load { path: PathBuf, reason: String },

    #[error("playback failed: {0}")]
    Playback(String),

    #[error("no track loaded")]
    NoSource,

    #[error("seek failed: {0}")]
    Seek(String),
}
