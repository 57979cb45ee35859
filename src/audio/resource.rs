use std::path::Path;
use std::time::Duration;

use super::types::PlayerError;

/// A single streaming media player.
///
/// Commands are fire-and-forget: `play` right after `set_source` must start
/// playback as soon as the source is ready, without the caller waiting for
/// `PlayerEvent::Opened`. Lifecycle events travel over the channel handed out
/// when the backend is created.
pub trait PlayerResource {
    /// Replace the current source with the file at `path`.
    fn set_source(&mut self, path: &Path) -> Result<(), PlayerError>;

    /// Drop the current source, if any.
    fn clear_source(&mut self);

    fn has_source(&self) -> bool;

    fn play(&mut self) -> Result<(), PlayerError>;

    fn pause(&mut self) -> Result<(), PlayerError>;

    fn seek_to(&mut self, position: Duration) -> Result<(), PlayerError>;

    /// Current playback position of the loaded source.
    fn position(&self) -> Result<Duration, PlayerError>;

    /// Total length of the loaded source, when known.
    fn duration(&self) -> Option<Duration>;

    /// Stop playback and release the source.
    fn stop(&mut self);

    /// Check on the device and emit any pending lifecycle events.
    fn poll(&mut self) {}
}
