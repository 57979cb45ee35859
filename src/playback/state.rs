use std::fmt;
use std::time::Duration;

use super::artwork::Artwork;
use super::progress::format_time;

/// Where the transport controller is in its lifecycle.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum TransportState {
    /// No playlist, an empty one, or the session was shut down.
    #[default]
    Idle,
    /// Source handed to the player, play not yet confirmed.
    Loading,
    Playing,
    Paused,
    /// The current track could not be loaded or played.
    Error,
}

/// The "now playing" label.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum NowPlaying {
    #[default]
    Nothing,
    Playing(String),
    Paused(String),
    Failed(String),
}

impl fmt::Display for NowPlaying {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NowPlaying::Nothing => Ok(()),
            NowPlaying::Playing(title) => write!(f, "▶ {title}"),
            NowPlaying::Paused(title) => write!(f, "⏸ {title}"),
            NowPlaying::Failed(title) => write!(f, "⚠ Playback error: {title}"),
        }
    }
}

/// Observable state of one playback session.
#[derive(Clone, Debug, Default)]
pub struct PlaybackSession {
    /// In range whenever the playlist is non-empty; `None` otherwise.
    pub current_index: Option<usize>,
    pub is_playing: bool,
    /// True only between drag start and drag end on the progress slider.
    pub is_seeking: bool,
    pub position: Duration,
    pub duration: Duration,
    /// Slider position in seconds. Follows `position` unless the user drags it.
    pub slider_value: f64,
    pub slider_max: f64,
    pub now_playing: NowPlaying,
    pub artwork: Option<&'static Artwork>,
}

impl PlaybackSession {
    /// `mm:ss / mm:ss` of the mirrored position and duration.
    pub fn time_label(&self) -> String {
        format!(
            "{} / {}",
            format_time(self.position),
            format_time(self.duration)
        )
    }

    /// Slider fill in `[0, 1]`.
    pub fn slider_ratio(&self) -> f64 {
        if self.slider_max <= 0.0 {
            return 0.0;
        }
        (self.slider_value / self.slider_max).clamp(0.0, 1.0)
    }

    /// Zero the mirrored progress and end any drag; a drag never outlives
    /// the source it was aimed at.
    pub(crate) fn reset_progress(&mut self) {
        self.is_seeking = false;
        self.position = Duration::ZERO;
        self.duration = Duration::ZERO;
        self.slider_value = 0.0;
        self.slider_max = 0.0;
    }
}
