//! Scripted in-memory player used by the transport tests.

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver, Sender};
use std::time::Duration;

use super::resource::PlayerResource;
use super::types::{PlayerError, PlayerEvent};

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Call {
    SetSource(PathBuf),
    ClearSource,
    Play,
    Pause,
    SeekTo(Duration),
    Stop,
}

pub(crate) struct FakePlayer {
    pub calls: Vec<Call>,
    pub source: Option<PathBuf>,
    pub broken_paths: HashSet<PathBuf>,
    pub fail_play: bool,
    pub fail_pause: bool,
    pub fail_seek: bool,
    pub fail_position: bool,
    pub position: Duration,
    /// Duration reported once a source is loaded.
    pub track_duration: Option<Duration>,
    events: Sender<PlayerEvent>,
}

impl FakePlayer {
    pub fn new() -> (Self, Receiver<PlayerEvent>) {
        let (tx, rx) = mpsc::channel();
        let player = Self {
            calls: Vec::new(),
            source: None,
            broken_paths: HashSet::new(),
            fail_play: false,
            fail_pause: false,
            fail_seek: false,
            fail_position: false,
            position: Duration::ZERO,
            track_duration: Some(Duration::from_secs(180)),
            events: tx,
        };
        (player, rx)
    }

    pub fn emit(&self, event: PlayerEvent) {
        let _ = self.events.send(event);
    }

    pub fn seeks(&self) -> Vec<Duration> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                Call::SeekTo(d) => Some(*d),
                _ => None,
            })
            .collect()
    }

    pub fn sources(&self) -> Vec<PathBuf> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                Call::SetSource(p) => Some(p.clone()),
                _ => None,
            })
            .collect()
    }
}

impl PlayerResource for FakePlayer {
    fn set_source(&mut self, path: &Path) -> Result<(), PlayerError> {
        self.calls.push(Call::SetSource(path.to_path_buf()));
        self.position = Duration::ZERO;
        if self.broken_paths.contains(path) {
            self.source = None;
            return Err(PlayerError::Load {
                path: path.to_path_buf(),
                reason: "unsupported codec".to_string(),
            });
        }
        self.source = Some(path.to_path_buf());
        self.emit(PlayerEvent::Opened);
        Ok(())
    }

    fn clear_source(&mut self) {
        self.calls.push(Call::ClearSource);
        self.source = None;
    }

    fn has_source(&self) -> bool {
        self.source.is_some()
    }

    fn play(&mut self) -> Result<(), PlayerError> {
        self.calls.push(Call::Play);
        if self.fail_play {
            return Err(PlayerError::Playback("device busy".to_string()));
        }
        Ok(())
    }

    fn pause(&mut self) -> Result<(), PlayerError> {
        self.calls.push(Call::Pause);
        if self.fail_pause {
            return Err(PlayerError::Playback("device busy".to_string()));
        }
        Ok(())
    }

    fn seek_to(&mut self, position: Duration) -> Result<(), PlayerError> {
        self.calls.push(Call::SeekTo(position));
        if self.fail_seek {
            return Err(PlayerError::Seek("not seekable".to_string()));
        }
        self.position = position;
        Ok(())
    }

    fn position(&self) -> Result<Duration, PlayerError> {
        if self.fail_position {
            return Err(PlayerError::Playback("position unavailable".to_string()));
        }
        Ok(self.position)
    }

    fn duration(&self) -> Option<Duration> {
        self.source.as_ref().and(self.track_duration)
    }

    fn stop(&mut self) {
        self.calls.push(Call::Stop);
        self.source = None;
    }
}
