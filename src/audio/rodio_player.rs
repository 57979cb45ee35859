use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver, Sender};
use std::time::Duration;

use rodio::{OutputStream, OutputStreamBuilder, Sink};
use tracing::{debug, trace};

use crate::config::AudioSettings;

use super::resource::PlayerResource;
use super::sink::{create_sink, open_decoder, source_duration};
use super::types::{PlayerError, PlayerEvent};

/// `PlayerResource` backed by the default `rodio` output device.
///
/// Everything runs on the caller's thread; rodio's mixer does the actual
/// streaming. End of track is detected in `poll` when the sink drains.
pub struct RodioPlayer {
    stream: OutputStream,
    sink: Option<Sink>,
    source: Option<PathBuf>,
    duration: Option<Duration>,
    volume: f32,
    playing: bool,
    ended_sent: bool,
    events: Sender<PlayerEvent>,
}

impl RodioPlayer {
    /// Open the default output device. The receiver carries the player's
    /// lifecycle events.
    pub fn open(settings: &AudioSettings) -> Result<(Self, Receiver<PlayerEvent>), PlayerError> {
        let mut stream = OutputStreamBuilder::open_default_stream()
            .map_err(|e| PlayerError::Device(e.to_string()))?;
        // rodio logs to stderr when OutputStream is dropped. That's useful in debugging,
        // but noisy for a TUI app.
        stream.log_on_drop(false);

        let (tx, rx) = mpsc::channel();
        let player = Self {
            stream,
            sink: None,
            source: None,
            duration: None,
            volume: settings.volume,
            playing: false,
            ended_sent: false,
            events: tx,
        };
        Ok((player, rx))
    }

    fn emit(&self, event: PlayerEvent) {
        // The receiver goes away with the player screen; nothing to tell then.
        let _ = self.events.send(event);
    }
}

impl PlayerResource for RodioPlayer {
    fn set_source(&mut self, path: &Path) -> Result<(), PlayerError> {
        self.clear_source();

        let decoder = open_decoder(path)?;
        let duration = source_duration(path, &decoder);
        self.sink = Some(create_sink(&self.stream, decoder, self.volume));
        self.source = Some(path.to_path_buf());
        self.duration = duration;
        debug!(path = %path.display(), ?duration, "source opened");

        self.emit(PlayerEvent::Opened);
        Ok(())
    }

    fn clear_source(&mut self) {
        if let Some(sink) = self.sink.take() {
            sink.stop();
        }
        self.source = None;
        self.duration = None;
        self.playing = false;
        self.ended_sent = false;
    }

    fn has_source(&self) -> bool {
        self.source.is_some()
    }

    fn play(&mut self) -> Result<(), PlayerError> {
        let sink = self.sink.as_ref().ok_or(PlayerError::NoSource)?;
        sink.play();
        self.playing = true;
        Ok(())
    }

    fn pause(&mut self) -> Result<(), PlayerError> {
        let sink = self.sink.as_ref().ok_or(PlayerError::NoSource)?;
        sink.pause();
        self.playing = false;
        Ok(())
    }

    fn seek_to(&mut self, position: Duration) -> Result<(), PlayerError> {
        let sink = self.sink.as_ref().ok_or(PlayerError::NoSource)?;
        sink.try_seek(position)
            .map_err(|e| PlayerError::Seek(e.to_string()))
    }

    fn position(&self) -> Result<Duration, PlayerError> {
        self.sink
            .as_ref()
            .map(Sink::get_pos)
            .ok_or(PlayerError::NoSource)
    }

    fn duration(&self) -> Option<Duration> {
        self.duration
    }

    fn stop(&mut self) {
        self.clear_source();
    }

    fn poll(&mut self) {
        let drained = self.sink.as_ref().is_some_and(Sink::empty);
        if self.playing && drained && !self.ended_sent {
            trace!(source = ?self.source, "sink drained");
            self.ended_sent = true;
            self.playing = false;
            self.emit(PlayerEvent::Ended);
        }
    }
}

impl Drop for RodioPlayer {
    fn drop(&mut self) {
        self.clear_source();
    }
}
