//! The transport state machine.
//!
//! `TransportController` owns the playlist snapshot of a playback session and
//! is the only thing that drives the player. Every track change goes through
//! `load_track`, which sets the source and asks for playback straight away;
//! failures park the controller in `TransportState::Error` without ending the
//! session, so next/previous keep working.

use std::sync::mpsc::Receiver;
use std::time::Duration;

use tracing::{debug, info, warn};

use crate::audio::{PlayerError, PlayerEvent, PlayerResource};
use crate::library::{Playlist, Track};

use super::artwork;
use super::state::{NowPlaying, PlaybackSession, TransportState};

pub struct TransportController<P: PlayerResource> {
    player: P,
    events: Receiver<PlayerEvent>,
    playlist: Playlist,
    state: TransportState,
    session: PlaybackSession,
    last_error: Option<PlayerError>,
    closed: bool,
}

impl<P: PlayerResource> TransportController<P> {
    /// Create an idle controller over a playlist snapshot. `events` is the
    /// receiving end of `player`'s event channel.
    pub fn new(player: P, events: Receiver<PlayerEvent>, playlist: Playlist) -> Self {
        Self {
            player,
            events,
            playlist,
            state: TransportState::Idle,
            session: PlaybackSession::default(),
            last_error: None,
            closed: false,
        }
    }

    /// Start the session at `start_index`, clamped into the playlist. An empty
    /// playlist leaves the controller idle.
    pub fn open(&mut self, start_index: usize) {
        match self.playlist.clamp_index(start_index) {
            Some(index) => self.load_track(index),
            None => {
                debug!("nothing to play, staying idle");
                self.session.current_index = None;
                self.state = TransportState::Idle;
            }
        }
    }

    pub fn state(&self) -> TransportState {
        self.state
    }

    pub fn session(&self) -> &PlaybackSession {
        &self.session
    }

    pub(crate) fn session_mut(&mut self) -> &mut PlaybackSession {
        &mut self.session
    }

    pub fn playlist(&self) -> &Playlist {
        &self.playlist
    }

    pub fn current_track(&self) -> Option<&Track> {
        self.session
            .current_index
            .and_then(|i| self.playlist.get(i))
    }

    pub fn last_error(&self) -> Option<&PlayerError> {
        self.last_error.as_ref()
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Read access for progress polling; commands stay with the controller.
    pub(crate) fn player(&self) -> &P {
        &self.player
    }

    #[cfg(test)]
    pub(crate) fn player_mut(&mut self) -> &mut P {
        &mut self.player
    }

    /// Load the track at `index` and start playing it.
    pub fn load_track(&mut self, index: usize) {
        if self.closed {
            return;
        }
        let Some(track) = self.playlist.get(index).cloned() else {
            debug!(index, count = self.playlist.count(), "load ignored, index out of range");
            return;
        };

        self.state = TransportState::Loading;
        self.session.current_index = Some(index);
        self.session.is_playing = false;
        self.session.reset_progress();
        self.last_error = None;

        if let Err(e) = self.player.set_source(&track.path) {
            self.player.clear_source();
            self.fail(&track, e);
            return;
        }

        // Play right away; the player starts once the source is ready.
        if let Err(e) = self.player.play() {
            self.fail(&track, e);
            return;
        }

        self.state = TransportState::Playing;
        self.session.is_playing = true;
        self.session.now_playing = NowPlaying::Playing(track.title.clone());
        let cover = artwork::pick_random();
        self.session.artwork = Some(cover);
        info!(index, title = %track.title, artwork = cover.name, "now playing");
    }

    fn fail(&mut self, track: &Track, error: PlayerError) {
        warn!(title = %track.title, error = %error, "playback failed");
        self.state = TransportState::Error;
        self.session.is_playing = false;
        self.session.now_playing = NowPlaying::Failed(track.title.clone());
        self.last_error = Some(error);
    }

    pub fn pause(&mut self) {
        if self.closed || self.state != TransportState::Playing {
            return;
        }
        if let Err(e) = self.player.pause() {
            debug!(error = %e, "pause failed, treating as paused");
        }
        self.state = TransportState::Paused;
        self.session.is_playing = false;
        if let Some(title) = self.current_track().map(|t| t.title.clone()) {
            self.session.now_playing = NowPlaying::Paused(title);
        }
    }

    /// Continue playback. Reloads the current track when the player lost its
    /// source (e.g. after a failed load) instead of resuming nothing.
    pub fn resume(&mut self) {
        if self.closed {
            return;
        }
        if !matches!(
            self.state,
            TransportState::Paused | TransportState::Error | TransportState::Idle
        ) {
            return;
        }
        let Some(index) = self.session.current_index else {
            return;
        };

        if !self.player.has_source() {
            self.load_track(index);
            return;
        }

        let Some(track) = self.playlist.get(index).cloned() else {
            return;
        };
        match self.player.play() {
            Ok(()) => {
                self.state = TransportState::Playing;
                self.session.is_playing = true;
                self.session.now_playing = NowPlaying::Playing(track.title);
                self.last_error = None;
            }
            Err(e) => self.fail(&track, e),
        }
    }

    /// Play/pause button.
    pub fn toggle(&mut self) {
        if self.playlist.is_empty() {
            return;
        }
        if self.state == TransportState::Playing {
            self.pause();
        } else {
            self.resume();
        }
    }

    pub fn next(&mut self) {
        if self.playlist.is_empty() {
            return;
        }
        let index = match self.session.current_index {
            Some(i) => self.playlist.next(i),
            None => 0,
        };
        self.load_track(index);
    }

    pub fn previous(&mut self) {
        if self.playlist.is_empty() {
            return;
        }
        let index = match self.session.current_index {
            Some(i) => self.playlist.previous(i),
            None => self.playlist.count() - 1,
        };
        self.load_track(index);
    }

    pub fn handle_event(&mut self, event: PlayerEvent) {
        if self.closed {
            return;
        }
        match event {
            PlayerEvent::Opened => {
                let Some(duration) = self.player.duration().filter(|d| !d.is_zero()) else {
                    return;
                };
                self.session.duration = duration;
                self.session.slider_max = duration.as_secs_f64();
                if !self.session.is_seeking {
                    let position = self.player.position().unwrap_or(Duration::ZERO);
                    self.session.position = position;
                    self.session.slider_value = position.as_secs_f64();
                }
            }
            PlayerEvent::Ended => {
                debug!(index = ?self.session.current_index, "track ended, advancing");
                self.next();
            }
        }
    }

    /// Let the player report what happened since the last call and react to
    /// each event in order.
    pub fn pump_events(&mut self) {
        if self.closed {
            return;
        }
        self.player.poll();
        while let Ok(event) = self.events.try_recv() {
            self.handle_event(event);
        }
    }

    /// Remove a track from this session's playlist. Removing the current
    /// track stops playback and clears the now-playing display.
    pub fn remove_track(&mut self, index: usize) -> Option<Track> {
        let removed = self.playlist.remove_at(index)?;

        match self.session.current_index {
            Some(current) if current == index => {
                self.player.stop();
                self.state = TransportState::Idle;
                self.session.is_playing = false;
                self.session.now_playing = NowPlaying::Nothing;
                self.session.artwork = None;
                self.session.reset_progress();
                self.session.current_index = self.playlist.clamp_index(current);
                info!(title = %removed.title, "current track removed, playback stopped");
            }
            Some(current) if index < current => {
                self.session.current_index = Some(current - 1);
            }
            _ => {}
        }
        Some(removed)
    }

    pub(crate) fn seek_to(&mut self, position: Duration) -> Result<(), PlayerError> {
        self.player.seek_to(position)
    }

    /// Stop the player and ignore anything it reports afterwards.
    pub fn shutdown(&mut self) {
        if self.closed {
            return;
        }
        self.closed = true;
        self.player.stop();
        self.state = TransportState::Idle;
        self.session.is_playing = false;
        self.session.is_seeking = false;
        while self.events.try_recv().is_ok() {}
        debug!("playback session shut down");
    }
}

impl<P: PlayerResource> Drop for TransportController<P> {
    fn drop(&mut self) {
        self.shutdown();
    }
}
