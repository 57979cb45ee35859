use std::sync::mpsc::Receiver;
use std::time::{Duration, Instant};

use crate::audio::{PlayerEvent, PlayerResource};
use crate::config::Settings;
use crate::library::Playlist;

use super::progress::ProgressSync;
use super::transport::TransportController;

/// Pointer interaction with the progress slider, already mapped to seconds.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum SliderGesture {
    Press(f64),
    Drag(f64),
    Release,
}

/// One open player screen: a transport session plus its progress loop.
///
/// Closing (or dropping) the screen cancels the loop and releases the player.
pub struct PlayerScreen<P: PlayerResource> {
    transport: TransportController<P>,
    progress: ProgressSync,
    scrub_step: f64,
    /// Song the user asked to remove, awaiting confirmation.
    pending_removal: Option<usize>,
}

impl<P: PlayerResource> PlayerScreen<P> {
    /// Open on a snapshot of `playlist`, starting at `start_index`.
    pub fn open(
        player: P,
        events: Receiver<PlayerEvent>,
        playlist: Playlist,
        start_index: usize,
        settings: &Settings,
        now: Instant,
    ) -> Self {
        let mut transport = TransportController::new(player, events, playlist);
        let mut progress =
            ProgressSync::new(Duration::from_millis(settings.playback.progress_interval_ms));
        progress.start(now);
        transport.open(start_index);

        Self {
            transport,
            progress,
            scrub_step: settings.controls.scrub_seconds as f64,
            pending_removal: None,
        }
    }

    pub fn transport(&self) -> &TransportController<P> {
        &self.transport
    }

    pub fn transport_mut(&mut self) -> &mut TransportController<P> {
        &mut self.transport
    }

    pub fn progress(&self) -> &ProgressSync {
        &self.progress
    }

    /// One pass of the UI loop: player events first, then a progress tick if
    /// one is due.
    pub fn update(&mut self, now: Instant) {
        self.transport.pump_events();
        self.progress.poll(now, &mut self.transport);
    }

    pub fn scrub_forward(&mut self) {
        self.transport.scrub_by(self.scrub_step);
    }

    pub fn scrub_backward(&mut self) {
        self.transport.scrub_by(-self.scrub_step);
    }

    /// Commit a keyboard scrub, if one is in progress.
    pub fn commit_scrub(&mut self) -> bool {
        if !self.transport.session().is_seeking {
            return false;
        }
        let value = self.transport.session().slider_value;
        self.transport.commit_seek(value);
        true
    }

    pub fn slider(&mut self, gesture: SliderGesture) {
        match gesture {
            SliderGesture::Press(seconds) => {
                self.transport.begin_seek();
                self.transport.scrub_to(seconds);
            }
            SliderGesture::Drag(seconds) => {
                if self.transport.session().is_seeking {
                    self.transport.scrub_to(seconds);
                }
            }
            SliderGesture::Release => {
                self.commit_scrub();
            }
        }
    }

    /// Ask to remove the current song. Nothing happens until
    /// `confirm_removal`.
    pub fn request_removal(&mut self) {
        self.pending_removal = self.transport.session().current_index;
    }

    pub fn pending_removal(&self) -> Option<usize> {
        self.pending_removal
    }

    pub fn cancel_removal(&mut self) {
        self.pending_removal = None;
    }

    /// Drop the song awaiting confirmation from this session. Returns its
    /// index so the caller can remove it from the saved list as well.
    pub fn confirm_removal(&mut self) -> Option<usize> {
        let index = self.pending_removal.take()?;
        self.transport.remove_track(index).map(|_| index)
    }

    pub fn close(&mut self) {
        self.pending_removal = None;
        self.progress.cancel();
        self.transport.shutdown();
    }
}

impl<P: PlayerResource> Drop for PlayerScreen<P> {
    fn drop(&mut self) {
        self.close();
    }
}
