//! User seeking on the progress slider.
//!
//! A drag suspends position mirroring (`is_seeking`), moves only the slider,
//! and on release issues a single seek. `is_seeking` is cleared by a scope
//! guard, so it never outlives the release even if the seek fails.

use std::ops::{Deref, DerefMut};
use std::time::Duration;

use tracing::{debug, warn};

use crate::audio::PlayerResource;

use super::transport::TransportController;

impl<P: PlayerResource> TransportController<P> {
    /// Drag start.
    pub fn begin_seek(&mut self) {
        if self.is_closed() {
            return;
        }
        self.session_mut().is_seeking = true;
    }

    /// Move the slider to `seconds` without touching the player. Starts a
    /// drag when none is in progress.
    pub fn scrub_to(&mut self, seconds: f64) {
        if self.is_closed() {
            return;
        }
        let session = self.session_mut();
        session.is_seeking = true;
        session.slider_value = finite_or_zero(seconds).clamp(0.0, session.slider_max.max(0.0));
    }

    pub fn scrub_by(&mut self, delta_seconds: f64) {
        let target = self.session().slider_value + delta_seconds;
        self.scrub_to(target);
    }

    /// Drag end: seek to the committed slider value.
    pub fn commit_seek(&mut self, seconds: f64) {
        if self.is_closed() {
            return;
        }
        let mut scope = SeekScope::enter(self);

        let Some(duration) = scope.player().duration().filter(|d| !d.is_zero()) else {
            debug!("seek ignored, duration unknown");
            return;
        };
        let target = Duration::from_secs_f64(
            finite_or_zero(seconds).clamp(0.0, duration.as_secs_f64()),
        );

        match scope.seek_to(target) {
            Ok(()) => {
                let session = scope.session_mut();
                session.position = target;
                session.slider_value = target.as_secs_f64();
            }
            Err(e) => warn!(error = %e, ?target, "seek failed"),
        }
    }
}

/// Marks a seek in progress for as long as it lives.
struct SeekScope<'a, P: PlayerResource> {
    transport: &'a mut TransportController<P>,
}

impl<'a, P: PlayerResource> SeekScope<'a, P> {
    fn enter(transport: &'a mut TransportController<P>) -> Self {
        transport.session_mut().is_seeking = true;
        Self { transport }
    }
}

impl<P: PlayerResource> Deref for SeekScope<'_, P> {
    type Target = TransportController<P>;

    fn deref(&self) -> &Self::Target {
        self.transport
    }
}

impl<P: PlayerResource> DerefMut for SeekScope<'_, P> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.transport
    }
}

impl<P: PlayerResource> Drop for SeekScope<'_, P> {
    fn drop(&mut self) {
        self.transport.session_mut().is_seeking = false;
    }
}

fn finite_or_zero(seconds: f64) -> f64 {
    if seconds.is_finite() { seconds } else { 0.0 }
}
