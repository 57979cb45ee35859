//! Periodic mirroring of the player's position into the session.
//!
//! `ProgressSync` is driven by the UI loop: `poll` runs a tick only when one
//! is due, so ticks never overlap each other or a user command.

use std::time::{Duration, Instant};

use tracing::warn;

use crate::audio::{PlayerError, PlayerResource};

use super::transport::TransportController;

pub const DEFAULT_INTERVAL: Duration = Duration::from_millis(500);

#[derive(Debug)]
pub struct ProgressSync {
    interval: Duration,
    next_due: Option<Instant>,
    cancelled: bool,
}

impl Default for ProgressSync {
    fn default() -> Self {
        Self::new(DEFAULT_INTERVAL)
    }
}

impl ProgressSync {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            next_due: None,
            cancelled: false,
        }
    }

    /// Schedule the first tick one interval after `now`.
    pub fn start(&mut self, now: Instant) {
        self.next_due = Some(now + self.interval);
    }

    /// Run a tick if one is due at `now`. Returns whether a tick ran.
    pub fn poll<P: PlayerResource>(
        &mut self,
        now: Instant,
        transport: &mut TransportController<P>,
    ) -> bool {
        if self.cancelled {
            return false;
        }
        if self.next_due.is_some_and(|due| now < due) {
            return false;
        }
        self.tick(transport);
        self.next_due = Some(now + self.interval);
        true
    }

    /// Time left until the next tick, zero when one is already due.
    pub fn time_until_due(&self, now: Instant) -> Duration {
        self.next_due
            .map(|due| due.saturating_duration_since(now))
            .unwrap_or(Duration::ZERO)
    }

    /// Mirror the player into the session once. Errors are logged and
    /// swallowed; the next tick tries again.
    pub fn tick<P: PlayerResource>(&self, transport: &mut TransportController<P>) {
        if let Err(e) = sync_progress(transport) {
            warn!(error = %e, "progress tick failed");
        }
    }

    /// Stop ticking for good.
    pub fn cancel(&mut self) {
        self.cancelled = true;
        self.next_due = None;
    }

    #[cfg(test)]
    pub fn is_cancelled(&self) -> bool {
        self.cancelled
    }
}

fn sync_progress<P: PlayerResource>(
    transport: &mut TransportController<P>,
) -> Result<(), PlayerError> {
    if !transport.session().is_playing {
        return Ok(());
    }
    let Some(duration) = transport.player().duration().filter(|d| !d.is_zero()) else {
        return Ok(());
    };
    let position = transport.player().position()?.min(duration);

    let session = transport.session_mut();
    session.duration = duration;
    session.slider_max = duration.as_secs_f64();
    // While the user drags the slider, the slider is theirs.
    if !session.is_seeking {
        session.position = position;
        session.slider_value = position.as_secs_f64();
    }
    Ok(())
}

/// Format a `Duration` as `MM:SS`.
pub fn format_time(d: Duration) -> String {
    let secs = d.as_secs();
    format!("{:02}:{:02}", secs / 60, secs % 60)
}
