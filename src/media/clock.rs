//! Elapsed-time bookkeeping for the sink that is currently playing.

use std::time::{Duration, Instant};

/// Position = time accumulated while paused plus time since the last resume.
#[derive(Debug, Default)]
pub(super) struct PlaybackClock {
    started_at: Option<Instant>,
    accumulated: Duration,
}

impl PlaybackClock {
    pub(super) fn elapsed(&self) -> Duration {
        self.elapsed_at(Instant::now())
    }

    fn elapsed_at(&self, now: Instant) -> Duration {
        self.accumulated
            + self
                .started_at
                .map_or(Duration::ZERO, |st| now.saturating_duration_since(st))
    }

    pub(super) fn is_running(&self) -> bool {
        self.started_at.is_some()
    }

    pub(super) fn resume(&mut self) {
        if self.started_at.is_none() {
            self.started_at = Some(Instant::now());
        }
    }

    pub(super) fn pause(&mut self) {
        if let Some(st) = self.started_at.take() {
            self.accumulated += st.elapsed();
        }
    }

    /// Jump to `position`, keeping the running/paused state.
    pub(super) fn reset_to(&mut self, position: Duration) {
        self.accumulated = position;
        if self.started_at.is_some() {
            self.started_at = Some(Instant::now());
        }
    }

    pub(super) fn stop(&mut self) {
        self.started_at = None;
        self.accumulated = Duration::ZERO;
    }
}
