//! Position and end-of-track bookkeeping of the audio thread.
//!
//! The thread owns the `rodio` sink; everything it decides about clocks,
//! the `Ended` latch and event tagging lives here, with the sink's state
//! passed in as plain flags.

use std::time::Duration;

use super::clock::PlaybackClock;
use super::types::{LoadGeneration, MediaEvent, PlayRequest};

#[derive(Debug, Default)]
pub(super) struct Transport {
    clock: PlaybackClock,
    generation: LoadGeneration,
    /// Request that started the audio currently in the sink.
    request: Option<PlayRequest>,
    /// Set once `Ended` went out for the current sink, so it is reported once.
    ended: bool,
}

impl Transport {
    /// A new source replaced the old one: rewind and forget the old sink.
    pub(super) fn load(&mut self, generation: LoadGeneration) {
        self.clock.stop();
        self.generation = generation;
        self.request = None;
        self.ended = false;
    }

    pub(super) fn generation(&self) -> LoadGeneration {
        self.generation
    }

    pub(super) fn is_running(&self) -> bool {
        self.clock.is_running()
    }

    pub(super) fn position(&self) -> Duration {
        self.clock.elapsed()
    }

    /// Where a freshly built sink should start. A track that already ended
    /// plays again from the top.
    pub(super) fn start_position(&self) -> Duration {
        if self.ended {
            Duration::ZERO
        } else {
            self.clock.elapsed()
        }
    }

    /// A new sink started at `position` on behalf of `request`.
    pub(super) fn started(&mut self, request: PlayRequest, position: Duration) {
        self.ended = false;
        self.request = Some(request);
        self.clock.reset_to(position);
        self.clock.resume();
    }

    /// The paused sink was resumed on behalf of `request`.
    pub(super) fn resumed(&mut self, request: PlayRequest) {
        self.request = Some(request);
        self.clock.resume();
    }

    pub(super) fn paused(&mut self) {
        self.clock.pause();
    }

    /// Jump to `position`, keeping the paused/playing state.
    ///
    /// Returns `true` when the sink rebuilt for the new position should play.
    pub(super) fn seeked(&mut self, position: Duration) -> bool {
        self.ended = false;
        self.clock.reset_to(position);
        self.clock.is_running()
    }

    /// Decide what a periodic tick reports. `drained` tells whether the sink
    /// has run out of audio.
    pub(super) fn tick(&mut self, drained: bool) -> Option<MediaEvent> {
        if !self.clock.is_running() {
            return None;
        }

        if drained && !self.ended {
            if let Some(request) = self.request {
                self.ended = true;
                self.clock.pause();
                return Some(MediaEvent::Ended {
                    generation: self.generation,
                    request,
                });
            }
        }

        Some(self.time_update())
    }

    pub(super) fn time_update(&self) -> MediaEvent {
        MediaEvent::TimeUpdate {
            generation: self.generation,
            position: self.clock.elapsed(),
        }
    }

    pub(super) fn stop(&mut self) {
        self.clock.stop();
        self.request = None;
    }
}
