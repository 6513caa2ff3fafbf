//! Playback controller: which track is current and whether it is playing.
//!
//! The controller drives one `MediaElement` and folds the element's
//! `MediaEvent`s back into its own state.

mod controller;
mod format;

pub use controller::PlaybackController;
pub use format::format_time;

#[cfg(test)]
mod tests;
