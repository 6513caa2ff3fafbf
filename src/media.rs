//! The media element the player drives.
//!
//! `MediaElement` is the play/pause/seek/load surface; lifecycle
//! notifications come back as `MediaEvent`s. `RodioElement` is the real
//! implementation, running `rodio` on its own thread.

mod clock;
mod element;
mod sink;
mod thread;
mod transport;
mod types;

pub use element::RodioElement;
pub use types::{LoadGeneration, MediaElement, MediaError, MediaEvent, PlayRequest};
