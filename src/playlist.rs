//! The static track list the player works through.
//!
//! Tracks come from a TOML playlist file or, when pointed at a directory,
//! from scanning it for audio files.

mod load;
mod model;
mod scan;

pub use load::{load_playlist, resolve_tracks};
pub use model::{PlaylistError, Track};
