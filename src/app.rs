//! Application module: exposes the app model used by the TUI and runtime.
//!
//! The `App` model lives in `app::model` and bundles the playback
//! controller with the theme toggle and view flags.

mod model;

pub use model::*;
