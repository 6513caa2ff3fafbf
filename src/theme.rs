//! Light/dark presentation for the whole UI.
//!
//! `ThemeToggle` owns the dark flag. The UI root asks it for the
//! presentation class and the palette to paint with.

mod palette;

pub use palette::Theme;

/// Marker applied to the UI root while the dark theme is active.
pub const DARK_CLASS: &str = "dark";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ThemeToggle {
    is_dark: bool,
}

impl ThemeToggle {
    pub fn new(is_dark: bool) -> Self {
        Self { is_dark }
    }

    pub fn is_dark(&self) -> bool {
        self.is_dark
    }

    /// Flip between light and dark.
    pub fn toggle_theme(&mut self) {
        self.is_dark = !self.is_dark;
        tracing::debug!(class = ?self.class(), "theme toggled");
    }

    /// The presentation class on the UI root: `Some("dark")` or nothing.
    pub fn class(&self) -> Option<&'static str> {
        self.is_dark.then_some(DARK_CLASS)
    }

    pub fn theme(&self) -> Theme {
        if self.is_dark {
            Theme::dark()
        } else {
            Theme::light()
        }
    }
}
