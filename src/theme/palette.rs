use ratatui::style::{Color, Style};

/// Named color slots used by the UI chrome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    /// Base background of the whole frame.
    pub background: Color,
    /// Normal text color.
    pub text: Color,
    /// Dimmed / inactive text color.
    pub text_dim: Color,
    /// Primary accent (transport buttons, gauge fill, current track).
    pub accent: Color,
    /// Background for the highlighted list row.
    pub selection_bg: Color,
    /// Border and divider color.
    pub border: Color,
    /// Playing indicator.
    pub success: Color,
    /// Waiting-for-audio indicator.
    pub warning: Color,
}

impl Theme {
    pub fn dark() -> Self {
        Self {
            background: Color::Rgb(18, 18, 24),
            text: Color::White,
            text_dim: Color::DarkGray,
            accent: Color::Rgb(44, 204, 228),
            selection_bg: Color::Rgb(30, 30, 40),
            border: Color::DarkGray,
            success: Color::Green,
            warning: Color::Yellow,
        }
    }

    pub fn light() -> Self {
        Self {
            background: Color::Rgb(245, 245, 248),
            text: Color::Black,
            text_dim: Color::Gray,
            accent: Color::Rgb(20, 130, 150),
            selection_bg: Color::Rgb(220, 225, 235),
            border: Color::Gray,
            success: Color::Rgb(0, 130, 60),
            warning: Color::Rgb(180, 120, 0),
        }
    }

    /// Style for the frame root: text on background.
    pub fn base(&self) -> Style {
        Style::default().fg(self.text).bg(self.background)
    }

    pub fn border_style(&self) -> Style {
        Style::default().fg(self.border)
    }
}
