use std::io;

use crossterm::cursor::Show;
use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};

/// Raw mode, alternate screen and mouse capture for as long as it lives.
///
/// The terminal is restored on drop, including when entering fails halfway.
pub(super) struct TerminalSession {
    restore: fn(),
}

impl TerminalSession {
    pub(super) fn enter() -> io::Result<Self> {
        Self::enter_with(enter_terminal, restore_terminal)
    }

    fn enter_with(enter: impl FnOnce() -> io::Result<()>, restore: fn()) -> io::Result<Self> {
        let session = Self { restore };
        enter()?;
        Ok(session)
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        (self.restore)();
    }
}

fn enter_terminal() -> io::Result<()> {
    enable_raw_mode()?;
    execute!(io::stdout(), EnterAlternateScreen, EnableMouseCapture)
}

fn restore_terminal() {
    if let Err(e) = disable_raw_mode() {
        tracing::warn!(error = %e, "failed to leave raw mode");
    }
    if let Err(e) = execute!(io::stdout(), DisableMouseCapture, LeaveAlternateScreen, Show) {
        tracing::warn!(error = %e, "failed to restore the terminal screen");
    }
}
