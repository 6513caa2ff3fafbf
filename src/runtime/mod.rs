use std::env;
use std::path::PathBuf;
use std::sync::mpsc;
use std::time::Duration;

use ratatui::{Terminal, backend::CrosstermBackend};

use crate::app::App;
use crate::config::Settings;
use crate::logging;
use crate::media::{MediaEvent, RodioElement};
use crate::player::PlaybackController;
use crate::playlist::resolve_tracks;
use crate::theme::ThemeToggle;

mod event_loop;
mod settings;
mod terminal;

use terminal::TerminalSession;

/// Track source: CLI argument, then `player.playlist`, then the working directory.
fn resolve_source(settings: &Settings) -> PathBuf {
    env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .or_else(|| settings.player.playlist.clone())
        .or_else(|| env::current_dir().ok())
        .unwrap_or_else(|| PathBuf::from("."))
}

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let (settings, config_problem) = settings::load_settings();
    let _log_guard = logging::init_logging(&settings.logging)?;
    if let Some(problem) = config_problem {
        tracing::warn!("{problem}");
    }

    let source = resolve_source(&settings);
    let tracks = resolve_tracks(&source, &settings.library)?;

    let (event_tx, event_rx) = mpsc::channel::<MediaEvent>();
    let element = RodioElement::new(event_tx, settings.audio.clone());
    let player = PlaybackController::new(tracks, element)?;

    let mut app = App::new(player, ThemeToggle::new(settings.ui.dark));
    app.set_source(source.display().to_string());

    if settings.player.autoplay {
        app.player.toggle_play();
    }

    let run_result = run_in_terminal(&settings, &mut app, &event_rx);

    // The audio thread stops whether or not the terminal ever came up.
    app.player
        .media()
        .quit_softly(Duration::from_millis(settings.audio.quit_fade_out_ms));

    if let Err(ref e) = run_result {
        tracing::error!(error = %e, "terminal session failed");
    }
    run_result
}

/// Set up the terminal, run the event loop and restore the terminal on every exit path.
fn run_in_terminal(
    settings: &Settings,
    app: &mut App<RodioElement>,
    event_rx: &mpsc::Receiver<MediaEvent>,
) -> Result<(), Box<dyn std::error::Error>> {
    let _session = TerminalSession::enter()?;
    let backend = CrosstermBackend::new(std::io::stdout());
    let mut terminal = Terminal::new(backend)?;

    event_loop::run(&mut terminal, settings, app, event_rx)
}
