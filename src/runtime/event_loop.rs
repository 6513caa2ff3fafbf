use std::sync::mpsc;
use std::time::Duration;

use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::{Terminal, backend::CrosstermBackend};

use crate::app::App;
use crate::config;
use crate::media::{MediaEvent, RodioElement};
use crate::ui;

/// Main terminal event loop: drains media events, draws the UI and handles
/// input. Returns `Ok(())` when the user quits.
pub fn run(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    settings: &config::Settings,
    app: &mut App<RodioElement>,
    media_events: &mpsc::Receiver<MediaEvent>,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        // Fold in everything the audio thread reported since the last frame.
        while let Ok(event) = media_events.try_recv() {
            app.player.handle_event(event);
        }

        terminal.draw(|f| ui::draw(f, app, &settings.ui, &settings.controls))?;

        if !event::poll(Duration::from_millis(50))? {
            continue;
        }
        match event::read()? {
            Event::Key(key) => {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                if handle_key_event(key, settings, app) {
                    break;
                }
            }
            Event::Mouse(mouse) => {
                let area = terminal.get_frame().area();
                handle_mouse_event(mouse, ui::layout(area), app);
            }
            _ => {}
        }
    }

    Ok(())
}

/// Returns `true` when the user asked to quit.
fn handle_key_event(
    key: KeyEvent,
    settings: &config::Settings,
    app: &mut App<RodioElement>,
) -> bool {
    let scrub = i64::try_from(settings.controls.scrub_seconds).unwrap_or(i64::MAX);

    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => {
            tracing::info!("quit requested");
            return true;
        }
        KeyCode::Char(' ') | KeyCode::Char('p') => app.player.toggle_play(),
        KeyCode::Char('l') | KeyCode::Char('n') | KeyCode::Right => app.player.play_next(),
        KeyCode::Char('h') | KeyCode::Char('b') | KeyCode::Left => app.player.play_prev(),
        KeyCode::Char('L') => {
            app.player.seek_by(scrub);
        }
        KeyCode::Char('H') => {
            app.player.seek_by(-scrub);
        }
        KeyCode::Char('t') => app.theme.toggle_theme(),
        KeyCode::Char('K') => app.toggle_metadata_window(),
        _ => {}
    }

    false
}

fn handle_mouse_event(mouse: MouseEvent, areas: ui::UiLayout, app: &mut App<RodioElement>) {
    if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
        return;
    }
    if let Some(fraction) = ui::progress_fraction_at(areas.progress, mouse.column, mouse.row) {
        if let Some(target) = app.player.seek_to_fraction(fraction) {
            tracing::debug!(fraction, ?target, "seek from progress bar");
        }
    }
}
