//! UI rendering helpers for the terminal user interface.
//!
//! This module contains functions to render the TUI using `ratatui`, plus
//! the geometry helpers the runtime uses to map mouse clicks back onto
//! widgets.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Gauge, List, ListItem, ListState, Padding, Paragraph, Wrap},
};
use std::time::Duration;

use crate::app::App;
use crate::config::{ControlsSettings, UiSettings};
use crate::media::MediaElement;
use crate::player::format_time;
use crate::theme::Theme;

/// Screen regions, shared by drawing and mouse hit-testing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UiLayout {
    pub header: Rect,
    pub now_playing: Rect,
    pub progress: Rect,
    pub tracks: Rect,
    pub footer: Rect,
}

const HEADER_HEIGHT: u16 = 3;
const NOW_PLAYING_HEIGHT: u16 = 6;
const PROGRESS_HEIGHT: u16 = 3;
const FOOTER_HEIGHT: u16 = 4;

/// Split the frame into regions. On short terminals the footer goes first,
/// then the header, so the now-playing box and progress bar keep their height.
pub fn layout(area: Rect) -> UiLayout {
    let core = NOW_PLAYING_HEIGHT + PROGRESS_HEIGHT + 1;
    let header = if area.height >= core + HEADER_HEIGHT {
        HEADER_HEIGHT
    } else {
        0
    };
    let footer = if area.height >= core + HEADER_HEIGHT + FOOTER_HEIGHT {
        FOOTER_HEIGHT
    } else {
        0
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(header),
            Constraint::Length(NOW_PLAYING_HEIGHT),
            Constraint::Length(PROGRESS_HEIGHT),
            Constraint::Min(0),
            Constraint::Length(footer),
        ])
        .split(area);

    UiLayout {
        header: chunks[0],
        now_playing: chunks[1],
        progress: chunks[2],
        tracks: chunks[3],
        footer: chunks[4],
    }
}

/// Map a click at (`column`, `row`) on the bordered progress bar in `area`
/// to a fraction of the track in `[0, 1)`. `None` when the click misses the bar.
pub fn progress_fraction_at(area: Rect, column: u16, row: u16) -> Option<f64> {
    let inner = Block::default().borders(Borders::ALL).inner(area);
    if inner.width == 0
        || column < inner.x
        || column >= inner.x + inner.width
        || row < inner.y
        || row >= inner.y + inner.height
    {
        return None;
    }
    Some(f64::from(column - inner.x) / f64::from(inner.width))
}

/// Render the controls help text, incorporating scrub seconds.
fn controls_text(scrub_seconds: u64) -> String {
    [
        "[space/p] play/pause".to_string(),
        "[h/l] prev/next song".to_string(),
        format!("[H/L] scrub -/+{scrub_seconds}s"),
        "[click bar] seek".to_string(),
        "[t] theme".to_string(),
        "[K] metadata".to_string(),
        "[q] quit".to_string(),
    ]
    .join(" | ")
}

fn seconds_or_unknown(d: Option<Duration>) -> f64 {
    d.map_or(f64::NAN, |d| d.as_secs_f64())
}

/// Format an optional duration, rounding up partial seconds, showing total seconds.
fn format_duration_mmss_ceil(d: Option<Duration>) -> String {
    let Some(d) = d else {
        return "-".to_string();
    };

    let mut total_secs = d.as_secs();
    if d.subsec_nanos() > 0 {
        total_secs = total_secs.saturating_add(1);
    }

    format!("{}:{:02} ({}s)", total_secs / 60, total_secs % 60, total_secs)
}

/// Compute a centered rectangle with given size constrained to `r`.
fn centered_rect_sized(mut width: u16, mut height: u16, r: Rect) -> Rect {
    width = width.min(r.width.saturating_sub(2)).max(10);
    height = height.min(r.height.saturating_sub(2)).max(5);

    let x = r.x + (r.width.saturating_sub(width) / 2);
    let y = r.y + (r.height.saturating_sub(height) / 2);
    Rect {
        x,
        y,
        width: width.min(r.width),
        height: height.min(r.height),
    }
}

fn bordered<'a>(title: &'a str, theme: &Theme) -> Block<'a> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(theme.border_style())
        .title(title)
}

fn now_playing_lines<M: MediaElement>(app: &App<M>, theme: &Theme) -> Vec<Line<'static>> {
    let player = &app.player;
    let track = player.current_track();
    let position = format!(
        "Track {}/{}",
        player.current_index() + 1,
        player.tracks().len()
    );
    let cover = track
        .image
        .as_ref()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "-".to_string());

    let status_color = match (player.is_playing(), player.is_play_pending()) {
        (true, _) => theme.success,
        (false, true) => theme.warning,
        (false, false) => theme.text_dim,
    };
    let button = Style::default()
        .fg(theme.accent)
        .add_modifier(Modifier::BOLD);
    let play_icon = if player.is_playing() { "⏸" } else { "▶" };

    vec![
        Line::from(Span::styled(
            track.title.clone(),
            Style::default()
                .fg(theme.accent)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(vec![
            Span::styled(app.status_text(), Style::default().fg(status_color)),
            Span::styled(format!(" • {position}"), Style::default().fg(theme.text_dim)),
        ]),
        Line::from(Span::styled(
            format!("Cover: {cover}"),
            Style::default().fg(theme.text_dim),
        )),
        Line::from(vec![
            Span::styled("⏮ Prev", button),
            Span::raw("    "),
            Span::styled(format!("{play_icon} {}", app.transport_label()), button),
            Span::raw("    "),
            Span::styled("Next ⏭", button),
        ]),
    ]
}

/// Render the entire UI into the provided `frame` using `app` state and settings.
pub fn draw<M: MediaElement>(
    frame: &mut Frame,
    app: &App<M>,
    ui_settings: &UiSettings,
    controls_settings: &ControlsSettings,
) {
    let theme = app.theme.theme();
    let areas = layout(frame.area());

    // Paint the root so the whole frame follows the active theme.
    frame.render_widget(Block::default().style(theme.base()), frame.area());

    // Header
    if !areas.header.is_empty() {
        let mode = if app.theme.is_dark() { "☾ dark" } else { "☀ light" };
        let header = Paragraph::new(ui_settings.header_text.as_str())
            .alignment(Alignment::Center)
            .block(
                bordered(" playdeck ", &theme)
                    .title_alignment(Alignment::Center)
                    .title_bottom(Line::from(format!(" {mode} ")).right_aligned()),
            );
        frame.render_widget(header, areas.header);
    }

    // Now playing
    let now_playing = Paragraph::new(now_playing_lines(app, &theme))
        .alignment(Alignment::Center)
        .block(bordered(" now playing ", &theme))
        .wrap(Wrap { trim: true });
    frame.render_widget(now_playing, areas.now_playing);

    // Progress
    let player = &app.player;
    let label = format!(
        "{} / {}",
        format_time(player.current_time().as_secs_f64()),
        format_time(seconds_or_unknown(player.duration()))
    );
    let gauge = Gauge::default()
        .block(bordered(" progress ", &theme))
        .gauge_style(Style::default().fg(theme.accent).bg(theme.selection_bg))
        .ratio(player.progress_ratio())
        .label(label);
    frame.render_widget(gauge, areas.progress);

    // Track list
    let items: Vec<ListItem> = player
        .tracks()
        .iter()
        .map(|t| ListItem::new(t.title.as_str()))
        .collect();
    let list = List::new(items)
        .block(bordered(" tracks ", &theme))
        .highlight_style(
            Style::default()
                .fg(theme.accent)
                .bg(theme.selection_bg)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("> ");
    let mut state = ListState::default();
    state.select(Some(player.current_index()));
    frame.render_stateful_widget(list, areas.tracks, &mut state);

    // Overlay metadata popup (keeps list visible under it)
    if app.metadata_window {
        let popup_area = centered_rect_sized(72, 8, areas.tracks);
        frame.render_widget(Clear, popup_area);

        let track = player.current_track();
        let meta = format!(
            "Title: {}\nAudio: {}\nCover: {}\nDuration: {}\nSource: {}",
            track.title,
            track.audio.display(),
            track
                .image
                .as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| "-".to_string()),
            format_duration_mmss_ceil(player.duration()),
            app.source.as_deref().unwrap_or("-"),
        );
        let meta_paragraph = Paragraph::new(meta)
            .style(theme.base())
            .block(
                bordered(" metadata (K closes) ", &theme).padding(Padding {
                    left: 1,
                    right: 0,
                    top: 0,
                    bottom: 0,
                }),
            )
            .wrap(Wrap { trim: true });
        frame.render_widget(meta_paragraph, popup_area);
    }

    if areas.footer.is_empty() {
        return;
    }
    let footer = Paragraph::new(controls_text(controls_settings.scrub_seconds))
        .style(Style::default().fg(theme.text_dim))
        .block(bordered(" controls ", &theme).padding(Padding {
            left: 1,
            right: 0,
            top: 0,
            bottom: 0,
        }))
        .wrap(Wrap { trim: true });
    frame.render_widget(footer, areas.footer);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn progress_click_maps_to_fraction_of_inner_width() {
        // 102 wide with borders -> 100 usable columns starting at x = 1.
        let area = Rect::new(0, 10, 102, 3);
        assert_eq!(progress_fraction_at(area, 1, 11), Some(0.0));
        assert_eq!(progress_fraction_at(area, 51, 11), Some(0.5));
        assert_eq!(progress_fraction_at(area, 100, 11), Some(0.99));
    }

    #[test]
    fn progress_click_outside_bar_is_ignored() {
        let area = Rect::new(0, 10, 102, 3);
        assert_eq!(progress_fraction_at(area, 0, 11), None);
        assert_eq!(progress_fraction_at(area, 101, 11), None);
        assert_eq!(progress_fraction_at(area, 50, 10), None);
        assert_eq!(progress_fraction_at(area, 50, 13), None);
    }

    #[test]
    fn layout_keeps_progress_between_now_playing_and_tracks() {
        let areas = layout(Rect::new(0, 0, 80, 30));
        assert_eq!(areas.progress.height, 3);
        assert_eq!(areas.progress.y, areas.now_playing.y + areas.now_playing.height);
        assert_eq!(areas.tracks.y, areas.progress.y + areas.progress.height);
    }

    #[test]
    fn tall_terminal_shows_every_region() {
        let areas = layout(Rect::new(0, 0, 80, 30));
        assert_eq!(areas.header.height, 3);
        assert_eq!(areas.now_playing.height, 6);
        assert_eq!(areas.footer.height, 4);
        assert_eq!(areas.tracks.height, 30 - 3 - 6 - 3 - 4);
    }

    #[test]
    fn short_terminal_drops_footer_before_transport() {
        let areas = layout(Rect::new(0, 0, 80, 14));
        assert_eq!(areas.footer.height, 0);
        assert_eq!(areas.header.height, 3);
        assert_eq!(areas.now_playing.height, 6);
        assert_eq!(areas.progress.height, 3);
    }

    #[test]
    fn very_short_terminal_keeps_now_playing_and_progress() {
        let areas = layout(Rect::new(0, 0, 80, 12));
        assert_eq!(areas.header.height, 0);
        assert_eq!(areas.footer.height, 0);
        assert_eq!(areas.now_playing.y, 0);
        assert_eq!(areas.now_playing.height, 6);
        assert_eq!(areas.progress.height, 3);
        assert_eq!(areas.tracks.height, 3);
    }

    #[test]
    fn controls_text_mentions_scrub_seconds() {
        let text = controls_text(7);
        assert!(text.contains("[H/L] scrub -/+7s"));
        assert!(text.contains("[t] theme"));
    }

    #[test]
    fn format_duration_rounds_partial_seconds_up() {
        assert_eq!(format_duration_mmss_ceil(None), "-");
        assert_eq!(
            format_duration_mmss_ceil(Some(Duration::from_millis(61_200))),
            "1:02 (62s)"
        );
    }
}
