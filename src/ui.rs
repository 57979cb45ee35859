//! UI rendering helpers for the terminal user interface.
//!
//! This module contains functions to render the TUI using `ratatui`: the list
//! screen with its prompts, and the player screen while a session is open.

use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    widgets::{Block, Borders, Padding, Paragraph, Wrap},
};

use crate::app::App;
use crate::audio::PlayerResource;
use crate::config::Settings;
use crate::playback::PlayerScreen;

mod list;
mod player;

/// Render whichever screen is active. Returns the area of the progress bar
/// when the player screen is showing, for mouse hit-testing.
pub fn draw<P: PlayerResource>(
    frame: &mut Frame,
    app: &App,
    player: Option<&PlayerScreen<P>>,
    settings: &Settings,
) -> Option<Rect> {
    match player {
        Some(screen) => Some(player::draw(frame, screen, settings)),
        None => {
            list::draw(frame, app, &settings.ui);
            None
        }
    }
}

/// Slider value (in seconds) under `column` of a bar drawn across `area`.
/// The leftmost cell is 0 and the rightmost is `max`.
pub fn slider_value_at(area: Rect, column: u16, max: f64) -> f64 {
    if area.width <= 1 || max <= 0.0 {
        return 0.0;
    }
    let span = area.width - 1;
    let offset = column.saturating_sub(area.x).min(span);
    f64::from(offset) / f64::from(span) * max
}

/// Render `[key] action` pairs as one help line.
fn controls_text(controls: &[(&str, String)]) -> String {
    controls
        .iter()
        .map(|(key, action)| format!("[{key}] {action}"))
        .collect::<Vec<String>>()
        .join(" | ")
}

fn header(text: &str) -> Paragraph<'_> {
    Paragraph::new(text).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" setlist ")
            .title_alignment(Alignment::Center),
    )
}

fn footer(text: String) -> Paragraph<'static> {
    Paragraph::new(text)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" controls ")
                .padding(Padding {
                    left: 1,
                    right: 0,
                    top: 0,
                    bottom: 0,
                }),
        )
        .wrap(Wrap { trim: true })
}

/// Compute a centered rectangle with given size constrained to `r`.
fn centered_rect_sized(mut width: u16, mut height: u16, r: Rect) -> Rect {
    // Keep the popup smaller and avoid covering the entire UI.
    width = width.min(r.width.saturating_sub(2)).max(10);
    height = height.min(r.height.saturating_sub(2)).max(3);

    let x = r.x + (r.width.saturating_sub(width) / 2);
    let y = r.y + (r.height.saturating_sub(height) / 2);
    Rect {
        x,
        y,
        width,
        height,
    }
}
