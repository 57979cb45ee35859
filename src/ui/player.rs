use std::time::Duration;

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Style, Stylize},
    text::Line,
    widgets::{Block, Clear, Gauge, Padding, Paragraph, Wrap},
};

use crate::audio::PlayerResource;
use crate::config::Settings;
use crate::playback::{
    NowPlaying, PlaybackSession, PlayerScreen, TransportController, TransportState, format_time,
};

use super::{centered_rect_sized, controls_text, footer, header};

/// Draw the player screen and return the inner area of the progress bar.
pub(super) fn draw<P: PlayerResource>(
    frame: &mut Frame,
    screen: &PlayerScreen<P>,
    settings: &Settings,
) -> Rect {
    let transport = screen.transport();
    let session = transport.session();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(5),
            Constraint::Length(3),
            Constraint::Length(4),
        ])
        .split(frame.area());

    frame.render_widget(header(&settings.ui.header_text), chunks[0]);

    let body = Paragraph::new(body_lines(transport, settings.ui.show_artwork))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: false })
        .block(Block::bordered().title(" now playing "));
    frame.render_widget(body, chunks[1]);

    let block = Block::bordered().title(progress_title(transport.state()));
    let bar_area = block.inner(chunks[2]);
    let gauge = Gauge::default()
        .block(block)
        .gauge_style(Style::default().fg(Color::Cyan))
        .ratio(session.slider_ratio())
        .label(time_text(session));
    frame.render_widget(gauge, chunks[2]);

    let controls = [
        ("space/p", "play/pause".to_string()),
        ("h/l", "prev/next song".to_string()),
        (
            "H/L",
            format!("scrub -/+{}s", settings.controls.scrub_seconds),
        ),
        ("enter", "seek to scrub".to_string()),
        ("x", "remove song".to_string()),
        ("q/esc", "back to list".to_string()),
    ];
    frame.render_widget(footer(controls_text(&controls)), chunks[3]);

    if let Some(index) = screen.pending_removal() {
        draw_remove_prompt(frame, transport, index, chunks[1]);
    }

    bar_area
}

fn body_lines<P: PlayerResource>(
    transport: &TransportController<P>,
    show_artwork: bool,
) -> Vec<Line<'static>> {
    let session = transport.session();
    let mut lines: Vec<Line> = Vec::new();

    if show_artwork && let Some(artwork) = session.artwork {
        lines.extend(artwork.lines.iter().map(|l| Line::from(*l)));
        lines.push(Line::default());
    }

    match &session.now_playing {
        NowPlaying::Nothing if transport.playlist().is_empty() => {
            lines.push(Line::from("Nothing to play. Add songs on the list screen.").italic());
        }
        NowPlaying::Nothing => lines.push(Line::from("Stopped").italic()),
        NowPlaying::Failed(_) => {
            lines.push(Line::from(session.now_playing.to_string()).fg(Color::Red).bold());
        }
        _ => lines.push(Line::from(session.now_playing.to_string()).bold()),
    }
    if let Some(index) = session.current_index {
        let count = transport.playlist().count();
        lines.push(Line::from(format!("song {} of {count}", index + 1)).dim());
    }
    if let Some(error) = transport.last_error() {
        lines.push(Line::from(error.to_string()).fg(Color::Red));
    }
    lines
}

fn progress_title(state: TransportState) -> &'static str {
    match state {
        TransportState::Idle => " stopped ",
        TransportState::Loading => " loading ",
        TransportState::Playing => " progress ",
        TransportState::Paused => " paused ",
        TransportState::Error => " error ",
    }
}

/// While dragging, the label follows the slider rather than the player.
fn time_text(session: &PlaybackSession) -> String {
    if session.is_seeking {
        format!(
            "{} / {}",
            format_time(Duration::from_secs_f64(session.slider_value.max(0.0))),
            format_time(session.duration)
        )
    } else {
        session.time_label()
    }
}

fn draw_remove_prompt<P: PlayerResource>(
    frame: &mut Frame,
    transport: &TransportController<P>,
    index: usize,
    area: Rect,
) {
    let title = transport
        .playlist()
        .get(index)
        .map(|t| t.title.as_str())
        .unwrap_or("-");
    let popup = centered_rect_sized(60, 5, area);
    frame.render_widget(Clear, popup);
    let prompt = Paragraph::new(format!(
        "Remove \"{title}\" from the list?\n[y] remove  [any other key] keep"
    ))
    .wrap(Wrap { trim: true })
    .block(
        Block::bordered()
            .padding(Padding {
                left: 1,
                right: 0,
                top: 0,
                bottom: 0,
            })
            .title(" remove song "),
    );
    frame.render_widget(prompt, popup);
}
