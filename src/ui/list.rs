use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style, Stylize},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Padding, Paragraph, Wrap},
};

use crate::app::{App, Mode};
use crate::config::UiSettings;

use super::{centered_rect_sized, controls_text, footer, header};

pub(super) fn draw(frame: &mut Frame, app: &App, ui_settings: &UiSettings) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(4),
        ])
        .split(frame.area());

    frame.render_widget(header(&ui_settings.header_text), chunks[0]);

    let status = match &app.status {
        Some(message) => message.clone(),
        None => format!("{} songs", app.playlist.count()),
    };
    let status_par = Paragraph::new(status)
        .block(
            Block::bordered()
                .padding(Padding {
                    left: 1,
                    right: 0,
                    top: 0,
                    bottom: 0,
                })
                .title(" status "),
        )
        .wrap(Wrap { trim: true });
    frame.render_widget(status_par, chunks[1]);

    draw_songs(frame, app, chunks[2]);

    match app.mode {
        Mode::Browse => {}
        Mode::AddPath => draw_add_prompt(frame, app, chunks[2]),
        Mode::ConfirmDelete(index) => draw_delete_prompt(frame, app, index, chunks[2]),
    }

    let controls = [
        ("j/k", "up/down".to_string()),
        ("gg/G", "top/bottom".to_string()),
        ("enter", "play from selected".to_string()),
        ("a", "add songs".to_string()),
        ("d", "delete song".to_string()),
        ("q", "quit".to_string()),
    ];
    frame.render_widget(footer(controls_text(&controls)), chunks[3]);
}

fn draw_songs(frame: &mut Frame, app: &App, area: Rect) {
    if app.playlist.is_empty() {
        let empty = Paragraph::new("No songs yet. Press [a] to add a file or a folder.")
            .italic()
            .block(Block::default().borders(Borders::ALL).title(" songs "));
        frame.render_widget(empty, area);
        return;
    }

    // Center the selected item when possible by creating a visible window.
    // Only build ListItems for the visible window.
    let total = app.playlist.count();
    let list_height = area.height.saturating_sub(2) as usize;
    let sel_pos = app.selected.min(total - 1);
    let (start, end) = if total <= list_height || list_height == 0 {
        (0, total)
    } else {
        let half = list_height / 2;
        let mut start = sel_pos.saturating_sub(half);
        if start + list_height > total {
            start = total - list_height;
        }
        (start, start + list_height)
    };

    let items: Vec<ListItem> = app.playlist.tracks()[start..end]
        .iter()
        .map(|t| ListItem::new(t.title.as_str()))
        .collect();

    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title(" songs "))
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
        .highlight_symbol("> ");
    let mut state = ListState::default();
    state.select(Some(sel_pos - start));
    frame.render_stateful_widget(list, area, &mut state);
}

fn draw_add_prompt(frame: &mut Frame, app: &App, area: Rect) {
    let popup = centered_rect_sized(64, 5, area);
    frame.render_widget(Clear, popup);
    let prompt = Paragraph::new(format!("{}_\n(enter adds, esc cancels)", app.input)).block(
        Block::bordered()
            .padding(Padding {
                left: 1,
                right: 0,
                top: 0,
                bottom: 0,
            })
            .title(" add file or folder "),
    );
    frame.render_widget(prompt, popup);
}

fn draw_delete_prompt(frame: &mut Frame, app: &App, index: usize, area: Rect) {
    let title = app
        .playlist
        .get(index)
        .map(|t| t.title.as_str())
        .unwrap_or("-");
    let popup = centered_rect_sized(64, 6, area);
    frame.render_widget(Clear, popup);
    let prompt = Paragraph::new(format!(
        "Remove \"{title}\" from the list?\n[y] remove  [D] remove and delete file  [n] keep"
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
            .title(" delete song "),
    );
    frame.render_widget(prompt, popup);
}
