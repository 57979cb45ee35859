use std::time::{Duration, Instant};

use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::{Terminal, backend::CrosstermBackend, layout::Rect};
use tracing::{info, warn};

use crate::app::{App, DeleteChoice, Mode};
use crate::audio::{PlayerResource, RodioPlayer};
use crate::config;
use crate::library::PathPicker;
use crate::playback::{PlayerScreen, SliderGesture};
use crate::ui;

const INPUT_POLL: Duration = Duration::from_millis(50);

/// State tracked by the runtime event loop across iterations.
pub struct EventLoopState {
    /// Internal two-key prefix state used for `gg` handling.
    pub pending_gg: bool,
    /// The open player screen, if any. Dropping it ends the session.
    pub player: Option<PlayerScreen<RodioPlayer>>,
    /// Where the progress bar was last drawn, for mouse seeking.
    pub slider_area: Option<Rect>,
}

impl EventLoopState {
    pub fn new() -> Self {
        Self {
            pending_gg: false,
            player: None,
            slider_area: None,
        }
    }
}

/// Main terminal event loop: pumps the open player session, draws, and
/// handles input. Returns `Ok(())` when the user quits.
pub fn run(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    settings: &config::Settings,
    app: &mut App,
    picker: &PathPicker,
    state: &mut EventLoopState,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        let mut timeout = INPUT_POLL;
        if let Some(screen) = state.player.as_mut() {
            let now = Instant::now();
            screen.update(now);
            timeout = timeout.min(screen.progress().time_until_due(now));
        }

        terminal.draw(|f| {
            state.slider_area = ui::draw(f, app, state.player.as_ref(), settings);
        })?;

        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if handle_key_event(key, settings, app, picker, state) {
                        break;
                    }
                }
                Event::Mouse(mouse) => handle_mouse_event(mouse, state),
                _ => {}
            }
        }
    }

    Ok(())
}

/// Returns true when the app should exit.
fn handle_key_event(
    key: KeyEvent,
    settings: &config::Settings,
    app: &mut App,
    picker: &PathPicker,
    state: &mut EventLoopState,
) -> bool {
    if let Some(screen) = state.player.as_mut() {
        if handle_player_key(key, app, screen) {
            // Dropping the screen cancels its progress loop and releases the
            // audio device.
            state.player = None;
            state.slider_area = None;
            info!("player screen closed");
        }
        return false;
    }

    match app.mode {
        Mode::AddPath => {
            match key.code {
                KeyCode::Esc => app.cancel(),
                KeyCode::Enter => {
                    app.submit_add(picker);
                }
                KeyCode::Backspace => app.pop_input(),
                KeyCode::Char(c) if !c.is_control() => app.push_input(c),
                _ => {}
            }
            return false;
        }
        Mode::ConfirmDelete(_) => {
            match key.code {
                KeyCode::Char('y') => {
                    app.confirm_delete(DeleteChoice::KeepFile);
                }
                KeyCode::Char('D') => {
                    app.confirm_delete(DeleteChoice::DeleteFile);
                }
                KeyCode::Char('n') | KeyCode::Esc => app.cancel(),
                _ => {}
            }
            return false;
        }
        Mode::Browse => {}
    }

    match key.code {
        KeyCode::Char('q') => return true,
        KeyCode::Char('g') => {
            if state.pending_gg {
                state.pending_gg = false;
                app.select_first();
            } else {
                state.pending_gg = true;
            }
            return false;
        }
        KeyCode::Char('G') => app.select_last(),
        KeyCode::Char('j') | KeyCode::Down => app.next(),
        KeyCode::Char('k') | KeyCode::Up => app.prev(),
        KeyCode::Char('a') => app.begin_add(),
        KeyCode::Char('d') | KeyCode::Delete => app.request_delete(),
        KeyCode::Enter => {
            state.player = open_player(app, settings);
        }
        _ => {}
    }
    // g pending should clear on any other key
    state.pending_gg = false;
    false
}

fn open_player(app: &mut App, settings: &config::Settings) -> Option<PlayerScreen<RodioPlayer>> {
    let (player, events) = match RodioPlayer::open(&settings.audio) {
        Ok(opened) => opened,
        Err(e) => {
            warn!(error = %e, "cannot open audio output");
            app.set_status(format!("cannot play: {e}"));
            return None;
        }
    };

    let start = if settings.playback.start_at_selection {
        app.selected
    } else {
        0
    };
    app.clear_status();
    info!(start, count = app.playlist.count(), "player screen opened");
    Some(PlayerScreen::open(
        player,
        events,
        app.playlist.clone(),
        start,
        settings,
        Instant::now(),
    ))
}

/// Returns true when the player screen should close.
fn handle_player_key<P: PlayerResource>(
    key: KeyEvent,
    app: &mut App,
    screen: &mut PlayerScreen<P>,
) -> bool {
    if screen.pending_removal().is_some() {
        match key.code {
            KeyCode::Char('y') => {
                // The list cannot change while the screen is open, so indices
                // still line up with the session snapshot.
                if let Some(index) = screen.confirm_removal() {
                    app.remove_at(index);
                }
            }
            _ => screen.cancel_removal(),
        }
        return false;
    }

    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => return true,
        KeyCode::Char(' ') | KeyCode::Char('p') => screen.transport_mut().toggle(),
        KeyCode::Char('l') => screen.transport_mut().next(),
        KeyCode::Char('h') => screen.transport_mut().previous(),
        KeyCode::Char('L') => screen.scrub_forward(),
        KeyCode::Char('H') => screen.scrub_backward(),
        KeyCode::Enter => {
            screen.commit_scrub();
        }
        KeyCode::Char('x') => screen.request_removal(),
        _ => {}
    }
    false
}

fn handle_mouse_event(mouse: MouseEvent, state: &mut EventLoopState) {
    let (Some(screen), Some(area)) = (state.player.as_mut(), state.slider_area) else {
        return;
    };
    if let Some(gesture) = slider_gesture(mouse, area, screen.transport().session().slider_max) {
        screen.slider(gesture);
    }
}

/// Map a mouse event to a slider gesture. Presses count only on the bar;
/// drags and releases count anywhere so a drag may leave the bar.
fn slider_gesture(mouse: MouseEvent, area: Rect, max: f64) -> Option<SliderGesture> {
    let on_bar = area.contains((mouse.column, mouse.row).into());
    let value = || ui::slider_value_at(area, mouse.column, max);
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) if on_bar => Some(SliderGesture::Press(value())),
        MouseEventKind::Drag(MouseButton::Left) => Some(SliderGesture::Drag(value())),
        MouseEventKind::Up(MouseButton::Left) => Some(SliderGesture::Release),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::fake::FakePlayer;
    use crate::library::{Playlist, PlaylistFile, Track};
    use crossterm::event::KeyModifiers;
    use tempfile::TempDir;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn session(dir: &TempDir) -> (App, PlayerScreen<FakePlayer>) {
        let playlist = Playlist::new(vec![
            Track::new("A", "/music/A.mp3"),
            Track::new("B", "/music/B.mp3"),
        ]);
        let app = App::new(playlist.clone(), PlaylistFile::new(dir.path().join("songs.json")));
        let (player, events) = FakePlayer::new();
        let screen = PlayerScreen::open(
            player,
            events,
            playlist,
            0,
            &config::Settings::default(),
            Instant::now(),
        );
        (app, screen)
    }

    #[test]
    fn remove_key_asks_first_and_any_other_key_keeps_the_song() {
        let dir = TempDir::new().unwrap();
        let (mut app, mut screen) = session(&dir);

        assert!(!handle_player_key(key(KeyCode::Char('x')), &mut app, &mut screen));
        assert_eq!(screen.pending_removal(), Some(0));
        assert_eq!(app.playlist.count(), 2);

        // `q` answers the prompt instead of closing the screen.
        assert!(!handle_player_key(key(KeyCode::Char('q')), &mut app, &mut screen));
        assert_eq!(screen.pending_removal(), None);
        assert_eq!(app.playlist.count(), 2);
        assert_eq!(screen.transport().playlist().count(), 2);
    }

    #[test]
    fn confirmed_remove_drops_song_from_list_and_session() {
        let dir = TempDir::new().unwrap();
        let (mut app, mut screen) = session(&dir);

        handle_player_key(key(KeyCode::Char('x')), &mut app, &mut screen);
        handle_player_key(key(KeyCode::Char('y')), &mut app, &mut screen);

        assert_eq!(app.playlist.count(), 1);
        assert_eq!(app.playlist.get(0).map(|t| t.title.as_str()), Some("B"));
        assert_eq!(screen.transport().playlist().count(), 1);
        assert_eq!(app.store().load(), app.playlist);
    }

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    #[test]
    fn press_off_the_bar_is_ignored() {
        let area = Rect::new(10, 5, 21, 1);
        let down = MouseEventKind::Down(MouseButton::Left);
        assert_eq!(slider_gesture(mouse(down, 12, 9), area, 100.0), None);
        assert_eq!(
            slider_gesture(mouse(down, 10, 5), area, 100.0),
            Some(SliderGesture::Press(0.0))
        );
    }

    #[test]
    fn drag_and_release_map_anywhere() {
        let area = Rect::new(10, 5, 21, 1);
        assert_eq!(
            slider_gesture(mouse(MouseEventKind::Drag(MouseButton::Left), 20, 8), area, 100.0),
            Some(SliderGesture::Drag(50.0))
        );
        assert_eq!(
            slider_gesture(mouse(MouseEventKind::Up(MouseButton::Left), 0, 0), area, 100.0),
            Some(SliderGesture::Release)
        );
        assert_eq!(
            slider_gesture(mouse(MouseEventKind::Moved, 20, 5), area, 100.0),
            None
        );
    }
}
