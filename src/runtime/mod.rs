use std::env;

use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::{Terminal, backend::CrosstermBackend};
use tracing::{info, warn};

use crate::library::PathPicker;

mod event_loop;
mod logging;
mod settings;
mod startup;

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let (settings, settings_problem) = settings::load_settings();

    let _log_guard = match settings.log_dir() {
        Some(dir) => Some(logging::init_logging(&dir, &settings.logging)?),
        None => None,
    };
    if let Some(problem) = settings_problem {
        warn!("{problem}");
    }
    info!(version = env!("CARGO_PKG_VERSION"), "setlist starting");

    let args: Vec<String> = env::args().skip(1).collect();
    let picker = PathPicker::new(settings.library.clone());
    let mut app = startup::load_app(&settings, &args, &picker);

    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let run_result: Result<(), Box<dyn std::error::Error>> = (|| {
        let mut state = event_loop::EventLoopState::new();
        event_loop::run(&mut terminal, &settings, &mut app, &picker, &mut state)
    })();

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), DisableMouseCapture, LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    info!("setlist exiting");
    run_result
}
