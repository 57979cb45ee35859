use std::path::PathBuf;

use tracing::warn;

use crate::app::App;
use crate::config;
use crate::library::{PLAYLIST_FILE_NAME, PathPicker, PlaylistFile};

/// Build the list screen: read the saved song list, then add anything passed
/// on the command line. Nothing here is fatal.
pub fn load_app(settings: &config::Settings, args: &[String], picker: &PathPicker) -> App {
    let path = settings.playlist_path().unwrap_or_else(|| {
        warn!("no data directory, keeping songs in the working directory");
        PathBuf::from(PLAYLIST_FILE_NAME)
    });

    let mut app = App::load(PlaylistFile::new(path));
    if !args.is_empty() {
        app.add_paths(picker, args);
    }
    app
}
