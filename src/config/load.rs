use std::{env, path::PathBuf};

use super::schema::Settings;
use crate::library::PLAYLIST_FILE_NAME;

/// Configuration loading helpers.
///
/// `Settings::load` tries environment variables first (prefix `SETLIST__`), then an
/// optional config file and falls back to struct defaults.
impl Settings {
    /// Load settings from environment and optional config file.
    pub fn load() -> Result<Self, ::config::ConfigError> {
        let config_path = resolve_config_path();

        let mut builder = ::config::Config::builder();

        if let Some(path) = &config_path {
            builder = builder.add_source(::config::File::from(path.as_path()).required(false));
        }

        builder = builder.add_source(
            ::config::Environment::with_prefix("SETLIST")
                .separator("__")
                .try_parsing(true),
        );

        let cfg = builder.build()?;
        let settings: Settings = cfg.try_deserialize()?;
        Ok(settings)
    }

    /// Perform basic validation checks on loaded settings.
    pub fn validate(&self) -> Result<(), String> {
        if self.playback.progress_interval_ms < 50 {
            return Err("playback.progress_interval_ms must be >= 50".to_string());
        }
        if !(0.0..=1.0).contains(&self.audio.volume) {
            return Err("audio.volume must be between 0.0 and 1.0".to_string());
        }
        if self.controls.scrub_seconds == 0 {
            return Err("controls.scrub_seconds must be >= 1".to_string());
        }
        Ok(())
    }

    /// The song list location: configured path or `<data dir>/songs.json`.
    pub fn playlist_path(&self) -> Option<PathBuf> {
        self.library
            .playlist_path
            .clone()
            .or_else(|| default_data_dir().map(|d| d.join(PLAYLIST_FILE_NAME)))
    }

    /// Directory holding `setlist.log`.
    pub fn log_dir(&self) -> Option<PathBuf> {
        self.logging.directory.clone().or_else(default_data_dir)
    }
}

/// Resolve the config path from `SETLIST_CONFIG_PATH` or XDG defaults.
pub fn resolve_config_path() -> Option<PathBuf> {
    if let Some(p) = env::var_os("SETLIST_CONFIG_PATH") {
        let p = PathBuf::from(p);
        return Some(p);
    }
    default_config_path()
}

/// Compute the default config path under `$XDG_CONFIG_HOME/setlist/config.toml`
/// or `~/.config/setlist/config.toml` when `XDG_CONFIG_HOME` is not set.
pub fn default_config_path() -> Option<PathBuf> {
    let config_home = if let Some(xdg) = env::var_os("XDG_CONFIG_HOME") {
        Some(PathBuf::from(xdg))
    } else {
        env::var_os("HOME").map(|home| PathBuf::from(home).join(".config"))
    };

    config_home.map(|d| d.join("setlist").join("config.toml"))
}

/// App-local data directory: `$XDG_DATA_HOME/setlist` or `~/.local/share/setlist`.
pub fn default_data_dir() -> Option<PathBuf> {
    let data_home = if let Some(xdg) = env::var_os("XDG_DATA_HOME") {
        Some(PathBuf::from(xdg))
    } else {
        env::var_os("HOME").map(|home| PathBuf::from(home).join(".local").join("share"))
    };

    data_home.map(|d| d.join("setlist"))
}
