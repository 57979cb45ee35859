//! JSON persistence for the song list.
//!
//! The document is a single array of `{ "title": ..., "path": ... }` records
//! kept at a fixed app-local path.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, error, warn};

use super::model::Track;
use super::store::Playlist;

pub const PLAYLIST_FILE_NAME: &str = "songs.json";

#[derive(Debug, Error)]
pub enum PersistError {
    #[error("failed to read {}: {source}", .path.display())]
    Read { path: PathBuf, source: io::Error },

    #[error("{} is not a valid song list: {source}", .path.display())]
    Corrupt {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("failed to encode song list: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("failed to write {}: {source}", .path.display())]
    Write { path: PathBuf, source: io::Error },
}

/// Handle on the on-disk song list.
#[derive(Debug, Clone)]
pub struct PlaylistFile {
    path: PathBuf,
}

impl PlaylistFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the song list, treating a missing or unreadable document as an
    /// empty playlist.
    pub fn load(&self) -> Playlist {
        match self.try_load() {
            Ok(playlist) => playlist,
            Err(PersistError::Read { source, .. }) if source.kind() == io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "no saved song list yet");
                Playlist::default()
            }
            Err(e) => {
                warn!(error = %e, "could not load song list, starting empty");
                Playlist::default()
            }
        }
    }

    pub fn try_load(&self) -> Result<Playlist, PersistError> {
        let raw = fs::read_to_string(&self.path).map_err(|source| PersistError::Read {
            path: self.path.clone(),
            source,
        })?;
        let tracks: Vec<Track> =
            serde_json::from_str(&raw).map_err(|source| PersistError::Corrupt {
                path: self.path.clone(),
                source,
            })?;
        Ok(Playlist::new(tracks))
    }

    /// Write the song list, creating the parent directory when needed.
    ///
    /// Failures are logged here and returned so the list screen can show them.
    pub fn save(&self, playlist: &Playlist) -> Result<(), PersistError> {
        self.write(playlist).inspect_err(|e| {
            error!(error = %e, "failed to save song list");
        })
    }

    fn write(&self, playlist: &Playlist) -> Result<(), PersistError> {
        let json = serde_json::to_string_pretty(playlist.tracks())?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|source| PersistError::Write {
                path: self.path.clone(),
                source,
            })?;
        }

        fs::write(&self.path, json).map_err(|source| PersistError::Write {
            path: self.path.clone(),
            source,
        })?;
        debug!(path = %self.path.display(), count = playlist.count(), "song list saved");
        Ok(())
    }
}
