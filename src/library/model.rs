use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// A single playable item: what the list shows and where the audio lives.
///
/// Identity is the `path`; the same file may still be added twice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Track {
    pub title: String,
    pub path: PathBuf,
}

impl Track {
    pub fn new(title: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            title: title.into(),
            path: path.into(),
        }
    }

    /// Build a track from a file reference, titled after the file name without
    /// its extension.
    pub fn from_path(path: &Path) -> Self {
        let title = path
            .file_stem()
            .and_then(|s| s.to_str())
            .filter(|s| !s.trim().is_empty())
            .unwrap_or("UNKNOWN")
            .to_string();
        Self::new(title, path)
    }
}
