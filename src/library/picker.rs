//! Picking audio files to add to the song list.
//!
//! The terminal has no native file dialog, so picking means typing a path. A
//! file is taken as-is; a directory is walked for audio files according to
//! the library settings.

use std::env;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use walkdir::WalkDir;

use crate::config::LibrarySettings;

use super::model::Track;

/// A file chosen by the user: the name shown to them and where it lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PickedFile {
    pub display_name: String,
    pub path: PathBuf,
}

impl PickedFile {
    fn from_path(path: &Path) -> Self {
        let display_name = path
            .file_name()
            .and_then(|s| s.to_str())
            .map(str::to_string)
            .unwrap_or_else(|| path.display().to_string());
        Self {
            display_name,
            path: path.to_path_buf(),
        }
    }

    /// Turn the pick into a playlist entry titled after the file name without
    /// its extension.
    pub fn into_track(self) -> Track {
        let title = Path::new(&self.display_name)
            .file_stem()
            .and_then(|s| s.to_str())
            .filter(|s| !s.trim().is_empty())
            .map(str::to_string)
            .unwrap_or(self.display_name);
        Track::new(title, self.path)
    }
}

#[derive(Debug, Error)]
pub enum PickerError {
    #[error("nothing picked")]
    Cancelled,

    #[error("no such file or directory: {}", .0.display())]
    NotFound(PathBuf),

    #[error("cannot read {}: {source}", .path.display())]
    Io { path: PathBuf, source: io::Error },
}

/// Source of user-chosen audio files.
pub trait FilePicker {
    /// Resolve `request` into zero or more files.
    fn pick(&self, request: &str) -> Result<Vec<PickedFile>, PickerError>;
}

/// Picks files from a typed path.
pub struct PathPicker {
    settings: LibrarySettings,
}

impl PathPicker {
    pub fn new(settings: LibrarySettings) -> Self {
        Self { settings }
    }

    fn walk(&self, dir: &Path) -> Vec<PickedFile> {
        let mut walker = WalkDir::new(dir).follow_links(self.settings.follow_links);

        // Non-recursive = only the root directory.
        let depth_cap = if self.settings.recursive {
            self.settings.max_depth
        } else {
            Some(1)
        };
        if let Some(d) = depth_cap {
            walker = walker.max_depth(d);
        }

        let include_hidden = self.settings.include_hidden;
        let mut picked: Vec<PickedFile> = walker
            .into_iter()
            .filter_entry(|e| include_hidden || e.depth() == 0 || !is_hidden(e.path()))
            .filter_map(Result::ok)
            .filter(|e| e.path().is_file() && is_audio_file(e.path(), &self.settings))
            .map(|e| PickedFile::from_path(e.path()))
            .collect();

        picked.sort_by(|a, b| a.path.cmp(&b.path));
        picked
    }
}

impl FilePicker for PathPicker {
    fn pick(&self, request: &str) -> Result<Vec<PickedFile>, PickerError> {
        let request = request.trim();
        if request.is_empty() {
            return Err(PickerError::Cancelled);
        }

        let path = expand_home(request);
        let meta = std::fs::metadata(&path).map_err(|source| match source.kind() {
            io::ErrorKind::NotFound => PickerError::NotFound(path.clone()),
            _ => PickerError::Io {
                path: path.clone(),
                source,
            },
        })?;

        if meta.is_dir() {
            Ok(self.walk(&path))
        } else {
            // An explicitly named file is trusted even with an unknown extension.
            Ok(vec![PickedFile::from_path(&path)])
        }
    }
}

fn expand_home(request: &str) -> PathBuf {
    match request.strip_prefix('~') {
        Some(rest) if rest.is_empty() || rest.starts_with('/') => match env::var_os("HOME") {
            Some(home) => PathBuf::from(home).join(rest.trim_start_matches('/')),
            None => PathBuf::from(request),
        },
        _ => PathBuf::from(request),
    }
}

fn is_audio_file(path: &Path, settings: &LibrarySettings) -> bool {
    path.extension()
        .and_then(|s| s.to_str())
        .map(|ext| {
            let ext = ext.to_ascii_lowercase();
            settings
                .extensions
                .iter()
                .map(|e| e.trim().trim_start_matches('.').to_ascii_lowercase())
                .any(|e| !e.is_empty() && e == ext)
        })
        .unwrap_or(false)
}

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .and_then(|s| s.to_str())
        .map(|name| name.starts_with('.'))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn picker(settings: LibrarySettings) -> PathPicker {
        PathPicker::new(settings)
    }

    #[test]
    fn is_audio_file_matches_configured_extensions_case_insensitive() {
        let settings = LibrarySettings::default();
        assert!(is_audio_file(Path::new("/tmp/a.mp3"), &settings));
        assert!(is_audio_file(Path::new("/tmp/a.MP3"), &settings));
        assert!(is_audio_file(Path::new("/tmp/a.flac"), &settings));
        assert!(is_audio_file(Path::new("/tmp/a.wav"), &settings));
        assert!(!is_audio_file(Path::new("/tmp/a.txt"), &settings));
        assert!(!is_audio_file(Path::new("/tmp/a"), &settings));
    }

    #[test]
    fn empty_request_is_a_cancel() {
        let p = picker(LibrarySettings::default());
        assert!(matches!(p.pick("   "), Err(PickerError::Cancelled)));
    }

    #[test]
    fn missing_path_is_not_found() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("nope.mp3");
        let p = picker(LibrarySettings::default());
        match p.pick(missing.to_str().unwrap()) {
            Err(PickerError::NotFound(path)) => assert_eq!(path, missing),
            other => panic!("unexpected pick result: {other:?}"),
        }
    }

    #[test]
    fn single_file_is_taken_as_is() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("Morning Song.opus");
        fs::write(&file, b"not real").unwrap();

        let picked = picker(LibrarySettings::default())
            .pick(file.to_str().unwrap())
            .unwrap();
        assert_eq!(picked.len(), 1);
        assert_eq!(picked[0].display_name, "Morning Song.opus");

        let track = picked[0].clone().into_track();
        assert_eq!(track.title, "Morning Song");
        assert_eq!(track.path, file);
    }

    #[test]
    fn directory_pick_filters_non_audio_and_sorts_by_path() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("b.MP3"), b"not a real mp3").unwrap();
        fs::write(dir.path().join("a.ogg"), b"not a real ogg").unwrap();
        fs::write(dir.path().join("c.txt"), b"ignore me").unwrap();

        let picked = picker(LibrarySettings::default())
            .pick(dir.path().to_str().unwrap())
            .unwrap();
        let names: Vec<&str> = picked.iter().map(|p| p.display_name.as_str()).collect();
        assert_eq!(names, vec!["a.ogg", "b.MP3"]);
    }

    #[test]
    fn directory_pick_respects_include_hidden_false() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join(".hidden.mp3"), b"not real").unwrap();
        fs::write(dir.path().join("visible.mp3"), b"not real").unwrap();

        let settings = LibrarySettings {
            include_hidden: false,
            ..LibrarySettings::default()
        };
        let picked = picker(settings).pick(dir.path().to_str().unwrap()).unwrap();
        assert_eq!(picked.len(), 1);
        assert_eq!(picked[0].display_name, "visible.mp3");
    }

    #[test]
    fn directory_pick_respects_recursive_false() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("root.mp3"), b"not real").unwrap();
        let sub = dir.path().join("sub");
        fs::create_dir_all(&sub).unwrap();
        fs::write(sub.join("child.mp3"), b"not real").unwrap();

        let settings = LibrarySettings {
            recursive: false,
            ..LibrarySettings::default()
        };
        let picked = picker(settings).pick(dir.path().to_str().unwrap()).unwrap();
        assert_eq!(picked.len(), 1);
        assert_eq!(picked[0].display_name, "root.mp3");
    }

    #[test]
    fn directory_without_audio_yields_nothing() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("notes.txt"), b"nothing to hear").unwrap();

        let picked = picker(LibrarySettings::default())
            .pick(dir.path().to_str().unwrap())
            .unwrap();
        assert!(picked.is_empty());
    }

    #[test]
    fn expand_home_only_touches_leading_tilde() {
        assert_eq!(expand_home("/abs/x.mp3"), PathBuf::from("/abs/x.mp3"));
        assert_eq!(expand_home("~user/x.mp3"), PathBuf::from("~user/x.mp3"));
    }
}
