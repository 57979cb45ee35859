use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::info;

#[derive(Debug, Error)]
#[error("could not delete {}: {source}", .path.display())]
pub struct DeleteFileError {
    pub path: PathBuf,
    pub source: io::Error,
}

/// Delete the audio file behind a removed track.
pub fn delete_file(path: &Path) -> Result<(), DeleteFileError> {
    fs::remove_file(path).map_err(|source| DeleteFileError {
        path: path.to_path_buf(),
        source,
    })?;
    info!(path = %path.display(), "deleted audio file");
    Ok(())
}
