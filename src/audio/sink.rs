//! Opening files into `rodio` sources and sinks.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::time::Duration;

use lofty::prelude::AudioFile;
use rodio::{Decoder, OutputStream, Sink, Source};
use tracing::debug;

use super::types::PlayerError;

pub(super) type FileDecoder = Decoder<BufReader<File>>;

/// Open and decode `path`.
pub(super) fn open_decoder(path: &Path) -> Result<FileDecoder, PlayerError> {
    let load_err = |reason: String| PlayerError::Load {
        path: path.to_path_buf(),
        reason,
    };

    let file = File::open(path).map_err(|e| load_err(e.to_string()))?;
    Decoder::new(BufReader::new(file)).map_err(|e| load_err(e.to_string()))
}

/// Duration reported by the decoder, falling back to the file's tags.
pub(super) fn source_duration(path: &Path, decoder: &FileDecoder) -> Option<Duration> {
    decoder
        .total_duration()
        .filter(|d| !d.is_zero())
        .or_else(|| probe_duration(path))
}

fn probe_duration(path: &Path) -> Option<Duration> {
    match lofty::read_from_path(path) {
        Ok(tagged) => Some(tagged.properties().duration()).filter(|d| !d.is_zero()),
        Err(e) => {
            debug!(path = %path.display(), error = %e, "could not probe duration");
            None
        }
    }
}

/// Create a paused `Sink` on `stream` holding `source`.
pub(super) fn create_sink(stream: &OutputStream, source: FileDecoder, volume: f32) -> Sink {
    let sink = Sink::connect_new(stream.mixer());
    sink.pause();
    sink.set_volume(volume);
    sink.append(source);
    sink
}
