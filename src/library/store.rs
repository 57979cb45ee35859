//! The ordered playlist shared by the list screen and snapshotted into the
//! player screen.

use super::model::Track;

/// Ordered, mutable sequence of tracks. Insertion order is preserved and there
/// are no reordering operations.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Playlist {
    tracks: Vec<Track>,
}

impl Playlist {
    pub fn new(tracks: Vec<Track>) -> Self {
        Self { tracks }
    }

    pub fn add(&mut self, track: Track) {
        self.tracks.push(track);
    }

    pub fn add_all<I: IntoIterator<Item = Track>>(&mut self, tracks: I) {
        self.tracks.extend(tracks);
    }

    /// Remove and return the track at `index`, or `None` when out of range.
    pub fn remove_at(&mut self, index: usize) -> Option<Track> {
        (index < self.tracks.len()).then(|| self.tracks.remove(index))
    }

    pub fn get(&self, index: usize) -> Option<&Track> {
        self.tracks.get(index)
    }

    pub fn count(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    /// Position of the first track sharing `track`'s path.
    pub fn index_of(&self, track: &Track) -> Option<usize> {
        self.tracks.iter().position(|t| t.path == track.path)
    }

    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    pub fn iter(&self) -> impl Iterator<Item = &Track> {
        self.tracks.iter()
    }

    /// Index after `index`, wrapping to the start. Unchanged when empty.
    pub fn next(&self, index: usize) -> usize {
        let count = self.count();
        if count == 0 {
            return index;
        }
        (index.min(count - 1) + 1) % count
    }

    /// Index before `index`, wrapping to the end. Unchanged when empty.
    pub fn previous(&self, index: usize) -> usize {
        let count = self.count();
        if count == 0 {
            return index;
        }
        (index.min(count - 1) + count - 1) % count
    }

    /// Clamp `index` into range, or `None` for an empty playlist.
    pub fn clamp_index(&self, index: usize) -> Option<usize> {
        self.count().checked_sub(1).map(|last| index.min(last))
    }
}

impl From<Vec<Track>> for Playlist {
    fn from(tracks: Vec<Track>) -> Self {
        Self::new(tracks)
    }
}

impl<'a> IntoIterator for &'a Playlist {
    type Item = &'a Track;
    type IntoIter = std::slice::Iter<'a, Track>;

    fn into_iter(self) -> Self::IntoIter {
        self.tracks.iter()
    }
}
