//! List screen model: the song list, the selection and whatever prompt is
//! currently open.
//!
//! Every edit of the list is saved right away through `PlaylistFile`; save
//! and pick failures end up in `status` instead of interrupting the user.

use tracing::{debug, info, warn};

use crate::library::{
    FilePicker, PickedFile, PickerError, Playlist, PlaylistFile, Track, delete_file,
};

/// What the list screen is waiting for.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum Mode {
    #[default]
    Browse,
    /// Typing a file or directory path to add.
    AddPath,
    /// Asking whether to remove the song at this index.
    ConfirmDelete(usize),
}

/// Answer to the delete confirmation.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum DeleteChoice {
    /// Remove from the list only.
    KeepFile,
    /// Remove from the list and delete the audio file.
    DeleteFile,
}

pub struct App {
    pub playlist: Playlist,
    pub selected: usize,
    pub mode: Mode,
    /// Text typed into the add prompt.
    pub input: String,
    pub status: Option<String>,
    store: PlaylistFile,
}

impl App {
    pub fn new(playlist: Playlist, store: PlaylistFile) -> Self {
        Self {
            playlist,
            selected: 0,
            mode: Mode::Browse,
            input: String::new(),
            status: None,
            store,
        }
    }

    /// Load the saved list. Never fails; a missing or unreadable file gives an
    /// empty list.
    pub fn load(store: PlaylistFile) -> Self {
        let playlist = store.load();
        info!(count = playlist.count(), path = %store.path().display(), "song list loaded");
        Self::new(playlist, store)
    }

    #[cfg(test)]
    pub fn store(&self) -> &PlaylistFile {
        &self.store
    }

    pub fn has_tracks(&self) -> bool {
        !self.playlist.is_empty()
    }

    #[cfg(test)]
    pub fn selected_track(&self) -> Option<&Track> {
        self.playlist.get(self.selected)
    }

    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status = Some(message.into());
    }

    pub fn clear_status(&mut self) {
        self.status = None;
    }

    /// Move selection down, wrapping to the top.
    pub fn next(&mut self) {
        self.selected = self.playlist.next(self.selected);
    }

    /// Move selection up, wrapping to the bottom.
    pub fn prev(&mut self) {
        self.selected = self.playlist.previous(self.selected);
    }

    pub fn select_first(&mut self) {
        self.selected = 0;
    }

    pub fn select_last(&mut self) {
        self.selected = self.playlist.count().saturating_sub(1);
    }

    fn clamp_selection(&mut self) {
        self.selected = self.playlist.clamp_index(self.selected).unwrap_or(0);
    }

    pub fn begin_add(&mut self) {
        self.mode = Mode::AddPath;
        self.input.clear();
    }

    pub fn push_input(&mut self, c: char) {
        if self.mode == Mode::AddPath {
            self.input.push(c);
        }
    }

    pub fn pop_input(&mut self) {
        self.input.pop();
    }

    /// Close any prompt without doing anything.
    pub fn cancel(&mut self) {
        self.mode = Mode::Browse;
        self.input.clear();
    }

    /// Resolve the typed path with `picker` and append what it finds.
    /// Returns how many songs were added.
    pub fn submit_add(&mut self, picker: &impl FilePicker) -> usize {
        let request = std::mem::take(&mut self.input);
        self.mode = Mode::Browse;
        self.add_from(picker, &request)
    }

    /// Add songs for each of `requests`, saving once at the end. Used for
    /// paths given on the command line.
    pub fn add_paths<S: AsRef<str>>(
        &mut self,
        picker: &impl FilePicker,
        requests: &[S],
    ) -> usize {
        let mut added = 0;
        for request in requests {
            match self.pick(picker, request.as_ref()) {
                Ok(tracks) => {
                    added += tracks.len();
                    self.playlist.add_all(tracks);
                }
                Err(e) => self.set_status(e.to_string()),
            }
        }
        if added > 0 && self.persist() {
            self.set_status(added_message(added));
        }
        added
    }

    fn add_from(&mut self, picker: &impl FilePicker, request: &str) -> usize {
        let tracks = match self.pick(picker, request) {
            Ok(tracks) => tracks,
            Err(PickerError::Cancelled) => {
                debug!("add cancelled");
                return 0;
            }
            Err(e) => {
                self.set_status(e.to_string());
                return 0;
            }
        };
        if tracks.is_empty() {
            self.set_status(format!("no audio files in {}", request.trim()));
            return 0;
        }

        let added = tracks.len();
        self.playlist.add_all(tracks);
        if self.persist() {
            self.set_status(added_message(added));
        }
        added
    }

    fn pick(&self, picker: &impl FilePicker, request: &str) -> Result<Vec<Track>, PickerError> {
        let picked = picker.pick(request).inspect_err(|e| {
            if !matches!(e, PickerError::Cancelled) {
                warn!(request, error = %e, "pick failed");
            }
        })?;
        Ok(picked.into_iter().map(PickedFile::into_track).collect())
    }

    /// Ask for confirmation before removing the selected song.
    pub fn request_delete(&mut self) {
        if self.has_tracks() {
            self.mode = Mode::ConfirmDelete(self.selected);
        }
    }

    /// Carry out a pending delete. The song leaves the list even when deleting
    /// its file fails.
    pub fn confirm_delete(&mut self, choice: DeleteChoice) -> Option<Track> {
        let Mode::ConfirmDelete(index) = self.mode else {
            return None;
        };
        self.mode = Mode::Browse;

        let track = self.remove_at(index)?;
        if choice == DeleteChoice::DeleteFile {
            match delete_file(&track.path) {
                Ok(()) => self.set_status(format!("deleted {}", track.title)),
                Err(e) => {
                    warn!(error = %e, "file delete failed");
                    self.set_status(e.to_string());
                }
            }
        }
        Some(track)
    }

    /// Remove the song at `index` from the list and save.
    pub fn remove_at(&mut self, index: usize) -> Option<Track> {
        let track = self.playlist.remove_at(index)?;
        self.clamp_selection();
        if self.persist() {
            self.set_status(format!("removed {}", track.title));
        }
        Some(track)
    }

    /// Save the list, reporting a failure in the status line.
    fn persist(&mut self) -> bool {
        match self.store.save(&self.playlist) {
            Ok(()) => true,
            Err(e) => {
                self.set_status(format!("could not save songs: {e}"));
                false
            }
        }
    }
}

fn added_message(count: usize) -> String {
    if count == 1 {
        "added 1 song".to_string()
    } else {
        format!("added {count} songs")
    }
}
