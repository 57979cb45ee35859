//! Song list storage: the track model, the ordered playlist, JSON persistence
//! and the path-based file picker.

mod files;
mod model;
mod persist;
mod picker;
mod store;

pub use files::delete_file;
pub use model::Track;
pub use persist::{PLAYLIST_FILE_NAME, PlaylistFile};
pub use picker::{FilePicker, PathPicker, PickedFile, PickerError};
pub use store::Playlist;
