//! Playback core: the transport state machine, the progress sync loop, seek
//! handling and the player screen that ties them to one session.

mod artwork;
mod progress;
mod screen;
mod seek;
mod state;
mod transport;

pub use progress::format_time;
pub use screen::{PlayerScreen, SliderGesture};
pub use state::{NowPlaying, PlaybackSession, TransportState};
pub use transport::TransportController;
