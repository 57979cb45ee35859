//! Application module: the list screen model used by the TUI and runtime.
//!
//! `App` lives in `app::model` and holds the song list, the selection and the
//! open prompt, if any.

mod model;

pub use model::*;
