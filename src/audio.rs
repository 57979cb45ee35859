//! Player resource: the trait the transport controller drives, the `rodio`
//! backend, and the events and errors they share.

mod resource;
mod rodio_player;
mod sink;
mod types;

#[cfg(test)]
pub(crate) mod fake;

pub use resource::PlayerResource;
pub use rodio_player::RodioPlayer;
pub use types::{PlayerError, PlayerEvent};
