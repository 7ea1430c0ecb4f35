//! Playback state machine for the in-browser player.

mod controller;
mod cursor;
mod effects;
mod likes;
mod play_count;
mod status;
mod volume;

pub use controller::{PlaybackController, PlaylistContext};
pub use effects::{BackendRequest, LoadToken, MediaCommand, MediaEvent, PlayerEffect};
pub use likes::LikeTicket;
pub use volume::DEFAULT_VOLUME;
