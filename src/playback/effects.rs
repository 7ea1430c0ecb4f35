use crate::api::models::Song;
use crate::playback::likes::LikeTicket;
use std::time::Duration;

/// Identifies one load of one song. Backend answers carry it back so the
/// controller can drop results that belong to an earlier load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadToken {
    pub song_id: String,
    pub generation: u64,
}

/// Instructions for the media element.
#[derive(Debug, Clone, PartialEq)]
pub enum MediaCommand {
    /// `generation` stamps every media sample taken after this load.
    Load { url: String, generation: u64 },
    Unload,
    /// Try to start playback without a user gesture; the driver reports the
    /// outcome through `on_autoplay_result`.
    AttemptAutoplay,
    Play,
    Pause,
    Seek(f64),
    SetVolume(f64),
}

/// Calls the driver runs against the backend.
#[derive(Debug, Clone, PartialEq)]
pub enum BackendRequest {
    /// Current user's like relation plus the song's counter.
    FetchLikeState { token: LoadToken },
    /// Counter only, optionally after a delay.
    FetchLikeCount {
        token: LoadToken,
        delay: Option<Duration>,
    },
    RecordPlay { token: LoadToken, plays: u64 },
    Like { token: LoadToken, ticket: LikeTicket },
    Unlike { token: LoadToken, ticket: LikeTicket },
}

#[derive(Debug, Clone, PartialEq)]
pub enum PlayerEffect {
    Media(MediaCommand),
    Backend(BackendRequest),
    /// The controller moved to another song on its own (next/previous/end).
    SongChanged(Song),
    /// Blocking user-facing message.
    Alert(String),
}

/// What the driver observed on the media element.
#[derive(Debug, Clone, PartialEq)]
pub enum MediaEvent {
    Ready,
    Duration(f64),
    Time(f64),
    Playing,
    Paused,
    Ended,
    Error(String),
}
