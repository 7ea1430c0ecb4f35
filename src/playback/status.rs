use serde::{Deserialize, Serialize};

/// Where the player is in its lifecycle for the currently assigned song.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PlayerStatus {
    /// No song loaded
    #[default]
    Idle,
    /// Song assigned, media not ready yet
    Loading,
    Playing,
    Paused,
    /// Media reached its end; resolved on the same event
    Ended,
}

impl PlayerStatus {
    pub fn is_playing(self) -> bool {
        matches!(self, PlayerStatus::Playing)
    }

    pub fn has_song(self) -> bool {
        !matches!(self, PlayerStatus::Idle)
    }
}
