use serde::{Deserialize, Serialize};

const DEFAULT_BACKEND_URL: Option<&str> = option_env!("TUNEITIN_SUPABASE_URL");
const DEFAULT_ANON_KEY: Option<&str> = option_env!("TUNEITIN_SUPABASE_ANON_KEY");

/// Connection settings for the hosted backend project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BackendConfig {
    pub url: String,
    pub anon_key: String,
}

impl BackendConfig {
    pub fn new(url: String, anon_key: String) -> Self {
        Self {
            url: url.trim().trim_end_matches('/').to_string(),
            anon_key: anon_key.trim().to_string(),
        }
    }

    pub fn is_configured(&self) -> bool {
        !self.url.is_empty() && !self.anon_key.is_empty()
    }
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self::new(
            DEFAULT_BACKEND_URL.unwrap_or_default().to_string(),
            DEFAULT_ANON_KEY.unwrap_or_default().to_string(),
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct UserMetadata {
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct AuthUser {
    pub id: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub user_metadata: UserMetadata,
}

impl AuthUser {
    pub fn display_name(&self) -> String {
        self.user_metadata
            .name
            .clone()
            .filter(|name| !name.trim().is_empty())
            .or_else(|| self.email.clone())
            .unwrap_or_else(|| "Music Lover".to_string())
    }
}

/// Signed-in session as returned by the password grant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
    #[serde(default)]
    pub expires_at: Option<i64>,
    pub user: AuthUser,
}

impl Session {
    pub fn is_expired(&self, now_unix: i64) -> bool {
        self.expires_at.map(|at| at <= now_unix).unwrap_or(false)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Song {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub artist: String,
    #[serde(default)]
    pub album: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub audio_url: String,
    #[serde(default)]
    pub cover_image: Option<String>,
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub duration: u32,
    #[serde(default)]
    pub plays: u64,
    #[serde(default)]
    pub likes: u64,
    #[serde(default)]
    pub created_at: Option<String>,
}

impl Song {
    pub fn matches_query(&self, query: &str) -> bool {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return true;
        }
        self.title.to_lowercase().contains(&needle)
            || self.artist.to_lowercase().contains(&needle)
            || self
                .album
                .as_ref()
                .map(|album| album.to_lowercase().contains(&needle))
                .unwrap_or(false)
    }
}

/// Payload used when inserting a freshly uploaded song.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewSong {
    pub title: String,
    pub artist: String,
    pub album: Option<String>,
    pub description: Option<String>,
    pub audio_url: String,
    pub cover_image: Option<String>,
    pub user_id: String,
    pub duration: u32,
    pub plays: u64,
    pub likes: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct RowCount {
    #[serde(default)]
    pub count: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Playlist {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub cover_image: Option<String>,
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    /// Filled by `playlist_songs(count)` embeds.
    #[serde(default, skip_serializing)]
    pub playlist_songs: Vec<RowCount>,
}

impl Playlist {
    pub fn song_count(&self) -> u32 {
        self.playlist_songs.first().map(|c| c.count).unwrap_or(0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlaylistDraft {
    pub name: String,
    pub description: Option<String>,
    pub cover_image: Option<String>,
}

/// One row of `playlist_songs`, optionally with its song embedded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct PlaylistEntry {
    pub id: String,
    pub playlist_id: String,
    pub song_id: String,
    #[serde(default)]
    pub position: i64,
    #[serde(default, rename = "songs", skip_serializing)]
    pub song: Option<Song>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewPlaylistEntry {
    pub playlist_id: String,
    pub song_id: String,
    pub position: i64,
}

/// A playlist together with its songs in playback order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PlaylistDetail {
    pub playlist: Playlist,
    pub entries: Vec<PlaylistEntry>,
}

impl PlaylistDetail {
    pub fn songs(&self) -> Vec<Song> {
        self.entries.iter().filter_map(|e| e.song.clone()).collect()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Profile {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub avatar_url: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ProfileStats {
    pub songs: u32,
    pub playlists: u32,
    pub total_plays: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserLike {
    pub id: String,
}

pub fn format_duration(seconds: u32) -> String {
    let mins = seconds / 60;
    let secs = seconds % 60;
    format!("{}:{:02}", mins, secs)
}

/// Formats a fractional media position for the player clock.
pub fn format_clock(seconds: f64) -> String {
    if !seconds.is_finite() || seconds <= 0.0 {
        return format_duration(0);
    }
    format_duration(seconds.floor() as u32)
}

/// Length of a whole playlist, e.g. `1h 5m` or `42m`.
pub fn format_total_duration(songs: &[Song]) -> String {
    let total: u64 = songs.iter().map(|song| u64::from(song.duration)).sum();
    let hours = total / 3600;
    let mins = (total % 3600) / 60;
    if hours > 0 {
        format!("{hours}h {mins}m")
    } else {
        format!("{mins}m")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn playlist_reads_embedded_count() {
        let playlist: Playlist = serde_json::from_str(
            r#"{"id":"p1","name":"Road","playlist_songs":[{"count":7}]}"#,
        )
        .unwrap();
        assert_eq!(playlist.song_count(), 7);

        let bare: Playlist = serde_json::from_str(r#"{"id":"p2","name":"Empty"}"#).unwrap();
        assert_eq!(bare.song_count(), 0);
    }

    #[test]
    fn playlist_entry_unwraps_nested_song() {
        let entry: PlaylistEntry = serde_json::from_str(
            r#"{"id":"e1","playlist_id":"p1","song_id":"s1","position":3,
                "songs":{"id":"s1","title":"Intro","artist":"Band","audio_url":"u","likes":2}}"#,
        )
        .unwrap();
        assert_eq!(entry.position, 3);
        assert_eq!(entry.song.unwrap().likes, 2);
    }

    #[test]
    fn song_search_covers_album() {
        let song = Song {
            id: "s".into(),
            title: "Blue".into(),
            artist: "Coast".into(),
            album: Some("Harbour Lights".into()),
            ..Default::default()
        };
        assert!(song.matches_query("harbour"));
        assert!(song.matches_query("  COAST "));
        assert!(!song.matches_query("desert"));
    }

    #[test]
    fn clock_formatting_handles_unknown_duration() {
        assert_eq!(format_clock(f64::NAN), "0:00");
        assert_eq!(format_clock(125.9), "2:05");
    }

    #[test]
    fn backend_config_trims_trailing_slash() {
        let config = BackendConfig::new(" https://x.supabase.co/ ".into(), " key ".into());
        assert_eq!(config.url, "https://x.supabase.co");
        assert!(config.is_configured());
    }

    #[test]
    fn total_duration_rounds_down_to_minutes() {
        let song = |duration| Song {
            duration,
            ..Default::default()
        };
        assert_eq!(format_total_duration(&[]), "0m");
        assert_eq!(format_total_duration(&[song(1500), song(1400)]), "48m");
        assert_eq!(format_total_duration(&[song(3600), song(330)]), "1h 5m");
    }
}
