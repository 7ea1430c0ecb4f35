// Playlists and their ordered song entries.

pub const RECENT_PLAYLISTS_LIMIT: u32 = 4;

const PLAYLIST_WITH_COUNT: &str = "*, playlist_songs(count)";
const ENTRY_WITH_SONG: &str = "*, songs(*)";

#[derive(Debug, Serialize)]
struct NewPlaylist<'a> {
    name: &'a str,
    description: Option<&'a str>,
    cover_image: Option<&'a str>,
    user_id: &'a str,
}

#[derive(Debug, Serialize)]
struct PlaylistPatch<'a> {
    name: &'a str,
    description: Option<&'a str>,
    cover_image: Option<&'a str>,
    updated_at: String,
}

#[derive(Debug, Deserialize)]
struct PositionColumn {
    #[serde(default)]
    position: i64,
}

/// Entries for `song_ids`, placed after the highest existing position.
pub fn next_entries(
    playlist_id: &str,
    song_ids: &[String],
    max_position: Option<i64>,
) -> Vec<NewPlaylistEntry> {
    let start = max_position.map(|max| max + 1).unwrap_or(0);
    song_ids
        .iter()
        .enumerate()
        .map(|(offset, song_id)| NewPlaylistEntry {
            playlist_id: playlist_id.to_string(),
            song_id: song_id.clone(),
            position: start + offset as i64,
        })
        .collect()
}

fn trimmed(value: &Option<String>) -> Option<&str> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|value| !value.is_empty())
}

impl SupabaseClient {
    /// Newest playlists first, each with its song count.
    pub async fn playlists(&self, limit: Option<u32>) -> Result<Vec<Playlist>> {
        let mut query = Query::from("playlists")
            .select(PLAYLIST_WITH_COUNT)
            .order("created_at", false);
        if let Some(limit) = limit {
            query = query.limit(limit);
        }
        self.select(&query).await
    }

    /// The playlist and its entries ordered by position.
    /// A missing playlist yields `BackendError::NotFound`.
    pub async fn playlist_detail(&self, playlist_id: &str) -> Result<PlaylistDetail> {
        let playlist: Playlist = self
            .select_single(&Query::from("playlists").eq("id", playlist_id))
            .await?;
        let entries_query = Query::from("playlist_songs")
            .select(ENTRY_WITH_SONG)
            .eq("playlist_id", playlist_id)
            .order("position", true);
        let entries: Vec<PlaylistEntry> = self.select(&entries_query).await?;
        Ok(PlaylistDetail { playlist, entries })
    }

    pub async fn create_playlist(
        &self,
        draft: &PlaylistDraft,
        song_ids: &[String],
    ) -> Result<Playlist> {
        let user_id = self.user_id()?;
        let name = draft.name.trim();
        if name.is_empty() {
            return Err(BackendError::Api {
                status: 400,
                code: None,
                message: "Playlist name is required".to_string(),
            });
        }
        let row = NewPlaylist {
            name,
            description: trimmed(&draft.description),
            cover_image: trimmed(&draft.cover_image),
            user_id,
        };
        let created: Vec<Playlist> = self.insert("playlists", std::slice::from_ref(&row)).await?;
        let playlist = created
            .into_iter()
            .next()
            .ok_or_else(|| BackendError::Decode("insert returned no playlist".to_string()))?;

        if !song_ids.is_empty() {
            let entries = next_entries(&playlist.id, song_ids, None);
            let _: Vec<PlaylistEntry> = self.insert("playlist_songs", &entries).await?;
        }
        tracing::info!(playlist_id = %playlist.id, songs = song_ids.len(), "playlist created");
        Ok(playlist)
    }

    pub async fn update_playlist(&self, playlist_id: &str, draft: &PlaylistDraft) -> Result<Playlist> {
        let patch = PlaylistPatch {
            name: draft.name.trim(),
            description: trimmed(&draft.description),
            cover_image: trimmed(&draft.cover_image),
            updated_at: chrono::Utc::now().to_rfc3339(),
        };
        let rows: Vec<Playlist> = self
            .update(&Query::from("playlists").eq("id", playlist_id), &patch)
            .await?;
        rows.into_iter().next().ok_or(BackendError::NotFound)
    }

    pub async fn delete_playlist(&self, playlist_id: &str) -> Result<()> {
        self.delete(&Query::from("playlists").eq("id", playlist_id))
            .await
    }

    /// Append songs after the current last position.
    pub async fn add_songs_to_playlist(&self, playlist_id: &str, song_ids: &[String]) -> Result<()> {
        if song_ids.is_empty() {
            return Ok(());
        }
        let last = Query::from("playlist_songs")
            .select("position")
            .eq("playlist_id", playlist_id)
            .order("position", false)
            .limit(1);
        let last: Vec<PositionColumn> = self.select(&last).await?;
        let entries = next_entries(
            playlist_id,
            song_ids,
            last.first().map(|row| row.position),
        );
        let _: Vec<PlaylistEntry> = self.insert("playlist_songs", &entries).await?;
        Ok(())
    }

    pub async fn remove_playlist_entry(&self, entry_id: &str) -> Result<()> {
        self.delete(&Query::from("playlist_songs").eq("id", entry_id))
            .await
    }

    /// Swap the positions of two entries.
    pub async fn swap_playlist_entries(&self, a: &PlaylistEntry, b: &PlaylistEntry) -> Result<()> {
        let _: Vec<serde_json::Value> = self
            .update(
                &Query::from("playlist_songs").eq("id", &a.id),
                &serde_json::json!({ "position": b.position }),
            )
            .await?;
        let _: Vec<serde_json::Value> = self
            .update(
                &Query::from("playlist_songs").eq("id", &b.id),
                &serde_json::json!({ "position": a.position }),
            )
            .await?;
        Ok(())
    }
}
