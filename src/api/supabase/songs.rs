// Song rows and play counting.

pub const RECENT_SONGS_LIMIT: u32 = 6;

#[derive(Debug, Deserialize)]
struct LikesColumn {
    #[serde(default)]
    likes: u64,
}

#[derive(Debug, Deserialize)]
struct PlaysColumn {
    #[serde(default)]
    plays: u64,
}

#[derive(Debug, Deserialize)]
struct SongIdColumn {
    song_id: String,
}

impl SupabaseClient {
    pub async fn recent_songs(&self) -> Result<Vec<Song>> {
        let query = Query::from("songs")
            .order("created_at", false)
            .limit(RECENT_SONGS_LIMIT);
        self.select(&query).await
    }

    pub async fn all_songs(&self) -> Result<Vec<Song>> {
        self.select(&Query::from("songs").order("created_at", false))
            .await
    }

    /// Current like counter of a song.
    pub async fn song_like_count(&self, song_id: &str) -> Result<u64> {
        let query = Query::from("songs").select("likes").eq("id", song_id);
        let row: LikesColumn = self.select_single(&query).await?;
        Ok(row.likes)
    }

    /// Store an already incremented play counter.
    pub async fn record_play(&self, song_id: &str, plays: u64) -> Result<()> {
        let query = Query::from("songs").eq("id", song_id);
        let _: Vec<serde_json::Value> = self
            .update(&query, &serde_json::json!({ "plays": plays }))
            .await?;
        Ok(())
    }

    pub async fn create_song(&self, song: &NewSong) -> Result<Song> {
        let rows: Vec<Song> = self.insert("songs", std::slice::from_ref(song)).await?;
        rows.into_iter()
            .next()
            .ok_or_else(|| BackendError::Decode("insert returned no song".to_string()))
    }

    pub async fn delete_song(&self, song_id: &str) -> Result<()> {
        self.delete(&Query::from("songs").eq("id", song_id)).await
    }

    /// Sum of plays over the songs a user uploaded.
    pub async fn total_plays(&self, user_id: &str) -> Result<u64> {
        let query = Query::from("songs").select("plays").eq("user_id", user_id);
        let rows: Vec<PlaysColumn> = self.select(&query).await?;
        Ok(rows.iter().map(|row| row.plays).sum())
    }

    /// Songs that can still be added to a playlist, newest first.
    pub async fn songs_not_in_playlist(&self, playlist_id: &str) -> Result<Vec<Song>> {
        let present = Query::from("playlist_songs")
            .select("song_id")
            .eq("playlist_id", playlist_id);
        let present: Vec<SongIdColumn> = self.select(&present).await?;
        let songs = self.all_songs().await?;
        Ok(exclude_songs(
            songs,
            present.iter().map(|row| row.song_id.as_str()),
        ))
    }
}

fn exclude_songs<'a>(songs: Vec<Song>, present: impl Iterator<Item = &'a str>) -> Vec<Song> {
    let present: std::collections::HashSet<&str> = present.collect();
    songs
        .into_iter()
        .filter(|song| !present.contains(song.id.as_str()))
        .collect()
}
