// Like relations, like procedures, profiles and profile statistics.

#[derive(Debug, Serialize)]
struct LikeArgs<'a> {
    user_uuid: &'a str,
    song_uuid: &'a str,
}

#[derive(Debug, Serialize)]
struct ProfileUpsert<'a> {
    id: &'a str,
    name: &'a str,
    bio: &'a str,
    avatar_url: Option<&'a str>,
    updated_at: String,
}

#[derive(Debug, Serialize)]
struct NewProfile<'a> {
    id: &'a str,
    name: &'a str,
    bio: &'a str,
}

impl SupabaseClient {
    /// Whether the signed-in user likes `song_id`.
    pub async fn is_liked(&self, song_id: &str) -> Result<bool> {
        let user_id = self.user_id()?;
        let query = Query::from("user_likes")
            .select("id")
            .eq("user_id", user_id)
            .eq("song_id", song_id);
        let like: Option<UserLike> = self.select_optional(&query).await?;
        Ok(like.is_some())
    }

    /// Like relation plus the authoritative counter, fetched together.
    pub async fn like_state(&self, song_id: &str) -> Result<(bool, u64)> {
        if self.session.is_none() {
            return Ok((false, self.song_like_count(song_id).await?));
        }
        futures_util::try_join!(self.is_liked(song_id), self.song_like_count(song_id))
    }

    /// Inserts the relation and increments the counter server-side.
    pub async fn like_song(&self, song_id: &str) -> Result<()> {
        let user_id = self.user_id()?;
        self.rpc(
            "like_song",
            &LikeArgs {
                user_uuid: user_id,
                song_uuid: song_id,
            },
        )
        .await
    }

    pub async fn unlike_song(&self, song_id: &str) -> Result<()> {
        let user_id = self.user_id()?;
        self.rpc(
            "unlike_song",
            &LikeArgs {
                user_uuid: user_id,
                song_uuid: song_id,
            },
        )
        .await
    }

    /// The user's profile, created from sign-up metadata when missing.
    pub async fn profile_or_create(&self) -> Result<Profile> {
        let session = self.session.as_ref().ok_or(BackendError::Unauthenticated)?;
        let user_id = session.user.id.as_str();
        let existing: Option<Profile> = self
            .select_optional(&Query::from("profiles").eq("id", user_id))
            .await?;
        if let Some(profile) = existing {
            return Ok(profile);
        }

        tracing::info!(%user_id, "creating missing profile");
        let name = session.user.user_metadata.name.clone().unwrap_or_default();
        let row = NewProfile {
            id: user_id,
            name: &name,
            bio: "",
        };
        let created: Vec<Profile> = self.insert("profiles", std::slice::from_ref(&row)).await?;
        created
            .into_iter()
            .next()
            .ok_or_else(|| BackendError::Decode("insert returned no profile".to_string()))
    }

    pub async fn save_profile(
        &self,
        name: &str,
        bio: &str,
        avatar_url: Option<&str>,
    ) -> Result<Profile> {
        let user_id = self.user_id()?;
        let row = ProfileUpsert {
            id: user_id,
            name: name.trim(),
            bio: bio.trim(),
            avatar_url,
            updated_at: chrono::Utc::now().to_rfc3339(),
        };
        let saved: Vec<Profile> = self.upsert("profiles", std::slice::from_ref(&row)).await?;
        saved
            .into_iter()
            .next()
            .ok_or_else(|| BackendError::Decode("upsert returned no profile".to_string()))
    }

    pub async fn profile_stats(&self) -> Result<ProfileStats> {
        let user_id = self.user_id()?.to_string();
        let songs_query = Query::from("songs").eq("user_id", &user_id);
        let playlists_query = Query::from("playlists").eq("user_id", &user_id);
        let (songs, playlists, total_plays) = futures_util::try_join!(
            self.count(&songs_query),
            self.count(&playlists_query),
            self.total_plays(&user_id),
        )?;
        Ok(ProfileStats {
            songs,
            playlists,
            total_plays,
        })
    }
}
