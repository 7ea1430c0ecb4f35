// File uploads and public object URLs.

pub const AUDIO_BUCKET: &str = "audio-files";
pub const IMAGE_BUCKET: &str = "images";

const CACHE_CONTROL_SECS: u32 = 3600;

/// `<millis>-<name>` with everything outside `[A-Za-z0-9._-]` replaced by `_`.
pub fn safe_object_name(millis: i64, file_name: &str) -> String {
    format!("{millis}-{file_name}")
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .collect()
}

fn file_extension(file_name: &str) -> Option<&str> {
    let (_, ext) = file_name.rsplit_once('.')?;
    let ext = ext.trim();
    (!ext.is_empty() && ext.chars().all(|c| c.is_ascii_alphanumeric())).then_some(ext)
}

fn encode_object_path(path: &str) -> String {
    path.split('/')
        .map(|segment| urlencoding::encode(segment).into_owned())
        .collect::<Vec<_>>()
        .join("/")
}

impl SupabaseClient {
    pub fn public_url(&self, bucket: &str, path: &str) -> String {
        format!(
            "{}/storage/v1/object/public/{bucket}/{}",
            self.config.url,
            encode_object_path(path)
        )
    }

    /// Upload bytes and return the object's public URL.
    pub async fn upload(
        &self,
        bucket: &str,
        path: &str,
        bytes: Vec<u8>,
        content_type: &str,
        overwrite: bool,
    ) -> Result<String> {
        let url = self.endpoint(
            "storage/v1",
            &format!("object/{bucket}/{}", encode_object_path(path)),
        )?;
        let content_type = if content_type.trim().is_empty() {
            "application/octet-stream"
        } else {
            content_type
        };
        let size = bytes.len();
        let builder = self
            .request(Method::POST, url)
            .header("Content-Type", content_type)
            .header("Cache-Control", format!("max-age={CACHE_CONTROL_SECS}"))
            .header("x-upsert", if overwrite { "true" } else { "false" })
            .body(bytes);
        Self::send_empty(builder).await?;
        tracing::debug!(%bucket, %path, size, "uploaded object");
        Ok(self.public_url(bucket, path))
    }

    pub async fn upload_song_audio(
        &self,
        file_name: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<String> {
        let user_id = self.user_id()?;
        let name = safe_object_name(chrono::Utc::now().timestamp_millis(), file_name);
        let path = format!("songs/{user_id}/{name}");
        self.upload(AUDIO_BUCKET, &path, bytes, content_type, false)
            .await
    }

    pub async fn upload_cover_image(
        &self,
        file_name: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<String> {
        let user_id = self.user_id()?;
        let name = safe_object_name(chrono::Utc::now().timestamp_millis(), file_name);
        let path = format!("covers/{user_id}/{name}");
        self.upload(IMAGE_BUCKET, &path, bytes, content_type, false)
            .await
    }

    /// Avatars may replace an earlier upload.
    pub async fn upload_avatar(
        &self,
        file_name: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<String> {
        let user_id = self.user_id()?;
        let id = uuid::Uuid::new_v4().simple().to_string();
        let path = match file_extension(file_name) {
            Some(ext) => format!("avatars/{user_id}-{id}.{ext}"),
            None => format!("avatars/{user_id}-{id}"),
        };
        self.upload(IMAGE_BUCKET, &path, bytes, content_type, true)
            .await
    }
}
