use crate::api::error::{BackendError, Result};
use crate::api::models::*;
use crate::api::query::Query;
use once_cell::sync::Lazy;
use reqwest::{Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

static HTTP_CLIENT: Lazy<reqwest::Client> = Lazy::new(reqwest::Client::new);

const SINGLE_OBJECT: &str = "application/vnd.pgrst.object+json";
const RETURN_REPRESENTATION: &str = "return=representation";

/// Client for the hosted backend: auth, rows, functions and file storage.
///
/// Cheap to clone. Views build one from the current session context for each
/// request batch.
#[derive(Debug, Clone, PartialEq)]
pub struct SupabaseClient {
    config: BackendConfig,
    session: Option<Session>,
}

impl SupabaseClient {
    pub fn new(config: BackendConfig, session: Option<Session>) -> Self {
        Self { config, session }
    }

    pub fn user_id(&self) -> Result<&str> {
        self.session
            .as_ref()
            .map(|session| session.user.id.as_str())
            .ok_or(BackendError::Unauthenticated)
    }

    fn endpoint(&self, service: &str, path: &str) -> Result<String> {
        if !self.config.is_configured() {
            return Err(BackendError::InvalidConfig);
        }
        Ok(format!(
            "{}/{}/{}",
            self.config.url,
            service,
            path.trim_start_matches('/')
        ))
    }

    fn bearer(&self) -> &str {
        self.session
            .as_ref()
            .map(|session| session.access_token.as_str())
            .unwrap_or(&self.config.anon_key)
    }

    fn request(&self, method: Method, url: String) -> RequestBuilder {
        HTTP_CLIENT
            .request(method, url)
            .header("apikey", &self.config.anon_key)
            .header("Authorization", format!("Bearer {}", self.bearer()))
    }

    fn rest(&self, method: Method, path: &str) -> Result<RequestBuilder> {
        Ok(self.request(method, self.endpoint("rest/v1", path)?))
    }

    async fn check(response: Response) -> Result<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        let err = BackendError::from_response(status.as_u16(), &body);
        if !err.is_not_found() {
            tracing::warn!(status = status.as_u16(), error = %err, "backend request failed");
        }
        Err(err)
    }

    async fn send_json<T: DeserializeOwned>(builder: RequestBuilder) -> Result<T> {
        let response = Self::check(builder.send().await?).await?;
        let text = response.text().await?;
        Ok(serde_json::from_str(&text)?)
    }

    async fn send_empty(builder: RequestBuilder) -> Result<()> {
        Self::check(builder.send().await?).await?;
        Ok(())
    }

    pub async fn select<T: DeserializeOwned>(&self, query: &Query) -> Result<Vec<T>> {
        Self::send_json(self.rest(Method::GET, &query.to_path())?).await
    }

    /// Exactly one row; `NotFound` when there is none.
    pub async fn select_single<T: DeserializeOwned>(&self, query: &Query) -> Result<T> {
        let builder = self
            .rest(Method::GET, &query.to_path())?
            .header("Accept", SINGLE_OBJECT);
        Self::send_json(builder).await
    }

    pub async fn select_optional<T: DeserializeOwned>(&self, query: &Query) -> Result<Option<T>> {
        match self.select_single(query).await {
            Ok(row) => Ok(Some(row)),
            Err(BackendError::NotFound) => Ok(None),
            Err(err) => Err(err),
        }
    }

    /// Row count from the `Content-Range` header.
    pub async fn count(&self, query: &Query) -> Result<u32> {
        let builder = self
            .rest(Method::HEAD, &query.to_path())?
            .header("Prefer", "count=exact");
        let response = Self::check(builder.send().await?).await?;
        let range = response
            .headers()
            .get("content-range")
            .and_then(|value| value.to_str().ok())
            .unwrap_or_default();
        parse_content_range_total(range)
            .ok_or_else(|| BackendError::Decode(format!("missing row count in '{range}'")))
    }

    pub async fn insert<B, T>(&self, table: &str, rows: &B) -> Result<Vec<T>>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let builder = self
            .rest(Method::POST, table)?
            .header("Prefer", RETURN_REPRESENTATION)
            .json(rows);
        Self::send_json(builder).await
    }

    pub async fn upsert<B, T>(&self, table: &str, rows: &B) -> Result<Vec<T>>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let builder = self
            .rest(Method::POST, table)?
            .header(
                "Prefer",
                format!("resolution=merge-duplicates,{RETURN_REPRESENTATION}"),
            )
            .json(rows);
        Self::send_json(builder).await
    }

    pub async fn update<B, T>(&self, query: &Query, patch: &B) -> Result<Vec<T>>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let builder = self
            .rest(Method::PATCH, &query.filter_path())?
            .header("Prefer", RETURN_REPRESENTATION)
            .json(patch);
        Self::send_json(builder).await
    }

    pub async fn delete(&self, query: &Query) -> Result<()> {
        Self::send_empty(self.rest(Method::DELETE, &query.filter_path())?).await
    }

    /// Call a database function that returns nothing of interest.
    pub async fn rpc<B: Serialize + ?Sized>(&self, function: &str, args: &B) -> Result<()> {
        let builder = self
            .rest(Method::POST, &format!("rpc/{function}"))?
            .json(args);
        Self::send_empty(builder).await
    }
}

/// Total from `0-9/42` or `*/0`.
fn parse_content_range_total(value: &str) -> Option<u32> {
    value.rsplit('/').next()?.trim().parse().ok()
}

include!("auth.rs");
include!("songs.rs");
include!("playlists.rs");
include!("likes_and_profiles.rs");
include!("storage.rs");

#[cfg(test)]
mod tests {
    use super::*;

    fn client(session: bool) -> SupabaseClient {
        let config = BackendConfig::new("https://demo.supabase.co/".into(), "anon".into());
        let session = session.then(|| Session {
            access_token: "jwt".into(),
            refresh_token: None,
            expires_at: None,
            user: AuthUser {
                id: "user-1".into(),
                ..Default::default()
            },
        });
        SupabaseClient::new(config, session)
    }

    #[test]
    fn positions_continue_after_max() {
        let ids = vec!["a".to_string(), "b".to_string()];
        let entries = next_entries("pl", &ids, Some(4));
        assert_eq!(
            entries.iter().map(|e| e.position).collect::<Vec<_>>(),
            vec![5, 6]
        );
        assert_eq!(next_entries("pl", &ids, None)[0].position, 0);
    }

    #[test]
    fn object_names_are_sanitised() {
        assert_eq!(
            safe_object_name(1700000000000, "My Song (live)!.MP3"),
            "1700000000000-My_Song__live__.MP3"
        );
        assert_eq!(safe_object_name(5, "naïve.ogg"), "5-na_ve.ogg");
    }

    #[test]
    fn public_url_points_at_public_bucket() {
        assert_eq!(
            client(false).public_url(AUDIO_BUCKET, "songs/u/1-a.mp3"),
            "https://demo.supabase.co/storage/v1/object/public/audio-files/songs/u/1-a.mp3"
        );
    }

    #[test]
    fn extension_must_be_plain() {
        assert_eq!(file_extension("face.PNG"), Some("PNG"));
        assert_eq!(file_extension("noext"), None);
        assert_eq!(file_extension("weird.p g"), None);
    }

    #[test]
    fn content_range_totals() {
        assert_eq!(parse_content_range_total("0-9/42"), Some(42));
        assert_eq!(parse_content_range_total("*/0"), Some(0));
        assert_eq!(parse_content_range_total("0-9/*"), None);
    }

    #[test]
    fn user_id_requires_session() {
        assert!(matches!(
            client(false).user_id(),
            Err(BackendError::Unauthenticated)
        ));
        assert_eq!(client(true).user_id().unwrap(), "user-1");
    }

    #[test]
    fn unconfigured_client_refuses_requests() {
        let client = SupabaseClient::new(BackendConfig::new(String::new(), String::new()), None);
        assert!(matches!(
            client.endpoint("rest/v1", "songs"),
            Err(BackendError::InvalidConfig)
        ));
    }

    #[test]
    fn sign_up_with_confirmation_returns_user() {
        let outcome = parse_sign_up(
            serde_json::json!({"id": "u9", "email": "a@b.c", "user_metadata": {"name": "Ann"}}),
            0,
        )
        .unwrap();
        match outcome {
            SignUpOutcome::ConfirmationRequired(user) => assert_eq!(user.display_name(), "Ann"),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn sign_up_with_session_computes_expiry() {
        let outcome = parse_sign_up(
            serde_json::json!({
                "access_token": "t",
                "refresh_token": "r",
                "expires_in": 3600,
                "user": {"id": "u9"}
            }),
            1000,
        )
        .unwrap();
        match outcome {
            SignUpOutcome::SignedIn(session) => {
                assert_eq!(session.expires_at, Some(4600));
                assert!(!session.is_expired(4599));
                assert!(session.is_expired(4600));
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn excluded_songs_are_filtered() {
        let songs = vec![
            Song {
                id: "a".into(),
                ..Default::default()
            },
            Song {
                id: "b".into(),
                ..Default::default()
            },
        ];
        let left = exclude_songs(songs, ["a"].into_iter());
        assert_eq!(left.len(), 1);
        assert_eq!(left[0].id, "b");
    }
}
