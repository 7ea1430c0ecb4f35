//! Local persistence for the backend connection, the signed-in session and
//! player settings. Browser builds use local storage, native builds a small
//! SQLite key/value table.

use crate::api::models::{BackendConfig, Session};
use crate::playback::DEFAULT_VOLUME;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[cfg(target_arch = "wasm32")]
use gloo_storage::{LocalStorage, Storage};

const CONFIG_KEY: &str = "backend_config";
const SESSION_KEY: &str = "session";
const SETTINGS_KEY: &str = "player_settings";

#[cfg(target_arch = "wasm32")]
const KEY_PREFIX: &str = "tuneitin.";

#[derive(Debug, Error)]
pub enum DbError {
    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Invalid stored value: {0}")]
    Serialization(#[from] serde_json::Error),

    #[cfg(not(target_arch = "wasm32"))]
    #[error("Database error: {0}")]
    Sqlite(#[from] rusqlite::Error),
}

#[cfg(target_arch = "wasm32")]
impl From<gloo_storage::errors::StorageError> for DbError {
    fn from(err: gloo_storage::errors::StorageError) -> Self {
        DbError::Storage(err.to_string())
    }
}

/// Player preferences restored at startup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerSettings {
    #[serde(default = "default_volume")]
    pub volume: f64,
    #[serde(default)]
    pub muted: bool,
    #[serde(default)]
    pub repeat: bool,
    #[serde(default)]
    pub shuffle: bool,
}

fn default_volume() -> f64 {
    DEFAULT_VOLUME
}

impl Default for PlayerSettings {
    fn default() -> Self {
        Self {
            volume: DEFAULT_VOLUME,
            muted: false,
            repeat: false,
            shuffle: false,
        }
    }
}

pub async fn initialize_database() -> Result<(), DbError> {
    #[cfg(not(target_arch = "wasm32"))]
    {
        let conn = get_db_connection()?;
        create_tables(&conn)?;
    }
    Ok(())
}

pub async fn save_backend_config(config: &BackendConfig) -> Result<(), DbError> {
    save_value(CONFIG_KEY, config)
}

/// Stored connection settings, or the build-time defaults.
pub async fn load_backend_config() -> Result<BackendConfig, DbError> {
    Ok(load_value::<BackendConfig>(CONFIG_KEY)?
        .filter(BackendConfig::is_configured)
        .unwrap_or_default())
}

pub async fn save_session(session: &Session) -> Result<(), DbError> {
    save_value(SESSION_KEY, session)
}

pub async fn load_session() -> Result<Option<Session>, DbError> {
    load_value(SESSION_KEY)
}

pub async fn clear_session() -> Result<(), DbError> {
    remove_value(SESSION_KEY)
}

pub async fn save_settings(settings: &PlayerSettings) -> Result<(), DbError> {
    save_value(SETTINGS_KEY, settings)
}

pub async fn load_settings() -> Result<PlayerSettings, DbError> {
    Ok(load_value(SETTINGS_KEY)?.unwrap_or_default())
}

#[cfg(target_arch = "wasm32")]
fn save_value<T: Serialize>(key: &str, value: &T) -> Result<(), DbError> {
    LocalStorage::set(format!("{KEY_PREFIX}{key}"), value)?;
    Ok(())
}

#[cfg(target_arch = "wasm32")]
fn load_value<T: DeserializeOwned>(key: &str) -> Result<Option<T>, DbError> {
    match LocalStorage::get(format!("{KEY_PREFIX}{key}")) {
        Ok(value) => Ok(Some(value)),
        Err(gloo_storage::errors::StorageError::KeyNotFound(_)) => Ok(None),
        Err(err) => {
            tracing::warn!(%key, error = %err, "discarding unreadable stored value");
            Ok(None)
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn remove_value(key: &str) -> Result<(), DbError> {
    LocalStorage::delete(format!("{KEY_PREFIX}{key}"));
    Ok(())
}

#[cfg(not(target_arch = "wasm32"))]
fn save_value<T: Serialize>(key: &str, value: &T) -> Result<(), DbError> {
    let conn = get_db_connection()?;
    write_json(&conn, key, value)
}

#[cfg(not(target_arch = "wasm32"))]
fn load_value<T: DeserializeOwned>(key: &str) -> Result<Option<T>, DbError> {
    let conn = get_db_connection()?;
    read_json(&conn, key)
}

#[cfg(not(target_arch = "wasm32"))]
fn remove_value(key: &str) -> Result<(), DbError> {
    let conn = get_db_connection()?;
    conn.execute("DELETE FROM settings WHERE key = ?1", [key])?;
    Ok(())
}

#[cfg(not(target_arch = "wasm32"))]
fn create_tables(conn: &rusqlite::Connection) -> Result<(), DbError> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS settings (
            key TEXT PRIMARY KEY,
            value TEXT NOT NULL
        )",
        [],
    )?;
    Ok(())
}

#[cfg(not(target_arch = "wasm32"))]
fn write_json<T: Serialize>(conn: &rusqlite::Connection, key: &str, value: &T) -> Result<(), DbError> {
    let json = serde_json::to_string(value)?;
    conn.execute(
        "INSERT OR REPLACE INTO settings (key, value) VALUES (?1, ?2)",
        [key, json.as_str()],
    )?;
    Ok(())
}

#[cfg(not(target_arch = "wasm32"))]
fn read_json<T: DeserializeOwned>(conn: &rusqlite::Connection, key: &str) -> Result<Option<T>, DbError> {
    use rusqlite::OptionalExtension;

    let json: Option<String> = conn
        .query_row("SELECT value FROM settings WHERE key = ?1", [key], |row| {
            row.get(0)
        })
        .optional()?;
    match json {
        Some(json) => match serde_json::from_str(&json) {
            Ok(value) => Ok(Some(value)),
            Err(err) => {
                tracing::warn!(%key, error = %err, "discarding unreadable stored value");
                Ok(None)
            }
        },
        None => Ok(None),
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn get_db_connection() -> Result<rusqlite::Connection, DbError> {
    let data_dir = dirs::data_dir()
        .map(|dir| dir.join("tuneitin"))
        .unwrap_or_else(|| std::path::PathBuf::from(".tuneitin"));
    std::fs::create_dir_all(&data_dir)
        .map_err(|e| DbError::Storage(format!("Failed to create {}: {e}", data_dir.display())))?;
    let conn = rusqlite::Connection::open(data_dir.join("tuneitin.db"))?;
    create_tables(&conn)?;
    Ok(conn)
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use super::*;
    use crate::api::models::AuthUser;

    fn memory() -> rusqlite::Connection {
        let conn = rusqlite::Connection::open_in_memory().unwrap();
        create_tables(&conn).unwrap();
        conn
    }

    #[test]
    fn settings_round_trip_and_overwrite() {
        let conn = memory();
        let mut settings = PlayerSettings {
            volume: 0.4,
            muted: true,
            repeat: true,
            shuffle: false,
        };
        write_json(&conn, SETTINGS_KEY, &settings).unwrap();
        settings.shuffle = true;
        write_json(&conn, SETTINGS_KEY, &settings).unwrap();

        let loaded: Option<PlayerSettings> = read_json(&conn, SETTINGS_KEY).unwrap();
        assert_eq!(loaded, Some(settings));
    }

    #[test]
    fn missing_key_reads_none() {
        let conn = memory();
        let loaded: Option<Session> = read_json(&conn, SESSION_KEY).unwrap();
        assert!(loaded.is_none());
    }

    #[test]
    fn corrupt_value_is_discarded() {
        let conn = memory();
        conn.execute(
            "INSERT INTO settings (key, value) VALUES (?1, ?2)",
            [SESSION_KEY, "{not json"],
        )
        .unwrap();
        let loaded: Option<Session> = read_json(&conn, SESSION_KEY).unwrap();
        assert!(loaded.is_none());
    }

    #[test]
    fn older_settings_fill_defaults() {
        let settings: PlayerSettings = serde_json::from_str(r#"{"repeat":true}"#).unwrap();
        assert_eq!(settings.volume, DEFAULT_VOLUME);
        assert!(settings.repeat);
        assert!(!settings.muted);
    }

    #[test]
    fn session_survives_storage() {
        let conn = memory();
        let session = Session {
            access_token: "jwt".into(),
            refresh_token: Some("r".into()),
            expires_at: Some(42),
            user: AuthUser {
                id: "u".into(),
                ..Default::default()
            },
        };
        write_json(&conn, SESSION_KEY, &session).unwrap();
        assert_eq!(read_json::<Session>(&conn, SESSION_KEY).unwrap(), Some(session));
    }
}
