use serde::Deserialize;
use thiserror::Error;

/// PostgREST code for "the single-row request matched no rows".
pub const NO_ROWS_CODE: &str = "PGRST116";

#[derive(Debug, Error)]
pub enum BackendError {
    #[error("Backend is not configured")]
    InvalidConfig,

    #[error("Please log in first")]
    Unauthenticated,

    #[error("Not found")]
    NotFound,

    #[error("Request failed: {0}")]
    Http(String),

    #[error("{message}")]
    Api {
        status: u16,
        code: Option<String>,
        message: String,
    },

    #[error("Unexpected response: {0}")]
    Decode(String),
}

impl From<reqwest::Error> for BackendError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            BackendError::Decode(err.to_string())
        } else {
            BackendError::Http(err.to_string())
        }
    }
}

impl From<serde_json::Error> for BackendError {
    fn from(err: serde_json::Error) -> Self {
        BackendError::Decode(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, BackendError>;

/// Error bodies differ between the auth, rest and storage services.
#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    code: Option<serde_json::Value>,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    msg: Option<String>,
    #[serde(default)]
    error_description: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

impl BackendError {
    /// Build an error from a non-success HTTP status and its body.
    pub fn from_response(status: u16, body: &str) -> Self {
        let parsed: ErrorBody = serde_json::from_str(body).unwrap_or_default();
        let code = parsed.code.map(|value| match value {
            serde_json::Value::String(text) => text,
            other => other.to_string(),
        });

        if code.as_deref() == Some(NO_ROWS_CODE) {
            return BackendError::NotFound;
        }
        if status == 401 {
            return BackendError::Unauthenticated;
        }

        let message = parsed
            .message
            .or(parsed.error_description)
            .or(parsed.msg)
            .or(parsed.error)
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| format!("HTTP {status}"));

        BackendError::Api {
            status,
            code,
            message,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, BackendError::NotFound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_rows_maps_to_not_found() {
        let err = BackendError::from_response(
            406,
            r#"{"code":"PGRST116","details":"The result contains 0 rows","message":"JSON object requested, multiple (or no) rows returned"}"#,
        );
        assert!(err.is_not_found());
    }

    #[test]
    fn auth_error_description_is_used() {
        let err = BackendError::from_response(
            400,
            r#"{"error":"invalid_grant","error_description":"Invalid login credentials"}"#,
        );
        assert_eq!(err.to_string(), "Invalid login credentials");
    }

    #[test]
    fn numeric_codes_are_kept() {
        match BackendError::from_response(409, r#"{"code":23505,"message":"duplicate key"}"#) {
            BackendError::Api { status, code, message } => {
                assert_eq!(status, 409);
                assert_eq!(code.as_deref(), Some("23505"));
                assert_eq!(message, "duplicate key");
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn unreadable_body_falls_back_to_status() {
        let err = BackendError::from_response(502, "<html>bad gateway</html>");
        assert_eq!(err.to_string(), "HTTP 502");
        assert!(matches!(
            BackendError::from_response(401, "{}"),
            BackendError::Unauthenticated
        ));
    }
}
