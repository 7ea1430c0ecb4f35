// Password auth, sign-up, token refresh and sign-out.

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    refresh_token: Option<String>,
    #[serde(default)]
    expires_in: Option<i64>,
    #[serde(default)]
    expires_at: Option<i64>,
    user: AuthUser,
}

impl TokenResponse {
    fn into_session(self, now_unix: i64) -> Session {
        let expires_at = self
            .expires_at
            .or_else(|| self.expires_in.map(|secs| now_unix + secs));
        Session {
            access_token: self.access_token,
            refresh_token: self.refresh_token,
            expires_at,
            user: self.user,
        }
    }
}

#[derive(Debug, Serialize)]
struct PasswordCredentials<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Debug, Serialize)]
struct SignUpRequest<'a> {
    email: &'a str,
    password: &'a str,
    data: UserMetadata,
}

/// Result of a sign-up: projects with email confirmation return only the user.
#[derive(Debug, Clone, PartialEq)]
pub enum SignUpOutcome {
    SignedIn(Session),
    ConfirmationRequired(AuthUser),
}

fn parse_sign_up(value: serde_json::Value, now_unix: i64) -> Result<SignUpOutcome> {
    if value.get("access_token").is_some() {
        let token: TokenResponse = serde_json::from_value(value)?;
        return Ok(SignUpOutcome::SignedIn(token.into_session(now_unix)));
    }
    let user = match value.get("user") {
        Some(user) => serde_json::from_value(user.clone())?,
        None => serde_json::from_value(value)?,
    };
    Ok(SignUpOutcome::ConfirmationRequired(user))
}

impl SupabaseClient {
    fn auth(&self, method: Method, path: &str) -> Result<RequestBuilder> {
        Ok(self.request(method, self.endpoint("auth/v1", path)?))
    }

    pub async fn sign_in(&self, email: &str, password: &str) -> Result<Session> {
        let builder = self
            .auth(Method::POST, "token?grant_type=password")?
            .json(&PasswordCredentials {
                email: email.trim(),
                password,
            });
        let token: TokenResponse = Self::send_json(builder).await?;
        let session = token.into_session(chrono::Utc::now().timestamp());
        tracing::info!(user_id = %session.user.id, "signed in");
        Ok(session)
    }

    pub async fn sign_up(&self, email: &str, password: &str, name: &str) -> Result<SignUpOutcome> {
        let name = name.trim();
        let builder = self.auth(Method::POST, "signup")?.json(&SignUpRequest {
            email: email.trim(),
            password,
            data: UserMetadata {
                name: (!name.is_empty()).then(|| name.to_string()),
            },
        });
        let value: serde_json::Value = Self::send_json(builder).await?;
        parse_sign_up(value, chrono::Utc::now().timestamp())
    }

    pub async fn refresh_session(&self, refresh_token: &str) -> Result<Session> {
        let builder = self
            .auth(Method::POST, "token?grant_type=refresh_token")?
            .json(&serde_json::json!({ "refresh_token": refresh_token }));
        let token: TokenResponse = Self::send_json(builder).await?;
        Ok(token.into_session(chrono::Utc::now().timestamp()))
    }

    /// Revoke the current token. A client without a session has nothing to do.
    pub async fn sign_out(&self) -> Result<()> {
        if self.session.is_none() {
            return Ok(());
        }
        Self::send_empty(self.auth(Method::POST, "logout")?).await
    }

    pub async fn get_user(&self) -> Result<AuthUser> {
        if self.session.is_none() {
            return Err(BackendError::Unauthenticated);
        }
        Self::send_json(self.auth(Method::GET, "user")?).await
    }
}
