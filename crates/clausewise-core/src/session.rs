//! Mock authentication and the application-owned session value.
//!
//! Any username is accepted with the demo password. The token is base64 of
//! a small JSON claims object; it is not signed and carries no authority.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

/// The only password the mock accepts.
pub const DEMO_PASSWORD: &str = "test123";

/// Token lifetime: 24 hours, in milliseconds.
pub const TOKEN_TTL_MS: i64 = 24 * 60 * 60 * 1000;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AuthError {
    #[error("Invalid credentials")]
    InvalidCredentials,
    #[error("malformed session token: {0}")]
    MalformedToken(String),
    #[error("not logged in")]
    NotAuthenticated,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub username: String,
    pub email: String,
    pub name: String,
}

impl User {
    fn for_username(username: &str) -> Self {
        let mut chars = username.chars();
        let name = match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        };
        Self {
            username: username.to_string(),
            email: format!("{username}@example.com"),
            name,
        }
    }
}

/// Claims carried in the mock token. Times are milliseconds since the epoch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenClaims {
    pub username: String,
    pub exp: i64,
    pub iat: i64,
}

/// A logged-in session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub token: String,
    pub user: User,
}

impl Session {
    pub fn claims(&self) -> Result<TokenClaims, AuthError> {
        decode_token(&self.token)
    }

    /// A token that cannot be decoded counts as expired.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.claims()
            .map(|c| c.exp <= now.timestamp_millis())
            .unwrap_or(true)
    }
}

/// Check credentials and mint a session.
pub fn authenticate(
    username: &str,
    password: &str,
    now: DateTime<Utc>,
) -> Result<Session, AuthError> {
    if password != DEMO_PASSWORD {
        return Err(AuthError::InvalidCredentials);
    }
    let iat = now.timestamp_millis();
    let claims = TokenClaims {
        username: username.to_string(),
        exp: iat + TOKEN_TTL_MS,
        iat,
    };
    Ok(Session {
        token: encode_token(&claims),
        user: User::for_username(username),
    })
}

pub fn encode_token(claims: &TokenClaims) -> String {
    // Serialising plain strings and integers cannot fail.
    let json = serde_json::to_vec(claims).unwrap_or_default();
    STANDARD.encode(json)
}

pub fn decode_token(token: &str) -> Result<TokenClaims, AuthError> {
    let bytes = STANDARD
        .decode(token)
        .map_err(|e| AuthError::MalformedToken(e.to_string()))?;
    serde_json::from_slice(&bytes).map_err(|e| AuthError::MalformedToken(e.to_string()))
}

/// Authentication state owned by the top-level application.
///
/// Lifecycle points: [`restore`](Self::restore) at startup,
/// [`login`](Self::login) on credentials, [`logout`](Self::logout) on exit.
/// Persisting the value is the caller's job.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionState {
    session: Option<Session>,
}

impl SessionState {
    pub fn logged_out() -> Self {
        Self::default()
    }

    /// Adopt a previously saved session unless its token has expired.
    pub fn restore(saved: Option<Session>, now: DateTime<Utc>) -> Self {
        let session = saved.filter(|s| {
            let live = !s.is_expired(now);
            if !live {
                info!(user = %s.user.username, "discarding expired session");
            }
            live
        });
        Self { session }
    }

    pub fn login(
        &mut self,
        username: &str,
        password: &str,
        now: DateTime<Utc>,
    ) -> Result<&Session, AuthError> {
        match authenticate(username, password, now) {
            Ok(session) => {
                info!(user = %session.user.username, "login succeeded");
                Ok(self.session.insert(session))
            }
            Err(e) => {
                self.session = None;
                Err(e)
            }
        }
    }

    pub fn logout(&mut self) -> Option<Session> {
        self.session.take()
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.is_some()
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    pub fn user(&self) -> Option<&User> {
        self.session.as_ref().map(|s| &s.user)
    }

    /// The current user, or [`AuthError::NotAuthenticated`].
    pub fn require(&self) -> Result<&User, AuthError> {
        self.user().ok_or(AuthError::NotAuthenticated)
    }
}
