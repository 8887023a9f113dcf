//! Session handling and pluggable token sources.
//!
//! A [`Session`] is created from the bearer token returned by `/login` or
//! `/signup`. Its expiry is read from the JWT `exp` claim so an expired
//! session is detected locally, before any request leaves the client.

use std::sync::Arc;

use base64::Engine;
use serde::Deserialize;

use crate::error::ApiError;

/// An authenticated session: bearer token plus its decoded claims.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    token: String,
    /// Absolute expiry (seconds since epoch).
    expires_at: i64,
    username: Option<String>,
}

#[derive(Deserialize)]
struct Claims {
    exp: i64,
    #[serde(default)]
    username: Option<String>,
}

impl Session {
    /// Build a session from a raw JWT. Fails if the payload segment is not
    /// base64url JSON carrying an `exp` claim.
    pub fn from_token(token: impl Into<String>) -> Result<Self, ApiError> {
        let token = token.into();
        let payload = token
            .split('.')
            .nth(1)
            .ok_or_else(|| ApiError::InvalidToken("expected three dot-separated segments".into()))?;
        let bytes = base64::engine::general_purpose::URL_SAFE_NO_PAD
            .decode(payload.trim_end_matches('='))
            .map_err(|e| ApiError::InvalidToken(format!("payload: {}", e)))?;
        let claims: Claims = serde_json::from_slice(&bytes)
            .map_err(|e| ApiError::InvalidToken(format!("claims: {}", e)))?;

        Ok(Self {
            token,
            expires_at: claims.exp,
            username: claims.username,
        })
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    pub fn expires_at(&self) -> i64 {
        self.expires_at
    }

    /// Username claim, when the server embeds one.
    pub fn username(&self) -> Option<&str> {
        self.username.as_deref()
    }

    pub fn is_expired(&self) -> bool {
        self.is_expired_at(chrono::Utc::now().timestamp())
    }

    pub fn is_expired_at(&self, now: i64) -> bool {
        now >= self.expires_at
    }
}

// ── TokenSource ─────────────────────────────────────────────────────

/// Pluggable token provider. Called before every signed request.
///
/// Returns `Ok(None)` to send the request without an Authorization header.
#[async_trait::async_trait]
pub trait TokenSource: Send + Sync + 'static {
    async fn token(&self) -> Result<Option<String>, ApiError>;
}

/// Anonymous requests.
pub struct NoAuth;

#[async_trait::async_trait]
impl TokenSource for NoAuth {
    async fn token(&self) -> Result<Option<String>, ApiError> {
        Ok(None)
    }
}

/// Fixed bearer token obtained elsewhere.
pub struct StaticToken(String);

impl StaticToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }
}

#[async_trait::async_trait]
impl TokenSource for StaticToken {
    async fn token(&self) -> Result<Option<String>, ApiError> {
        Ok(Some(self.0.clone()))
    }
}

/// Swappable session cell shared by every client of one app instance.
///
/// Empty until login/signup succeeds; cleared on logout. An expired session
/// is dropped on first use and reported as [`ApiError::Unauthenticated`].
#[derive(Clone, Default)]
pub struct SharedSession {
    cell: Arc<tokio::sync::RwLock<Option<Session>>>,
}

impl SharedSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn set(&self, session: Session) {
        *self.cell.write().await = Some(session);
    }

    pub async fn clear(&self) {
        *self.cell.write().await = None;
    }

    pub async fn current(&self) -> Option<Session> {
        self.cell.read().await.clone()
    }

    pub async fn is_active(&self) -> bool {
        matches!(self.current().await, Some(s) if !s.is_expired())
    }
}

#[async_trait::async_trait]
impl TokenSource for SharedSession {
    async fn token(&self) -> Result<Option<String>, ApiError> {
        {
            let guard = self.cell.read().await;
            match guard.as_ref() {
                None => return Err(ApiError::Unauthenticated("no session".into())),
                Some(s) if !s.is_expired() => return Ok(Some(s.token().to_string())),
                Some(_) => {}
            }
        }
        tracing::debug!("session expired, clearing");
        self.clear().await;
        Err(ApiError::Unauthenticated("session expired".into()))
    }
}
