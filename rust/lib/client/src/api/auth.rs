use reqwest::Method;
use serde::Deserialize;

use crate::error::ApiError;
use crate::http::{to_body, HttpCore};
use crate::model::{Credentials, Profile, SignupForm};
use crate::session::Session;

#[derive(Deserialize)]
struct TokenResponse {
    token: String,
}

/// `/signup`, `/login` and `/profile`.
#[derive(Clone)]
pub struct AuthClient {
    core: HttpCore,
}

impl AuthClient {
    pub fn new(core: HttpCore) -> Self {
        Self { core }
    }

    /// Register and return the session for the new account.
    pub async fn signup(&self, form: &SignupForm) -> Result<Session, ApiError> {
        let env = self
            .core
            .send_anonymous::<TokenResponse>(Method::POST, "/signup", Some(to_body(form)?))
            .await?;
        Session::from_token(env.data.token)
    }

    pub async fn login(&self, credentials: &Credentials) -> Result<Session, ApiError> {
        let env = self
            .core
            .send_anonymous::<TokenResponse>(Method::POST, "/login", Some(to_body(credentials)?))
            .await?;
        Session::from_token(env.data.token)
    }

    /// Profile of the signed-in actor.
    pub async fn profile(&self) -> Result<Profile, ApiError> {
        Ok(self.core.send(Method::GET, "/profile", None).await?.data)
    }
}
