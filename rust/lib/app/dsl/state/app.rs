//! App-level state: stored at `app/route`.

use agora_client::PostId;
use serde::{Deserialize, Serialize};

/// Client-side route. Only handlers change it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppRoute(pub String);

impl AppRoute {
    pub const PATH: &'static str = "app/route";

    pub const LOGIN: &'static str = "/login";
    pub const SIGNUP: &'static str = "/signup";
    pub const FEED: &'static str = "/";
    pub const COMPOSE: &'static str = "/posts/create";
    pub const PROFILE: &'static str = "/profile";

    pub fn login() -> Self {
        Self(Self::LOGIN.into())
    }

    pub fn feed() -> Self {
        Self(Self::FEED.into())
    }

    pub fn post(id: PostId) -> Self {
        Self(format!("/posts/{}", id))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}
