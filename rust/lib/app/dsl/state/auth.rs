//! Auth state: stored at `auth/state`.

use agora_client::Profile;
use serde::{Deserialize, Serialize};

/// Authentication state: the UI reads this to decide what to show.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthState {
    pub phase: AuthPhase,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<Profile>,
    pub busy: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AuthPhase {
    Unauthenticated,
    Authenticated,
}

impl AuthState {
    pub const PATH: &'static str = "auth/state";

    pub fn unauthenticated() -> Self {
        Self { phase: AuthPhase::Unauthenticated, user: None, busy: false, error: None }
    }

    pub fn authenticated(user: Option<Profile>) -> Self {
        Self { phase: AuthPhase::Authenticated, user, busy: false, error: None }
    }

    pub fn is_authenticated(&self) -> bool {
        self.phase == AuthPhase::Authenticated
    }
}

impl Default for AuthState {
    fn default() -> Self {
        Self::unauthenticated()
    }
}
