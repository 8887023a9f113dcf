//! App lifecycle requests.

/// Restore the session from a token the host persisted, if any.
#[derive(Debug, Clone, Default)]
pub struct InitializeReq {
    pub stored_token: Option<String>,
}

impl InitializeReq {
    pub const PATH: &'static str = "app/initialize";
}

/// Client-side navigation.
#[derive(Debug, Clone)]
pub struct NavigateReq {
    pub route: String,
}

impl NavigateReq {
    pub const PATH: &'static str = "app/navigate";
}
