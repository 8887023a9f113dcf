//! Compose state: stored at `compose/post`.

use serde::{Deserialize, Serialize};

/// New-post form.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComposeState {
    pub title: String,
    pub description: String,
    pub busy: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ComposeState {
    pub const PATH: &'static str = "compose/post";
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ComposeField {
    Title,
    Description,
}
