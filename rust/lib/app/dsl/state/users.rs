//! User directory state: stored at `users/list`.

use agora_client::{UserId, UserSummary};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDirectoryState {
    pub users: Vec<UserSummary>,
    pub loading: bool,
    /// Users with a friend request being sent.
    pub sending: Vec<UserId>,
    /// Outcome of the last friend request, for a toast.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notice: Option<String>,
}

impl UserDirectoryState {
    pub const PATH: &'static str = "users/list";
}
