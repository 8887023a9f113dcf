//! Profile page state: stored at `profile/state`.

use agora_client::{FriendRequest, FriendRequestId, Profile, UserSummary};
use serde::{Deserialize, Serialize};

/// The actor's profile with friends and incoming requests.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileState {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile: Option<Profile>,
    pub friends: Vec<UserSummary>,
    pub requests: Vec<FriendRequest>,
    /// Requests with an accept/decline in flight.
    pub pending: Vec<FriendRequestId>,
    pub loading: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ProfileState {
    pub const PATH: &'static str = "profile/state";

    pub fn is_pending(&self, id: FriendRequestId) -> bool {
        self.pending.contains(&id)
    }
}
