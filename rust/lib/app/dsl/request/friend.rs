//! Profile, friend and user directory requests.

use agora_client::{FriendRequestId, FriendRequestStatus, UserId};

/// Load profile, friends and incoming requests.
#[derive(Debug, Clone)]
pub struct ProfileLoadReq;

impl ProfileLoadReq {
    pub const PATH: &'static str = "profile/load";
}

/// Accept or decline an incoming friend request.
#[derive(Debug, Clone)]
pub struct RespondFriendReq {
    pub request_id: FriendRequestId,
    pub status: FriendRequestStatus,
}

impl RespondFriendReq {
    pub const PATH: &'static str = "friend/respond";
}

#[derive(Debug, Clone)]
pub struct UsersLoadReq;

impl UsersLoadReq {
    pub const PATH: &'static str = "users/load";
}

#[derive(Debug, Clone)]
pub struct SendFriendReq {
    pub user_id: UserId,
}

impl SendFriendReq {
    pub const PATH: &'static str = "friend/send";
}
