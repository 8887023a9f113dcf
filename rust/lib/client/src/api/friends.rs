use reqwest::Method;

use crate::error::ApiError;
use crate::http::HttpCore;
use crate::model::{FriendRequest, FriendRequestId, FriendRequestStatus, UserId, UserSummary};

/// User directory and friend-graph endpoints.
#[derive(Clone)]
pub struct FriendClient {
    core: HttpCore,
}

impl FriendClient {
    pub fn new(core: HttpCore) -> Self {
        Self { core }
    }

    pub async fn list_users(&self) -> Result<Vec<UserSummary>, ApiError> {
        Ok(self.core.send(Method::GET, "/list-users", None).await?.data)
    }

    pub async fn get_user(&self, id: UserId) -> Result<UserSummary, ApiError> {
        Ok(self.core.send(Method::GET, &format!("/user/{}", id), None).await?.data)
    }

    pub async fn send_request(&self, user_id: UserId) -> Result<(), ApiError> {
        self.core
            .send_unit(Method::POST, &format!("/send-friend-request/{}", user_id), None)
            .await
    }

    pub async fn list_requests(&self) -> Result<Vec<FriendRequest>, ApiError> {
        Ok(self.core.send(Method::GET, "/friend-request", None).await?.data)
    }

    pub async fn update_request(&self, id: FriendRequestId, status: FriendRequestStatus) -> Result<(), ApiError> {
        let body = serde_json::json!({ "status": status });
        self.core
            .send_unit(Method::PATCH, &format!("/friend-request/{}", id), Some(body))
            .await
    }

    pub async fn list_friends(&self) -> Result<Vec<UserSummary>, ApiError> {
        Ok(self.core.send(Method::GET, "/friends", None).await?.data)
    }
}
