use reqwest::Method;

use crate::error::ApiError;
use crate::http::HttpCore;
use crate::model::{CommentId, PostId, ReactionId, ReactionKind};

/// Reaction add/remove for posts (`/reaction`) and comments
/// (`/comment-reaction`).
///
/// Adds are keyed by the item id, removals by the reaction record id.
#[derive(Clone)]
pub struct ReactionClient {
    core: HttpCore,
}

impl ReactionClient {
    pub fn new(core: HttpCore) -> Self {
        Self { core }
    }

    pub async fn add_post_reaction(&self, post_id: PostId, kind: ReactionKind) -> Result<(), ApiError> {
        let body = serde_json::json!({ "reactionName": kind.as_str() });
        self.core
            .send_unit(Method::POST, &format!("/reaction/{}", post_id), Some(body))
            .await
    }

    pub async fn remove_post_reaction(&self, reaction_id: ReactionId) -> Result<(), ApiError> {
        self.core
            .send_unit(Method::DELETE, &format!("/reaction/{}", reaction_id), None)
            .await
    }

    pub async fn add_comment_reaction(&self, comment_id: CommentId) -> Result<(), ApiError> {
        self.core
            .send_unit(Method::POST, &format!("/comment-reaction/{}", comment_id), None)
            .await
    }

    pub async fn remove_comment_reaction(&self, reaction_id: ReactionId) -> Result<(), ApiError> {
        self.core
            .send_unit(Method::DELETE, &format!("/comment-reaction/{}", reaction_id), None)
            .await
    }
}
