use reqwest::Method;

use crate::envelope::Page;
use crate::error::ApiError;
use crate::http::{to_body, HttpCore};
use crate::model::{Comment, CommentDraft, CommentId, CommentPatch, PostId};

/// Comment CRUD under `/comment` plus the per-post listing.
#[derive(Clone)]
pub struct CommentClient {
    core: HttpCore,
}

impl CommentClient {
    pub fn new(core: HttpCore) -> Self {
        Self { core }
    }

    pub async fn list(&self, post_id: PostId, page: u32, limit: u32) -> Result<Page<Comment>, ApiError> {
        self.core
            .list(
                &format!("/post/{}/comment", post_id),
                &[("page", page.to_string()), ("limit", limit.to_string())],
            )
            .await
    }

    pub async fn get(&self, id: CommentId) -> Result<Comment, ApiError> {
        Ok(self.core.send(Method::GET, &format!("/comment/{}", id), None).await?.data)
    }

    pub async fn create(&self, draft: &CommentDraft) -> Result<(), ApiError> {
        self.core.send_unit(Method::POST, "/comment", Some(to_body(draft)?)).await
    }

    pub async fn update(&self, id: CommentId, patch: &CommentPatch) -> Result<(), ApiError> {
        self.core
            .send_unit(Method::PUT, &format!("/comment/{}", id), Some(to_body(patch)?))
            .await
    }

    pub async fn delete(&self, id: CommentId) -> Result<(), ApiError> {
        self.core.send_unit(Method::DELETE, &format!("/comment/{}", id), None).await
    }
}
