use reqwest::Method;

use crate::envelope::Page;
use crate::error::ApiError;
use crate::http::{to_body, HttpCore};
use crate::model::{Post, PostDraft, PostId};

/// Post CRUD under `/post`.
#[derive(Clone)]
pub struct PostClient {
    core: HttpCore,
}

impl PostClient {
    pub fn new(core: HttpCore) -> Self {
        Self { core }
    }

    pub async fn list(&self, page: u32, limit: u32) -> Result<Page<Post>, ApiError> {
        self.core
            .list("/post", &[("limit", limit.to_string()), ("page", page.to_string())])
            .await
    }

    pub async fn get(&self, id: PostId) -> Result<Post, ApiError> {
        Ok(self.core.send(Method::GET, &format!("/post/{}", id), None).await?.data)
    }

    pub async fn create(&self, draft: &PostDraft) -> Result<(), ApiError> {
        self.core.send_unit(Method::POST, "/post", Some(to_body(draft)?)).await
    }

    pub async fn update(&self, id: PostId, draft: &PostDraft) -> Result<(), ApiError> {
        self.core
            .send_unit(Method::PUT, &format!("/post/{}", id), Some(to_body(draft)?))
            .await
    }

    pub async fn delete(&self, id: PostId) -> Result<(), ApiError> {
        self.core.send_unit(Method::DELETE, &format!("/post/{}", id), None).await
    }
}
