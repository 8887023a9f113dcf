//! Post page state: stored at `post/{id}/detail` and `post/{id}/comments`.

use agora_client::{Comment, CommentId, Post, PostId};
use agora_sync::CollectionView;
use serde::{Deserialize, Serialize};

/// Single post view.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostDetailState {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub post: Option<Post>,
    pub loading: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl PostDetailState {
    pub fn path(post_id: PostId) -> String {
        format!("post/{}/detail", post_id)
    }
}

/// Comments under one post.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentThreadState {
    pub items: Vec<Comment>,
    pub has_more: bool,
    pub loading: bool,
    pub reloading: bool,
    pub updating: Vec<CommentId>,
    /// Message of the comment being submitted; kept on failure.
    pub draft: String,
    /// True while a new comment is being submitted.
    pub posting: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl CommentThreadState {
    pub fn path(post_id: PostId) -> String {
        format!("post/{}/comments", post_id)
    }

    /// Prefix holding every path of one post page.
    pub fn tree(post_id: PostId) -> String {
        format!("post/{}", post_id)
    }

    /// Collection fields from `view`, form fields from `prev`.
    pub fn from_view(view: CollectionView<Comment>, prev: Option<CommentThreadState>) -> Self {
        let prev = prev.unwrap_or_default();
        Self {
            items: view.items,
            has_more: view.flags.has_more,
            loading: view.flags.loading,
            reloading: view.flags.reloading,
            updating: view.updating,
            draft: prev.draft,
            posting: prev.posting,
            error: prev.error,
        }
    }
}

impl Default for CommentThreadState {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            has_more: false,
            loading: false,
            reloading: false,
            updating: Vec::new(),
            draft: String::new(),
            posting: false,
            error: None,
        }
    }
}
