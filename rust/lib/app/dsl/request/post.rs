//! Post page and compose requests.

use agora_client::PostId;

use crate::state::ComposeField;

/// Edit one field of the new-post form.
#[derive(Debug, Clone)]
pub struct ComposeUpdateReq {
    pub field: ComposeField,
    pub value: String,
}

impl ComposeUpdateReq {
    pub const PATH: &'static str = "compose/update-field";
}

#[derive(Debug, Clone)]
pub struct CreatePostReq {
    pub title: String,
    pub description: String,
}

impl CreatePostReq {
    pub const PATH: &'static str = "post/create";
}

/// Show a post with its comment thread.
#[derive(Debug, Clone)]
pub struct OpenPostReq {
    pub post_id: PostId,
}

impl OpenPostReq {
    pub const PATH: &'static str = "post/open";
}

/// Leave a post page; its thread is dropped.
#[derive(Debug, Clone)]
pub struct ClosePostReq {
    pub post_id: PostId,
}

impl ClosePostReq {
    pub const PATH: &'static str = "post/close";
}
