//! Comment thread requests. All of them name the post owning the thread.

use agora_client::{CommentId, PostId};
use agora_sync::ScrollEvent;

#[derive(Debug, Clone)]
pub struct CommentLoadReq {
    pub post_id: PostId,
    pub reset: bool,
}

impl CommentLoadReq {
    pub const PATH: &'static str = "comment/load";
}

#[derive(Debug, Clone)]
pub struct CommentScrollReq {
    pub post_id: PostId,
    pub event: ScrollEvent,
}

impl CommentScrollReq {
    pub const PATH: &'static str = "comment/scroll";
}

#[derive(Debug, Clone)]
pub struct CreateCommentReq {
    pub post_id: PostId,
    pub message: String,
}

impl CreateCommentReq {
    pub const PATH: &'static str = "comment/create";
}

/// Toggle the actor's (untyped) reaction on a comment.
#[derive(Debug, Clone)]
pub struct CommentReactReq {
    pub post_id: PostId,
    pub comment_id: CommentId,
}

impl CommentReactReq {
    pub const PATH: &'static str = "comment/react";
}

#[derive(Debug, Clone)]
pub struct CommentEditReq {
    pub post_id: PostId,
    pub comment_id: CommentId,
    pub message: String,
}

impl CommentEditReq {
    pub const PATH: &'static str = "comment/edit";
}

#[derive(Debug, Clone)]
pub struct CommentDeleteReq {
    pub post_id: PostId,
    pub comment_id: CommentId,
}

impl CommentDeleteReq {
    pub const PATH: &'static str = "comment/delete";
}
