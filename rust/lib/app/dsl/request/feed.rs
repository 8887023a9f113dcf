//! Feed requests.

use agora_client::{PostId, ReactionKind};
use agora_sync::ScrollEvent;

/// Load the feed: the current page, or page 1 from scratch with `reset`.
#[derive(Debug, Clone, Default)]
pub struct FeedLoadReq {
    pub reset: bool,
}

impl FeedLoadReq {
    pub const PATH: &'static str = "feed/load";
}

/// Scroll or sentinel event from the feed list.
#[derive(Debug, Clone)]
pub struct FeedScrollReq {
    pub event: ScrollEvent,
}

impl FeedScrollReq {
    pub const PATH: &'static str = "feed/scroll";
}

#[derive(Debug, Clone)]
pub struct FeedReactReq {
    pub post_id: PostId,
    pub kind: ReactionKind,
}

impl FeedReactReq {
    pub const PATH: &'static str = "feed/react";
}

/// Open the inline editor on a post.
#[derive(Debug, Clone)]
pub struct FeedEditBeginReq {
    pub post_id: PostId,
}

impl FeedEditBeginReq {
    pub const PATH: &'static str = "feed/edit/begin";
}

#[derive(Debug, Clone)]
pub struct FeedEditCancelReq;

impl FeedEditCancelReq {
    pub const PATH: &'static str = "feed/edit/cancel";
}

#[derive(Debug, Clone)]
pub struct FeedEditSaveReq {
    pub post_id: PostId,
    pub title: String,
    pub description: String,
}

impl FeedEditSaveReq {
    pub const PATH: &'static str = "feed/edit/save";
}

#[derive(Debug, Clone)]
pub struct FeedDeleteReq {
    pub post_id: PostId,
}

impl FeedDeleteReq {
    pub const PATH: &'static str = "feed/delete";
}
