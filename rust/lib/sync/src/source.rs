//! Seams between a collection and the remote API.
//!
//! A collection never talks HTTP itself; it is handed a source for each
//! operation. The bindings at the bottom adapt the typed clients, tests
//! plug in scripted fakes.

use std::fmt::Debug;
use std::hash::Hash;

use agora_client::{
    ApiError, Comment, CommentClient, CommentId, CommentPatch, Page, Post, PostClient, PostDraft, PostId,
    ReactionClient, ReactionId, ReactionKind, UserReaction,
};

/// Anything with a stable identity inside a collection.
pub trait Identified {
    type Id: Clone + Eq + Hash + Debug + Send + Sync + 'static;

    fn id(&self) -> Self::Id;
}

/// Items carrying the current actor's reaction.
pub trait Reactable: Identified {
    fn user_reaction(&self) -> Option<&UserReaction>;
}

/// Fetches one page of a list.
#[async_trait::async_trait]
pub trait PageSource<T>: Send + Sync {
    async fn fetch_page(&self, page: u32, limit: u32) -> Result<Page<T>, ApiError>;
}

/// Single-item read, update and delete.
#[async_trait::async_trait]
pub trait ItemSource<T: Identified>: Send + Sync {
    type Patch: Send + Sync;

    async fn fetch_item(&self, id: &T::Id) -> Result<T, ApiError>;
    async fn update_item(&self, id: &T::Id, patch: &Self::Patch) -> Result<(), ApiError>;
    async fn delete_item(&self, id: &T::Id) -> Result<(), ApiError>;
}

/// Adds and removes the actor's reaction on an item.
#[async_trait::async_trait]
pub trait ReactionSource<T: Identified>: Send + Sync {
    async fn add_reaction(&self, id: &T::Id, kind: ReactionKind) -> Result<(), ApiError>;
    async fn remove_reaction(&self, reaction: ReactionId) -> Result<(), ApiError>;
}

impl Identified for Post {
    type Id = PostId;

    fn id(&self) -> PostId {
        self.id
    }
}

impl Reactable for Post {
    fn user_reaction(&self) -> Option<&UserReaction> {
        self.user_reaction.as_ref()
    }
}

impl Identified for Comment {
    type Id = CommentId;

    fn id(&self) -> CommentId {
        self.id
    }
}

impl Reactable for Comment {
    fn user_reaction(&self) -> Option<&UserReaction> {
        self.user_reaction.as_ref()
    }
}

// ── Bindings to the HTTP clients ────────────────────────────────────

/// The global post feed.
#[derive(Clone)]
pub struct PostSource {
    pub posts: PostClient,
    pub reactions: ReactionClient,
}

#[async_trait::async_trait]
impl PageSource<Post> for PostSource {
    async fn fetch_page(&self, page: u32, limit: u32) -> Result<Page<Post>, ApiError> {
        self.posts.list(page, limit).await
    }
}

#[async_trait::async_trait]
impl ItemSource<Post> for PostSource {
    type Patch = PostDraft;

    async fn fetch_item(&self, id: &PostId) -> Result<Post, ApiError> {
        self.posts.get(*id).await
    }

    async fn update_item(&self, id: &PostId, patch: &PostDraft) -> Result<(), ApiError> {
        self.posts.update(*id, patch).await
    }

    async fn delete_item(&self, id: &PostId) -> Result<(), ApiError> {
        self.posts.delete(*id).await
    }
}

#[async_trait::async_trait]
impl ReactionSource<Post> for PostSource {
    async fn add_reaction(&self, id: &PostId, kind: ReactionKind) -> Result<(), ApiError> {
        self.reactions.add_post_reaction(*id, kind).await
    }

    async fn remove_reaction(&self, reaction: ReactionId) -> Result<(), ApiError> {
        self.reactions.remove_post_reaction(reaction).await
    }
}

/// Comments under one post.
#[derive(Clone)]
pub struct CommentSource {
    pub post_id: PostId,
    pub comments: CommentClient,
    pub reactions: ReactionClient,
}

#[async_trait::async_trait]
impl PageSource<Comment> for CommentSource {
    async fn fetch_page(&self, page: u32, limit: u32) -> Result<Page<Comment>, ApiError> {
        self.comments.list(self.post_id, page, limit).await
    }
}

#[async_trait::async_trait]
impl ItemSource<Comment> for CommentSource {
    type Patch = CommentPatch;

    async fn fetch_item(&self, id: &CommentId) -> Result<Comment, ApiError> {
        self.comments.get(*id).await
    }

    async fn update_item(&self, id: &CommentId, patch: &CommentPatch) -> Result<(), ApiError> {
        self.comments.update(*id, patch).await
    }

    async fn delete_item(&self, id: &CommentId) -> Result<(), ApiError> {
        self.comments.delete(*id).await
    }
}

#[async_trait::async_trait]
impl ReactionSource<Comment> for CommentSource {
    // Comment reactions are untyped on the wire.
    async fn add_reaction(&self, id: &CommentId, _kind: ReactionKind) -> Result<(), ApiError> {
        self.reactions.add_comment_reaction(*id).await
    }

    async fn remove_reaction(&self, reaction: ReactionId) -> Result<(), ApiError> {
        self.reactions.remove_comment_reaction(reaction).await
    }
}
