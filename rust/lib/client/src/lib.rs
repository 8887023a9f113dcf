//! Agora HTTP client.
//!
//! Type-safe wrappers around the social API: one client per entity, one
//! async method per operation, no local state beyond the session.
//! Authentication is supplied by a pluggable [`TokenSource`]; responses are
//! normalized into an [`Envelope`] at this boundary.
//!
//! # Usage
//!
//! ```ignore
//! use agora_client::{AgoraClient, Credentials, SharedSession};
//!
//! let session = SharedSession::new();
//! let api = AgoraClient::new("http://localhost:3000", Arc::new(session.clone()));
//! session.set(api.auth.login(&Credentials { .. }).await?).await;
//! let first = api.posts.list(1, 10).await?;
//! ```

mod api;
pub mod envelope;
pub mod error;
mod http;
pub mod model;
pub mod session;

use std::sync::Arc;

pub use api::{AuthClient, CommentClient, FriendClient, PostClient, ReactionClient};
pub use envelope::{normalize, Envelope, Page, Pagination};
pub use error::ApiError;
pub use http::HttpCore;
pub use model::*;
pub use session::{NoAuth, Session, SharedSession, StaticToken, TokenSource};

/// All resource clients over one connection pool and token source.
#[derive(Clone)]
pub struct AgoraClient {
    pub auth: AuthClient,
    pub posts: PostClient,
    pub comments: CommentClient,
    pub reactions: ReactionClient,
    pub friends: FriendClient,
}

impl AgoraClient {
    pub fn new(base_url: impl Into<String>, token_source: Arc<dyn TokenSource>) -> Self {
        let core = HttpCore::new(base_url, token_source);
        Self {
            auth: AuthClient::new(core.clone()),
            posts: PostClient::new(core.clone()),
            comments: CommentClient::new(core.clone()),
            reactions: ReactionClient::new(core.clone()),
            friends: FriendClient::new(core),
        }
    }
}
