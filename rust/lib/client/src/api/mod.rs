//! Per-entity clients. Each method is one request/response mapping.

mod auth;
mod comments;
mod friends;
mod posts;
mod reactions;

pub use auth::AuthClient;
pub use comments::CommentClient;
pub use friends::FriendClient;
pub use posts::PostClient;
pub use reactions::ReactionClient;
