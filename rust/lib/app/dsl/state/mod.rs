//! State definitions.
//!
//! Each file defines the state stored at one well-known path (or one path
//! per post for the detail and thread views). Renderers read these and
//! nothing else.

pub mod app;
pub mod auth;
pub mod compose;
pub mod feed;
pub mod post;
pub mod profile;
pub mod users;

pub use app::AppRoute;
pub use auth::{AuthPhase, AuthState};
pub use compose::{ComposeField, ComposeState};
pub use feed::FeedState;
pub use post::{CommentThreadState, PostDetailState};
pub use profile::ProfileState;
pub use users::UserDirectoryState;
