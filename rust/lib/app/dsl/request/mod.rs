//! Request definitions.
//!
//! One struct per request path; the `PATH` const is what a front end emits
//! and what `register_handlers` routes on.

pub mod app;
pub mod auth;
pub mod comment;
pub mod feed;
pub mod friend;
pub mod post;

pub use app::*;
pub use auth::*;
pub use comment::*;
pub use feed::*;
pub use friend::*;
pub use post::*;
