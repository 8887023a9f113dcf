//! Flux: path-based state engine.
//!
//! Rust owns the application state and logic; a front end only renders
//! what it reads and emits what the user does.
//!
//! - `get(path)` reads state at a path (shared, no copy).
//! - `emit(path, payload)` sends a request to the matching handler(s).
//! - `subscribe(pattern)` observes state changes.
//!
//! Paths are `/`-separated: `auth/state`, `feed/posts`,
//! `post/{id}/comments`. Handler and subscription patterns accept MQTT-style
//! wildcards: `+` for one level, `#` for the rest.

pub mod app;
pub mod router;
pub mod store;
pub mod topic;
pub mod value;

pub use app::Flux;
pub use router::{BoxFuture, Payload, Router};
pub use store::{ChangeHandler, StateStore};
pub use value::{StateValue, SubscriptionId};
