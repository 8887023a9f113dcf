//! Agora app: the headless client.
//!
//! Structure:
//! - `dsl/state/`: state stored at well-known paths, read by renderers
//! - `dsl/request/`: requests a front end emits
//! - `src/handlers/`: handler implementations and the Flux wiring
//!
//! A host builds an [`AppContext`] for a server, registers the handlers on
//! a [`Flux`](agora_flux::Flux), emits `app/initialize` and renders
//! whatever state it subscribes to.

// State types: flat access as `crate::state::*`.
#[path = "../dsl/state/mod.rs"]
pub mod state;

// Request types: flat access as `crate::request::*`.
#[path = "../dsl/request/mod.rs"]
pub mod request;

pub mod context;
pub mod handlers;

pub use context::AppContext;
pub use handlers::register_handlers;
