//! App lifecycle handlers.

use agora_client::Session;
use agora_flux::StateStore;

use crate::context::AppContext;
use crate::handlers::{auth_handlers, helpers};
use crate::request::*;
use crate::state::*;

/// Handle `app/initialize`.
///
/// A stored token that decodes and has not expired resumes the session;
/// anything else starts signed out.
pub async fn handle_initialize(req: &InitializeReq, store: &StateStore, ctx: &AppContext) {
    let restored = req
        .stored_token
        .as_deref()
        .and_then(|token| match Session::from_token(token) {
            Ok(session) if !session.is_expired() => Some(session),
            Ok(_) => {
                tracing::info!("stored session has expired");
                None
            }
            Err(e) => {
                tracing::warn!(error = %e, "stored token rejected");
                None
            }
        });

    match restored {
        Some(session) => auth_handlers::begin_session(session, store, ctx).await,
        None => {
            ctx.session.clear().await;
            store.set(AuthState::PATH, AuthState::unauthenticated());
            helpers::set_route(store, AppRoute::login());
        }
    }
}

/// Handle `app/navigate`. Signed-out users only reach the login and
/// signup pages.
pub async fn handle_navigate(req: &NavigateReq, store: &StateStore) {
    let public = req.route == AppRoute::LOGIN || req.route == AppRoute::SIGNUP;
    if public || helpers::is_authenticated(store) {
        helpers::set_route(store, AppRoute(req.route.clone()));
    } else {
        helpers::set_route(store, AppRoute::login());
    }
}
