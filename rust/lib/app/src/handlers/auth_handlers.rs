//! Auth handler implementations.
//!
//! The session moves through two phases only. Login and signup create it
//! and route to the feed; logout, expiry or any 401 destroy it and route
//! to the login page.

use agora_client::{ApiError, Credentials, Session};
use agora_flux::StateStore;

use crate::context::AppContext;
use crate::handlers::{feed_handlers, helpers};
use crate::request::*;
use crate::state::*;

/// Handle `auth/login`.
pub async fn handle_login(req: &LoginReq, store: &StateStore, ctx: &AppContext) {
    if req.username.trim().is_empty() || req.password.is_empty() {
        store.set(AuthState::PATH, failed("Username and password are required"));
        return;
    }
    set_busy(store);

    let credentials = Credentials { username: req.username.clone(), password: req.password.clone() };
    let result = ctx.api.auth.login(&credentials).await;
    finish_sign_in(result, store, ctx).await;
}

/// Handle `auth/signup`.
pub async fn handle_signup(req: &SignupReq, store: &StateStore, ctx: &AppContext) {
    if req.form.username.trim().is_empty() || req.form.password.is_empty() {
        store.set(AuthState::PATH, failed("Username and password are required"));
        return;
    }
    set_busy(store);

    let result = ctx.api.auth.signup(&req.form).await;
    finish_sign_in(result, store, ctx).await;
}

/// Handle `auth/logout`.
pub async fn handle_logout(store: &StateStore, ctx: &AppContext) {
    end_session(store, ctx, None).await;
}

/// `Unauthenticated → Authenticated`: install the session, load the
/// profile, route to the feed and load its first page.
pub async fn begin_session(session: Session, store: &StateStore, ctx: &AppContext) {
    tracing::info!(user = session.username().unwrap_or("?"), "session started");
    ctx.session.set(session).await;

    let user = match ctx.api.auth.profile().await {
        Ok(profile) => Some(profile),
        Err(e) => {
            if helpers::session_lost(&e, store, ctx).await {
                return;
            }
            tracing::warn!(error = %e, "profile load failed");
            None
        }
    };

    store.set(AuthState::PATH, AuthState::authenticated(user));
    helpers::set_route(store, AppRoute::feed());
    feed_handlers::handle_load(&FeedLoadReq { reset: true }, store, ctx).await;
}

/// `Authenticated → Unauthenticated`: destroy the session, drop every
/// collection and per-user state, route to the login page.
pub async fn end_session(store: &StateStore, ctx: &AppContext, error: Option<String>) {
    ctx.session.clear().await;
    ctx.detach_all();

    store.remove(FeedState::PATH);
    store.remove(ComposeState::PATH);
    store.remove(ProfileState::PATH);
    store.remove(UserDirectoryState::PATH);
    store.remove_tree("post");

    store.set(AuthState::PATH, AuthState { error, ..AuthState::unauthenticated() });
    helpers::set_route(store, AppRoute::login());
}

async fn finish_sign_in(result: Result<Session, ApiError>, store: &StateStore, ctx: &AppContext) {
    match result {
        Ok(session) => begin_session(session, store, ctx).await,
        Err(e) => {
            tracing::warn!(error = %e, "sign-in failed");
            let message = match &e {
                ApiError::Unauthenticated(_) => "Invalid username or password".to_string(),
                other => other.to_string(),
            };
            store.set(AuthState::PATH, failed(&message));
        }
    }
}

fn set_busy(store: &StateStore) {
    store.set(AuthState::PATH, AuthState { busy: true, ..AuthState::unauthenticated() });
}

fn failed(message: &str) -> AuthState {
    AuthState { error: Some(message.to_string()), ..AuthState::unauthenticated() }
}
