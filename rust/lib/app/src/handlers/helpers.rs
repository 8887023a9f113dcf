//! Shared helpers for handlers.

use std::future::Future;

use agora_client::{ApiError, PostId};
use agora_flux::StateStore;

use crate::context::{AppContext, Thread};
use crate::handlers::auth_handlers;
use crate::state::*;

/// Run `fut`, publishing once it has started.
///
/// The collections set their in-flight flags synchronously before the
/// first network await, so `publish` sees them raised.
pub async fn with_progress<F, P>(fut: F, publish: P) -> F::Output
where
    F: Future,
    P: FnOnce(),
{
    let (out, ()) = tokio::join!(fut, async { publish() });
    out
}

/// Turn a failed call into the logout transition if the session is gone.
///
/// Returns true when the caller should stop.
pub async fn session_lost(err: &ApiError, store: &StateStore, ctx: &AppContext) -> bool {
    if err.is_unauthenticated() {
        tracing::info!(error = %err, "session lost");
        auth_handlers::end_session(store, ctx, None).await;
        true
    } else {
        false
    }
}

/// Publish the feed collection, keeping the editor and error fields.
pub fn publish_feed(store: &StateStore, ctx: &AppContext) {
    let prev = store.get_as::<FeedState>(FeedState::PATH).unwrap_or_default();
    store.set(FeedState::PATH, FeedState::from_view(ctx.feed.snapshot(), prev.editing, prev.error));
}

/// Publish the feed with new editor and error fields.
pub fn publish_feed_with(store: &StateStore, ctx: &AppContext, editing: Option<PostId>, error: Option<String>) {
    store.set(FeedState::PATH, FeedState::from_view(ctx.feed.snapshot(), editing, error));
}

pub fn feed_editing(store: &StateStore) -> Option<PostId> {
    store.get_as::<FeedState>(FeedState::PATH).and_then(|f| f.editing)
}

/// Publish a comment thread. Threads that were closed or replaced since
/// the caller captured them publish nothing.
pub fn publish_thread(store: &StateStore, ctx: &AppContext, post_id: PostId, thread: &Thread) {
    if !ctx.is_current(post_id, thread) {
        return;
    }
    let path = CommentThreadState::path(post_id);
    let prev = store.get_as::<CommentThreadState>(&path);
    store.set(&path, CommentThreadState::from_view(thread.comments.snapshot(), prev));
}

/// Update the form fields of a thread state, if the thread is still open.
pub fn update_thread_form<F>(store: &StateStore, ctx: &AppContext, post_id: PostId, thread: &Thread, f: F)
where
    F: FnOnce(&mut CommentThreadState),
{
    if !ctx.is_current(post_id, thread) {
        return;
    }
    let path = CommentThreadState::path(post_id);
    let prev = store.get_as::<CommentThreadState>(&path);
    let mut next = CommentThreadState::from_view(thread.comments.snapshot(), prev);
    f(&mut next);
    store.set(&path, next);
}

pub fn set_route(store: &StateStore, route: AppRoute) {
    tracing::debug!(route = route.as_str(), "route");
    store.set(AppRoute::PATH, route);
}

pub fn is_authenticated(store: &StateStore) -> bool {
    store
        .get_as::<AuthState>(AuthState::PATH)
        .map(|a| a.is_authenticated())
        .unwrap_or(false)
}
