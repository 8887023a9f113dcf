//! Compose and post page handlers.

use agora_client::{PostDraft, PostId};
use agora_flux::StateStore;

use crate::context::{AppContext, Thread};
use crate::handlers::{comment_handlers, feed_handlers, helpers};
use crate::request::*;
use crate::state::*;

/// Handle `compose/update-field`.
pub async fn handle_compose_update(req: &ComposeUpdateReq, store: &StateStore) {
    store.update::<ComposeState, _>(ComposeState::PATH, |c| {
        match req.field {
            ComposeField::Title => c.title = req.value.clone(),
            ComposeField::Description => c.description = req.value.clone(),
        }
        c.error = None;
    });
}

/// Handle `post/create`. On success the form is cleared, the feed is
/// reloaded from page 1 and the app routes back to it.
pub async fn handle_create(req: &CreatePostReq, store: &StateStore, ctx: &AppContext) {
    store.set(
        ComposeState::PATH,
        ComposeState { title: req.title.clone(), description: req.description.clone(), busy: true, error: None },
    );

    let draft = PostDraft { title: req.title.clone(), description: req.description.clone() };
    match ctx.api.posts.create(&draft).await {
        Ok(()) => {
            store.set(ComposeState::PATH, ComposeState::default());
            feed_handlers::handle_load(&FeedLoadReq { reset: true }, store, ctx).await;
            helpers::set_route(store, AppRoute::feed());
        }
        Err(e) => {
            tracing::warn!(error = %e, "post create failed");
            if helpers::session_lost(&e, store, ctx).await {
                return;
            }
            store.set(
                ComposeState::PATH,
                ComposeState {
                    title: req.title.clone(),
                    description: req.description.clone(),
                    busy: false,
                    error: Some(e.to_string()),
                },
            );
        }
    }
}

/// Handle `post/open`: route to the post, load it and the first page of
/// its comments. Reopening a post starts its thread over.
pub async fn handle_open(req: &OpenPostReq, store: &StateStore, ctx: &AppContext) {
    helpers::set_route(store, AppRoute::post(req.post_id));
    store.set(&PostDetailState::path(req.post_id), PostDetailState { loading: true, ..Default::default() });

    let thread = ctx.reopen_thread(req.post_id);
    store.set(&CommentThreadState::path(req.post_id), CommentThreadState::default());

    if !refresh_detail(req.post_id, &thread, store, ctx).await {
        return;
    }
    comment_handlers::load_thread(req.post_id, &thread, false, store, ctx).await;
}

/// Handle `post/close`.
pub async fn handle_close(req: &ClosePostReq, store: &StateStore, ctx: &AppContext) {
    ctx.close_thread(req.post_id);
    store.remove_tree(&CommentThreadState::tree(req.post_id));
}

/// Re-fetch the post shown on a post page. Returns false if the session
/// was lost or the page was closed or reopened meanwhile; nothing is
/// published then.
pub async fn refresh_detail(post_id: PostId, thread: &Thread, store: &StateStore, ctx: &AppContext) -> bool {
    let path = PostDetailState::path(post_id);
    let fetched = ctx.api.posts.get(post_id).await;
    if !ctx.is_current(post_id, thread) {
        tracing::debug!(%post_id, "post page closed before its detail arrived");
        return false;
    }
    let state = match fetched {
        Ok(post) => PostDetailState { post: Some(post), loading: false, error: None },
        Err(e) => {
            tracing::warn!(%post_id, error = %e, "post load failed");
            if helpers::session_lost(&e, store, ctx).await {
                return false;
            }
            let prev = store.get_as::<PostDetailState>(&path).unwrap_or_default();
            let error = if e.is_not_found() { "Post not found".to_string() } else { e.to_string() };
            PostDetailState { post: prev.post, loading: false, error: Some(error) }
        }
    };
    store.set(&path, state);
    true
}
