//! Comment thread handlers.

use std::sync::Arc;

use agora_client::{CommentDraft, CommentPatch, PostId, ReactionKind};
use agora_flux::StateStore;
use agora_sync::{LoadOutcome, MutationOutcome};

use crate::context::{AppContext, Thread};
use crate::handlers::{helpers, post_handlers};
use crate::request::*;

/// Handle `comment/load`.
pub async fn handle_load(req: &CommentLoadReq, store: &StateStore, ctx: &AppContext) {
    let thread = ctx.thread_or_open(req.post_id);
    load_thread(req.post_id, &thread, req.reset, store, ctx).await;
}

/// Handle `comment/scroll`. Events for a closed thread are ignored.
pub async fn handle_scroll(req: &CommentScrollReq, store: &StateStore, ctx: &AppContext) {
    let Some(thread) = ctx.thread(req.post_id) else {
        return;
    };
    let Ok(mut trigger) = thread.trigger.try_lock() else {
        return;
    };
    let outcome = helpers::with_progress(trigger.drive(req.event, &thread.comments, &thread.source), || {
        if thread.comments.flags().busy() {
            helpers::publish_thread(store, ctx, req.post_id, &thread)
        }
    })
    .await;
    drop(trigger);
    settle_load(req.post_id, &thread, outcome, store, ctx).await;
}

/// Handle `comment/create`. Blank messages never reach the server. On
/// success the thread reloads from page 1 and the post is re-fetched for
/// its counters.
pub async fn handle_create(req: &CreateCommentReq, store: &StateStore, ctx: &AppContext) {
    let thread = ctx.thread_or_open(req.post_id);
    if req.message.trim().is_empty() {
        helpers::update_thread_form(store, ctx, req.post_id, &thread, |t| {
            t.error = Some("Comment cannot be empty".into());
        });
        return;
    }

    helpers::update_thread_form(store, ctx, req.post_id, &thread, |t| {
        t.draft = req.message.clone();
        t.posting = true;
        t.error = None;
    });

    let draft = CommentDraft { message: req.message.clone(), post_id: req.post_id };
    match ctx.api.comments.create(&draft).await {
        Ok(()) => {
            if !ctx.is_current(req.post_id, &thread) {
                tracing::debug!(post_id = %req.post_id, "thread closed while commenting");
                return;
            }
            helpers::update_thread_form(store, ctx, req.post_id, &thread, |t| {
                t.draft.clear();
                t.posting = false;
            });
            load_thread(req.post_id, &thread, true, store, ctx).await;
            post_handlers::refresh_detail(req.post_id, &thread, store, ctx).await;
        }
        Err(e) => {
            tracing::warn!(post_id = %req.post_id, error = %e, "comment create failed");
            if helpers::session_lost(&e, store, ctx).await {
                return;
            }
            helpers::update_thread_form(store, ctx, req.post_id, &thread, |t| {
                t.posting = false;
                t.error = Some(e.to_string());
            });
        }
    }
}

/// Handle `comment/react`.
pub async fn handle_react(req: &CommentReactReq, store: &StateStore, ctx: &AppContext) {
    let Some(thread) = ctx.thread(req.post_id) else {
        return;
    };
    let outcome = helpers::with_progress(
        thread
            .comments
            .toggle_reaction(&req.comment_id, ReactionKind::Like, &thread.source, &thread.source),
        || helpers::publish_thread(store, ctx, req.post_id, &thread),
    )
    .await;
    settle_mutation(req.post_id, &thread, outcome, store, ctx).await;
}

/// Handle `comment/edit`.
pub async fn handle_edit(req: &CommentEditReq, store: &StateStore, ctx: &AppContext) {
    let Some(thread) = ctx.thread(req.post_id) else {
        return;
    };
    if req.message.trim().is_empty() {
        helpers::update_thread_form(store, ctx, req.post_id, &thread, |t| {
            t.error = Some("Comment cannot be empty".into());
        });
        return;
    }
    let patch = CommentPatch { message: req.message.clone() };
    let outcome = helpers::with_progress(
        thread.comments.edit_item(&req.comment_id, &patch, &thread.source),
        || helpers::publish_thread(store, ctx, req.post_id, &thread),
    )
    .await;
    settle_mutation(req.post_id, &thread, outcome, store, ctx).await;
}

/// Handle `comment/delete`.
pub async fn handle_delete(req: &CommentDeleteReq, store: &StateStore, ctx: &AppContext) {
    let Some(thread) = ctx.thread(req.post_id) else {
        return;
    };
    let outcome = helpers::with_progress(thread.comments.delete_item(&req.comment_id, &thread.source), || {
        helpers::publish_thread(store, ctx, req.post_id, &thread)
    })
    .await;
    settle_mutation(req.post_id, &thread, outcome, store, ctx).await;
}

/// Load a page of `thread` and publish the result. A thread that is no
/// longer open is left alone.
pub async fn load_thread(post_id: PostId, thread: &Arc<Thread>, reset: bool, store: &StateStore, ctx: &AppContext) {
    if !ctx.is_current(post_id, thread) {
        return;
    }
    let outcome = helpers::with_progress(thread.comments.load_page(reset, &thread.source), || {
        helpers::publish_thread(store, ctx, post_id, thread)
    })
    .await;
    settle_load(post_id, thread, outcome, store, ctx).await;
}

async fn settle_load(post_id: PostId, thread: &Thread, outcome: LoadOutcome, store: &StateStore, ctx: &AppContext) {
    match outcome {
        LoadOutcome::Applied { .. } => helpers::update_thread_form(store, ctx, post_id, thread, |t| t.error = None),
        LoadOutcome::Failed(e) => {
            if helpers::session_lost(&e, store, ctx).await {
                return;
            }
            helpers::update_thread_form(store, ctx, post_id, thread, |t| t.error = Some(e.to_string()));
        }
        LoadOutcome::Skipped | LoadOutcome::Discarded => {}
    }
}

async fn settle_mutation(
    post_id: PostId,
    thread: &Thread,
    outcome: MutationOutcome,
    store: &StateStore,
    ctx: &AppContext,
) {
    match outcome {
        MutationOutcome::Replaced | MutationOutcome::Removed => {
            helpers::update_thread_form(store, ctx, post_id, thread, |t| t.error = None)
        }
        MutationOutcome::Failed(e) => {
            if helpers::session_lost(&e, store, ctx).await {
                return;
            }
            helpers::update_thread_form(store, ctx, post_id, thread, |t| t.error = Some(e.to_string()));
        }
        MutationOutcome::Busy | MutationOutcome::Missing | MutationOutcome::Discarded => {}
    }
}
