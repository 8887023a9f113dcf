//! Feed handler implementations.

use agora_client::PostDraft;
use agora_flux::StateStore;
use agora_sync::{LoadOutcome, MutationOutcome};

use crate::context::AppContext;
use crate::handlers::helpers;
use crate::request::*;

/// Handle `feed/load`.
pub async fn handle_load(req: &FeedLoadReq, store: &StateStore, ctx: &AppContext) {
    let source = ctx.post_source();
    let outcome = helpers::with_progress(ctx.feed.load_page(req.reset, &source), || {
        helpers::publish_feed(store, ctx)
    })
    .await;
    settle_load(outcome, store, ctx).await;
}

/// Handle `feed/scroll`.
pub async fn handle_scroll(req: &FeedScrollReq, store: &StateStore, ctx: &AppContext) {
    // A drive already in progress owns the trigger; this event is moot.
    let Ok(mut trigger) = ctx.feed_trigger.try_lock() else {
        return;
    };
    let source = ctx.post_source();
    let outcome = helpers::with_progress(trigger.drive(req.event, &ctx.feed, &source), || {
        // Most scroll events load nothing.
        if ctx.feed.flags().busy() {
            helpers::publish_feed(store, ctx)
        }
    })
    .await;
    drop(trigger);
    settle_load(outcome, store, ctx).await;
}

/// Handle `feed/react`.
pub async fn handle_react(req: &FeedReactReq, store: &StateStore, ctx: &AppContext) {
    let source = ctx.post_source();
    let outcome = helpers::with_progress(
        ctx.feed.toggle_reaction(&req.post_id, req.kind, &source, &source),
        || helpers::publish_feed(store, ctx),
    )
    .await;
    settle_mutation(outcome, store, ctx, helpers::feed_editing(store)).await;
}

/// Handle `feed/edit/begin`.
pub async fn handle_edit_begin(req: &FeedEditBeginReq, store: &StateStore, ctx: &AppContext) {
    if ctx.feed.get(&req.post_id).is_some() {
        helpers::publish_feed_with(store, ctx, Some(req.post_id), None);
    }
}

/// Handle `feed/edit/cancel`.
pub async fn handle_edit_cancel(store: &StateStore, ctx: &AppContext) {
    helpers::publish_feed_with(store, ctx, None, None);
}

/// Handle `feed/edit/save`. The editor closes only when the update sticks.
pub async fn handle_edit_save(req: &FeedEditSaveReq, store: &StateStore, ctx: &AppContext) {
    let source = ctx.post_source();
    let draft = PostDraft { title: req.title.clone(), description: req.description.clone() };
    let outcome = helpers::with_progress(ctx.feed.edit_item(&req.post_id, &draft, &source), || {
        helpers::publish_feed(store, ctx)
    })
    .await;

    let editing = if outcome.is_success() { None } else { helpers::feed_editing(store) };
    settle_mutation(outcome, store, ctx, editing).await;
}

/// Handle `feed/delete`.
pub async fn handle_delete(req: &FeedDeleteReq, store: &StateStore, ctx: &AppContext) {
    let source = ctx.post_source();
    let outcome = helpers::with_progress(ctx.feed.delete_item(&req.post_id, &source), || {
        helpers::publish_feed(store, ctx)
    })
    .await;

    let editing = helpers::feed_editing(store).filter(|id| *id != req.post_id || !outcome.is_success());
    settle_mutation(outcome, store, ctx, editing).await;
}

async fn settle_load(outcome: LoadOutcome, store: &StateStore, ctx: &AppContext) {
    match outcome {
        LoadOutcome::Applied { .. } => {
            helpers::publish_feed_with(store, ctx, helpers::feed_editing(store), None);
        }
        LoadOutcome::Failed(e) => {
            if helpers::session_lost(&e, store, ctx).await {
                return;
            }
            helpers::publish_feed_with(store, ctx, helpers::feed_editing(store), Some(e.to_string()));
        }
        LoadOutcome::Skipped => {}
        // The feed was dropped (logout) while loading.
        LoadOutcome::Discarded => {}
    }
}

async fn settle_mutation(
    outcome: MutationOutcome,
    store: &StateStore,
    ctx: &AppContext,
    editing: Option<agora_client::PostId>,
) {
    match outcome {
        MutationOutcome::Replaced | MutationOutcome::Removed => {
            helpers::publish_feed_with(store, ctx, editing, None);
        }
        MutationOutcome::Failed(e) => {
            if helpers::session_lost(&e, store, ctx).await {
                return;
            }
            helpers::publish_feed_with(store, ctx, editing, Some(e.to_string()));
        }
        MutationOutcome::Busy | MutationOutcome::Missing => {}
        MutationOutcome::Discarded => {}
    }
}
