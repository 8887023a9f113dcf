//! Profile, friend and user directory handlers.

use agora_flux::StateStore;

use crate::context::AppContext;
use crate::handlers::helpers;
use crate::request::*;
use crate::state::*;

/// Handle `profile/load`: profile, friends and requests in parallel.
pub async fn handle_load_profile(store: &StateStore, ctx: &AppContext) {
    store.update::<ProfileState, _>(ProfileState::PATH, |p| p.loading = true);

    let (profile, friends, requests) = tokio::join!(
        ctx.api.auth.profile(),
        ctx.api.friends.list_friends(),
        ctx.api.friends.list_requests(),
    );

    let mut errors = Vec::new();
    for err in [profile.as_ref().err(), friends.as_ref().err(), requests.as_ref().err()].into_iter().flatten() {
        if helpers::session_lost(err, store, ctx).await {
            return;
        }
        tracing::warn!(error = %err, "profile page load failed");
        errors.push(err.to_string());
    }

    store.update::<ProfileState, _>(ProfileState::PATH, |p| {
        if let Ok(profile) = profile {
            p.profile = Some(profile);
        }
        if let Ok(friends) = friends {
            p.friends = friends;
        }
        if let Ok(requests) = requests {
            p.requests = requests;
        }
        p.loading = false;
        p.error = errors.first().cloned();
    });
}

/// Handle `friend/respond`. The request stays pending until the answer is
/// in and friends and requests have been re-read.
pub async fn handle_respond(req: &RespondFriendReq, store: &StateStore, ctx: &AppContext) {
    let current = store.get_as::<ProfileState>(ProfileState::PATH).unwrap_or_default();
    if current.is_pending(req.request_id) {
        return;
    }
    store.update::<ProfileState, _>(ProfileState::PATH, |p| p.pending.push(req.request_id));

    let answered = ctx.api.friends.update_request(req.request_id, req.status).await;
    if let Err(e) = &answered {
        tracing::warn!(request = %req.request_id, error = %e, "friend request answer failed");
        if helpers::session_lost(e, store, ctx).await {
            return;
        }
    }

    let (friends, requests) = tokio::join!(ctx.api.friends.list_friends(), ctx.api.friends.list_requests());
    for err in [friends.as_ref().err(), requests.as_ref().err()].into_iter().flatten() {
        if helpers::session_lost(err, store, ctx).await {
            return;
        }
    }

    store.update::<ProfileState, _>(ProfileState::PATH, |p| {
        if let Ok(friends) = friends {
            p.friends = friends;
        }
        if let Ok(requests) = requests {
            p.requests = requests;
        }
        p.pending.retain(|id| *id != req.request_id);
        p.error = answered.err().map(|e| e.to_string());
    });
}

/// Handle `users/load`.
pub async fn handle_load_users(store: &StateStore, ctx: &AppContext) {
    store.update::<UserDirectoryState, _>(UserDirectoryState::PATH, |u| u.loading = true);

    let users = match ctx.api.friends.list_users().await {
        Ok(users) => users,
        Err(e) => {
            tracing::warn!(error = %e, "user list failed");
            if helpers::session_lost(&e, store, ctx).await {
                return;
            }
            Vec::new()
        }
    };

    store.update::<UserDirectoryState, _>(UserDirectoryState::PATH, |u| {
        u.users = users;
        u.loading = false;
    });
}

/// Handle `friend/send`.
pub async fn handle_send(req: &SendFriendReq, store: &StateStore, ctx: &AppContext) {
    store.update::<UserDirectoryState, _>(UserDirectoryState::PATH, |u| {
        u.sending.push(req.user_id);
        u.notice = None;
    });

    let notice = match ctx.api.friends.send_request(req.user_id).await {
        Ok(()) => "Friend request sent!",
        Err(e) => {
            tracing::warn!(user = %req.user_id, error = %e, "friend request failed");
            if helpers::session_lost(&e, store, ctx).await {
                return;
            }
            "Failed to send friend request"
        }
    };

    store.update::<UserDirectoryState, _>(UserDirectoryState::PATH, |u| {
        u.sending.retain(|id| *id != req.user_id);
        u.notice = Some(notice.to_string());
    });
}
