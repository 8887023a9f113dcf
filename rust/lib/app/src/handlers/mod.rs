//! Handler implementations and Flux wiring.
//!
//! Each `handle_*` function takes its typed request, the state store and
//! the [`AppContext`]. `register_handlers` binds every request path to
//! its handler.

pub mod app_handlers;
pub mod auth_handlers;
pub mod comment_handlers;
pub mod feed_handlers;
pub mod friend_handlers;
pub mod helpers;
pub mod post_handlers;

use std::sync::Arc;

use agora_flux::{Flux, StateStore};

use crate::context::AppContext;
use crate::request::*;

/// Bind `Req::PATH` to a handler call. The handler body sees `req`
/// (the typed payload), `store` and `ctx`.
macro_rules! route {
    ($flux:expr, $ctx:expr, $req:ty, |$r:ident, $store:ident, $c:ident| $call:expr) => {{
        let ctx = Arc::clone(&$ctx);
        $flux.on_request(<$req>::PATH, move |$r: $req, $store: Arc<StateStore>| {
            let $c = Arc::clone(&ctx);
            async move {
                let $r = &$r;
                let $store = &*$store;
                let $c = &*$c;
                $call.await;
            }
        });
    }};
}

/// Register all handlers with a Flux instance.
pub fn register_handlers(flux: &Flux, ctx: Arc<AppContext>) {
    // app
    route!(flux, ctx, InitializeReq, |req, store, ctx| app_handlers::handle_initialize(req, store, ctx));
    route!(flux, ctx, NavigateReq, |req, store, _ctx| app_handlers::handle_navigate(req, store));

    // auth
    route!(flux, ctx, LoginReq, |req, store, ctx| auth_handlers::handle_login(req, store, ctx));
    route!(flux, ctx, SignupReq, |req, store, ctx| auth_handlers::handle_signup(req, store, ctx));
    route!(flux, ctx, LogoutReq, |_req, store, ctx| auth_handlers::handle_logout(store, ctx));

    // feed
    route!(flux, ctx, FeedLoadReq, |req, store, ctx| feed_handlers::handle_load(req, store, ctx));
    route!(flux, ctx, FeedScrollReq, |req, store, ctx| feed_handlers::handle_scroll(req, store, ctx));
    route!(flux, ctx, FeedReactReq, |req, store, ctx| feed_handlers::handle_react(req, store, ctx));
    route!(flux, ctx, FeedEditBeginReq, |req, store, ctx| feed_handlers::handle_edit_begin(req, store, ctx));
    route!(flux, ctx, FeedEditCancelReq, |_req, store, ctx| feed_handlers::handle_edit_cancel(store, ctx));
    route!(flux, ctx, FeedEditSaveReq, |req, store, ctx| feed_handlers::handle_edit_save(req, store, ctx));
    route!(flux, ctx, FeedDeleteReq, |req, store, ctx| feed_handlers::handle_delete(req, store, ctx));

    // compose + post page
    route!(flux, ctx, ComposeUpdateReq, |req, store, _ctx| post_handlers::handle_compose_update(req, store));
    route!(flux, ctx, CreatePostReq, |req, store, ctx| post_handlers::handle_create(req, store, ctx));
    route!(flux, ctx, OpenPostReq, |req, store, ctx| post_handlers::handle_open(req, store, ctx));
    route!(flux, ctx, ClosePostReq, |req, store, ctx| post_handlers::handle_close(req, store, ctx));

    // comments
    route!(flux, ctx, CommentLoadReq, |req, store, ctx| comment_handlers::handle_load(req, store, ctx));
    route!(flux, ctx, CommentScrollReq, |req, store, ctx| comment_handlers::handle_scroll(req, store, ctx));
    route!(flux, ctx, CreateCommentReq, |req, store, ctx| comment_handlers::handle_create(req, store, ctx));
    route!(flux, ctx, CommentReactReq, |req, store, ctx| comment_handlers::handle_react(req, store, ctx));
    route!(flux, ctx, CommentEditReq, |req, store, ctx| comment_handlers::handle_edit(req, store, ctx));
    route!(flux, ctx, CommentDeleteReq, |req, store, ctx| comment_handlers::handle_delete(req, store, ctx));

    // profile + friends
    route!(flux, ctx, ProfileLoadReq, |_req, store, ctx| friend_handlers::handle_load_profile(store, ctx));
    route!(flux, ctx, RespondFriendReq, |req, store, ctx| friend_handlers::handle_respond(req, store, ctx));
    route!(flux, ctx, UsersLoadReq, |_req, store, ctx| friend_handlers::handle_load_users(store, ctx));
    route!(flux, ctx, SendFriendReq, |req, store, ctx| friend_handlers::handle_send(req, store, ctx));
}
