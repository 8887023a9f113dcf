//! End-to-end flows: Flux handlers against an in-process axum API.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::routing::{get, patch, post};
use axum::{Json, Router};
use base64::Engine;
use serde_json::{json, Value};

use agora_app::request::*;
use agora_app::state::*;
use agora_app::{register_handlers, AppContext};
use agora_client::*;
use agora_flux::Flux;
use agora_sync::{ScrollEvent, Viewport};

// ── Mock API ────────────────────────────────────────────────────────

#[derive(Default)]
struct Db {
    posts: Vec<(u64, String)>,
    /// post id -> (reaction id, kind)
    reactions: HashMap<u64, (u64, String)>,
    comments: Vec<(u64, u64, String)>,
    /// comment id -> reaction id
    likes: HashMap<u64, u64>,
    friends: Vec<(u64, String)>,
    requests: Vec<(u64, String)>,
    revoked: bool,
    log: Vec<String>,
}

type Shared = Arc<Mutex<Db>>;

fn jwt(exp: i64) -> String {
    let enc = base64::engine::general_purpose::URL_SAFE_NO_PAD;
    format!(
        "{}.{}.{}",
        enc.encode(r#"{"alg":"HS256"}"#),
        enc.encode(json!({"exp": exp, "username": "ana"}).to_string()),
        enc.encode("sig"),
    )
}

fn fresh_token() -> String {
    jwt(chrono::Utc::now().timestamp() + 3600)
}

fn check(db: &mut Db, headers: &HeaderMap, call: String) -> Result<(), StatusCode> {
    let signed = headers.get("authorization").is_some();
    if !signed || db.revoked {
        return Err(StatusCode::UNAUTHORIZED);
    }
    db.log.push(call);
    Ok(())
}

fn post_json(db: &Db, id: u64, title: &str) -> Value {
    let reaction = db.reactions.get(&id).map(|(rid, kind)| json!({"id": rid, "reactionName": kind}));
    let count: Vec<Value> = db
        .reactions
        .get(&id)
        .map(|(_, kind)| vec![json!({"reactionName": kind, "count": 1})])
        .unwrap_or_default();
    json!({
        "id": id,
        "title": title,
        "description": format!("about {}", id),
        "user": {"id": 1, "username": "ana"},
        "UserReaction": reaction,
        "count": count,
    })
}

fn page_of<T: Clone>(all: &[T], q: &HashMap<String, String>) -> (Vec<T>, bool) {
    let page: usize = q.get("page").and_then(|p| p.parse().ok()).unwrap_or(1);
    let limit: usize = q.get("limit").and_then(|l| l.parse().ok()).unwrap_or(10);
    let start = (page - 1) * limit;
    let items = all.iter().skip(start).take(limit).cloned().collect();
    (items, start + limit < all.len())
}

async fn login(Json(body): Json<Value>) -> Result<Json<Value>, StatusCode> {
    if body["password"] == "secret" {
        Ok(Json(json!({"data": {"token": fresh_token()}})))
    } else {
        Err(StatusCode::UNAUTHORIZED)
    }
}

async fn profile(State(db): State<Shared>, headers: HeaderMap) -> Result<Json<Value>, StatusCode> {
    check(&mut db.lock().unwrap(), &headers, "GET /profile".into())?;
    Ok(Json(json!({"data": {"id": 1, "username": "ana", "email": "ana@example.com"}})))
}

async fn list_posts(
    State(db): State<Shared>,
    headers: HeaderMap,
    Query(q): Query<HashMap<String, String>>,
) -> Result<Json<Value>, StatusCode> {
    let mut db = db.lock().unwrap();
    check(&mut db, &headers, format!("GET /post page={}", q["page"]))?;
    let (items, has_next) = page_of(&db.posts, &q);
    let data: Vec<Value> = items.iter().map(|(id, title)| post_json(&db, *id, title)).collect();
    Ok(Json(json!({"data": data, "pagination": {"hasNextPage": has_next}})))
}

async fn create_post(
    State(db): State<Shared>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Result<StatusCode, StatusCode> {
    let mut db = db.lock().unwrap();
    check(&mut db, &headers, "POST /post".into())?;
    let id = db.posts.iter().map(|(id, _)| *id).max().unwrap_or(0) + 1;
    let title = body["title"].as_str().unwrap_or("").to_string();
    db.posts.insert(0, (id, title));
    Ok(StatusCode::CREATED)
}

async fn get_post(State(db): State<Shared>, headers: HeaderMap, Path(id): Path<u64>) -> Result<Json<Value>, StatusCode> {
    let mut db = db.lock().unwrap();
    check(&mut db, &headers, format!("GET /post/{}", id))?;
    let title = db.posts.iter().find(|(pid, _)| *pid == id).map(|(_, t)| t.clone());
    match title {
        Some(title) => Ok(Json(json!({"data": post_json(&db, id, &title)}))),
        None => Err(StatusCode::NOT_FOUND),
    }
}

async fn update_post(
    State(db): State<Shared>,
    headers: HeaderMap,
    Path(id): Path<u64>,
    Json(body): Json<Value>,
) -> Result<StatusCode, StatusCode> {
    let mut db = db.lock().unwrap();
    check(&mut db, &headers, format!("PUT /post/{}", id))?;
    let title = body["title"].as_str().unwrap_or("").to_string();
    match db.posts.iter_mut().find(|(pid, _)| *pid == id) {
        Some(p) => {
            p.1 = title;
            Ok(StatusCode::OK)
        }
        None => Err(StatusCode::NOT_FOUND),
    }
}

async fn delete_post(State(db): State<Shared>, headers: HeaderMap, Path(id): Path<u64>) -> Result<StatusCode, StatusCode> {
    let mut db = db.lock().unwrap();
    check(&mut db, &headers, format!("DELETE /post/{}", id))?;
    db.posts.retain(|(pid, _)| *pid != id);
    Ok(StatusCode::NO_CONTENT)
}

async fn add_reaction(
    State(db): State<Shared>,
    headers: HeaderMap,
    Path(id): Path<u64>,
    Json(body): Json<Value>,
) -> Result<StatusCode, StatusCode> {
    let mut db = db.lock().unwrap();
    let kind = body["reactionName"].as_str().unwrap_or("").to_string();
    check(&mut db, &headers, format!("POST /reaction/{} {}", id, kind))?;
    db.reactions.insert(id, (1000 + id, kind));
    Ok(StatusCode::CREATED)
}

async fn remove_reaction(
    State(db): State<Shared>,
    headers: HeaderMap,
    Path(rid): Path<u64>,
) -> Result<StatusCode, StatusCode> {
    let mut db = db.lock().unwrap();
    check(&mut db, &headers, format!("DELETE /reaction/{}", rid))?;
    db.reactions.retain(|_, (r, _)| *r != rid);
    Ok(StatusCode::NO_CONTENT)
}

fn comment_json(db: &Db, id: u64, post_id: u64, message: &str) -> Value {
    let like = db.likes.get(&id).map(|rid| json!({"id": rid}));
    json!({
        "id": id,
        "postId": post_id,
        "message": message,
        "user": {"id": 1, "username": "ana"},
        "UserReactionOnComment": like,
        "count": if like.is_some() { 1 } else { 0 },
    })
}

async fn list_comments(
    State(db): State<Shared>,
    headers: HeaderMap,
    Path(post_id): Path<u64>,
    Query(q): Query<HashMap<String, String>>,
) -> Result<Json<Value>, StatusCode> {
    let mut db = db.lock().unwrap();
    check(&mut db, &headers, format!("GET /post/{}/comment page={}", post_id, q["page"]))?;
    let mine: Vec<(u64, u64, String)> = db.comments.iter().filter(|c| c.1 == post_id).cloned().collect();
    let (items, has_next) = page_of(&mine, &q);
    let data: Vec<Value> = items
        .iter()
        .map(|(id, post_id, message)| comment_json(&db, *id, *post_id, message))
        .collect();
    Ok(Json(json!({"data": {"data": data, "pagination": {"hasNextPage": has_next}}})))
}

async fn create_comment(
    State(db): State<Shared>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Result<StatusCode, StatusCode> {
    let mut db = db.lock().unwrap();
    check(&mut db, &headers, "POST /comment".into())?;
    let id = db.comments.iter().map(|c| c.0).max().unwrap_or(0) + 1;
    let post_id = body["postId"].as_u64().unwrap_or(0);
    let message = body["message"].as_str().unwrap_or("").to_string();
    db.comments.insert(0, (id, post_id, message));
    Ok(StatusCode::CREATED)
}

async fn get_comment(State(db): State<Shared>, headers: HeaderMap, Path(id): Path<u64>) -> Result<Json<Value>, StatusCode> {
    let mut db = db.lock().unwrap();
    check(&mut db, &headers, format!("GET /comment/{}", id))?;
    let found = db.comments.iter().find(|c| c.0 == id).cloned();
    match found {
        Some((id, post_id, message)) => Ok(Json(json!({"data": comment_json(&db, id, post_id, &message)}))),
        None => Err(StatusCode::NOT_FOUND),
    }
}

async fn update_comment(
    State(db): State<Shared>,
    headers: HeaderMap,
    Path(id): Path<u64>,
    Json(body): Json<Value>,
) -> Result<StatusCode, StatusCode> {
    let mut db = db.lock().unwrap();
    check(&mut db, &headers, format!("PUT /comment/{}", id))?;
    let message = body["message"].as_str().unwrap_or("").to_string();
    match db.comments.iter_mut().find(|c| c.0 == id) {
        Some(c) => {
            c.2 = message;
            Ok(StatusCode::OK)
        }
        None => Err(StatusCode::NOT_FOUND),
    }
}

async fn delete_comment(State(db): State<Shared>, headers: HeaderMap, Path(id): Path<u64>) -> Result<StatusCode, StatusCode> {
    let mut db = db.lock().unwrap();
    check(&mut db, &headers, format!("DELETE /comment/{}", id))?;
    db.comments.retain(|c| c.0 != id);
    Ok(StatusCode::NO_CONTENT)
}

async fn like_comment(State(db): State<Shared>, headers: HeaderMap, Path(id): Path<u64>) -> Result<StatusCode, StatusCode> {
    let mut db = db.lock().unwrap();
    check(&mut db, &headers, format!("POST /comment-reaction/{}", id))?;
    db.likes.insert(id, 5000 + id);
    Ok(StatusCode::CREATED)
}

async fn unlike_comment(State(db): State<Shared>, headers: HeaderMap, Path(rid): Path<u64>) -> Result<StatusCode, StatusCode> {
    let mut db = db.lock().unwrap();
    check(&mut db, &headers, format!("DELETE /comment-reaction/{}", rid))?;
    db.likes.retain(|_, r| *r != rid);
    Ok(StatusCode::NO_CONTENT)
}

async fn friends(State(db): State<Shared>, headers: HeaderMap) -> Result<Json<Value>, StatusCode> {
    let mut db = db.lock().unwrap();
    check(&mut db, &headers, "GET /friends".into())?;
    let data: Vec<Value> = db.friends.iter().map(|(id, name)| json!({"id": id, "username": name})).collect();
    Ok(Json(json!({"data": data})))
}

async fn friend_requests(State(db): State<Shared>, headers: HeaderMap) -> Result<Json<Value>, StatusCode> {
    let mut db = db.lock().unwrap();
    check(&mut db, &headers, "GET /friend-request".into())?;
    let data: Vec<Value> = db
        .requests
        .iter()
        .map(|(id, name)| json!({"id": id, "username": name, "status": "pending"}))
        .collect();
    Ok(Json(json!({"data": data})))
}

async fn answer_request(
    State(db): State<Shared>,
    headers: HeaderMap,
    Path(id): Path<u64>,
    Json(body): Json<Value>,
) -> Result<StatusCode, StatusCode> {
    let mut db = db.lock().unwrap();
    let status = body["status"].as_str().unwrap_or("").to_string();
    check(&mut db, &headers, format!("PATCH /friend-request/{} {}", id, status))?;
    let Some(pos) = db.requests.iter().position(|(rid, _)| *rid == id) else {
        return Err(StatusCode::NOT_FOUND);
    };
    let (_, name) = db.requests.remove(pos);
    if status == "accepted" {
        db.friends.push((id + 100, name));
    }
    Ok(StatusCode::OK)
}

async fn list_users(State(db): State<Shared>, headers: HeaderMap) -> Result<Json<Value>, StatusCode> {
    check(&mut db.lock().unwrap(), &headers, "GET /list-users".into())?;
    Ok(Json(json!([{"id": 2, "username": "bo"}, {"id": 3, "username": "cy"}])))
}

async fn send_request(State(db): State<Shared>, headers: HeaderMap, Path(id): Path<u64>) -> Result<StatusCode, StatusCode> {
    check(&mut db.lock().unwrap(), &headers, format!("POST /send-friend-request/{}", id))?;
    if id == 3 {
        return Err(StatusCode::CONFLICT);
    }
    Ok(StatusCode::CREATED)
}

fn api(db: Shared) -> Router {
    Router::new()
        .route("/login", post(login))
        .route("/signup", post(login))
        .route("/profile", get(profile))
        .route("/post", get(list_posts).post(create_post))
        .route("/post/{id}", get(get_post).put(update_post).delete(delete_post))
        .route("/post/{id}/comment", get(list_comments))
        .route("/reaction/{id}", post(add_reaction).delete(remove_reaction))
        .route("/comment", post(create_comment))
        .route("/comment/{id}", get(get_comment).put(update_comment).delete(delete_comment))
        .route("/comment-reaction/{id}", post(like_comment).delete(unlike_comment))
        .route("/friends", get(friends))
        .route("/friend-request", get(friend_requests))
        .route("/friend-request/{id}", patch(answer_request))
        .route("/list-users", get(list_users))
        .route("/send-friend-request/{id}", post(send_request))
        .with_state(db)
}

// ── Harness ─────────────────────────────────────────────────────────

struct Harness {
    flux: Flux,
    ctx: Arc<AppContext>,
    db: Shared,
}

impl Harness {
    async fn start() -> Self {
        let mut seed = Db::default();
        // Newest first, 25 posts.
        seed.posts = (1..=25).rev().map(|id| (id, format!("post {}", id))).collect();
        seed.comments = vec![(1, 25, "first!".into())];
        // Post 24 has a second page of comments.
        seed.comments.extend((2..=13).rev().map(|id| (id, 24, format!("comment {}", id))));
        seed.friends = vec![(50, "dee".into())];
        seed.requests = vec![(7, "bo".into()), (8, "cy".into())];
        let db: Shared = Arc::new(Mutex::new(seed));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let app = api(db.clone());
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        let flux = Flux::new();
        let ctx = Arc::new(AppContext::new(format!("http://{}", addr)));
        register_handlers(&flux, ctx.clone());
        Self { flux, ctx, db }
    }

    async fn logged_in() -> Self {
        let h = Self::start().await;
        h.flux
            .emit(LoginReq::PATH, LoginReq { username: "ana".into(), password: "secret".into() })
            .await;
        h
    }

    fn auth(&self) -> AuthState {
        self.flux.get_as(AuthState::PATH).unwrap()
    }

    fn route(&self) -> String {
        self.flux.get_as::<AppRoute>(AppRoute::PATH).unwrap().0
    }

    fn feed(&self) -> FeedState {
        self.flux.get_as(FeedState::PATH).unwrap()
    }

    fn feed_ids(&self) -> Vec<u64> {
        self.feed().items.iter().map(|p| p.id.0).collect()
    }

    fn log(&self) -> Vec<String> {
        self.db.lock().unwrap().log.clone()
    }

    fn clear_log(&self) {
        self.db.lock().unwrap().log.clear();
    }
}

fn at_bottom() -> ScrollEvent {
    ScrollEvent::Scroll(Viewport::new(1400.0, 600.0, 2000.0))
}

// ── Auth ────────────────────────────────────────────────────────────

#[tokio::test]
async fn login_authenticates_routes_home_and_loads_feed() {
    let h = Harness::logged_in().await;

    let auth = h.auth();
    assert_eq!(auth.phase, AuthPhase::Authenticated);
    assert_eq!(auth.user.map(|u| u.username), Some("ana".to_string()));
    assert_eq!(h.route(), "/");

    let feed = h.feed();
    assert_eq!(feed.items.len(), 10);
    assert_eq!(feed.items[0].id, PostId(25));
    assert!(feed.has_more);
    assert!(!feed.loading && !feed.reloading);
    assert!(h.ctx.session.is_active().await);
}

#[tokio::test]
async fn bad_password_stays_signed_out_with_error() {
    let h = Harness::start().await;
    h.flux
        .emit(LoginReq::PATH, LoginReq { username: "ana".into(), password: "nope".into() })
        .await;

    let auth = h.auth();
    assert_eq!(auth.phase, AuthPhase::Unauthenticated);
    assert_eq!(auth.error.as_deref(), Some("Invalid username or password"));
    assert!(!auth.busy);
    assert!(!h.flux.contains(AppRoute::PATH));
}

#[tokio::test]
async fn signup_signs_in() {
    let h = Harness::start().await;
    let form = SignupForm { username: "ana".into(), password: "secret".into(), ..Default::default() };
    h.flux.emit(SignupReq::PATH, SignupReq { form }).await;

    assert!(h.auth().is_authenticated());
    assert_eq!(h.route(), "/");
}

#[tokio::test]
async fn initialize_with_expired_token_makes_no_request() {
    let h = Harness::start().await;
    let stale = jwt(chrono::Utc::now().timestamp() - 60);
    h.flux.emit(InitializeReq::PATH, InitializeReq { stored_token: Some(stale) }).await;

    assert_eq!(h.auth().phase, AuthPhase::Unauthenticated);
    assert_eq!(h.route(), "/login");
    assert!(h.log().is_empty());
    assert!(!h.ctx.session.is_active().await);
}

#[tokio::test]
async fn initialize_with_valid_token_resumes_session() {
    let h = Harness::start().await;
    h.flux
        .emit(InitializeReq::PATH, InitializeReq { stored_token: Some(fresh_token()) })
        .await;

    assert!(h.auth().is_authenticated());
    assert_eq!(h.route(), "/");
    assert_eq!(h.feed().items.len(), 10);
}

#[tokio::test]
async fn unauthorized_response_logs_out() {
    let h = Harness::logged_in().await;
    h.flux.emit(OpenPostReq::PATH, OpenPostReq { post_id: PostId(25) }).await;
    h.db.lock().unwrap().revoked = true;

    h.flux.emit(FeedLoadReq::PATH, FeedLoadReq { reset: true }).await;

    assert_eq!(h.auth().phase, AuthPhase::Unauthenticated);
    assert_eq!(h.route(), "/login");
    assert!(!h.flux.contains(FeedState::PATH));
    assert!(!h.flux.contains(&CommentThreadState::path(PostId(25))));
    assert!(h.ctx.feed.is_empty());
    assert!(h.ctx.open_threads().is_empty());
    assert!(!h.ctx.session.is_active().await);
}

#[tokio::test]
async fn logout_clears_session_and_routes_to_login() {
    let h = Harness::logged_in().await;
    h.flux.emit(LogoutReq::PATH, LogoutReq).await;

    assert_eq!(h.auth(), AuthState::unauthenticated());
    assert_eq!(h.route(), "/login");
    assert!(!h.flux.contains(FeedState::PATH));

    // Protected pages bounce back to login.
    h.flux.emit(NavigateReq::PATH, NavigateReq { route: "/profile".into() }).await;
    assert_eq!(h.route(), "/login");
    h.flux.emit(NavigateReq::PATH, NavigateReq { route: "/signup".into() }).await;
    assert_eq!(h.route(), "/signup");
}

// ── Feed ────────────────────────────────────────────────────────────

#[tokio::test]
async fn scroll_to_bottom_appends_next_page() {
    let h = Harness::logged_in().await;
    h.clear_log();

    h.flux.emit(FeedScrollReq::PATH, FeedScrollReq { event: at_bottom() }).await;
    assert_eq!(h.feed_ids(), (6..=25).rev().collect::<Vec<u64>>());

    // Far from the bottom: nothing happens.
    let far = ScrollEvent::Scroll(Viewport::new(0.0, 600.0, 4000.0));
    h.flux.emit(FeedScrollReq::PATH, FeedScrollReq { event: far }).await;

    h.flux.emit(FeedScrollReq::PATH, FeedScrollReq { event: at_bottom() }).await;
    let feed = h.feed();
    assert_eq!(feed.items.len(), 25);
    assert!(!feed.has_more);

    // Exhausted: no further requests.
    h.flux.emit(FeedScrollReq::PATH, FeedScrollReq { event: at_bottom() }).await;
    assert_eq!(h.log(), vec!["GET /post page=2", "GET /post page=3"]);
}

#[tokio::test]
async fn react_refetches_only_that_post() {
    let h = Harness::logged_in().await;
    h.clear_log();
    let before = h.feed_ids();

    h.flux
        .emit(FeedReactReq::PATH, FeedReactReq { post_id: PostId(23), kind: ReactionKind::Love })
        .await;

    let feed = h.feed();
    assert_eq!(h.feed_ids(), before);
    let post = &feed.items[2];
    assert_eq!(post.user_reaction.as_ref().and_then(|r| r.kind()), Some(ReactionKind::Love));
    assert_eq!(post.reaction_count(ReactionKind::Love), 1);
    assert!(feed.updating.is_empty());
    assert_eq!(h.log(), vec!["POST /reaction/23 love", "GET /post/23"]);

    // Same kind again removes it by reaction id.
    h.flux
        .emit(FeedReactReq::PATH, FeedReactReq { post_id: PostId(23), kind: ReactionKind::Love })
        .await;
    assert_eq!(h.feed().items[2].user_reaction, None);
    assert_eq!(h.log()[2], "DELETE /reaction/1023");
}

#[tokio::test]
async fn edit_save_updates_in_place_and_closes_editor() {
    let h = Harness::logged_in().await;
    h.flux.emit(FeedEditBeginReq::PATH, FeedEditBeginReq { post_id: PostId(24) }).await;
    assert_eq!(h.feed().editing, Some(PostId(24)));

    h.flux
        .emit(
            FeedEditSaveReq::PATH,
            FeedEditSaveReq { post_id: PostId(24), title: "renamed".into(), description: "d".into() },
        )
        .await;

    let feed = h.feed();
    assert_eq!(feed.editing, None);
    assert_eq!(feed.items[1].title, "renamed");
    assert_eq!(feed.items.len(), 10);
}

#[tokio::test]
async fn edit_cancel_closes_editor() {
    let h = Harness::logged_in().await;
    h.flux.emit(FeedEditBeginReq::PATH, FeedEditBeginReq { post_id: PostId(24) }).await;
    h.flux.emit(FeedEditCancelReq::PATH, FeedEditCancelReq).await;
    assert_eq!(h.feed().editing, None);
}

#[tokio::test]
async fn delete_drops_post_without_refetch() {
    let h = Harness::logged_in().await;
    h.clear_log();

    h.flux.emit(FeedDeleteReq::PATH, FeedDeleteReq { post_id: PostId(20) }).await;

    assert!(!h.feed_ids().contains(&20));
    assert_eq!(h.feed_ids().len(), 9);
    assert_eq!(h.log(), vec!["DELETE /post/20"]);
}

#[tokio::test]
async fn create_post_reloads_feed_and_routes_home() {
    let h = Harness::logged_in().await;
    h.flux.emit(NavigateReq::PATH, NavigateReq { route: AppRoute::COMPOSE.into() }).await;
    assert_eq!(h.route(), "/posts/create");

    h.flux
        .emit(CreatePostReq::PATH, CreatePostReq { title: "hello".into(), description: "world".into() })
        .await;

    assert_eq!(h.route(), "/");
    let feed = h.feed();
    assert_eq!(feed.items[0].id, PostId(26));
    assert_eq!(feed.items[0].title, "hello");
    assert_eq!(h.flux.get_as::<ComposeState>(ComposeState::PATH), Some(ComposeState::default()));
}

#[tokio::test]
async fn compose_fields_update_form() {
    let h = Harness::start().await;
    h.flux
        .emit(ComposeUpdateReq::PATH, ComposeUpdateReq { field: ComposeField::Title, value: "t".into() })
        .await;
    h.flux
        .emit(
            ComposeUpdateReq::PATH,
            ComposeUpdateReq { field: ComposeField::Description, value: "d".into() },
        )
        .await;

    let compose: ComposeState = h.flux.get_as(ComposeState::PATH).unwrap();
    assert_eq!((compose.title.as_str(), compose.description.as_str()), ("t", "d"));
}

// ── Post page ───────────────────────────────────────────────────────

#[tokio::test]
async fn open_post_loads_detail_and_comments() {
    let h = Harness::logged_in().await;
    h.flux.emit(OpenPostReq::PATH, OpenPostReq { post_id: PostId(25) }).await;

    assert_eq!(h.route(), "/posts/25");
    let detail: PostDetailState = h.flux.get_as(&PostDetailState::path(PostId(25))).unwrap();
    assert_eq!(detail.post.map(|p| p.title), Some("post 25".to_string()));
    assert!(!detail.loading);

    let thread: CommentThreadState = h.flux.get_as(&CommentThreadState::path(PostId(25))).unwrap();
    assert_eq!(thread.items.len(), 1);
    assert_eq!(thread.items[0].message, "first!");
}

#[tokio::test]
async fn open_missing_post_reports_not_found() {
    let h = Harness::logged_in().await;
    h.flux.emit(OpenPostReq::PATH, OpenPostReq { post_id: PostId(999) }).await;

    let detail: PostDetailState = h.flux.get_as(&PostDetailState::path(PostId(999))).unwrap();
    assert_eq!(detail.error.as_deref(), Some("Post not found"));
    assert!(detail.post.is_none());
}

#[tokio::test]
async fn blank_comment_is_rejected_locally() {
    let h = Harness::logged_in().await;
    h.flux.emit(OpenPostReq::PATH, OpenPostReq { post_id: PostId(25) }).await;
    h.clear_log();

    h.flux
        .emit(CreateCommentReq::PATH, CreateCommentReq { post_id: PostId(25), message: "   ".into() })
        .await;

    let thread: CommentThreadState = h.flux.get_as(&CommentThreadState::path(PostId(25))).unwrap();
    assert_eq!(thread.error.as_deref(), Some("Comment cannot be empty"));
    assert!(h.log().is_empty());
}

#[tokio::test]
async fn new_comment_reloads_thread_and_post() {
    let h = Harness::logged_in().await;
    h.flux.emit(OpenPostReq::PATH, OpenPostReq { post_id: PostId(25) }).await;
    h.clear_log();

    h.flux
        .emit(CreateCommentReq::PATH, CreateCommentReq { post_id: PostId(25), message: "nice".into() })
        .await;

    let thread: CommentThreadState = h.flux.get_as(&CommentThreadState::path(PostId(25))).unwrap();
    let messages: Vec<&str> = thread.items.iter().map(|c| c.message.as_str()).collect();
    assert_eq!(messages, vec!["nice", "first!"]);
    assert!(thread.draft.is_empty());
    assert!(!thread.posting);
    assert_eq!(
        h.log(),
        vec!["POST /comment", "GET /post/25/comment page=1", "GET /post/25"]
    );
}

#[tokio::test]
async fn close_post_drops_thread_state() {
    let h = Harness::logged_in().await;
    h.flux.emit(OpenPostReq::PATH, OpenPostReq { post_id: PostId(25) }).await;
    h.flux.emit(ClosePostReq::PATH, ClosePostReq { post_id: PostId(25) }).await;

    assert!(h.ctx.thread(PostId(25)).is_none());
    assert!(!h.flux.contains(&CommentThreadState::path(PostId(25))));
    assert!(!h.flux.contains(&PostDetailState::path(PostId(25))));
}

#[tokio::test]
async fn comment_posted_while_closing_leaves_no_thread_state() {
    let h = Harness::logged_in().await;
    h.flux.emit(OpenPostReq::PATH, OpenPostReq { post_id: PostId(25) }).await;
    h.clear_log();

    tokio::join!(
        h.flux
            .emit(CreateCommentReq::PATH, CreateCommentReq { post_id: PostId(25), message: "nice".into() }),
        async {
            tokio::task::yield_now().await;
            h.flux.emit(ClosePostReq::PATH, ClosePostReq { post_id: PostId(25) }).await;
        },
    );

    assert!(h.ctx.thread(PostId(25)).is_none());
    assert!(!h.flux.contains(&CommentThreadState::path(PostId(25))));
    assert!(!h.flux.contains(&PostDetailState::path(PostId(25))));
    assert_eq!(h.log(), vec!["POST /comment"]);
}

#[tokio::test]
async fn post_closed_while_opening_publishes_nothing() {
    let h = Harness::logged_in().await;
    h.clear_log();

    tokio::join!(
        h.flux.emit(OpenPostReq::PATH, OpenPostReq { post_id: PostId(25) }),
        async {
            tokio::task::yield_now().await;
            h.flux.emit(ClosePostReq::PATH, ClosePostReq { post_id: PostId(25) }).await;
        },
    );

    assert!(h.ctx.thread(PostId(25)).is_none());
    assert!(!h.flux.contains(&CommentThreadState::path(PostId(25))));
    assert!(!h.flux.contains(&PostDetailState::path(PostId(25))));
    assert_eq!(h.log(), vec!["GET /post/25"]);
}

// ── Comments ────────────────────────────────────────────────────────

fn thread_of(h: &Harness, post_id: u64) -> CommentThreadState {
    h.flux.get_as(&CommentThreadState::path(PostId(post_id))).unwrap()
}

#[tokio::test]
async fn comment_like_toggles_on_and_off() {
    let h = Harness::logged_in().await;
    h.flux.emit(OpenPostReq::PATH, OpenPostReq { post_id: PostId(25) }).await;
    h.clear_log();

    let like = CommentReactReq { post_id: PostId(25), comment_id: CommentId(1) };
    h.flux.emit(CommentReactReq::PATH, like.clone()).await;

    // Served under the capitalized `UserReactionOnComment` key.
    let thread = thread_of(&h, 25);
    let comment = &thread.items[0];
    assert_eq!(comment.user_reaction.as_ref().map(|r| r.id), Some(ReactionId(5001)));
    assert_eq!(comment.user_reaction.as_ref().and_then(|r| r.kind()), Some(ReactionKind::Like));
    assert_eq!(comment.count, 1);
    assert!(thread.updating.is_empty());

    h.flux.emit(CommentReactReq::PATH, like).await;
    let thread = thread_of(&h, 25);
    assert_eq!(thread.items[0].user_reaction, None);
    assert_eq!(thread.items[0].count, 0);
    assert_eq!(
        h.log(),
        vec![
            "POST /comment-reaction/1",
            "GET /comment/1",
            "DELETE /comment-reaction/5001",
            "GET /comment/1",
        ]
    );
}

#[tokio::test]
async fn comment_edit_refetches_in_place() {
    let h = Harness::logged_in().await;
    h.flux.emit(OpenPostReq::PATH, OpenPostReq { post_id: PostId(24) }).await;
    h.clear_log();

    h.flux
        .emit(
            CommentEditReq::PATH,
            CommentEditReq { post_id: PostId(24), comment_id: CommentId(12), message: "edited".into() },
        )
        .await;

    let thread = thread_of(&h, 24);
    let ids: Vec<u64> = thread.items.iter().map(|c| c.id.0).collect();
    assert_eq!(ids, (4..=13).rev().collect::<Vec<u64>>());
    assert_eq!(thread.items[1].message, "edited");
    assert!(thread.error.is_none());
    assert_eq!(h.log(), vec!["PUT /comment/12", "GET /comment/12"]);

    // Blank edits never reach the server.
    h.clear_log();
    h.flux
        .emit(
            CommentEditReq::PATH,
            CommentEditReq { post_id: PostId(24), comment_id: CommentId(12), message: " ".into() },
        )
        .await;
    let thread = thread_of(&h, 24);
    assert_eq!(thread.error.as_deref(), Some("Comment cannot be empty"));
    assert_eq!(thread.items[1].message, "edited");
    assert!(h.log().is_empty());
}

#[tokio::test]
async fn comment_delete_drops_it_without_refetch() {
    let h = Harness::logged_in().await;
    h.flux.emit(OpenPostReq::PATH, OpenPostReq { post_id: PostId(24) }).await;
    h.clear_log();

    h.flux
        .emit(CommentDeleteReq::PATH, CommentDeleteReq { post_id: PostId(24), comment_id: CommentId(10) })
        .await;

    let thread = thread_of(&h, 24);
    assert_eq!(thread.items.len(), 9);
    assert!(!thread.items.iter().any(|c| c.id == CommentId(10)));
    assert!(thread.updating.is_empty());
    assert_eq!(h.log(), vec!["DELETE /comment/10"]);
}

#[tokio::test]
async fn comment_scroll_loads_next_page() {
    let h = Harness::logged_in().await;
    h.flux.emit(OpenPostReq::PATH, OpenPostReq { post_id: PostId(24) }).await;
    let thread = thread_of(&h, 24);
    assert_eq!(thread.items.len(), 10);
    assert!(thread.has_more);
    h.clear_log();

    let scroll = CommentScrollReq { post_id: PostId(24), event: at_bottom() };
    h.flux.emit(CommentScrollReq::PATH, scroll.clone()).await;

    let thread = thread_of(&h, 24);
    let ids: Vec<u64> = thread.items.iter().map(|c| c.id.0).collect();
    assert_eq!(ids, (2..=13).rev().collect::<Vec<u64>>());
    assert!(!thread.has_more);
    assert!(!thread.loading);

    // Exhausted: no further requests.
    h.flux.emit(CommentScrollReq::PATH, scroll).await;
    assert_eq!(h.log(), vec!["GET /post/24/comment page=2"]);
}

// ── Profile & friends ───────────────────────────────────────────────

#[tokio::test]
async fn profile_loads_friends_and_requests() {
    let h = Harness::logged_in().await;
    h.flux.emit(ProfileLoadReq::PATH, ProfileLoadReq).await;

    let profile: ProfileState = h.flux.get_as(ProfileState::PATH).unwrap();
    assert_eq!(profile.profile.and_then(|p| p.email), Some("ana@example.com".to_string()));
    assert_eq!(profile.friends.len(), 1);
    assert_eq!(profile.requests.len(), 2);
    assert!(!profile.loading);
    assert!(profile.error.is_none());
}

#[tokio::test]
async fn accepting_request_refreshes_friends_and_requests() {
    let h = Harness::logged_in().await;
    h.flux.emit(ProfileLoadReq::PATH, ProfileLoadReq).await;

    h.flux
        .emit(
            RespondFriendReq::PATH,
            RespondFriendReq { request_id: FriendRequestId(7), status: FriendRequestStatus::Accepted },
        )
        .await;

    let profile: ProfileState = h.flux.get_as(ProfileState::PATH).unwrap();
    let friends: Vec<&str> = profile.friends.iter().map(|f| f.username.as_str()).collect();
    assert_eq!(friends, vec!["dee", "bo"]);
    assert_eq!(profile.requests.iter().map(|r| r.id).collect::<Vec<_>>(), vec![FriendRequestId(8)]);
    assert!(profile.pending.is_empty());
    assert!(h.log().contains(&"PATCH /friend-request/7 accepted".to_string()));
}

#[tokio::test]
async fn user_directory_and_friend_requests() {
    let h = Harness::logged_in().await;
    h.flux.emit(UsersLoadReq::PATH, UsersLoadReq).await;

    let users: UserDirectoryState = h.flux.get_as(UserDirectoryState::PATH).unwrap();
    assert_eq!(users.users.len(), 2);
    assert!(!users.loading);

    h.flux.emit(SendFriendReq::PATH, SendFriendReq { user_id: UserId(2) }).await;
    let users: UserDirectoryState = h.flux.get_as(UserDirectoryState::PATH).unwrap();
    assert_eq!(users.notice.as_deref(), Some("Friend request sent!"));
    assert!(users.sending.is_empty());

    h.flux.emit(SendFriendReq::PATH, SendFriendReq { user_id: UserId(3) }).await;
    let users: UserDirectoryState = h.flux.get_as(UserDirectoryState::PATH).unwrap();
    assert_eq!(users.notice.as_deref(), Some("Failed to send friend request"));
}
