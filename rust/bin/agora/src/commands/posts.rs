//! Feed and post commands.
//!
//! `edit`, `delete` and `react` call the post source directly instead of
//! emitting `feed/*` requests: the target post need not be in the loaded
//! feed.

use anyhow::Result;

use agora_app::request::{CreatePostReq, FeedScrollReq, OpenPostReq};
use agora_app::state::{CommentThreadState, ComposeState, FeedState, PostDetailState};
use agora_client::{Post, PostDraft, PostId, ReactionKind};
use agora_sync::{plan_toggle, ItemSource, ReactionCall, ReactionSource, ScrollEvent, Viewport};

use crate::commands::{cell, check, comments, Shell};

/// A viewport sitting at the bottom of its content.
pub fn bottom() -> ScrollEvent {
    ScrollEvent::Scroll(Viewport::new(0.0, 1.0, 1.0))
}

/// List the feed, scrolling until `pages` pages are loaded or it runs out.
pub async fn feed(shell: &mut Shell, pages: u32) -> Result<()> {
    shell.resume().await?;

    for _ in 1..pages.max(1) {
        let state: FeedState = shell.state(FeedState::PATH)?;
        if !state.has_more {
            break;
        }
        shell.flux.emit(FeedScrollReq::PATH, FeedScrollReq { event: bottom() }).await;
        shell.ensure_signed_in()?;
    }

    let state: FeedState = shell.state(FeedState::PATH)?;
    check(state.error.clone())?;
    shell.print(&state.items, || {
        println!("{:<6} {:<32} {:<14} {:>5}  MINE", "ID", "TITLE", "AUTHOR", "REACT");
        for post in &state.items {
            print_row(post);
        }
        if state.has_more {
            println!("(more available, use --pages)");
        }
    })
}

fn print_row(post: &Post) {
    let author = post.user.as_ref().map(|u| u.username.as_str()).unwrap_or("-");
    let mine = post
        .user_reaction
        .as_ref()
        .and_then(|r| r.kind())
        .map(|k| k.to_string())
        .unwrap_or_default();
    println!(
        "{:<6} {:<32} {:<14} {:>5}  {}",
        post.id,
        cell(&post.title, 32),
        cell(author, 14),
        post.total_reactions(),
        mine
    );
}

fn print_post(post: &Post) {
    println!("#{} {}", post.id, post.title);
    if let Some(user) = &post.user {
        println!("by {}", user.username);
    }
    println!();
    println!("{}", post.description);
    println!();
    let counts: Vec<String> = ReactionKind::ALL
        .iter()
        .filter_map(|k| match post.reaction_count(*k) {
            0 => None,
            n => Some(format!("{} {}", k, n)),
        })
        .collect();
    if !counts.is_empty() {
        println!("reactions: {}", counts.join(", "));
    }
    if let Some(kind) = post.user_reaction.as_ref().and_then(|r| r.kind()) {
        println!("you reacted: {}", kind);
    }
}

pub async fn create(shell: &mut Shell, title: String, description: String) -> Result<()> {
    if title.trim().is_empty() {
        anyhow::bail!("Title cannot be empty.");
    }
    shell.resume().await?;
    shell.flux.emit(CreatePostReq::PATH, CreatePostReq { title, description }).await;
    shell.ensure_signed_in()?;

    let compose: ComposeState = shell.state(ComposeState::PATH)?;
    check(compose.error)?;
    println!("Post created.");
    Ok(())
}

/// Update a post. Fields left out keep their current value.
pub async fn edit(shell: &mut Shell, id: PostId, title: Option<String>, description: Option<String>) -> Result<()> {
    shell.resume().await?;
    let source = shell.ctx.post_source();
    let current = source.fetch_item(&id).await?;
    let draft = PostDraft {
        title: title.unwrap_or(current.title),
        description: description.unwrap_or(current.description),
    };
    source.update_item(&id, &draft).await?;
    println!("Post {} updated.", id);
    Ok(())
}

pub async fn delete(shell: &mut Shell, id: PostId) -> Result<()> {
    shell.resume().await?;
    shell.ctx.post_source().delete_item(&id).await?;
    println!("Post {} deleted.", id);
    Ok(())
}

/// Show a post with the first `pages` pages of its comments.
pub async fn show(shell: &mut Shell, id: PostId, pages: u32) -> Result<()> {
    shell.resume().await?;
    shell.flux.emit(OpenPostReq::PATH, OpenPostReq { post_id: id }).await;
    shell.ensure_signed_in()?;
    comments::scroll(shell, id, pages).await?;

    let detail: PostDetailState = shell.state(&PostDetailState::path(id))?;
    check(detail.error.clone())?;
    let post = detail.post.ok_or_else(|| anyhow::anyhow!("Post not found"))?;
    let thread: CommentThreadState = shell.state(&CommentThreadState::path(id))?;

    let both = serde_json::json!({ "post": post, "comments": thread.items });
    shell.print(&both, || {
        print_post(&post);
        println!();
        comments::print_thread(&thread);
    })
}

/// Toggle a reaction: the same kind again removes it.
pub async fn react(shell: &mut Shell, id: PostId, kind: ReactionKind) -> Result<()> {
    shell.resume().await?;
    let source = shell.ctx.post_source();
    let post = source.fetch_item(&id).await?;

    match plan_toggle(&post, kind) {
        ReactionCall::Add(kind) => source.add_reaction(&id, kind).await?,
        ReactionCall::Remove(reaction) => source.remove_reaction(reaction).await?,
    }

    let post = source.fetch_item(&id).await?;
    shell.print(&post, || print_row(&post))
}
