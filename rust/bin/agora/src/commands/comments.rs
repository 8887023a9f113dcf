//! Comment commands.
//!
//! Mutations go through an opened thread: the thread is scrolled until the
//! target comment is loaded, then the request is emitted against it.

use anyhow::Result;

use agora_app::request::{
    CommentDeleteReq, CommentEditReq, CommentReactReq, CommentScrollReq, CreateCommentReq, OpenPostReq,
};
use agora_app::state::CommentThreadState;
use agora_client::{CommentId, PostId};

use crate::commands::{cell, check, posts, Shell};

/// Scroll the open thread of `post_id` until `pages` pages are loaded.
pub async fn scroll(shell: &Shell, post_id: PostId, pages: u32) -> Result<()> {
    for _ in 1..pages.max(1) {
        let thread = thread(shell, post_id)?;
        if !thread.has_more {
            break;
        }
        shell
            .flux
            .emit(CommentScrollReq::PATH, CommentScrollReq { post_id, event: posts::bottom() })
            .await;
        shell.ensure_signed_in()?;
    }
    Ok(())
}

fn thread(shell: &Shell, post_id: PostId) -> Result<CommentThreadState> {
    shell.state(&CommentThreadState::path(post_id))
}

pub fn print_thread(thread: &CommentThreadState) {
    if thread.items.is_empty() {
        println!("No comments yet.");
        return;
    }
    println!("{:<6} {:<14} {:>5}  {}", "ID", "AUTHOR", "LIKES", "MESSAGE");
    for c in &thread.items {
        let author = c.user.as_ref().map(|u| u.username.as_str()).unwrap_or("-");
        let liked = if c.user_reaction.is_some() { "*" } else { " " };
        println!("{:<6} {:<14} {:>4}{}  {}", c.id, cell(author, 14), c.count, liked, cell(&c.message, 60));
    }
    if thread.has_more {
        println!("(more available, use --pages)");
    }
}

pub async fn list(shell: &mut Shell, post_id: PostId, pages: u32) -> Result<()> {
    shell.resume().await?;
    shell.flux.emit(OpenPostReq::PATH, OpenPostReq { post_id }).await;
    shell.ensure_signed_in()?;
    scroll(shell, post_id, pages).await?;

    let thread = thread(shell, post_id)?;
    check(thread.error.clone())?;
    shell.print(&thread.items, || print_thread(&thread))
}

pub async fn add(shell: &mut Shell, post_id: PostId, message: String) -> Result<()> {
    shell.resume().await?;
    shell.flux.emit(CreateCommentReq::PATH, CreateCommentReq { post_id, message }).await;
    shell.ensure_signed_in()?;

    check(thread(shell, post_id)?.error)?;
    println!("Comment added.");
    Ok(())
}

/// Open the thread and load pages until `comment_id` shows up.
async fn locate(shell: &mut Shell, post_id: PostId, comment_id: CommentId) -> Result<()> {
    shell.resume().await?;
    shell.flux.emit(OpenPostReq::PATH, OpenPostReq { post_id }).await;
    loop {
        shell.ensure_signed_in()?;
        let state = thread(shell, post_id)?;
        check(state.error.clone())?;
        if state.items.iter().any(|c| c.id == comment_id) {
            return Ok(());
        }
        if !state.has_more {
            anyhow::bail!("Comment {} not found under post {}", comment_id, post_id);
        }
        shell
            .flux
            .emit(CommentScrollReq::PATH, CommentScrollReq { post_id, event: posts::bottom() })
            .await;
    }
}

pub async fn edit(shell: &mut Shell, post_id: PostId, comment_id: CommentId, message: String) -> Result<()> {
    locate(shell, post_id, comment_id).await?;
    shell
        .flux
        .emit(CommentEditReq::PATH, CommentEditReq { post_id, comment_id, message })
        .await;
    shell.ensure_signed_in()?;
    check(thread(shell, post_id)?.error)?;
    println!("Comment {} updated.", comment_id);
    Ok(())
}

pub async fn delete(shell: &mut Shell, post_id: PostId, comment_id: CommentId) -> Result<()> {
    locate(shell, post_id, comment_id).await?;
    shell
        .flux
        .emit(CommentDeleteReq::PATH, CommentDeleteReq { post_id, comment_id })
        .await;
    shell.ensure_signed_in()?;
    check(thread(shell, post_id)?.error)?;
    println!("Comment {} deleted.", comment_id);
    Ok(())
}

/// Toggle the like on a comment.
pub async fn react(shell: &mut Shell, post_id: PostId, comment_id: CommentId) -> Result<()> {
    locate(shell, post_id, comment_id).await?;
    shell
        .flux
        .emit(CommentReactReq::PATH, CommentReactReq { post_id, comment_id })
        .await;
    shell.ensure_signed_in()?;

    let state = thread(shell, post_id)?;
    check(state.error)?;
    match state.items.iter().find(|c| c.id == comment_id) {
        Some(c) if c.user_reaction.is_some() => println!("Liked comment {}.", comment_id),
        Some(_) => println!("Removed like from comment {}.", comment_id),
        None => println!("Comment {} is gone.", comment_id),
    }
    Ok(())
}
