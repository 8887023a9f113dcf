//! Profile, friends and user directory commands.

use anyhow::Result;

use agora_app::request::{ProfileLoadReq, RespondFriendReq, SendFriendReq, UsersLoadReq};
use agora_app::state::{ProfileState, UserDirectoryState};
use agora_client::{FriendRequestId, FriendRequestStatus, UserId};

use crate::commands::{check, Shell};

async fn load_profile(shell: &mut Shell) -> Result<ProfileState> {
    shell.flux.emit(ProfileLoadReq::PATH, ProfileLoadReq).await;
    shell.ensure_signed_in()?;
    let profile: ProfileState = shell.state(ProfileState::PATH)?;
    check(profile.error.clone())?;
    Ok(profile)
}

/// Friends and incoming requests.
pub async fn list(shell: &mut Shell) -> Result<()> {
    shell.resume().await?;
    let profile = load_profile(shell).await?;

    shell.print(&profile, || {
        println!("Friends ({}):", profile.friends.len());
        for f in &profile.friends {
            println!("  {:<6} {}", f.id, f.username);
        }
        println!("Requests ({}):", profile.requests.len());
        for r in &profile.requests {
            println!("  {:<6} {}", r.id, r.username);
        }
    })
}

pub async fn respond(shell: &mut Shell, request_id: FriendRequestId, status: FriendRequestStatus) -> Result<()> {
    shell.resume().await?;
    shell
        .flux
        .emit(RespondFriendReq::PATH, RespondFriendReq { request_id, status })
        .await;
    shell.ensure_signed_in()?;

    let profile: ProfileState = shell.state(ProfileState::PATH)?;
    check(profile.error)?;
    println!("Request {} {}.", request_id, status);
    Ok(())
}

pub async fn users(shell: &mut Shell) -> Result<()> {
    shell.resume().await?;
    shell.flux.emit(UsersLoadReq::PATH, UsersLoadReq).await;
    shell.ensure_signed_in()?;

    let dir: UserDirectoryState = shell.state(UserDirectoryState::PATH)?;
    shell.print(&dir.users, || {
        println!("{:<6} USERNAME", "ID");
        for u in &dir.users {
            println!("{:<6} {}", u.id, u.username);
        }
    })
}

/// Look up one user by id.
pub async fn show_user(shell: &mut Shell, user_id: UserId) -> Result<()> {
    shell.resume().await?;
    let user = shell.ctx.api.friends.get_user(user_id).await?;
    shell.print(&user, || println!("{:<6} {}", user.id, user.username))
}

pub async fn send(shell: &mut Shell, user_id: UserId) -> Result<()> {
    shell.resume().await?;
    shell.flux.emit(SendFriendReq::PATH, SendFriendReq { user_id }).await;
    shell.ensure_signed_in()?;

    let dir: UserDirectoryState = shell.state(UserDirectoryState::PATH)?;
    let notice = dir.notice.unwrap_or_default();
    if notice == "Friend request sent!" {
        println!("{}", notice);
        Ok(())
    } else {
        anyhow::bail!("{}", notice)
    }
}
