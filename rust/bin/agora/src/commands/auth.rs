//! Server, login, signup, logout and whoami.

use anyhow::Result;

use agora_app::request::{LoginReq, LogoutReq, SignupReq};
use agora_client::SignupForm;

use crate::commands::{check, Shell};

/// Save the API server URL.
pub fn set_server(shell: &mut Shell, url: &str) -> Result<()> {
    if !(url.starts_with("http://") || url.starts_with("https://")) {
        anyhow::bail!("Server URL must start with http:// or https://");
    }
    shell.config.server = url.trim_end_matches('/').to_string();
    shell.config.save(&shell.config_path)?;
    println!("Server set to {}.", shell.config.server);
    Ok(())
}

pub async fn login(shell: &mut Shell, username: &str, password: &str) -> Result<()> {
    shell
        .flux
        .emit(LoginReq::PATH, LoginReq { username: username.to_string(), password: password.to_string() })
        .await;
    save_session(shell).await
}

pub async fn signup(shell: &mut Shell, form: SignupForm) -> Result<()> {
    shell.flux.emit(SignupReq::PATH, SignupReq { form }).await;
    save_session(shell).await
}

async fn save_session(shell: &mut Shell) -> Result<()> {
    let auth = shell.auth();
    check(auth.error)?;
    let session = shell
        .ctx
        .session
        .current()
        .await
        .ok_or_else(|| anyhow::anyhow!("Sign-in did not produce a session"))?;

    shell.config.token = session.token().to_string();
    shell.config.save(&shell.config_path)?;

    let name = auth.user.map(|u| u.username).or_else(|| session.username().map(str::to_string));
    println!("Logged in as {}.", name.as_deref().unwrap_or("?"));
    Ok(())
}

pub async fn logout(shell: &mut Shell) -> Result<()> {
    shell.flux.emit(LogoutReq::PATH, LogoutReq).await;
    shell.config.token.clear();
    shell.config.save(&shell.config_path)?;
    println!("Logged out.");
    Ok(())
}

pub async fn whoami(shell: &mut Shell) -> Result<()> {
    shell.resume().await?;
    let auth = shell.auth();
    let expires = shell.ctx.session.current().await.map(|s| s.expires_at());
    shell.print(&auth, || match &auth.user {
        Some(user) => {
            println!("{} (id {})", user.username, user.id);
            if let Some(email) = &user.email {
                println!("email:   {}", email);
            }
            if let Some(exp) = expires {
                println!("expires: {} (unix)", exp);
            }
        }
        None => println!("signed in (profile unavailable)"),
    })
}
