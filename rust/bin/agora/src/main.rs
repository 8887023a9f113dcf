//! `agora`: command-line client for the Agora social API.
//!
//! Runs the headless app in-process and renders its state as tables or
//! JSON. The session token is kept in `~/.agora/config.toml`.

mod commands;
mod config;

use std::io::Write;

use clap::{Parser, Subcommand};

use agora_client::{CommentId, FriendRequestId, FriendRequestStatus, PostId, ReactionKind, SignupForm, UserId};
use commands::{Output, Shell};

/// Agora CLI.
#[derive(Parser, Debug)]
#[command(name = "agora", about = "Agora social client", version)]
struct Cli {
    /// Path to client config file (default: ~/.agora/config.toml).
    #[arg(long = "config", global = true)]
    config: Option<String>,

    /// API server URL; overrides the saved one.
    #[arg(long = "server", global = true, env = "AGORA_SERVER")]
    server: Option<String>,

    /// Output format.
    #[arg(long = "output", short = 'o', global = true, value_enum, default_value = "table")]
    output: Output,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Save the API server URL.
    Server { url: String },

    /// Create an account and log in.
    Signup {
        #[arg(long)]
        user: Option<String>,
        #[arg(long)]
        password: Option<String>,
        #[arg(long, default_value = "")]
        email: String,
        #[arg(long, default_value = "")]
        first_name: String,
        #[arg(long, default_value = "")]
        last_name: String,
        #[arg(long, default_value = "")]
        mobile: String,
    },

    /// Log in and save the session.
    Login {
        #[arg(long)]
        user: Option<String>,
        /// Password (prompted if omitted).
        #[arg(long)]
        password: Option<String>,
    },

    /// Forget the saved session.
    Logout,

    /// Show the signed-in user.
    Whoami,

    /// List the post feed.
    Feed {
        /// Number of pages to load.
        #[arg(long, default_value_t = 1)]
        pages: u32,
    },

    /// Create, edit, delete or show a post.
    Post {
        #[command(subcommand)]
        action: PostAction,
    },

    /// Toggle a reaction on a post.
    React {
        post_id: PostId,
        /// like, love, happy, celebrate, insightful or funny.
        #[arg(default_value = "like")]
        kind: ReactionKind,
    },

    /// List comments under a post.
    Comments {
        post_id: PostId,
        #[arg(long, default_value_t = 1)]
        pages: u32,
    },

    /// Add, edit, delete or like a comment.
    Comment {
        #[command(subcommand)]
        action: CommentAction,
    },

    /// List friends and incoming friend requests.
    Friends,

    /// List users.
    Users,

    /// Show one user.
    User { user_id: UserId },

    /// Send or answer friend requests.
    Friend {
        #[command(subcommand)]
        action: FriendAction,
    },
}

#[derive(Subcommand, Debug)]
enum PostAction {
    Create {
        #[arg(long)]
        title: String,
        #[arg(long, default_value = "")]
        description: String,
    },
    Edit {
        id: PostId,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        description: Option<String>,
    },
    Delete {
        id: PostId,
        /// Skip confirmation.
        #[arg(long = "yes", short = 'y')]
        yes: bool,
    },
    Show {
        id: PostId,
        /// Pages of comments to load.
        #[arg(long, default_value_t = 1)]
        pages: u32,
    },
}

#[derive(Subcommand, Debug)]
enum CommentAction {
    Add { post_id: PostId, message: String },
    Edit { post_id: PostId, comment_id: CommentId, message: String },
    Delete { post_id: PostId, comment_id: CommentId },
    /// Toggle your like.
    React { post_id: PostId, comment_id: CommentId },
}

#[derive(Subcommand, Debug)]
enum FriendAction {
    /// Send a friend request to a user.
    Send { user_id: UserId },
    Accept { request_id: FriendRequestId },
    Decline { request_id: FriendRequestId },
}

fn prompt(label: &str) -> anyhow::Result<String> {
    eprint!("{}", label);
    std::io::stderr().flush()?;
    let mut s = String::new();
    std::io::stdin().read_line(&mut s)?;
    Ok(s.trim().to_string())
}

fn credentials(user: Option<String>, password: Option<String>) -> anyhow::Result<(String, String)> {
    let username = match user {
        Some(u) => u,
        None => prompt("Username: ")?,
    };
    let password = match password {
        Some(p) => p,
        None => rpassword::prompt_password("Password: ")?,
    };
    if username.is_empty() || password.is_empty() {
        anyhow::bail!("Username and password are required.");
    }
    Ok((username, password))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()),
        )
        .init();

    let cli = Cli::parse();

    let config_path = cli
        .config
        .map(std::path::PathBuf::from)
        .unwrap_or_else(config::ClientConfig::default_path);
    let mut shell = Shell::open(&config_path, cli.server.as_deref(), cli.output)?;
    let shell = &mut shell;

    match cli.command {
        Commands::Server { url } => commands::auth::set_server(shell, &url)?,

        Commands::Signup { user, password, email, first_name, last_name, mobile } => {
            let (username, password) = credentials(user, password)?;
            let form = SignupForm { username, password, first_name, last_name, email, mobile_no: mobile };
            commands::auth::signup(shell, form).await?;
        }

        Commands::Login { user, password } => {
            let (username, password) = credentials(user, password)?;
            commands::auth::login(shell, &username, &password).await?;
        }

        Commands::Logout => commands::auth::logout(shell).await?,

        Commands::Whoami => commands::auth::whoami(shell).await?,

        Commands::Feed { pages } => commands::posts::feed(shell, pages).await?,

        Commands::Post { action } => match action {
            PostAction::Create { title, description } => {
                commands::posts::create(shell, title, description).await?;
            }
            PostAction::Edit { id, title, description } => {
                commands::posts::edit(shell, id, title, description).await?;
            }
            PostAction::Delete { id, yes } => {
                if !yes && !prompt("Are you sure? [y/N]: ")?.eq_ignore_ascii_case("y") {
                    println!("Cancelled.");
                    return Ok(());
                }
                commands::posts::delete(shell, id).await?;
            }
            PostAction::Show { id, pages } => commands::posts::show(shell, id, pages).await?,
        },

        Commands::React { post_id, kind } => commands::posts::react(shell, post_id, kind).await?,

        Commands::Comments { post_id, pages } => commands::comments::list(shell, post_id, pages).await?,

        Commands::Comment { action } => match action {
            CommentAction::Add { post_id, message } => commands::comments::add(shell, post_id, message).await?,
            CommentAction::Edit { post_id, comment_id, message } => {
                commands::comments::edit(shell, post_id, comment_id, message).await?;
            }
            CommentAction::Delete { post_id, comment_id } => {
                commands::comments::delete(shell, post_id, comment_id).await?;
            }
            CommentAction::React { post_id, comment_id } => {
                commands::comments::react(shell, post_id, comment_id).await?;
            }
        },

        Commands::Friends => commands::friends::list(shell).await?,

        Commands::Users => commands::friends::users(shell).await?,

        Commands::User { user_id } => commands::friends::show_user(shell, user_id).await?,

        Commands::Friend { action } => match action {
            FriendAction::Send { user_id } => commands::friends::send(shell, user_id).await?,
            FriendAction::Accept { request_id } => {
                commands::friends::respond(shell, request_id, FriendRequestStatus::Accepted).await?;
            }
            FriendAction::Decline { request_id } => {
                commands::friends::respond(shell, request_id, FriendRequestStatus::Declined).await?;
            }
        },
    }

    Ok(())
}
