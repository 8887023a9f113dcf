//! Command implementations.
//!
//! Every command runs the headless app in-process: requests are emitted on
//! a [`Flux`] and results are read back from its state store, exactly as a
//! graphical front-end would.

pub mod auth;
pub mod comments;
pub mod friends;
pub mod posts;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Result;
use serde::Serialize;

use agora_app::request::InitializeReq;
use agora_app::state::AuthState;
use agora_app::{register_handlers, AppContext};
use agora_flux::Flux;

use crate::config::ClientConfig;

/// Output format selected with `--output`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Output {
    Table,
    Json,
}

/// One CLI invocation: config plus a running app instance.
pub struct Shell {
    pub flux: Flux,
    pub ctx: Arc<AppContext>,
    pub config: ClientConfig,
    pub config_path: PathBuf,
    pub output: Output,
}

impl Shell {
    pub fn open(config_path: &Path, server: Option<&str>, output: Output) -> Result<Self> {
        let config = ClientConfig::load(config_path)?;
        let base_url = config.server_url(server);
        tracing::debug!(%base_url, "opening shell");

        let flux = Flux::new();
        let ctx = Arc::new(AppContext::new(base_url));
        register_handlers(&flux, ctx.clone());
        Ok(Self { flux, ctx, config, config_path: config_path.to_path_buf(), output })
    }

    /// Resume the saved session. Fails when there is none or it has expired.
    pub async fn resume(&mut self) -> Result<()> {
        let stored_token = self.config.stored_token();
        if stored_token.is_none() {
            anyhow::bail!("Not logged in. Run `agora login`.");
        }
        self.flux.emit(InitializeReq::PATH, InitializeReq { stored_token }).await;

        if !self.auth().is_authenticated() {
            self.config.token.clear();
            self.config.save(&self.config_path)?;
            anyhow::bail!("Session expired. Run `agora login`.");
        }
        Ok(())
    }

    pub fn auth(&self) -> AuthState {
        self.flux.get_as(AuthState::PATH).unwrap_or_default()
    }

    /// Bail out if a handler dropped the session mid-command.
    pub fn ensure_signed_in(&self) -> Result<()> {
        if self.auth().is_authenticated() {
            Ok(())
        } else {
            anyhow::bail!("Session expired. Run `agora login`.")
        }
    }

    /// Read a state value, failing if the handler never published it.
    pub fn state<T: std::any::Any + Clone>(&self, path: &str) -> Result<T> {
        self.flux
            .get_as(path)
            .ok_or_else(|| anyhow::anyhow!("no state at {}", path))
    }

    /// Print `value` as JSON, or run `table` for the default format.
    pub fn print<T: Serialize>(&self, value: &T, table: impl FnOnce()) -> Result<()> {
        match self.output {
            Output::Json => println!("{}", serde_json::to_string_pretty(value)?),
            Output::Table => table(),
        }
        Ok(())
    }
}

/// Fail with `error` if it is set.
pub fn check(error: Option<String>) -> Result<()> {
    match error {
        Some(e) => Err(anyhow::anyhow!(e)),
        None => Ok(()),
    }
}

/// Truncate `s` to `width` characters for table cells.
pub fn cell(s: &str, width: usize) -> String {
    let line = s.lines().next().unwrap_or("");
    if line.chars().count() > width {
        let cut: String = line.chars().take(width.saturating_sub(1)).collect();
        format!("{}…", cut)
    } else {
        line.to_string()
    }
}
