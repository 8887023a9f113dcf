//! Client-side configuration.
//!
//! Reads/writes `~/.agora/config.toml`: the server URL and the token saved
//! by `agora login`.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

pub const DEFAULT_SERVER: &str = "http://localhost:3000";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// API base URL (e.g. "http://localhost:3000").
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub server: String,

    /// Bearer token (set by `agora login`).
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub token: String,
}

impl ClientConfig {
    /// Default config file path: ~/.agora/config.toml.
    pub fn default_path() -> PathBuf {
        dirs_path().join("config.toml")
    }

    /// Load config from disk, or return default if file doesn't exist.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        let config: ClientConfig = toml::from_str(&content)?;
        Ok(config)
    }

    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, toml::to_string_pretty(self)?)?;
        Ok(())
    }

    /// Server to talk to: the override, then the saved one, then the default.
    pub fn server_url(&self, overridden: Option<&str>) -> String {
        match overridden {
            Some(url) if !url.is_empty() => url.to_string(),
            _ if !self.server.is_empty() => self.server.clone(),
            _ => DEFAULT_SERVER.to_string(),
        }
    }

    pub fn stored_token(&self) -> Option<String> {
        (!self.token.is_empty()).then(|| self.token.clone())
    }
}

/// Return the Agora config directory (~/.agora).
fn dirs_path() -> PathBuf {
    let home = std::env::var("HOME")
        .or_else(|_| std::env::var("USERPROFILE"))
        .unwrap_or_else(|_| ".".to_string());
    PathBuf::from(home).join(".agora")
}
