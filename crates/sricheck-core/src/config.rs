use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::fetch::{default_user_agent, FetchOptions};
use crate::sri::SriAlgorithm;

/// Hosts that do not version their script URLs, so pinning a hash is not practical.
pub const DEFAULT_IGNORED_HOSTS: &[&str] = &["fonts.googleapis.com", "js.hs-scripts.com"];

/// Global configuration loaded from `~/.config/sricheck/config.toml`.
/// Every key is optional; missing keys take the defaults below.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SriConfig {
    /// Seconds allowed for the TCP/TLS connect of each request.
    pub connect_timeout_secs: u64,
    /// Seconds allowed for each whole request, body included.
    pub timeout_secs: u64,
    /// User-Agent header; `sricheck/<version>` when unset.
    pub user_agent: Option<String>,
    /// Digest used for generated integrity values.
    pub algorithm: SriAlgorithm,
    /// Hosts (`host` or `host:port`) whose scripts are not reported.
    pub ignored_hosts: Vec<String>,
}

impl Default for SriConfig {
    fn default() -> Self {
        Self {
            connect_timeout_secs: 15,
            timeout_secs: 30,
            user_agent: None,
            algorithm: SriAlgorithm::Sha384,
            ignored_hosts: DEFAULT_IGNORED_HOSTS.iter().map(|h| h.to_string()).collect(),
        }
    }
}

impl SriConfig {
    /// Request settings for this run; `headers` come from the command line.
    pub fn fetch_options(&self, headers: Vec<(String, String)>) -> FetchOptions {
        FetchOptions {
            connect_timeout: Duration::from_secs(self.connect_timeout_secs),
            timeout: Duration::from_secs(self.timeout_secs),
            user_agent: self.user_agent.clone().unwrap_or_else(default_user_agent),
            headers,
        }
    }
}

/// Path of an existing config file, if there is one.
pub fn config_path() -> Result<Option<PathBuf>> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("sricheck")?;
    Ok(xdg_dirs.find_config_file("config.toml"))
}

/// Load configuration from disk, or defaults when no file exists. Never writes.
pub fn load() -> Result<SriConfig> {
    match config_path()? {
        Some(path) => load_from(&path),
        None => {
            tracing::debug!("no config file, using defaults");
            Ok(SriConfig::default())
        }
    }
}

pub fn load_from(path: &Path) -> Result<SriConfig> {
    let data =
        fs::read_to_string(path).with_context(|| format!("read config {}", path.display()))?;
    let cfg: SriConfig =
        toml::from_str(&data).with_context(|| format!("parse config {}", path.display()))?;
    tracing::debug!("loaded config from {}", path.display());
    Ok(cfg)
}
