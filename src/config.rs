//! Client Configuration
//!
//! JSON settings file with environment overrides.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::commands::DEFAULT_BASE_URL;
use crate::error::{ClientError, ClientResult};
use crate::sync::ReconcilePolicy;

pub const ENV_API_URL: &str = "KANBAN_API_URL";
pub const ENV_TOKEN_PATH: &str = "KANBAN_TOKEN_PATH";
pub const ENV_LOG_DIR: &str = "KANBAN_LOG_DIR";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    pub api_base_url: String,
    /// Persist the session token here; in-memory only when unset
    pub token_path: Option<PathBuf>,
    pub reconcile: ReconcilePolicy,
    /// Rolling log directory; logging stays off when unset
    pub log_dir: Option<PathBuf>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_BASE_URL.to_string(),
            token_path: None,
            reconcile: ReconcilePolicy::default(),
            log_dir: None,
        }
    }
}

impl ClientConfig {
    /// Read a config file. A missing file yields the defaults.
    pub fn load(path: &Path) -> ClientResult<Self> {
        if !path.exists() {
            log::debug!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        let contents = fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&contents)
            .map_err(|e| ClientError::Config(format!("{}: {}", path.display(), e)))?;
        config.validate()?;
        Ok(config)
    }

    pub fn save(&self, path: &Path) -> ClientResult<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let contents =
            serde_json::to_string_pretty(self).map_err(|e| ClientError::Config(e.to_string()))?;
        fs::write(path, contents)?;
        Ok(())
    }

    /// Apply `KANBAN_*` variables from the process environment
    pub fn with_env_overrides(self) -> ClientResult<Self> {
        self.apply_overrides(|key| std::env::var(key).ok())
    }

    pub fn apply_overrides<F>(mut self, lookup: F) -> ClientResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(ENV_API_URL) {
            self.api_base_url = url;
        }
        if let Some(path) = lookup(ENV_TOKEN_PATH).filter(|p| !p.is_empty()) {
            self.token_path = Some(PathBuf::from(path));
        }
        if let Some(dir) = lookup(ENV_LOG_DIR).filter(|d| !d.is_empty()) {
            self.log_dir = Some(PathBuf::from(dir));
        }
        self.validate()?;
        Ok(self)
    }

    pub fn validate(&self) -> ClientResult<()> {
        let url = self.api_base_url.trim();
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(ClientError::Config(format!(
                "api_base_url must be an http(s) URL, got {:?}",
                self.api_base_url
            )));
        }
        Ok(())
    }
}
