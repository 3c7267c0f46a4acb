//! Workspace configuration, loaded from JSON.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid configuration: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkspaceConfig {
    /// Ref loaded when a request names none
    pub default_ref: String,
    /// Branch written when a request names none
    pub default_branch: String,
    /// Lifetime of cached snapshots; 0 disables the cache
    pub cache_ttl_secs: u64,
    /// Root directory of the file store
    pub data_dir: PathBuf,
}

impl Default for WorkspaceConfig {
    fn default() -> Self {
        Self {
            default_ref: "refs/heads/main".to_string(),
            default_branch: "main".to_string(),
            cache_ttl_secs: 60,
            data_dir: PathBuf::from("data"),
        }
    }
}

impl WorkspaceConfig {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs)
    }

    pub fn resolve_ref<'a>(&'a self, git_ref: &'a str) -> &'a str {
        if git_ref.is_empty() {
            &self.default_ref
        } else {
            git_ref
        }
    }

    pub fn resolve_branch<'a>(&'a self, branch: &'a str) -> &'a str {
        if branch.is_empty() {
            &self.default_branch
        } else {
            branch
        }
    }
}
