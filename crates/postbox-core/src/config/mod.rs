//! Runtime configuration for Postbox clients.
//!
//! Values are safe-to-ship public endpoints and local paths; secrets are
//! never stored here.

use std::path::PathBuf;

use crate::db::MergePolicy;

/// Default remote origin for the post collection.
pub const DEFAULT_REMOTE_URL: &str = "https://jsonplaceholder.typicode.com";

const ENV_DB_PATH: &str = "POSTBOX_DB";
const ENV_REMOTE_URL: &str = "POSTBOX_REMOTE_URL";
const ENV_PRESERVE_READ: &str = "POSTBOX_PRESERVE_READ";

/// Client configuration resolved from environment variables with defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Local database file; `None` means the client picks its platform
    /// default data path.
    pub db_path: Option<PathBuf>,
    /// Base URL of the remote post origin.
    pub remote_base_url: String,
    /// How re-fetched rows merge into existing ones.
    pub merge_policy: MergePolicy,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            db_path: None,
            remote_base_url: DEFAULT_REMOTE_URL.to_string(),
            merge_policy: MergePolicy::Replace,
        }
    }
}

impl Config {
    /// Resolve configuration from the process environment.
    pub fn from_env() -> Self {
        let db_path = normalize_env(ENV_DB_PATH).map(PathBuf::from);
        let remote_base_url =
            normalize_env(ENV_REMOTE_URL).unwrap_or_else(|| DEFAULT_REMOTE_URL.to_string());
        let merge_policy = if normalize_env(ENV_PRESERVE_READ).is_some_and(|v| parse_bool(&v)) {
            MergePolicy::PreserveRead
        } else {
            MergePolicy::Replace
        };

        Self {
            db_path,
            remote_base_url,
            merge_policy,
        }
    }

    /// Override the database path.
    #[must_use]
    pub fn with_db_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.db_path = Some(path.into());
        self
    }
}

fn normalize_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn parse_bool(value: &str) -> bool {
    matches!(
        value.to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}
