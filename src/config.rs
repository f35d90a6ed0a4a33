use std::path::PathBuf;

use crate::ads::SelectionPolicy;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("AD_SELECTION_POLICY: {0}")]
    InvalidPolicy(String),
}

/// Server configuration loaded from environment variables.
#[derive(Debug, Clone, Default)]
pub struct ServerConfig {
    pub catalog_path: Option<PathBuf>,
    pub policy: SelectionPolicy,
}

impl ServerConfig {
    /// Load configuration from environment.
    ///
    /// - `AD_CATALOG_PATH` (optional) — JSON catalog file; the built-in catalog when unset
    /// - `AD_SELECTION_POLICY` (optional, default `per_key`) — `per_key` or `deduplicated`
    pub fn from_env() -> Result<Self, ConfigError> {
        let catalog_path = std::env::var_os("AD_CATALOG_PATH")
            .filter(|v| !v.is_empty())
            .map(PathBuf::from);

        let policy = match std::env::var("AD_SELECTION_POLICY") {
            Ok(val) => val.trim().parse().map_err(ConfigError::InvalidPolicy)?,
            Err(_) => SelectionPolicy::default(),
        };

        Ok(Self {
            catalog_path,
            policy,
        })
    }
}
