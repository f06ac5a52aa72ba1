//! Configuration
//!
//! Layered configuration: built-in defaults, then the global config file (or an
//! explicit `--config` file), then `BACKUP_TREE__SECTION__KEY` environment
//! variables.

pub mod facade;
pub mod merge;
pub mod paths;
pub mod sources;

pub use facade::ConfigLoader;

use crate::error::ApiError;
use crate::logging::LoggingConfig;
use crate::naming::NamingContext;
use crate::tree::DEFAULT_EXPAND_DEPTH;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Upper bound for the default expansion depth.
pub const MAX_EXPAND_DEPTH: usize = 64;

/// Top-level configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub logging: LoggingConfig,
    pub tree: TreeConfig,
    pub poll: PollConfig,
    pub naming: NamingConfig,
    pub api: ApiConfig,
}

impl AppConfig {
    /// Check value ranges that serde cannot express.
    pub fn validate(&self) -> Result<(), ApiError> {
        if self.tree.expand_depth > MAX_EXPAND_DEPTH {
            return Err(ApiError::ConfigError(format!(
                "tree.expand_depth must be at most {} (got {})",
                MAX_EXPAND_DEPTH, self.tree.expand_depth
            )));
        }
        if self.poll.status_interval_ms == 0 || self.poll.log_interval_ms == 0 {
            return Err(ApiError::ConfigError(
                "poll intervals must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

/// Tree view settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TreeConfig {
    /// Directories shallower than this start expanded
    pub expand_depth: usize,
    /// Display label of the root directory
    pub root_label: String,
}

impl Default for TreeConfig {
    fn default() -> Self {
        Self {
            expand_depth: DEFAULT_EXPAND_DEPTH,
            root_label: "Root".to_string(),
        }
    }
}

/// Run polling settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PollConfig {
    pub status_interval_ms: u64,
    pub log_interval_ms: u64,
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            status_interval_ms: 5000,
            log_interval_ms: 2000,
        }
    }
}

impl PollConfig {
    pub fn status_interval(&self) -> Duration {
        Duration::from_millis(self.status_interval_ms)
    }

    pub fn log_interval(&self) -> Duration {
        Duration::from_millis(self.log_interval_ms)
    }
}

/// Placeholder values used when previewing naming patterns
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NamingConfig {
    pub preview_server_name: String,
    pub preview_server_host: String,
    pub preview_profile: String,
}

impl Default for NamingConfig {
    fn default() -> Self {
        Self {
            preview_server_name: "my-server".to_string(),
            preview_server_host: "192.168.1.100".to_string(),
            preview_profile: "my_database".to_string(),
        }
    }
}

impl NamingConfig {
    pub fn preview_context(&self) -> NamingContext {
        NamingContext {
            server_name: self.preview_server_name.clone(),
            server_host: self.preview_server_host.clone(),
            profile_name: self.preview_profile.clone(),
        }
    }
}

/// Backend API settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Path prefix of the backend REST API
    pub base_path: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_path: "/api/v1".to_string(),
        }
    }
}
