//! Default values seeded into every config build.

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError};

/// Config builder pre-populated with the built-in defaults.
pub fn builder_with_defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    Config::builder()
        .set_default("tree.expand_depth", 2_i64)?
        .set_default("tree.root_label", "Root")?
        .set_default("poll.status_interval_ms", 5000_i64)?
        .set_default("poll.log_interval_ms", 2000_i64)?
        .set_default("api.base_path", "/api/v1")
}
