//! Environment variable source: BACKUP_TREE prefix with __ separator

use config::builder::DefaultState;
use config::ConfigBuilder;
use config::ConfigError;
use config::Environment;

/// Prefix shared by all configuration environment variables.
pub const ENV_PREFIX: &str = "BACKUP_TREE";

/// Add environment variable overlay to builder.
/// `BACKUP_TREE__TREE__EXPAND_DEPTH=3` sets `tree.expand_depth`.
pub fn add_to_builder(
    builder: ConfigBuilder<DefaultState>,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    let builder = builder.add_source(
        Environment::with_prefix(ENV_PREFIX)
            .separator("__")
            .try_parsing(true),
    );
    Ok(builder)
}
