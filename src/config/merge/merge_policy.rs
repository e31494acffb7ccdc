//! Merge rules: defaults, override order, conflict handling.

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, Environment};

/// Create a Config builder with merge policy defaults applied.
pub fn builder_with_defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    Config::builder()
        .set_default("generation.endpoint", crate::config::DEFAULT_ENDPOINT)?
        .set_default("generation.timeout_ms", 120_000_i64)?
        .set_default("generation.max_retries", 2_i64)?
        .set_default("generation.backoff_ms", 2_000_i64)
}

/// Environment overrides are applied last:
/// `DRAFTDESK_GENERATION__ENDPOINT`, `DRAFTDESK_GENERATION__MAX_RETRIES`, ...
pub fn with_environment(builder: ConfigBuilder<DefaultState>) -> ConfigBuilder<DefaultState> {
    builder.add_source(
        Environment::with_prefix("DRAFTDESK")
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true),
    )
}
