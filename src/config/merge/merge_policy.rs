//! Built-in defaults at the bottom of the merge stack.

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError};

pub fn builder_with_defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    Config::builder()
        .set_default("installation.id", "default")?
        .set_default("backend.kind", "local")?
        .set_default("backend.timeout_secs", 10)?
        .set_default("session.user", "operator")
}
