//! Environment variable source: TENDERNAV_ prefix with __ separator

use config::builder::DefaultState;
use config::ConfigBuilder;
use config::ConfigError;
use config::Environment;

/// Keys whose environment values are comma-separated lists.
const LIST_KEYS: &[&str] = &["session.permissions", "capabilities.extra"];

/// Add environment variable overlay to builder.
/// Uses TENDERNAV__ prefix and __ as separator for nested keys,
/// e.g. `TENDERNAV__BACKEND__BASE_URL`.
pub fn add_to_builder(
    builder: ConfigBuilder<DefaultState>,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    let mut environment = Environment::with_prefix("TENDERNAV")
        .separator("__")
        .try_parsing(true)
        .list_separator(",");
    for key in LIST_KEYS {
        environment = environment.with_list_parse_key(key);
    }
    Ok(builder.add_source(environment))
}
