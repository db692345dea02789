//! Configuration
//!
//! Layered application configuration: built-in defaults, the global config file,
//! an explicit `--config` file, then `TENDERNAV__*` environment variables.

pub mod facade;
pub mod merge;
pub mod paths;
pub mod sources;
pub mod storage;

pub use facade::ConfigLoader;
pub use paths::xdg_root as xdg;
pub use storage::StorageConfig;

use crate::error::ApiError;
use crate::logging::LoggingConfig;
use serde::{Deserialize, Serialize};

fn default_installation_id() -> String {
    "default".to_string()
}

fn default_user() -> String {
    "operator".to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

/// Installation the menu structure belongs to
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InstallationConfig {
    #[serde(default = "default_installation_id")]
    pub id: String,
}

impl Default for InstallationConfig {
    fn default() -> Self {
        Self {
            id: default_installation_id(),
        }
    }
}

/// Which backend of record holds menus and permissions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    /// Sled store on this machine; permissions come from `session.permissions`.
    #[default]
    Local,
    /// Remote REST backend.
    Http,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendConfig {
    #[serde(default)]
    pub kind: BackendKind,

    /// Base URL of the REST backend; required when `kind = "http"`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,

    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            kind: BackendKind::default(),
            base_url: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Current session: who acts, and with what grants
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Acting user recorded on menu writes.
    #[serde(default = "default_user")]
    pub user: String,

    /// Bearer token for the REST backend.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,

    /// Static grants used by the local backend.
    #[serde(default)]
    pub permissions: Vec<String>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            user: default_user(),
            token: None,
            permissions: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CapabilitiesConfig {
    /// Deployment-specific capability tags beyond the built-in set.
    #[serde(default)]
    pub extra: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub installation: InstallationConfig,
    #[serde(default)]
    pub backend: BackendConfig,
    #[serde(default)]
    pub session: SessionConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub capabilities: CapabilitiesConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    pub fn validate(&self) -> Result<(), ApiError> {
        if self.installation.id.trim().is_empty() {
            return Err(ApiError::ConfigError(
                "installation.id cannot be empty".to_string(),
            ));
        }
        if self.session.user.trim().is_empty() {
            return Err(ApiError::ConfigError("session.user cannot be empty".to_string()));
        }
        if self.backend.kind == BackendKind::Http {
            let base_url = self.backend.base_url.as_deref().unwrap_or_default().trim();
            if base_url.is_empty() {
                return Err(ApiError::ConfigError(
                    "backend.base_url is required when backend.kind is 'http'".to_string(),
                ));
            }
            if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
                return Err(ApiError::ConfigError(format!(
                    "backend.base_url must start with http:// or https://, got '{}'",
                    base_url
                )));
            }
        }
        if self.backend.timeout_secs == 0 {
            return Err(ApiError::ConfigError(
                "backend.timeout_secs must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}
