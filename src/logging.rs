//! Logging System
//!
//! Structured logging using the `tracing` crate. Settings come from the
//! `[logging]` config section, then `TENDERNAV_LOG*` environment variables, then
//! command-line flags; later layers win.

use crate::error::ApiError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::Arc;
use tracing_subscriber::fmt::time::ChronoUtc;
use tracing_subscriber::fmt::writer::{BoxMakeWriter, MakeWriterExt};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Registry};

const ENV_FILTER: &str = "TENDERNAV_LOG";
const ENV_FORMAT: &str = "TENDERNAV_LOG_FORMAT";
const ENV_OUTPUT: &str = "TENDERNAV_LOG_OUTPUT";
const ENV_FILE: &str = "TENDERNAV_LOG_FILE";
const ENV_MODULES: &str = "TENDERNAV_LOG_MODULES";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}

impl FromStr for LogFormat {
    type Err = ApiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "text" => Ok(LogFormat::Text),
            "json" => Ok(LogFormat::Json),
            other => Err(ApiError::ConfigError(format!(
                "Invalid log format: {} (must be 'json' or 'text')",
                other
            ))),
        }
    }
}

/// Where log lines go
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogOutput {
    Stdout,
    Stderr,
    File,
    FileAndStderr,
    /// stdout and stderr
    Both,
}

impl LogOutput {
    pub fn writes_file(self) -> bool {
        matches!(self, LogOutput::File | LogOutput::FileAndStderr)
    }

    fn writer(self, file: Option<Arc<File>>) -> BoxMakeWriter {
        match (self, file) {
            (LogOutput::FileAndStderr, Some(file)) => {
                BoxMakeWriter::new(file.and(std::io::stderr))
            }
            (LogOutput::File, Some(file)) => BoxMakeWriter::new(file),
            (LogOutput::Both, _) => BoxMakeWriter::new(std::io::stdout.and(std::io::stderr)),
            (LogOutput::Stdout, _) => BoxMakeWriter::new(std::io::stdout),
            _ => BoxMakeWriter::new(std::io::stderr),
        }
    }
}

impl FromStr for LogOutput {
    type Err = ApiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "stdout" => Ok(LogOutput::Stdout),
            "stderr" => Ok(LogOutput::Stderr),
            "file" => Ok(LogOutput::File),
            "file+stderr" => Ok(LogOutput::FileAndStderr),
            "both" => Ok(LogOutput::Both),
            other => Err(ApiError::ConfigError(format!(
                "Invalid log output: {} (expected stdout, stderr, file, file+stderr or both)",
                other
            ))),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Whether logging is enabled (default: true)
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Level or full filter directive, e.g. `info` or `warn,tendernav::menu=debug`
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Output format: json, text (default: text)
    #[serde(default = "default_format")]
    pub format: String,

    /// Output destination: stdout, stderr, file, file+stderr, both
    #[serde(default = "default_output")]
    pub output: String,

    /// Log file when output includes file; None means the per-installation state dir
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,

    /// Colored text output (never applied to files)
    #[serde(default = "default_true")]
    pub color: bool,

    /// Per-module levels, e.g. `tendernav::gateway = "debug"`
    #[serde(default)]
    pub modules: HashMap<String, String>,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_format() -> String {
    "text".to_string()
}

fn default_output() -> String {
    "file".to_string()
}

fn default_true() -> bool {
    true
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enabled: default_true(),
            level: default_log_level(),
            format: default_format(),
            output: default_output(),
            file: None,
            color: default_true(),
            modules: HashMap::new(),
        }
    }
}

/// Command-line overrides applied on top of the config section.
#[derive(Debug, Clone, Default)]
pub struct LoggingOverrides {
    pub verbose: bool,
    pub level: Option<String>,
    pub format: Option<String>,
    pub output: Option<String>,
    pub file: Option<PathBuf>,
}

impl LoggingConfig {
    /// Layer the `TENDERNAV_LOG*` variables over this section.
    pub fn with_env(self) -> Self {
        self.with_vars(|name| std::env::var(name).ok().filter(|v| !v.trim().is_empty()))
    }

    fn with_vars<F>(mut self, var: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(level) = var(ENV_FILTER) {
            self.level = level;
        }
        if let Some(format) = var(ENV_FORMAT) {
            self.format = format;
        }
        if let Some(output) = var(ENV_OUTPUT) {
            self.output = output;
        }
        if let Some(file) = var(ENV_FILE) {
            self.file = Some(PathBuf::from(file));
        }
        if let Some(modules) = var(ENV_MODULES) {
            for entry in modules.split(',') {
                if let Some((module, level)) = entry.split_once('=') {
                    self.modules
                        .insert(module.trim().to_string(), level.trim().to_string());
                }
            }
        }
        self
    }

    pub fn with_overrides(mut self, overrides: &LoggingOverrides) -> Self {
        if overrides.verbose && overrides.level.is_none() {
            self.level = "debug".to_string();
        }
        if let Some(level) = &overrides.level {
            self.level = level.clone();
        }
        if let Some(format) = &overrides.format {
            self.format = format.clone();
        }
        if let Some(output) = &overrides.output {
            self.output = output.clone();
        }
        if let Some(file) = &overrides.file {
            self.file = Some(file.clone());
        }
        self
    }

    fn filter(&self) -> Result<EnvFilter, ApiError> {
        let mut filter = EnvFilter::try_new(&self.level).map_err(|e| {
            ApiError::ConfigError(format!("Invalid log level '{}': {}", self.level, e))
        })?;
        for (module, level) in &self.modules {
            let directive = format!("{}={}", module, level);
            filter = filter.add_directive(directive.parse().map_err(|e| {
                ApiError::ConfigError(format!("Invalid log directive '{}': {}", directive, e))
            })?);
        }
        Ok(filter)
    }
}

/// Log file for `installation`: the configured file, else
/// `<state dir>/tendernav/<installation>/tendernav.log`.
pub fn log_file_path(
    file: Option<&Path>,
    installation: Option<&str>,
) -> Result<PathBuf, ApiError> {
    if let Some(path) = file.filter(|p| !p.as_os_str().is_empty()) {
        return Ok(path.to_path_buf());
    }
    let project_dirs =
        directories::ProjectDirs::from("", "tendernav", "tendernav").ok_or_else(|| {
            ApiError::ConfigError(
                "Could not determine platform state directory for log file".to_string(),
            )
        })?;
    let state_dir = project_dirs
        .state_dir()
        .unwrap_or_else(|| project_dirs.data_local_dir())
        .to_path_buf();
    let dir = match installation.map(str::trim) {
        Some(id) if !id.is_empty() => state_dir.join(id),
        _ => state_dir,
    };
    Ok(dir.join("tendernav.log"))
}

fn open_log_file(path: &Path) -> Result<Arc<File>, ApiError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .map_err(|e| ApiError::ConfigError(format!("Failed to create log directory: {}", e)))?;
    }
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map(Arc::new)
        .map_err(|e| ApiError::ConfigError(format!("Failed to open log file {:?}: {}", path, e)))
}

/// Install the global subscriber.
///
/// Pass a config that already went through [`LoggingConfig::with_env`] and
/// [`LoggingConfig::with_overrides`]. A second call in the same process is an error.
pub fn init_logging(config: &LoggingConfig, installation: Option<&str>) -> Result<(), ApiError> {
    if !config.enabled {
        let _ = Registry::default()
            .with(EnvFilter::new("off"))
            .with(fmt::layer().with_writer(std::io::sink))
            .try_init();
        return Ok(());
    }

    let filter = config.filter()?;
    let format: LogFormat = config.format.parse()?;
    let output: LogOutput = config.output.parse()?;

    let file = if output.writes_file() {
        let path = log_file_path(config.file.as_deref(), installation)?;
        Some(open_log_file(&path)?)
    } else {
        None
    };
    let use_color = config.color && !output.writes_file();
    let writer = output.writer(file);

    let subscriber = Registry::default().with(filter);
    let result = match format {
        LogFormat::Json => subscriber
            .with(
                fmt::layer()
                    .json()
                    .with_target(true)
                    .with_timer(ChronoUtc::rfc_3339())
                    .with_writer(writer),
            )
            .try_init(),
        LogFormat::Text => subscriber
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_timer(ChronoUtc::rfc_3339())
                    .with_ansi(use_color)
                    .with_writer(writer),
            )
            .try_init(),
    };
    result.map_err(|e| ApiError::ConfigError(format!("Failed to install log subscriber: {}", e)))
}
