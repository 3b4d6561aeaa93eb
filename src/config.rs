//! Configuration file support for pr-remediator.
//!
//! Provides YAML-based configuration through `pr-remediator.config.yml`
//! files and resolves it, together with command-line overrides, into the
//! effective [`ServiceConfig`].

use anyhow::Context;
use serde::Deserialize;
use std::collections::HashMap;
use std::net::SocketAddr;
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

use crate::shared::error::ServiceError;
use crate::shared::telemetry::LogFormat;
use crate::shared::Result;

pub const CONFIG_FILENAME: &str = "pr-remediator.config.yml";

/// Config files larger than this are rejected before reading
const MAX_CONFIG_FILE_SIZE: u64 = 1024 * 1024;

pub const DEFAULT_LISTEN: &str = "0.0.0.0:8080";
pub const DEFAULT_MAX_CONCURRENT_EVALUATIONS: usize = 1;
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 30;

/// Top-level configuration file schema.
#[derive(Debug, Deserialize, Default)]
pub struct ConfigFile {
    pub listen: Option<String>,
    pub max_concurrent_evaluations: Option<usize>,
    pub memoize_evaluations: Option<bool>,
    pub policy_timeout_seconds: Option<u64>,
    pub github_timeout_seconds: Option<u64>,
    pub comment_when_clean: Option<bool>,
    pub log_format: Option<String>,
    /// Captures unknown fields for warnings.
    #[serde(flatten)]
    pub unknown_fields: HashMap<String, serde_yaml_ng::Value>,
}

impl ConfigFile {
    /// Names of fields the service does not understand, sorted
    pub fn unknown_field_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.unknown_fields.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

/// Load config from an explicit path. Returns an error if the file is not found.
pub fn load_config_from_path(path: &Path) -> Result<ConfigFile> {
    check_config_file(path)?;

    let content = std::fs::read_to_string(path).with_context(|| {
        format!(
            "Failed to read config file: {}\n\n💡 Hint: Check that the file exists and is readable.",
            path.display()
        )
    })?;

    let config: ConfigFile = serde_yaml_ng::from_str(&content).with_context(|| {
        format!(
            "Failed to parse config file: {}\n\n💡 Hint: Ensure the file contains valid YAML syntax.",
            path.display()
        )
    })?;

    validate_config(&config)?;

    Ok(config)
}

/// Auto-discover config in a directory. Returns `None` silently if not found.
pub fn discover_config(dir: &Path) -> Result<Option<ConfigFile>> {
    let config_path = dir.join(CONFIG_FILENAME);

    if !config_path.exists() {
        return Ok(None);
    }

    let config = load_config_from_path(&config_path)?;
    Ok(Some(config))
}

/// Rejects symlinks, non-files and oversized files
fn check_config_file(path: &Path) -> Result<()> {
    let metadata = std::fs::symlink_metadata(path).with_context(|| {
        format!(
            "Failed to read config file: {}\n\n💡 Hint: Check that the file exists and is readable.",
            path.display()
        )
    })?;

    let reason = if metadata.is_symlink() {
        Some("symbolic links are not allowed".to_string())
    } else if !metadata.is_file() {
        Some("not a regular file".to_string())
    } else if metadata.len() > MAX_CONFIG_FILE_SIZE {
        Some(format!(
            "file is too large ({} bytes, maximum {} bytes)",
            metadata.len(),
            MAX_CONFIG_FILE_SIZE
        ))
    } else {
        None
    };

    match reason {
        Some(reason) => Err(ServiceError::ConfigFileRejected {
            path: path.to_path_buf(),
            reason,
        }
        .into()),
        None => Ok(()),
    }
}

/// Validate the loaded configuration.
fn validate_config(config: &ConfigFile) -> Result<()> {
    if let Some(listen) = &config.listen {
        parse_listen(listen)?;
    }

    if config.max_concurrent_evaluations == Some(0) {
        return Err(invalid(
            "max_concurrent_evaluations",
            "must be at least 1",
            "Use 1 to evaluate components one at a time",
        ));
    }

    if config.policy_timeout_seconds == Some(0) {
        return Err(invalid(
            "policy_timeout_seconds",
            "must be at least 1",
            "Remove the field to use the 30 second default",
        ));
    }

    if config.github_timeout_seconds == Some(0) {
        return Err(invalid(
            "github_timeout_seconds",
            "must be at least 1",
            "Remove the field to use the 30 second default",
        ));
    }

    if let Some(format) = &config.log_format {
        LogFormat::from_str(format)
            .map_err(|e| invalid("log_format", &e, "Use 'text' or 'json'"))?;
    }

    Ok(())
}

fn invalid(field: &str, reason: &str, hint: &str) -> anyhow::Error {
    ServiceError::InvalidConfig {
        field: field.to_string(),
        reason: reason.to_string(),
        hint: hint.to_string(),
    }
    .into()
}

fn parse_listen(value: &str) -> Result<SocketAddr> {
    SocketAddr::from_str(value.trim()).map_err(|e| {
        ServiceError::InvalidListenAddress {
            value: value.to_string(),
            details: e.to_string(),
        }
        .into()
    })
}

/// Values given on the command line, which win over the config file
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub listen: Option<String>,
    pub log_format: Option<LogFormat>,
}

/// Effective service configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceConfig {
    pub listen: SocketAddr,
    pub max_concurrent_evaluations: usize,
    pub memoize_evaluations: bool,
    pub policy_timeout: Duration,
    pub github_timeout: Duration,
    pub comment_when_clean: bool,
    pub log_format: LogFormat,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            listen: SocketAddr::from(([0, 0, 0, 0], 8080)),
            max_concurrent_evaluations: DEFAULT_MAX_CONCURRENT_EVALUATIONS,
            memoize_evaluations: false,
            policy_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECONDS),
            github_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECONDS),
            comment_when_clean: false,
            log_format: LogFormat::Text,
        }
    }
}

impl ServiceConfig {
    /// Merges defaults, the config file and command-line overrides
    ///
    /// Precedence: command line > config file > defaults.
    pub fn resolve(file: Option<&ConfigFile>, overrides: &ConfigOverrides) -> Result<Self> {
        let defaults = Self::default();
        let empty = ConfigFile::default();
        let file = file.unwrap_or(&empty);
        validate_config(file)?;

        let listen = match overrides.listen.as_deref().or(file.listen.as_deref()) {
            Some(value) => parse_listen(value)?,
            None => defaults.listen,
        };

        let log_format = match (overrides.log_format, file.log_format.as_deref()) {
            (Some(format), _) => format,
            (None, Some(format)) => LogFormat::from_str(format)
                .map_err(|e| invalid("log_format", &e, "Use 'text' or 'json'"))?,
            (None, None) => defaults.log_format,
        };

        Ok(Self {
            listen,
            max_concurrent_evaluations: file
                .max_concurrent_evaluations
                .unwrap_or(defaults.max_concurrent_evaluations),
            memoize_evaluations: file
                .memoize_evaluations
                .unwrap_or(defaults.memoize_evaluations),
            policy_timeout: file
                .policy_timeout_seconds
                .map(Duration::from_secs)
                .unwrap_or(defaults.policy_timeout),
            github_timeout: file
                .github_timeout_seconds
                .map(Duration::from_secs)
                .unwrap_or(defaults.github_timeout),
            comment_when_clean: file
                .comment_when_clean
                .unwrap_or(defaults.comment_when_clean),
            log_format,
        })
    }
}
