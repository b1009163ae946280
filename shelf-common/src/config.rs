//! Configuration loading and service endpoint resolution

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info, warn};

/// Compiled default address of the recommendation service
pub const DEFAULT_SERVICE_URL: &str = "http://127.0.0.1:8000";

/// Environment variable overriding the recommendation service address
pub const SERVICE_URL_ENV: &str = "SHELF_SERVICE_URL";

/// Compiled default listen address for the wizard adapter
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:5780";

/// Compiled default per-request timeout for outbound calls
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Contents of `config.toml`
///
/// Every field is optional; anything missing falls back to compiled defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TomlConfig {
    /// Base URL of the recommendation service
    pub service_url: Option<String>,
    /// Listen address for the wizard adapter
    pub bind_addr: Option<String>,
    /// Per-request timeout for search and recommendation calls
    pub request_timeout_secs: Option<u64>,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// `[logging]` table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

/// Platform config file location (`<config dir>/shelfwise/config.toml`)
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("shelfwise").join("config.toml"))
}

/// Load a TOML config file
///
/// A missing file is not an error: a warning is logged and defaults are
/// returned. A file that exists but cannot be parsed is a config error.
pub fn load_toml_config(path: &Path) -> Result<TomlConfig> {
    if !path.exists() {
        warn!(
            "Config file not found at {}, using compiled defaults",
            path.display()
        );
        return Ok(TomlConfig::default());
    }

    let content = std::fs::read_to_string(path)?;
    let config: TomlConfig = toml::from_str(&content).map_err(|e| {
        Error::Config(format!("Parse TOML failed ({}): {}", path.display(), e))
    })?;

    debug!("Loaded config file {}", path.display());
    Ok(config)
}

/// Validate and normalize a service base URL
///
/// Only `http://` and `https://` are accepted. Trailing slashes are trimmed so
/// that paths can be appended with a single `/`.
pub fn normalize_service_url(raw: &str) -> Result<String> {
    let trimmed = raw.trim().trim_end_matches('/');

    if trimmed.is_empty() {
        return Err(Error::Config("Service URL is empty".to_string()));
    }

    let has_scheme = trimmed.starts_with("http://") || trimmed.starts_with("https://");
    let has_host = trimmed
        .split_once("://")
        .map(|(_, rest)| !rest.is_empty())
        .unwrap_or(false);

    if !has_scheme || !has_host {
        return Err(Error::Config(format!(
            "Service URL must be an http:// or https:// address: {}",
            raw
        )));
    }

    Ok(trimmed.to_string())
}

/// Service endpoint resolution
///
/// Priority order:
/// 1. Command-line argument (highest priority)
/// 2. Environment variable `SHELF_SERVICE_URL`
/// 3. TOML config file (`service_url`)
/// 4. Compiled default
#[derive(Debug, Clone, Default)]
pub struct ServiceEndpointResolver {
    cli_arg: Option<String>,
    toml_value: Option<String>,
}

impl ServiceEndpointResolver {
    pub fn new(cli_arg: Option<String>) -> Self {
        Self {
            cli_arg,
            toml_value: None,
        }
    }

    pub fn with_toml(mut self, config: &TomlConfig) -> Self {
        self.toml_value = config.service_url.clone();
        self
    }

    pub fn resolve(&self) -> Result<String> {
        if let Some(url) = &self.cli_arg {
            info!("Service URL from command line: {}", url);
            return normalize_service_url(url);
        }

        if let Ok(url) = std::env::var(SERVICE_URL_ENV) {
            info!("Service URL from {}: {}", SERVICE_URL_ENV, url);
            return normalize_service_url(&url);
        }

        if let Some(url) = &self.toml_value {
            info!("Service URL from config file: {}", url);
            return normalize_service_url(url);
        }

        info!("Service URL from compiled default: {}", DEFAULT_SERVICE_URL);
        Ok(DEFAULT_SERVICE_URL.to_string())
    }
}

/// Fully resolved runtime settings
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedConfig {
    pub service_url: String,
    pub bind_addr: String,
    pub request_timeout: Duration,
    pub log_level: String,
}

impl ResolvedConfig {
    /// Merge command-line overrides with the TOML file and compiled defaults
    pub fn resolve(
        cli_service_url: Option<String>,
        cli_bind_addr: Option<String>,
        toml_config: &TomlConfig,
    ) -> Result<Self> {
        let service_url = ServiceEndpointResolver::new(cli_service_url)
            .with_toml(toml_config)
            .resolve()?;

        let bind_addr = cli_bind_addr
            .or_else(|| toml_config.bind_addr.clone())
            .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());

        let timeout_secs = toml_config
            .request_timeout_secs
            .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS);
        if timeout_secs == 0 {
            return Err(Error::Config(
                "request_timeout_secs must be greater than zero".to_string(),
            ));
        }

        Ok(Self {
            service_url,
            bind_addr,
            request_timeout: Duration::from_secs(timeout_secs),
            log_level: toml_config.logging.level.clone(),
        })
    }
}
