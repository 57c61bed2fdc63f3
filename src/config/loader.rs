//! Configuration loading from disk and the environment.

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::config::schema::ProxyConfig;
use crate::config::validation::{validate_config, ValidationError};

pub const ENV_BIND_ADDRESS: &str = "BALANCE_PROXY_BIND_ADDRESS";
pub const ENV_UPSTREAM_URL: &str = "BALANCE_PROXY_UPSTREAM_URL";
pub const ENV_ALLOWED_ORIGIN: &str = "BALANCE_PROXY_ALLOWED_ORIGIN";
pub const ENV_LOG_LEVEL: &str = "BALANCE_PROXY_LOG_LEVEL";

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation failed: {}", join(.0))]
    Validation(Vec<ValidationError>),
}

fn join(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Values that replace file settings when present.
///
/// Filled from the environment and from command-line flags; `None` leaves
/// the underlying setting untouched.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub bind_address: Option<String>,
    pub upstream_url: Option<String>,
    pub allowed_origin: Option<String>,
    pub log_level: Option<String>,
}

impl Overrides {
    /// Collect overrides from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Collect overrides through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        Self {
            bind_address: get(ENV_BIND_ADDRESS),
            upstream_url: get(ENV_UPSTREAM_URL),
            allowed_origin: get(ENV_ALLOWED_ORIGIN),
            log_level: get(ENV_LOG_LEVEL),
        }
    }

    /// Apply these overrides on top of `config`.
    pub fn apply(self, config: &mut ProxyConfig) {
        if let Some(addr) = self.bind_address {
            config.listener.bind_address = addr;
        }
        if let Some(url) = self.upstream_url {
            config.upstream.base_url = url;
        }
        if let Some(origin) = self.allowed_origin {
            config.cors.allowed_origin = origin;
        }
        if let Some(level) = self.log_level {
            config.observability.log_level = level;
        }
    }
}

/// Parse a configuration from TOML text without validating it.
pub fn parse_config(content: &str) -> Result<ProxyConfig, ConfigError> {
    Ok(toml::from_str(content)?)
}

/// Load and validate configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<ProxyConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    let config = parse_config(&content)?;

    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

/// Build the effective configuration.
///
/// Precedence, lowest first: defaults, the optional TOML file, then each
/// override layer in order. The merged result is validated once.
pub fn resolve_config(
    path: Option<&Path>,
    layers: impl IntoIterator<Item = Overrides>,
) -> Result<ProxyConfig, ConfigError> {
    let mut config = match path {
        Some(path) => parse_config(&fs::read_to_string(path)?)?,
        None => ProxyConfig::default(),
    };

    for layer in layers {
        layer.apply(&mut config);
    }

    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}
