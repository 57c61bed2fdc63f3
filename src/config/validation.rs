//! Configuration validation.
//!
//! Serde handles syntax; this module checks values. Every problem found is
//! reported, not just the first one.

use std::net::SocketAddr;

use axum::http::HeaderValue;
use thiserror::Error;
use url::Url;

use crate::config::schema::ProxyConfig;

/// A single semantic problem in a [`ProxyConfig`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{field}: {message}")]
pub struct ValidationError {
    /// Dotted path of the offending field, e.g. `upstream.base_url`.
    pub field: &'static str,
    pub message: String,
}

impl ValidationError {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// Validate a configuration, collecting all errors.
pub fn validate_config(config: &ProxyConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::new(
            "listener.bind_address",
            format!("'{}' is not a socket address", config.listener.bind_address),
        ));
    }

    validate_upstream(config, &mut errors);
    validate_origin(&config.cors.allowed_origin, &mut errors);

    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::new(
            "observability.metrics_address",
            format!("'{}' is not a socket address", config.observability.metrics_address),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn validate_upstream(config: &ProxyConfig, errors: &mut Vec<ValidationError>) {
    let upstream = &config.upstream;

    match Url::parse(&upstream.base_url) {
        Ok(url) if matches!(url.scheme(), "http" | "https") && url.has_host() => {}
        Ok(_) => errors.push(ValidationError::new(
            "upstream.base_url",
            "must be an absolute http or https URL",
        )),
        Err(e) => errors.push(ValidationError::new("upstream.base_url", e.to_string())),
    }

    if !upstream.report_path.starts_with('/') {
        errors.push(ValidationError::new("upstream.report_path", "must start with '/'"));
    }
    if upstream.connect_timeout_secs == 0 {
        errors.push(ValidationError::new("upstream.connect_timeout_secs", "must be > 0"));
    }
    if upstream.request_timeout_secs == 0 {
        errors.push(ValidationError::new("upstream.request_timeout_secs", "must be > 0"));
    }
}

fn validate_origin(origin: &str, errors: &mut Vec<ValidationError>) {
    const FIELD: &str = "cors.allowed_origin";

    if HeaderValue::from_str(origin).is_err() {
        errors.push(ValidationError::new(FIELD, "not a valid header value"));
        return;
    }

    // Browsers send the origin without a path or trailing slash, and the
    // comparison is exact.
    match Url::parse(origin) {
        Ok(url) => {
            if !matches!(url.scheme(), "http" | "https") || !url.has_host() {
                errors.push(ValidationError::new(FIELD, "must be an http or https origin"));
            } else if url.origin().ascii_serialization() != origin {
                errors.push(ValidationError::new(
                    FIELD,
                    format!("must be a bare origin like '{}'", url.origin().ascii_serialization()),
                ));
            }
        }
        Err(e) => errors.push(ValidationError::new(FIELD, e.to_string())),
    }
}
