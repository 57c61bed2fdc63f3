//! Cross-origin policy.
//!
//! One exact origin is allowed, with credentials. Browsers reject wildcard
//! `*` method/header lists on credentialed requests, so "all methods and
//! headers" is expressed by mirroring what the preflight asks for.

use std::time::Duration;

use axum::http::header::InvalidHeaderValue;
use axum::http::HeaderValue;
use tower_http::cors::{AllowHeaders, AllowMethods, CorsLayer};

use crate::config::CorsConfig;

/// Build the CORS layer for the configured origin.
pub fn cors_layer(config: &CorsConfig) -> Result<CorsLayer, InvalidHeaderValue> {
    let origin = HeaderValue::from_str(&config.allowed_origin)?;

    Ok(CorsLayer::new()
        .allow_origin(origin)
        .allow_credentials(true)
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
        .max_age(Duration::from_secs(config.max_age_secs)))
}
