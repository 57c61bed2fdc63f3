//! Outbound client for the balance-sheet report.

use std::time::Duration;

use axum::http::StatusCode;
use serde_json::Value;
use thiserror::Error;
use url::Url;

use crate::config::UpstreamConfig;

/// Failure of a single outbound call.
#[derive(Debug, Error)]
pub enum UpstreamError {
    /// The upstream answered with a non-2xx status.
    #[error("upstream returned {0}")]
    Status(StatusCode),

    #[error("upstream request timed out")]
    Timeout,

    #[error("upstream transport error: {0}")]
    Transport(#[source] reqwest::Error),

    /// The body was not valid JSON.
    #[error("upstream body could not be decoded: {0}")]
    Decode(#[source] reqwest::Error),

    #[error("invalid upstream URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("failed to build HTTP client: {0}")]
    Build(#[source] reqwest::Error),
}

impl UpstreamError {
    /// Short label used for metrics and log fields.
    pub fn kind(&self) -> &'static str {
        match self {
            UpstreamError::Status(_) => "status",
            UpstreamError::Timeout => "timeout",
            UpstreamError::Transport(_) => "transport",
            UpstreamError::Decode(_) => "decode",
            UpstreamError::InvalidUrl(_) => "invalid_url",
            UpstreamError::Build(_) => "build",
        }
    }

    fn from_reqwest(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            UpstreamError::Timeout
        } else if err.is_decode() {
            UpstreamError::Decode(err)
        } else {
            UpstreamError::Transport(err)
        }
    }
}

/// Fetches the report from the accounting API.
///
/// Cloning is cheap; the inner `reqwest::Client` shares its connection pool.
#[derive(Debug, Clone)]
pub struct UpstreamClient {
    http: reqwest::Client,
    report_url: Url,
}

impl UpstreamClient {
    pub fn new(config: &UpstreamConfig) -> Result<Self, UpstreamError> {
        let report_url = report_url(&config.base_url, &config.report_path)?;
        let http = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .timeout(Duration::from_secs(config.request_timeout_secs))
            // A 3xx from the upstream is a non-2xx answer, not a hop to follow.
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .map_err(UpstreamError::Build)?;

        Ok(Self { http, report_url })
    }

    /// The resolved report URL.
    pub fn report_url(&self) -> &Url {
        &self.report_url
    }

    /// Issue one GET against the report URL and decode the JSON body.
    ///
    /// No query, headers or credentials are added, and nothing is retried.
    pub async fn fetch_report(&self) -> Result<Value, UpstreamError> {
        let response = self
            .http
            .get(self.report_url.clone())
            .send()
            .await
            .map_err(UpstreamError::from_reqwest)?;

        let status = response.status();
        if !status.is_success() {
            return Err(UpstreamError::Status(status));
        }

        response.json::<Value>().await.map_err(UpstreamError::from_reqwest)
    }
}

/// Join the report path onto the base address.
///
/// A base with a path prefix (`http://host/xero`) keeps that prefix.
pub fn report_url(base_url: &str, report_path: &str) -> Result<Url, UpstreamError> {
    let mut base = Url::parse(base_url)?;
    if !base.path().ends_with('/') {
        let path = format!("{}/", base.path());
        base.set_path(&path);
    }
    Ok(base.join(report_path.trim_start_matches('/'))?)
}
