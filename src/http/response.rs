//! Caller-visible error responses.
//!
//! Upstream failures are collapsed into two shapes, both rendered as
//! `{"detail": "<message>"}`:
//! - a non-2xx upstream status is echoed back with a fixed message
//! - everything else becomes 500 "Internal Server Error"
//!
//! The upstream's own error body is never forwarded.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::upstream::UpstreamError;

pub const UPSTREAM_ERROR_DETAIL: &str = "Error fetching data from Xero API";
pub const INTERNAL_ERROR_DETAIL: &str = "Internal Server Error";

/// JSON error body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub detail: String,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ApiError {
    /// Upstream answered with this non-2xx status.
    #[error("Error fetching data from Xero API")]
    Upstream(StatusCode),

    #[error("Internal Server Error")]
    Internal,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Upstream(status) => *status,
            ApiError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<UpstreamError> for ApiError {
    fn from(err: UpstreamError) -> Self {
        match err {
            UpstreamError::Status(status) => ApiError::Upstream(status),
            _ => ApiError::Internal,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            detail: self.to_string(),
        };
        (self.status(), Json(body)).into_response()
    }
}
