//! Request handlers.

use std::time::Instant;

use axum::{extract::State, http::HeaderMap, Json};
use serde::Serialize;
use serde_json::Value;

use crate::http::request::request_id;
use crate::http::response::ApiError;
use crate::http::server::AppState;
use crate::observability::metrics;
use crate::upstream::UpstreamError;

/// `GET /balancesheet`
///
/// Forwards to the upstream report endpoint and relays its JSON body.
pub async fn balance_sheet(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<Value>, ApiError> {
    let start_time = Instant::now();
    let request_id = request_id(&headers);

    tracing::debug!(
        request_id = %request_id,
        upstream = %state.upstream.report_url(),
        "Fetching balance sheet"
    );

    match state.upstream.fetch_report().await {
        Ok(report) => {
            metrics::record_request(200, "ok", start_time);
            Ok(Json(report))
        }
        Err(e) => {
            metrics::record_upstream_error(e.kind());
            match &e {
                UpstreamError::Status(status) => tracing::warn!(
                    request_id = %request_id,
                    status = %status,
                    "Upstream returned error status"
                ),
                _ => tracing::error!(
                    request_id = %request_id,
                    kind = e.kind(),
                    error = %e,
                    "Upstream request failed"
                ),
            }

            let error = ApiError::from(e);
            metrics::record_request(error.status().as_u16(), "error", start_time);
            Err(error)
        }
    }
}

#[derive(Debug, Serialize)]
pub struct HealthStatus {
    pub status: &'static str,
    pub version: &'static str,
}

/// `GET /health`
pub async fn health() -> Json<HealthStatus> {
    Json(HealthStatus {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}
