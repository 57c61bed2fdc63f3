//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create the Axum Router from explicit startup configuration
//! - Wire up middleware (request ID, tracing, CORS)
//! - Bind server to listener and serve until shutdown

use std::sync::Arc;

use axum::{
    body::Body,
    http::{header::InvalidHeaderValue, Request},
    routing::get,
    Router,
};
use thiserror::Error;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower::ServiceBuilder;
use tower_http::{
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};

use crate::config::ProxyConfig;
use crate::http::cors::cors_layer;
use crate::http::handlers::{balance_sheet, health};
use crate::http::request::{request_id, MakeRequestUuidV4, X_REQUEST_ID};
use crate::upstream::{UpstreamClient, UpstreamError};

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub upstream: Arc<UpstreamClient>,
}

/// Errors while assembling the server.
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("upstream client: {0}")]
    Upstream(#[from] UpstreamError),

    #[error("allowed origin is not a valid header value: {0}")]
    Origin(#[from] InvalidHeaderValue),
}

/// HTTP server for the balance-sheet proxy.
pub struct HttpServer {
    router: Router,
    config: ProxyConfig,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: ProxyConfig) -> Result<Self, ServerError> {
        let upstream = UpstreamClient::new(&config.upstream)?;

        tracing::info!(
            upstream = %upstream.report_url(),
            allowed_origin = %config.cors.allowed_origin,
            "Upstream client ready"
        );

        let state = AppState {
            upstream: Arc::new(upstream),
        };

        let router = Self::build_router(&config, state)?;
        Ok(Self { router, config })
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(config: &ProxyConfig, state: AppState) -> Result<Router, ServerError> {
        let cors = cors_layer(&config.cors)?;

        let middleware = ServiceBuilder::new()
            .layer(SetRequestIdLayer::new(X_REQUEST_ID, MakeRequestUuidV4))
            .layer(TraceLayer::new_for_http().make_span_with(|request: &Request<Body>| {
                tracing::info_span!(
                    "request",
                    method = %request.method(),
                    uri = %request.uri(),
                    request_id = %request_id(request.headers()),
                )
            }))
            .layer(PropagateRequestIdLayer::new(X_REQUEST_ID))
            .layer(cors);

        Ok(Router::new()
            .route("/balancesheet", get(balance_sheet))
            .route("/health", get(health))
            .with_state(state)
            .layer(middleware))
    }

    /// Run the server, accepting connections until `shutdown` fires.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// The assembled router, for embedding or in-process testing.
    pub fn into_router(self) -> Router {
        self.router
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &ProxyConfig {
        &self.config
    }
}
