//! Startup orchestration.
//!
//! Config is already validated when it arrives here. Order: metrics
//! exporter, server assembly, listener bind, serve. Any error is fatal.

use std::net::SocketAddr;

use thiserror::Error;
use tokio::net::TcpListener;
use tokio::sync::broadcast;

use crate::config::ProxyConfig;
use crate::http::{HttpServer, ServerError};
use crate::lifecycle::Shutdown;
use crate::observability::metrics;

#[derive(Debug, Error)]
pub enum StartupError {
    #[error(transparent)]
    Server(#[from] ServerError),

    #[error("metrics exporter: {0}")]
    Metrics(#[from] metrics_exporter_prometheus::BuildError),

    #[error("invalid address '{0}'")]
    Address(String),

    #[error("listener: {0}")]
    Io(#[from] std::io::Error),
}

/// Start the proxy and serve until SIGINT/SIGTERM.
pub async fn run(config: ProxyConfig) -> Result<(), StartupError> {
    let shutdown = Shutdown::new();
    // Subscribe first: broadcast drops sends that have no receiver.
    let receiver = shutdown.subscribe();
    shutdown.trigger_on_signal();
    run_until(config, receiver).await
}

/// Start the proxy and serve until `shutdown` receives.
///
/// A trigger sent after the receiver was created but before the listener
/// is bound still stops the server as soon as it starts serving.
pub async fn run_until(
    config: ProxyConfig,
    shutdown: broadcast::Receiver<()>,
) -> Result<(), StartupError> {
    tracing::info!(
        bind_address = %config.listener.bind_address,
        upstream = %config.upstream.base_url,
        request_timeout_secs = config.upstream.request_timeout_secs,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        let addr: SocketAddr = parse_addr(&config.observability.metrics_address)?;
        metrics::init_metrics(addr)?;
    }

    let bind_address = parse_addr(&config.listener.bind_address)?;
    let server = HttpServer::new(config)?;

    let listener = TcpListener::bind(bind_address).await?;
    tracing::info!(
        address = %listener.local_addr()?,
        "Listening for connections"
    );

    server.run(listener, shutdown).await?;
    Ok(())
}

fn parse_addr(addr: &str) -> Result<SocketAddr, StartupError> {
    addr.parse()
        .map_err(|_| StartupError::Address(addr.to_string()))
}
