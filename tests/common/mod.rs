//! Shared utilities for integration testing.

#![allow(dead_code)]

use std::future::Future;
use std::net::SocketAddr;
use std::time::Duration;

use axum::{http::StatusCode, routing::get, Router};
use balance_proxy::config::ProxyConfig;
use balance_proxy::http::HttpServer;
use balance_proxy::lifecycle::Shutdown;
use tokio::net::TcpListener;

pub const REPORT_PATH: &str = "/api.xro/2.0/Reports/BalanceSheet";
pub const ALLOWED_ORIGIN: &str = "http://localhost:5000";

pub fn fixture() -> &'static str {
    include_str!("../fixtures/balance_sheet.json")
}

pub fn fixture_json() -> serde_json::Value {
    serde_json::from_str(fixture()).unwrap()
}

/// Serve `router` on an ephemeral local port.
pub async fn serve(router: Router) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let _ = axum::serve(listener, router).await;
    });
    addr
}

/// Start an upstream that answers the report path with a fixed response.
pub async fn start_mock_upstream(status: StatusCode, body: &'static str) -> SocketAddr {
    serve(Router::new().route(
        REPORT_PATH,
        get(move || async move {
            (status, [("content-type", "application/json")], body)
        }),
    ))
    .await
}

/// Start an upstream whose response is computed per request.
pub async fn start_programmable_upstream<F, Fut>(f: F) -> SocketAddr
where
    F: Fn() -> Fut + Clone + Send + Sync + 'static,
    Fut: Future<Output = (StatusCode, String)> + Send + 'static,
{
    serve(Router::new().route(
        REPORT_PATH,
        get(move || {
            let f = f.clone();
            async move {
                let (status, body) = f().await;
                (status, [("content-type", "application/json")], body)
            }
        }),
    ))
    .await
}

/// An address nothing is listening on.
pub async fn closed_port() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    addr
}

/// Proxy configuration pointed at `upstream`, with short timeouts.
pub fn proxy_config(upstream: SocketAddr) -> ProxyConfig {
    let mut config = ProxyConfig::default();
    config.listener.bind_address = "127.0.0.1:0".into();
    config.upstream.base_url = format!("http://{}", upstream);
    config.upstream.connect_timeout_secs = 1;
    config.upstream.request_timeout_secs = 1;
    config.cors.allowed_origin = ALLOWED_ORIGIN.into();
    config
}

/// Start the proxy on an ephemeral port. Keep the `Shutdown` alive for the
/// duration of the test.
pub async fn start_proxy(config: ProxyConfig) -> (SocketAddr, Shutdown) {
    let shutdown = Shutdown::new();
    let server = HttpServer::new(config).unwrap();
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let server_shutdown = shutdown.subscribe();

    tokio::spawn(async move {
        let _ = server.run(listener, server_shutdown).await;
    });

    (addr, shutdown)
}

pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .pool_max_idle_per_host(0)
        .no_proxy()
        .timeout(Duration::from_secs(10))
        .build()
        .unwrap()
}
