//! Failure injection tests: upstream errors, timeouts and outages.

use std::time::Duration;

use axum::http::{header, StatusCode};
use axum::{routing::get, Router};
use balance_proxy::http::{ErrorBody, INTERNAL_ERROR_DETAIL, UPSTREAM_ERROR_DETAIL};

mod common;

async fn get_balance_sheet(proxy: std::net::SocketAddr) -> (StatusCode, ErrorBody) {
    let res = common::client()
        .get(format!("http://{}/balancesheet", proxy))
        .send()
        .await
        .expect("Proxy unreachable");
    let status = res.status();
    let body: ErrorBody = res.json().await.expect("error body should be JSON");
    (status, body)
}

#[tokio::test]
async fn test_upstream_status_is_echoed_with_generic_detail() {
    for code in [400u16, 401, 403, 404, 429, 500, 502, 503] {
        let status = StatusCode::from_u16(code).unwrap();
        let upstream = common::start_mock_upstream(status, r#"{"Message": "upstream secret"}"#).await;
        let (proxy, shutdown) = common::start_proxy(common::proxy_config(upstream)).await;

        let (got, body) = get_balance_sheet(proxy).await;
        assert_eq!(got, status, "status {} should be echoed", code);
        assert_eq!(body.detail, UPSTREAM_ERROR_DETAIL);

        shutdown.trigger();
    }
}

#[tokio::test]
async fn test_upstream_error_body_is_not_leaked() {
    let upstream = common::start_mock_upstream(
        StatusCode::UNAUTHORIZED,
        r#"{"Type": "Unauthorized", "Detail": "token expired for tenant 42"}"#,
    )
    .await;
    let (proxy, shutdown) = common::start_proxy(common::proxy_config(upstream)).await;

    let res = common::client()
        .get(format!("http://{}/balancesheet", proxy))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 401);
    let text = res.text().await.unwrap();
    assert_eq!(text, r#"{"detail":"Error fetching data from Xero API"}"#);

    shutdown.trigger();
}

#[tokio::test]
async fn test_upstream_redirect_is_not_followed() {
    let upstream = common::serve(Router::new().route(
        common::REPORT_PATH,
        get(|| async { (StatusCode::FOUND, [(header::LOCATION, "/elsewhere")], "") }),
    ))
    .await;
    let (proxy, shutdown) = common::start_proxy(common::proxy_config(upstream)).await;

    let (status, body) = get_balance_sheet(proxy).await;
    assert_eq!(status, StatusCode::FOUND);
    assert_eq!(body.detail, UPSTREAM_ERROR_DETAIL);

    shutdown.trigger();
}

#[tokio::test]
async fn test_connection_refused_is_internal_error() {
    let upstream = common::closed_port().await;
    let (proxy, shutdown) = common::start_proxy(common::proxy_config(upstream)).await;

    let (status, body) = get_balance_sheet(proxy).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body.detail, INTERNAL_ERROR_DETAIL);

    shutdown.trigger();
}

#[tokio::test]
async fn test_upstream_timeout_is_internal_error() {
    let upstream = common::start_programmable_upstream(|| async {
        tokio::time::sleep(Duration::from_secs(3)).await;
        (StatusCode::OK, common::fixture().to_string())
    })
    .await;
    let (proxy, shutdown) = common::start_proxy(common::proxy_config(upstream)).await;

    let (status, body) = get_balance_sheet(proxy).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body.detail, INTERNAL_ERROR_DETAIL);

    shutdown.trigger();
}

#[tokio::test]
async fn test_malformed_upstream_body_is_internal_error() {
    let upstream = common::start_mock_upstream(StatusCode::OK, "<html>maintenance</html>").await;
    let (proxy, shutdown) = common::start_proxy(common::proxy_config(upstream)).await;

    let (status, body) = get_balance_sheet(proxy).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body.detail, INTERNAL_ERROR_DETAIL);

    shutdown.trigger();
}

#[tokio::test]
async fn test_upstream_recovery_needs_no_restart() {
    let healthy = std::sync::Arc::new(std::sync::atomic::AtomicBool::new(false));
    let flag = healthy.clone();
    let upstream = common::start_programmable_upstream(move || {
        let flag = flag.clone();
        async move {
            if flag.load(std::sync::atomic::Ordering::SeqCst) {
                (StatusCode::OK, common::fixture().to_string())
            } else {
                (StatusCode::SERVICE_UNAVAILABLE, "down".to_string())
            }
        }
    })
    .await;
    let (proxy, shutdown) = common::start_proxy(common::proxy_config(upstream)).await;
    let url = format!("http://{}/balancesheet", proxy);

    let res = common::client().get(&url).send().await.unwrap();
    assert_eq!(res.status(), 503);

    healthy.store(true, std::sync::atomic::Ordering::SeqCst);
    let res = common::client().get(&url).send().await.unwrap();
    assert_eq!(res.status(), 200);

    shutdown.trigger();
}

#[tokio::test]
async fn test_unreachable_upstream_during_startup_is_not_fatal() {
    let mut config = common::proxy_config(common::closed_port().await);
    config.upstream.base_url = "http://upstream.invalid:3000".into();
    let (proxy, shutdown) = common::start_proxy(config).await;

    let (status, body) = get_balance_sheet(proxy).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body.detail, INTERNAL_ERROR_DETAIL);

    let res = common::client()
        .get(format!("http://{}/health", proxy))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 200);

    shutdown.trigger();
}
