//! End-to-end route scenarios driven through the router.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    Router,
};
use tally_core::Registry;
use tally_server::{app_state::AppState, router, routes};
use tower::ServiceExt;

fn app() -> (Router, AppState) {
    let state = AppState::new(Arc::new(Registry::new())).unwrap();
    (router::build_router(state.clone()), state)
}

async fn send(app: &Router, req: Request<Body>) -> (StatusCode, String) {
    let resp = app.clone().oneshot(req).await.unwrap();
    let status = resp.status();
    let body = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    (status, String::from_utf8(body.to_vec()).unwrap())
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

#[tokio::test]
async fn root_greets_and_counts() {
    let (app, state) = app();
    let requests = &state.metrics().http_requests;
    let before = requests.get(&["200", "GET"]).unwrap();

    let (status, body) = send(&app, get("/")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, routes::HELLO_BODY);
    assert_eq!(requests.get(&["200", "GET"]).unwrap(), before + 1);
}

#[tokio::test]
async fn unrouted_paths_fall_back_to_root() {
    let (app, state) = app();

    let (status, body) = send(&app, get("/some/other/path")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "Hello from example application.\n");
    assert_eq!(state.metrics().http_requests.get(&["200", "GET"]).unwrap(), 1);
}

#[tokio::test]
async fn err_is_always_404() {
    let (app, state) = app();

    let (status, body) = send(&app, get("/err")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body.is_empty());
    assert_eq!(state.metrics().http_requests.get(&["404", "GET"]).unwrap(), 1);
    assert_eq!(state.metrics().http_requests.get(&["200", "GET"]).unwrap(), 0);
}

#[tokio::test]
async fn method_is_recorded() {
    let (app, state) = app();

    let req = Request::builder()
        .method("POST")
        .uri("/err")
        .body(Body::empty())
        .unwrap();
    let (status, _) = send(&app, req).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(state.metrics().http_requests.get(&["404", "POST"]).unwrap(), 1);
}

#[tokio::test]
async fn test_route_with_type_header_bumps_test_metric() {
    let (app, state) = app();
    let m = state.metrics();

    let req = Request::builder()
        .uri("/test")
        .header("Type", "test")
        .body(Body::empty())
        .unwrap();
    let (status, body) = send(&app, req).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, routes::TEST_BODY);
    assert_eq!(m.test_metric.get(), 1);
    assert_eq!(m.http_test_requests.get(&["200", "GET"]).unwrap(), 1);
    // /test is not counted in the general request counter.
    assert_eq!(m.http_requests.get(&["200", "GET"]).unwrap(), 0);
}

#[tokio::test]
async fn test_route_without_type_header_leaves_test_metric() {
    let (app, state) = app();
    let m = state.metrics();

    let (status, body) = send(&app, get("/test")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "Test message\n");
    assert_eq!(m.test_metric.get(), 0);

    let req = Request::builder()
        .uri("/test")
        .header("Type", "Test")
        .body(Body::empty())
        .unwrap();
    send(&app, req).await;
    assert_eq!(m.test_metric.get(), 0);
    assert_eq!(m.http_test_requests.get(&["200", "GET"]).unwrap(), 2);
}

#[tokio::test]
async fn metrics_endpoint_lists_every_metric() {
    let (app, _state) = app();

    send(&app, get("/")).await;
    send(&app, get("/err")).await;
    let req = Request::builder()
        .uri("/test")
        .header("Type", "test")
        .body(Body::empty())
        .unwrap();
    send(&app, req).await;

    let resp = app.clone().oneshot(get("/metrics")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
        resp.headers().get(header::CONTENT_TYPE).unwrap(),
        "text/plain; version=0.0.4; charset=utf-8"
    );
    let body = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    let body = String::from_utf8(body.to_vec()).unwrap();

    let version_line = format!(
        "version{{version=\"v{}\"}} 0",
        env!("CARGO_PKG_VERSION")
    );
    for line in [
        "# TYPE http_requests_total counter",
        "http_requests_total{code=\"200\",method=\"GET\"} 1",
        "http_requests_total{code=\"404\",method=\"GET\"} 1",
        "# TYPE http_test_request_total counter",
        "http_test_request_total{code=\"200\",method=\"GET\"} 1",
        "# TYPE version gauge",
        version_line.as_str(),
        "# HELP test_metric Shows test metric gauge",
        "test_metric 1",
    ] {
        assert!(body.lines().any(|l| l == line), "missing {line:?} in\n{body}");
    }
}

#[tokio::test]
async fn metrics_endpoint_is_not_counted() {
    let (app, state) = app();

    send(&app, get("/metrics")).await;
    send(&app, get("/metrics")).await;
    let body = state.registry().export();
    assert!(!body.contains("http_requests_total{"));
    assert!(!body.contains("http_test_request_total{"));
}

#[tokio::test]
async fn concurrent_requests_are_all_counted() {
    let (app, state) = app();

    let tasks: Vec<_> = (0..64)
        .map(|_| {
            let app = app.clone();
            tokio::spawn(async move { app.oneshot(get("/")).await.unwrap().status() })
        })
        .collect();
    for t in tasks {
        assert_eq!(t.await.unwrap(), StatusCode::OK);
    }
    assert_eq!(state.metrics().http_requests.get(&["200", "GET"]).unwrap(), 64);
}

#[test]
fn registering_twice_fails() {
    let registry = Arc::new(Registry::new());
    AppState::new(Arc::clone(&registry)).unwrap();
    let err = AppState::new(registry).err().expect("second registration must fail");
    assert_eq!(err.code().as_str(), "DUPLICATE_NAME");
}
