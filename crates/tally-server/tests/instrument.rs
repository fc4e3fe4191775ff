//! The counting middleware in isolation.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use axum::{
    body::Body,
    http::{Request, StatusCode},
    middleware,
    response::IntoResponse,
    routing::any,
    Router,
};
use tally_core::{CounterVec, Opts, Registry};
use tally_server::instrument::count_requests;
use tally_server::metrics::REQUEST_LABELS;
use tower::ServiceExt;

fn counter(registry: &Registry) -> CounterVec {
    registry
        .register_counter_vec(Opts::new("wrapped_total", "wrapped"), &REQUEST_LABELS)
        .unwrap()
}

fn wrap(router: Router, counter: &CounterVec) -> Router {
    router.route_layer(middleware::from_fn_with_state(
        counter.clone(),
        count_requests,
    ))
}

async fn call(app: &Router, method: &str, uri: &str) -> StatusCode {
    let req = Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    app.clone().oneshot(req).await.unwrap().status()
}

async fn boom() -> &'static str {
    panic!("handler exploded")
}

async fn teapot() -> impl IntoResponse {
    (StatusCode::IM_A_TEAPOT, "short and stout")
}

async fn implicit() -> &'static str {
    "no status set"
}

#[tokio::test]
async fn panicking_handler_counts_as_500() {
    let registry = Registry::new();
    let c = counter(&registry);
    let app = wrap(Router::new().route("/boom", any(boom)), &c);

    assert_eq!(call(&app, "GET", "/boom").await, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(c.get(&["500", "GET"]).unwrap(), 1);
}

#[tokio::test]
async fn status_written_by_handler_is_recorded() {
    let registry = Registry::new();
    let c = counter(&registry);
    let app = wrap(Router::new().route("/pot", any(teapot)), &c);

    assert_eq!(call(&app, "PUT", "/pot").await, StatusCode::IM_A_TEAPOT);
    assert_eq!(c.get(&["418", "PUT"]).unwrap(), 1);
}

#[tokio::test]
async fn implicit_status_is_200() {
    let registry = Registry::new();
    let c = counter(&registry);
    let app = wrap(Router::new().route("/", any(implicit)), &c);

    call(&app, "GET", "/").await;
    call(&app, "HEAD", "/").await;
    assert_eq!(c.get(&["200", "GET"]).unwrap(), 1);
    assert_eq!(c.get(&["200", "HEAD"]).unwrap(), 1);
}

#[tokio::test]
async fn extension_methods_share_one_series() {
    let registry = Registry::new();
    let c = counter(&registry);
    let app = wrap(Router::new().route("/", any(implicit)), &c);

    call(&app, "PURGE", "/").await;
    call(&app, "BREW", "/").await;
    assert_eq!(c.get(&["200", "unknown"]).unwrap(), 2);

    let body = registry.export();
    assert_eq!(body.lines().filter(|l| l.starts_with("wrapped_total{")).count(), 1);
}

#[tokio::test]
async fn each_request_counts_once() {
    let registry = Registry::new();
    let c = counter(&registry);
    let app = wrap(Router::new().route("/", any(implicit)), &c);

    for _ in 0..10 {
        call(&app, "GET", "/").await;
    }
    assert_eq!(c.get(&["200", "GET"]).unwrap(), 10);
}

#[cfg(debug_assertions)]
#[tokio::test]
#[should_panic(expected = "mis-wired")]
async fn mis_wired_counter_fails_loudly() {
    let registry = Registry::new();
    let c = registry
        .register_counter_vec(Opts::new("one_label_total", "wrong schema"), &["code"])
        .unwrap();
    let app = wrap(Router::new().route("/", any(implicit)), &c);

    call(&app, "GET", "/").await;
}
