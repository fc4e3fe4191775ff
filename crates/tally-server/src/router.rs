//! Axum router wiring.
//!
//! Root and `/err` are counted in `http_requests_total`, `/test` in
//! `http_test_request_total`. `/metrics` is not instrumented.

use axum::{handler::Handler, middleware, routing::any, Router};

use crate::{app_state::AppState, instrument, routes};

pub fn build_router(state: AppState) -> Router {
    let requests = state.metrics().http_requests.clone();
    let test_requests = state.metrics().http_test_requests.clone();

    let root = routes::root.layer(middleware::from_fn_with_state(
        requests.clone(),
        instrument::count_requests,
    ));

    Router::new()
        .route("/", any(root.clone()))
        .route(
            "/err",
            any(routes::not_found).layer(middleware::from_fn_with_state(
                requests,
                instrument::count_requests,
            )),
        )
        .route(
            "/test",
            any(routes::test).layer(middleware::from_fn_with_state(
                test_requests,
                instrument::count_requests,
            )),
        )
        .route("/metrics", any(routes::metrics))
        .fallback(root)
        .with_state(state)
}
