//! Demo route handlers.
//!
//! - `/`        : fixed greeting (also the fallback for unrouted paths)
//! - `/err`     : always 404 with an empty body
//! - `/test`    : fixed message; bumps `test_metric` when `Type: test` is sent
//! - `/metrics` : Prometheus text format

use axum::{
    extract::State,
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
};
use tally_core::text;

use crate::app_state::AppState;

pub const HELLO_BODY: &str = "Hello from example application.\n";
pub const TEST_BODY: &str = "Test message\n";

/// Header checked by `/test`.
pub const TYPE_HEADER: &str = "type";

pub async fn root() -> impl IntoResponse {
    (StatusCode::OK, HELLO_BODY)
}

pub async fn not_found() -> impl IntoResponse {
    StatusCode::NOT_FOUND
}

pub async fn test(State(state): State<AppState>, headers: HeaderMap) -> impl IntoResponse {
    // Only the first value counts, compared exactly.
    if headers
        .get(TYPE_HEADER)
        .is_some_and(|v| v.as_bytes() == b"test")
    {
        state.metrics().test_metric.inc();
    }
    (StatusCode::OK, TEST_BODY)
}

pub async fn metrics(State(state): State<AppState>) -> Response {
    let body = state.registry().export();

    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, text::CONTENT_TYPE)],
        body,
    )
        .into_response()
}
