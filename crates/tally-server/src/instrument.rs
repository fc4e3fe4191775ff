//! Request counting middleware.
//!
//! Wraps a route so that every completed request bumps a `{code, method}`
//! counter exactly once. A panicking handler is answered with 500 and
//! counted as such. Requests dropped before the handler finishes (client
//! disconnect) are not counted.

use std::any::Any;
use std::panic::AssertUnwindSafe;

use axum::{
    extract::{Request, State},
    http::{Method, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use futures_util::FutureExt;
use tally_core::CounterVec;

/// Use with `axum::middleware::from_fn_with_state(counter, count_requests)`.
/// The counter must have the label schema `[code, method]`.
pub async fn count_requests(
    State(counter): State<CounterVec>,
    req: Request,
    next: Next,
) -> Response {
    let method = method_label(req.method());
    let path = req.uri().path().to_owned();

    let response = match AssertUnwindSafe(next.run(req)).catch_unwind().await {
        Ok(response) => response,
        Err(panic) => {
            tracing::error!(%method, %path, panic = %panic_message(&*panic), "handler panicked");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    };

    let status = response.status();
    let code = status.as_str();
    if let Err(err) = counter.inc(&[code, method]) {
        tracing::error!(error = %err, metric = %counter.desc().name, "request counter mis-wired");
        debug_assert!(false, "request counter {} mis-wired: {err}", counter.desc().name);
    }
    tracing::debug!(%method, %path, status = status.as_u16(), "request served");

    response
}

/// Standard methods keep their name; extension methods collapse into
/// `unknown` so clients cannot mint new series.
pub fn method_label(method: &Method) -> &'static str {
    match *method {
        Method::GET => "GET",
        Method::HEAD => "HEAD",
        Method::POST => "POST",
        Method::PUT => "PUT",
        Method::DELETE => "DELETE",
        Method::CONNECT => "CONNECT",
        Method::OPTIONS => "OPTIONS",
        Method::TRACE => "TRACE",
        Method::PATCH => "PATCH",
        _ => "unknown",
    }
}

fn panic_message(panic: &(dyn Any + Send)) -> &str {
    if let Some(s) = panic.downcast_ref::<&'static str>() {
        s
    } else if let Some(s) = panic.downcast_ref::<String>() {
        s.as_str()
    } else {
        "non-string panic payload"
    }
}
