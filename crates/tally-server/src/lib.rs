//! tally server library entry.
//!
//! This crate wires the metric registry, the request instrumentation, and the
//! demo routes into an axum application. It is consumed by the binary
//! (`main.rs`) and by integration tests.

pub mod app_state;
pub mod cli;
pub mod config;
pub mod instrument;
pub mod metrics;
pub mod router;
pub mod routes;
pub mod server;
