//! tally core: metric families, the registry, and the text exposition renderer.
//!
//! This crate owns the metrics contract shared by the server and tests. It
//! carries no HTTP or runtime dependencies so the registry can be exercised
//! directly from unit tests and reused outside the server.
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here
//! (`#![deny(clippy::panic, clippy::unwrap_used, clippy::expect_used)]`).
//! Mis-wired label sets and unknown metric names surface as `TallyError`
//! so the caller decides how loudly to fail.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod counter;
pub mod desc;
pub mod error;
mod family;
pub mod gauge;
pub mod registry;
pub mod sample;
pub mod text;

pub use counter::{Counter, CounterVec, LabeledCounter};
pub use desc::{Descriptor, MetricKind, Opts};
pub use error::{ErrorCode, Result, TallyError};
pub use gauge::Gauge;
pub use registry::{Metric, Registry};
pub use sample::{MetricFamily, Sample, SampleValue};
