//! Shared error type across tally crates.

use thiserror::Error;

use crate::desc::MetricKind;

/// Stable error codes, used in logs and tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    DuplicateName,
    UnknownMetric,
    LabelCardinality,
    KindMismatch,
    InvalidName,
    BadConfig,
    Internal,
}

impl ErrorCode {
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorCode::DuplicateName => "DUPLICATE_NAME",
            ErrorCode::UnknownMetric => "UNKNOWN_METRIC",
            ErrorCode::LabelCardinality => "LABEL_CARDINALITY",
            ErrorCode::KindMismatch => "KIND_MISMATCH",
            ErrorCode::InvalidName => "INVALID_NAME",
            ErrorCode::BadConfig => "BAD_CONFIG",
            ErrorCode::Internal => "INTERNAL",
        }
    }
}

/// Shared result type.
pub type Result<T> = std::result::Result<T, TallyError>;

/// Unified error type used by core and server.
#[derive(Debug, Error)]
pub enum TallyError {
    #[error("metric already registered: {0}")]
    DuplicateName(String),
    #[error("unknown metric: {0}")]
    UnknownMetric(String),
    #[error("metric {name} expects {expected} label values, got {got}")]
    LabelCardinality {
        name: String,
        expected: usize,
        got: usize,
    },
    #[error("metric {name} is not a {}", .expected.as_str())]
    KindMismatch { name: String, expected: MetricKind },
    #[error("invalid name: {0}")]
    InvalidName(String),
    #[error("bad config: {0}")]
    BadConfig(String),
    #[error("internal: {0}")]
    Internal(String),
}

impl TallyError {
    pub fn code(&self) -> ErrorCode {
        match self {
            TallyError::DuplicateName(_) => ErrorCode::DuplicateName,
            TallyError::UnknownMetric(_) => ErrorCode::UnknownMetric,
            TallyError::LabelCardinality { .. } => ErrorCode::LabelCardinality,
            TallyError::KindMismatch { .. } => ErrorCode::KindMismatch,
            TallyError::InvalidName(_) => ErrorCode::InvalidName,
            TallyError::BadConfig(_) => ErrorCode::BadConfig,
            TallyError::Internal(_) => ErrorCode::Internal,
        }
    }
}
