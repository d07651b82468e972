//! Error types for pgr-core

use thiserror::Error;

/// Core error type for pgrange
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// R001: Interval constructed with its lower bound above its upper bound
    #[error("[R001] Range lower bound {lower} is greater than upper bound {upper}")]
    InvertedBounds { lower: String, upper: String },

    /// R002: Set operation whose result cannot be represented as one interval
    #[error("[R002] Result of range {operation} would not be contiguous")]
    NonContiguous { operation: &'static str },
}

/// Result type alias for CoreError
pub type CoreResult<T> = Result<T, CoreError>;
