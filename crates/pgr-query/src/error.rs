//! Error types for pgr-query

use thiserror::Error;

/// Lowering error type
///
/// A node that matches no rewrite rule is not an error; rules report that as
/// `None`. Only broken internal invariants surface here.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QueryError {
    /// Q001: A registered translation produced a node whose type cannot be derived
    #[error("[Q001] Internal inconsistency while lowering '{operation}': {message}")]
    InternalInconsistency { operation: String, message: String },
}

/// Result type alias for QueryError
pub type QueryResult<T> = Result<T, QueryError>;
