//! pgr-query: range and array operator lowering
//!
//! This crate holds the expression tree the host query compiler hands over,
//! the table of translatable range operations, and the lowering pass that
//! rewrites recognized operations into native operator nodes for a SQL
//! generator to render.

pub mod error;
pub mod expr;
pub mod lowering;
pub mod operator;
pub mod registry;
pub mod render;

#[cfg(any(test, feature = "test-support"))]
pub mod test_utils;

pub use error::{QueryError, QueryResult};
pub use expr::{BinaryOp, Expr, PatternOp, Quantifier, SubqueryOperator};
pub use lowering::{lower, ExpressionMatcher, RewriteRule};
pub use operator::{OperatorNode, OperatorTag};
pub use registry::{
    OperandKind, OperationName, OperationRegistry, OperationSignature, Orientation, Translation,
};
pub use render::{ExprVisitor, SqlText};
