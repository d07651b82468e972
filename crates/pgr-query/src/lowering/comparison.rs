//! Relational comparisons between two ranges
//!
//! `a < b` over ranges is a generic comparison node, not a named operation,
//! so it bypasses the registry and maps straight to the comparison tag.

use super::RewriteRule;
use crate::error::QueryResult;
use crate::expr::Expr;
use crate::operator::OperatorNode;
use crate::registry::OperationRegistry;
use pgr_core::RuntimeType;
use std::sync::Arc;

/// Lowers comparison nodes whose operands are both ranges
#[derive(Debug, Clone, Copy, Default)]
pub struct RangeComparison;

impl RewriteRule for RangeComparison {
    fn name(&self) -> &'static str {
        "range_comparison"
    }

    fn rewrite(&self, expr: &Expr, _registry: &OperationRegistry) -> QueryResult<Option<Expr>> {
        let Expr::Binary { op, left, right } = expr else {
            return Ok(None);
        };
        let Some(tag) = op.comparison_tag() else {
            return Ok(None);
        };
        if !(left.is_range() && right.is_range()) {
            return Ok(None);
        }

        Ok(Some(Expr::Operator(OperatorNode::new(
            tag,
            Arc::clone(left),
            Arc::clone(right),
            RuntimeType::Bool,
        ))))
    }
}
