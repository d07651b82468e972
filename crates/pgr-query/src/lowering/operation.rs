//! Named range operation calls: `range.Contains(x)`, `a.Overlaps(b)`, ...

use super::RewriteRule;
use crate::error::{QueryError, QueryResult};
use crate::expr::Expr;
use crate::operator::OperatorNode;
use crate::registry::{
    OperandKind, OperationName, OperationRegistry, OperationSignature, Orientation,
};
use pgr_core::RuntimeType;
use std::sync::Arc;

/// Looks two-argument calls up in the operation registry
#[derive(Debug, Clone, Copy, Default)]
pub struct OperationCall;

impl RewriteRule for OperationCall {
    fn name(&self) -> &'static str {
        "operation_call"
    }

    fn rewrite(&self, expr: &Expr, registry: &OperationRegistry) -> QueryResult<Option<Expr>> {
        let Expr::Call {
            method, arguments, ..
        } = expr
        else {
            return Ok(None);
        };
        let [first, second] = arguments.as_slice() else {
            return Ok(None);
        };
        let Some(name) = OperationName::from_method(method) else {
            return Ok(None);
        };

        let signature = OperationSignature::new(
            name,
            OperandKind::of(&first.ty()),
            OperandKind::of(&second.ty()),
        );
        let Some(translation) = registry.lookup(&signature) else {
            return Ok(None);
        };

        let (left, right) = match translation.orientation {
            Orientation::Preserve => (Arc::clone(first), Arc::clone(second)),
            Orientation::Swap => (Arc::clone(second), Arc::clone(first)),
        };

        let ty = if translation.operator.is_set_operation() {
            let left_ty = left.ty();
            if !left_ty.is_range() {
                return Err(QueryError::InternalInconsistency {
                    operation: signature.to_string(),
                    message: format!(
                        "set operator '{}' lowered with non-range left operand of type {left_ty}",
                        translation.operator
                    ),
                });
            }
            left_ty
        } else {
            RuntimeType::Bool
        };

        Ok(Some(Expr::Operator(OperatorNode::new(
            translation.operator,
            left,
            right,
            ty,
        ))))
    }
}
