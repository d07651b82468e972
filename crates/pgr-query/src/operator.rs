//! Operator tags and the operator node produced by lowering

use crate::expr::Expr;
use pgr_core::RuntimeType;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Native relational operator an [`OperatorNode`] renders as
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum OperatorTag {
    /// `=`
    Equal,
    /// `<>`
    NotEqual,
    /// `<`
    LessThan,
    /// `>`
    GreaterThan,
    /// `<=`
    LessOrEqual,
    /// `>=`
    GreaterOrEqual,
    /// `@>`
    Contains,
    /// `<@`
    ContainedBy,
    /// `&&`
    Overlaps,
    /// `<<`
    StrictlyLeftOf,
    /// `>>`
    StrictlyRightOf,
    /// `&>`
    DoesNotExtendLeftOf,
    /// `&<`
    DoesNotExtendRightOf,
    /// `-|-`
    IsAdjacentTo,
    /// `+`
    Union,
    /// `*`
    Intersection,
    /// `-`
    Difference,
}

impl OperatorTag {
    /// Every tag, in declaration order
    pub const ALL: [OperatorTag; 17] = [
        OperatorTag::Equal,
        OperatorTag::NotEqual,
        OperatorTag::LessThan,
        OperatorTag::GreaterThan,
        OperatorTag::LessOrEqual,
        OperatorTag::GreaterOrEqual,
        OperatorTag::Contains,
        OperatorTag::ContainedBy,
        OperatorTag::Overlaps,
        OperatorTag::StrictlyLeftOf,
        OperatorTag::StrictlyRightOf,
        OperatorTag::DoesNotExtendLeftOf,
        OperatorTag::DoesNotExtendRightOf,
        OperatorTag::IsAdjacentTo,
        OperatorTag::Union,
        OperatorTag::Intersection,
        OperatorTag::Difference,
    ];

    /// The native operator symbol, used verbatim by SQL rendering
    pub fn symbol(self) -> &'static str {
        match self {
            OperatorTag::Equal => "=",
            OperatorTag::NotEqual => "<>",
            OperatorTag::LessThan => "<",
            OperatorTag::GreaterThan => ">",
            OperatorTag::LessOrEqual => "<=",
            OperatorTag::GreaterOrEqual => ">=",
            OperatorTag::Contains => "@>",
            OperatorTag::ContainedBy => "<@",
            OperatorTag::Overlaps => "&&",
            OperatorTag::StrictlyLeftOf => "<<",
            OperatorTag::StrictlyRightOf => ">>",
            OperatorTag::DoesNotExtendLeftOf => "&>",
            OperatorTag::DoesNotExtendRightOf => "&<",
            OperatorTag::IsAdjacentTo => "-|-",
            OperatorTag::Union => "+",
            OperatorTag::Intersection => "*",
            OperatorTag::Difference => "-",
        }
    }

    /// Returns true for the set operations, which yield a range rather than a boolean
    pub fn is_set_operation(self) -> bool {
        matches!(
            self,
            OperatorTag::Union | OperatorTag::Intersection | OperatorTag::Difference
        )
    }
}

impl std::fmt::Display for OperatorTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// A binary native-operator application
///
/// Compared and hashed structurally so hosts can deduplicate trees that
/// contain it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct OperatorNode {
    /// Left operand
    pub left: Arc<Expr>,
    /// Right operand
    pub right: Arc<Expr>,
    /// Operator applied
    pub operator: OperatorTag,
    /// Result type: `Bool` for predicates, the range type for set operations
    pub ty: RuntimeType,
}

impl OperatorNode {
    /// Create a node
    pub fn new(operator: OperatorTag, left: Arc<Expr>, right: Arc<Expr>, ty: RuntimeType) -> Self {
        Self {
            left,
            right,
            operator,
            ty,
        }
    }

    /// Rebuild with new children, returning `None` when both are the same
    /// allocations as the current ones
    pub fn with_children(&self, left: Arc<Expr>, right: Arc<Expr>) -> Option<Self> {
        if Arc::ptr_eq(&self.left, &left) && Arc::ptr_eq(&self.right, &right) {
            return None;
        }
        Some(Self {
            left,
            right,
            operator: self.operator,
            ty: self.ty.clone(),
        })
    }
}

#[cfg(test)]
#[path = "operator_test.rs"]
mod tests;
