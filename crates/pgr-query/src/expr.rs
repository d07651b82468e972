//! Query expression tree consumed and produced by lowering
//!
//! Children are held in `Arc` so an unchanged subtree can be handed back to
//! the caller as the very same allocation it passed in.

use crate::operator::{OperatorNode, OperatorTag};
use pgr_core::{RuntimeType, Value};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Binary operator of a generic comparison or logical node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BinaryOp {
    /// Equality (=)
    Equal,
    /// Inequality (<>)
    NotEqual,
    /// Less than (<)
    LessThan,
    /// Greater than (>)
    GreaterThan,
    /// Less than or equal (<=)
    LessOrEqual,
    /// Greater than or equal (>=)
    GreaterOrEqual,
    /// Logical AND
    And,
    /// Logical OR
    Or,
}

impl BinaryOp {
    /// Check if this is a comparison operator
    pub fn is_comparison(self) -> bool {
        self.comparison_tag().is_some()
    }

    /// Operator tag for a comparison; `None` for logical operators
    pub fn comparison_tag(self) -> Option<OperatorTag> {
        match self {
            BinaryOp::Equal => Some(OperatorTag::Equal),
            BinaryOp::NotEqual => Some(OperatorTag::NotEqual),
            BinaryOp::LessThan => Some(OperatorTag::LessThan),
            BinaryOp::GreaterThan => Some(OperatorTag::GreaterThan),
            BinaryOp::LessOrEqual => Some(OperatorTag::LessOrEqual),
            BinaryOp::GreaterOrEqual => Some(OperatorTag::GreaterOrEqual),
            BinaryOp::And | BinaryOp::Or => None,
        }
    }
}

impl std::fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BinaryOp::And => write!(f, "AND"),
            BinaryOp::Or => write!(f, "OR"),
            other => match other.comparison_tag() {
                Some(tag) => write!(f, "{}", tag.symbol()),
                None => Ok(()),
            },
        }
    }
}

/// Pattern-matching operator of an [`Expr::AnyAll`] node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PatternOp {
    /// Case-sensitive `LIKE`
    Like,
    /// Case-insensitive `ILIKE`
    ILike,
}

impl PatternOp {
    /// SQL keyword
    pub fn keyword(self) -> &'static str {
        match self {
            PatternOp::Like => "LIKE",
            PatternOp::ILike => "ILIKE",
        }
    }
}

/// Whether some or every array element must match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Quantifier {
    Any,
    All,
}

impl Quantifier {
    /// SQL keyword
    pub fn keyword(self) -> &'static str {
        match self {
            Quantifier::Any => "ANY",
            Quantifier::All => "ALL",
        }
    }
}

/// Aggregate-style operator applied to a sub-query source
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SubqueryOperator {
    /// `source.Count()`
    Count,
    /// `source.Contains(item)`
    Contains(Arc<Expr>),
    /// `source.Any(variable => predicate)`
    Any {
        variable: String,
        predicate: Arc<Expr>,
    },
    /// `source.All(variable => predicate)`
    All {
        variable: String,
        predicate: Arc<Expr>,
    },
}

impl SubqueryOperator {
    /// Quantifier, bound variable and predicate of an `Any` / `All` operator
    pub fn quantified(&self) -> Option<(Quantifier, &str, &Arc<Expr>)> {
        match self {
            SubqueryOperator::Any {
                variable,
                predicate,
            } => Some((Quantifier::Any, variable, predicate)),
            SubqueryOperator::All {
                variable,
                predicate,
            } => Some((Quantifier::All, variable, predicate)),
            SubqueryOperator::Count | SubqueryOperator::Contains(_) => None,
        }
    }
}

/// A node in the host's expression tree
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Expr {
    /// Constant value
    Literal { value: Value, ty: RuntimeType },

    /// Named query parameter
    Parameter { name: String, ty: RuntimeType },

    /// Element variable bound by a quantified sub-query predicate
    Variable { name: String, ty: RuntimeType },

    /// Property access, optionally on an instance
    Member {
        instance: Option<Arc<Expr>>,
        member: String,
        ty: RuntimeType,
    },

    /// Method invocation; an instance receiver is passed as the first argument
    Call {
        method: String,
        arguments: Vec<Arc<Expr>>,
        ty: RuntimeType,
    },

    /// Comparison or logical connective
    Binary {
        op: BinaryOp,
        left: Arc<Expr>,
        right: Arc<Expr>,
    },

    /// Logical negation
    Not(Arc<Expr>),

    /// Zero-based element access `source[index]`
    Index {
        source: Arc<Expr>,
        index: Arc<Expr>,
        ty: RuntimeType,
    },

    /// Operator applied over a collection source
    Subquery {
        source: Arc<Expr>,
        operator: SubqueryOperator,
        ty: RuntimeType,
    },

    /// Lowered native operator application
    Operator(OperatorNode),

    /// `item = ANY (array)`
    AnyOf { item: Arc<Expr>, array: Arc<Expr> },

    /// `array_length(array, 1)`
    ArrayLength { array: Arc<Expr> },

    /// `array[index + 1]`; backend arrays count from one
    ArrayIndex {
        array: Arc<Expr>,
        index: Arc<Expr>,
        ty: RuntimeType,
    },

    /// `item LIKE ANY (array)` and its `ILIKE` and `ALL` forms
    AnyAll {
        op: PatternOp,
        quantifier: Quantifier,
        item: Arc<Expr>,
        array: Arc<Expr>,
    },

    /// `LIKE` prefix patterns computed from a non-constant text array
    ///
    /// Each element has its wildcard characters escaped and a trailing `%`
    /// appended.
    LikePrefixes { array: Arc<Expr> },
}

impl Expr {
    /// Literal of the value's natural type
    ///
    /// Falls back to a `Named("unknown")` type when the value carries none
    /// (NULL, all-null arrays).
    pub fn literal(value: Value) -> Self {
        let ty = value
            .natural_type()
            .unwrap_or_else(|| RuntimeType::Named("unknown".to_string()));
        Expr::Literal { value, ty }
    }

    /// Parameter reference
    pub fn parameter(name: impl Into<String>, ty: RuntimeType) -> Self {
        Expr::Parameter {
            name: name.into(),
            ty,
        }
    }

    /// Method invocation
    pub fn call(method: impl Into<String>, arguments: Vec<Arc<Expr>>, ty: RuntimeType) -> Self {
        Expr::Call {
            method: method.into(),
            arguments,
            ty,
        }
    }

    /// Element variable reference
    pub fn variable(name: impl Into<String>, ty: RuntimeType) -> Self {
        Expr::Variable {
            name: name.into(),
            ty,
        }
    }

    /// Binary node
    pub fn binary(op: BinaryOp, left: Arc<Expr>, right: Arc<Expr>) -> Self {
        Expr::Binary { op, left, right }
    }

    /// Result type of this node
    pub fn ty(&self) -> RuntimeType {
        match self {
            Expr::Literal { ty, .. }
            | Expr::Parameter { ty, .. }
            | Expr::Variable { ty, .. }
            | Expr::Member { ty, .. }
            | Expr::Call { ty, .. }
            | Expr::Subquery { ty, .. }
            | Expr::Index { ty, .. }
            | Expr::ArrayIndex { ty, .. } => ty.clone(),
            Expr::Operator(node) => node.ty.clone(),
            Expr::Binary { .. } | Expr::Not(_) | Expr::AnyOf { .. } | Expr::AnyAll { .. } => {
                RuntimeType::Bool
            }
            Expr::ArrayLength { .. } => RuntimeType::I32,
            Expr::LikePrefixes { .. } => RuntimeType::array(RuntimeType::String),
        }
    }

    /// Returns true when `name` occurs as a [`Expr::Variable`] in this subtree
    pub fn references_variable(&self, name: &str) -> bool {
        match self {
            Expr::Variable { name: bound, .. } => bound == name,
            other => other
                .children()
                .into_iter()
                .any(|child| child.references_variable(name)),
        }
    }

    /// Returns true when this node evaluates to a range
    pub fn is_range(&self) -> bool {
        self.ty().is_range()
    }

    /// Returns the operator node if this is one
    pub fn as_operator(&self) -> Option<&OperatorNode> {
        match self {
            Expr::Operator(node) => Some(node),
            _ => None,
        }
    }

    /// Direct children, in evaluation order
    pub fn children(&self) -> Vec<&Arc<Expr>> {
        match self {
            Expr::Literal { .. } | Expr::Parameter { .. } | Expr::Variable { .. } => Vec::new(),
            Expr::Member { instance, .. } => instance.iter().collect(),
            Expr::Call { arguments, .. } => arguments.iter().collect(),
            Expr::Binary { left, right, .. } => vec![left, right],
            Expr::Not(inner) => vec![inner],
            Expr::Subquery {
                source, operator, ..
            } => match operator {
                SubqueryOperator::Count => vec![source],
                SubqueryOperator::Contains(item) => vec![source, item],
                SubqueryOperator::Any { predicate, .. }
                | SubqueryOperator::All { predicate, .. } => vec![source, predicate],
            },
            Expr::Index { source, index, .. } => vec![source, index],
            Expr::Operator(node) => vec![&node.left, &node.right],
            Expr::AnyOf { item, array } | Expr::AnyAll { item, array, .. } => vec![item, array],
            Expr::ArrayLength { array } | Expr::LikePrefixes { array } => vec![array],
            Expr::ArrayIndex { array, index, .. } => vec![array, index],
        }
    }

    /// Rebuild this node around replacement children
    ///
    /// `children` must be in the order [`Expr::children`] yields them.
    /// Returns `None` when every replacement is the same allocation as the
    /// child it replaces, so the caller can keep the original node.
    pub fn with_children(&self, children: Vec<Arc<Expr>>) -> Option<Expr> {
        let unchanged = self
            .children()
            .into_iter()
            .zip(children.iter())
            .all(|(old, new)| Arc::ptr_eq(old, new));
        if unchanged {
            return None;
        }

        let mut children = children.into_iter();
        let mut next = |old: &Arc<Expr>| children.next().unwrap_or_else(|| old.clone());

        let rebuilt = match self {
            Expr::Literal { .. } | Expr::Parameter { .. } | Expr::Variable { .. } => return None,
            Expr::Member {
                instance,
                member,
                ty,
            } => Expr::Member {
                instance: instance.as_ref().map(&mut next),
                member: member.clone(),
                ty: ty.clone(),
            },
            Expr::Call {
                method,
                arguments,
                ty,
            } => Expr::Call {
                method: method.clone(),
                arguments: arguments.iter().map(&mut next).collect(),
                ty: ty.clone(),
            },
            Expr::Binary { op, left, right } => Expr::Binary {
                op: *op,
                left: next(left),
                right: next(right),
            },
            Expr::Not(inner) => Expr::Not(next(inner)),
            Expr::Index { source, index, ty } => Expr::Index {
                source: next(source),
                index: next(index),
                ty: ty.clone(),
            },
            Expr::Subquery {
                source,
                operator,
                ty,
            } => {
                let source = next(source);
                let operator = match operator {
                    SubqueryOperator::Count => SubqueryOperator::Count,
                    SubqueryOperator::Contains(item) => SubqueryOperator::Contains(next(item)),
                    SubqueryOperator::Any {
                        variable,
                        predicate,
                    } => SubqueryOperator::Any {
                        variable: variable.clone(),
                        predicate: next(predicate),
                    },
                    SubqueryOperator::All {
                        variable,
                        predicate,
                    } => SubqueryOperator::All {
                        variable: variable.clone(),
                        predicate: next(predicate),
                    },
                };
                Expr::Subquery {
                    source,
                    operator,
                    ty: ty.clone(),
                }
            }
            Expr::Operator(node) => {
                let left = next(&node.left);
                let right = next(&node.right);
                Expr::Operator(node.with_children(left, right)?)
            }
            Expr::AnyOf { item, array } => Expr::AnyOf {
                item: next(item),
                array: next(array),
            },
            Expr::ArrayLength { array } => Expr::ArrayLength {
                array: next(array),
            },
            Expr::ArrayIndex { array, index, ty } => Expr::ArrayIndex {
                array: next(array),
                index: next(index),
                ty: ty.clone(),
            },
            Expr::AnyAll {
                op,
                quantifier,
                item,
                array,
            } => Expr::AnyAll {
                op: *op,
                quantifier: *quantifier,
                item: next(item),
                array: next(array),
            },
            Expr::LikePrefixes { array } => Expr::LikePrefixes {
                array: next(array),
            },
        };
        Some(rebuilt)
    }
}

impl From<OperatorNode> for Expr {
    fn from(node: OperatorNode) -> Self {
        Expr::Operator(node)
    }
}

impl std::fmt::Display for Expr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", crate::render::SqlText.render(self))
    }
}

#[cfg(test)]
#[path = "expr_test.rs"]
mod tests;
