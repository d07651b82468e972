//! Operations over single-dimension arrays and lists
//!
//! - `array.Contains(item)` → `item = ANY (array)`
//! - `array.Count()` / `array.Length` → `array_length(array, 1)`
//! - `SequenceEqual(a, b)` → `a = b`
//! - `array[i]` → `array[i + 1]`
//! - `patterns.Any(p => Like(x, p))` → `x LIKE ANY (patterns)`, likewise
//!   `ILike` and `All`
//! - `prefixes.Any(p => x.StartsWith(p))` → `x LIKE ANY (escaped prefixes)`
//!
//! Multi-dimensional arrays are left alone, as are quantified predicates
//! whose matched side refers to the element variable.

use super::RewriteRule;
use crate::error::QueryResult;
use crate::expr::{Expr, PatternOp, Quantifier, SubqueryOperator};
use crate::operator::{OperatorNode, OperatorTag};
use crate::registry::OperationRegistry;
use pgr_core::{RuntimeType, Value};
use std::sync::Arc;

/// Lowers array membership, length, equality, indexing and pattern matching
#[derive(Debug, Clone, Copy, Default)]
pub struct ArrayOperation;

fn is_array(expr: &Expr) -> bool {
    matches!(expr.ty(), RuntimeType::Array(_) | RuntimeType::List(_))
}

fn is_text_array(expr: &Expr) -> bool {
    is_array(expr) && expr.ty().collection_element() == Some(&RuntimeType::String)
}

fn any_of(item: &Arc<Expr>, array: &Arc<Expr>) -> Expr {
    Expr::AnyOf {
        item: Arc::clone(item),
        array: Arc::clone(array),
    }
}

fn length(array: &Arc<Expr>) -> Expr {
    Expr::ArrayLength {
        array: Arc::clone(array),
    }
}

/// Escape `LIKE` wildcards and the escape character itself
pub fn escape_like(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// Patterns matching strings that start with each element of `prefixes`
///
/// Constant arrays are escaped here; anything else is escaped by the
/// backend through [`Expr::LikePrefixes`].
fn prefix_patterns(prefixes: &Arc<Expr>) -> Arc<Expr> {
    match &**prefixes {
        Expr::Literal {
            value: Value::Array(items),
            ty,
        } => {
            let patterns = items
                .iter()
                .map(|item| match item {
                    Value::Text(prefix) => Value::Text(format!("{}%", escape_like(prefix))),
                    other => other.clone(),
                })
                .collect();
            Arc::new(Expr::Literal {
                value: Value::Array(patterns),
                ty: ty.clone(),
            })
        }
        _ => Arc::new(Expr::LikePrefixes {
            array: Arc::clone(prefixes),
        }),
    }
}

/// `patterns.Any(p => Like(item, p))` and its relatives
///
/// Only the form where the element variable is the pattern is lowered;
/// `matches.Any(m => Like(m, x))` has no array-operator equivalent.
fn pattern_match(
    quantifier: Quantifier,
    variable: &str,
    predicate: &Expr,
    array: &Arc<Expr>,
) -> Option<Expr> {
    let Expr::Call {
        method, arguments, ..
    } = predicate
    else {
        return None;
    };
    let [item, pattern] = arguments.as_slice() else {
        return None;
    };
    let binds_pattern = matches!(&**pattern, Expr::Variable { name, .. } if name == variable);
    if !binds_pattern || item.references_variable(variable) {
        return None;
    }

    let (op, array) = match method.as_str() {
        "Like" => (PatternOp::Like, Arc::clone(array)),
        "ILike" => (PatternOp::ILike, Arc::clone(array)),
        "StartsWith" if is_text_array(array) => (PatternOp::Like, prefix_patterns(array)),
        _ => return None,
    };
    Some(Expr::AnyAll {
        op,
        quantifier,
        item: Arc::clone(item),
        array,
    })
}

impl RewriteRule for ArrayOperation {
    fn name(&self) -> &'static str {
        "array_operation"
    }

    fn rewrite(&self, expr: &Expr, _registry: &OperationRegistry) -> QueryResult<Option<Expr>> {
        let lowered = match expr {
            Expr::Subquery {
                source, operator, ..
            } if is_array(source) => match operator {
                SubqueryOperator::Contains(item) => Some(any_of(item, source)),
                SubqueryOperator::Count => Some(length(source)),
                SubqueryOperator::Any { .. } | SubqueryOperator::All { .. } => operator
                    .quantified()
                    .and_then(|(quantifier, variable, predicate)| {
                        pattern_match(quantifier, variable, predicate, source)
                    }),
            },

            Expr::Index { source, index, ty } if is_array(source) => Some(Expr::ArrayIndex {
                array: Arc::clone(source),
                index: Arc::clone(index),
                ty: ty.clone(),
            }),

            Expr::Member {
                instance: Some(array),
                member,
                ..
            } if is_array(array) && matches!(member.as_str(), "Length" | "Count") => {
                Some(length(array))
            }

            Expr::Call {
                method, arguments, ..
            } => match (method.as_str(), arguments.as_slice()) {
                ("Contains", [array, item]) if is_array(array) => Some(any_of(item, array)),
                ("Count", [array]) if is_array(array) => Some(length(array)),
                ("SequenceEqual", [a, b]) if is_array(a) && is_array(b) => {
                    Some(Expr::Operator(OperatorNode::new(
                        OperatorTag::Equal,
                        Arc::clone(a),
                        Arc::clone(b),
                        RuntimeType::Bool,
                    )))
                }
                _ => None,
            },

            _ => None,
        };
        Ok(lowered)
    }
}
