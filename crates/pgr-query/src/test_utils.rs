//! Shared test utilities for pgr-query

use crate::expr::{BinaryOp, Expr, SubqueryOperator};
use pgr_core::{RuntimeType, Value};
use std::sync::Arc;

/// `Range<i32>`
pub fn int_range() -> RuntimeType {
    RuntimeType::range(RuntimeType::I32)
}

/// Parameter of type `i32`
pub fn int_param(name: &str) -> Arc<Expr> {
    Arc::new(Expr::parameter(name, RuntimeType::I32))
}

/// Parameter of type `Range<i32>`
pub fn int_range_param(name: &str) -> Arc<Expr> {
    Arc::new(Expr::parameter(name, int_range()))
}

/// Parameter of type `i32[]`
pub fn int_array_param(name: &str) -> Arc<Expr> {
    Arc::new(Expr::parameter(name, RuntimeType::array(RuntimeType::I32)))
}

/// Literal node
pub fn lit(value: impl Into<Value>) -> Arc<Expr> {
    Arc::new(Expr::literal(value.into()))
}

/// Two-argument call returning `ty`
pub fn call2(method: &str, a: &Arc<Expr>, b: &Arc<Expr>, ty: RuntimeType) -> Arc<Expr> {
    Arc::new(Expr::call(method, vec![Arc::clone(a), Arc::clone(b)], ty))
}

/// Two-argument boolean call
pub fn predicate(method: &str, a: &Arc<Expr>, b: &Arc<Expr>) -> Arc<Expr> {
    call2(method, a, b, RuntimeType::Bool)
}

/// Binary node
pub fn bin(op: BinaryOp, a: &Arc<Expr>, b: &Arc<Expr>) -> Arc<Expr> {
    Arc::new(Expr::binary(op, Arc::clone(a), Arc::clone(b)))
}

/// Parameter of type `String`
pub fn text_param(name: &str) -> Arc<Expr> {
    Arc::new(Expr::parameter(name, RuntimeType::String))
}

/// Parameter of type `String[]`
pub fn text_array_param(name: &str) -> Arc<Expr> {
    Arc::new(Expr::parameter(name, RuntimeType::array(RuntimeType::String)))
}

/// `source.Any(variable => method(item, variable))` over a text array, or
/// `All` when `every` is set
pub fn quantified_text_match(
    source: &Arc<Expr>,
    method: &str,
    item: &Arc<Expr>,
    variable: &str,
    every: bool,
) -> Arc<Expr> {
    let element = Arc::new(Expr::variable(variable, RuntimeType::String));
    let predicate = predicate(method, item, &element);
    let variable = variable.to_string();
    let operator = if every {
        SubqueryOperator::All {
            variable,
            predicate,
        }
    } else {
        SubqueryOperator::Any {
            variable,
            predicate,
        }
    };
    Arc::new(Expr::Subquery {
        source: Arc::clone(source),
        operator,
        ty: RuntimeType::Bool,
    })
}
