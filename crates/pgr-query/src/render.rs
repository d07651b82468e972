//! Visitor hook through which SQL generators consume lowered trees
//!
//! A generator implements [`ExprVisitor`]; [`ExprVisitor::visit`] dispatches
//! on the node kind so that operator nodes reach
//! [`ExprVisitor::visit_operator`] without the generator matching on them.

use crate::expr::{BinaryOp, Expr, PatternOp, Quantifier, SubqueryOperator};
use crate::operator::OperatorNode;
use pgr_core::{RuntimeType, Value};
use std::sync::Arc;

/// Double-dispatch visitor over [`Expr`]
pub trait ExprVisitor {
    /// What each node renders to
    type Output;

    /// Dispatch on the node kind
    fn visit(&mut self, expr: &Expr) -> Self::Output {
        match expr {
            Expr::Literal { value, ty } => self.visit_literal(value, ty),
            Expr::Parameter { name, ty } => self.visit_parameter(name, ty),
            Expr::Variable { name, ty } => self.visit_variable(name, ty),
            Expr::Member {
                instance, member, ..
            } => self.visit_member(instance.as_deref(), member),
            Expr::Call {
                method, arguments, ..
            } => self.visit_call(method, arguments),
            Expr::Binary { op, left, right } => self.visit_binary(*op, left, right),
            Expr::Not(inner) => self.visit_not(inner),
            Expr::Index { source, index, .. } => self.visit_index(source, index),
            Expr::Subquery {
                source, operator, ..
            } => self.visit_subquery(source, operator),
            Expr::Operator(node) => self.visit_operator(node),
            Expr::AnyOf { item, array } => self.visit_any_of(item, array),
            Expr::ArrayLength { array } => self.visit_array_length(array),
            Expr::ArrayIndex { array, index, .. } => self.visit_array_index(array, index),
            Expr::AnyAll {
                op,
                quantifier,
                item,
                array,
            } => self.visit_any_all(*op, *quantifier, item, array),
            Expr::LikePrefixes { array } => self.visit_like_prefixes(array),
        }
    }

    fn visit_literal(&mut self, value: &Value, ty: &RuntimeType) -> Self::Output;
    fn visit_parameter(&mut self, name: &str, ty: &RuntimeType) -> Self::Output;
    fn visit_variable(&mut self, name: &str, ty: &RuntimeType) -> Self::Output;
    fn visit_member(&mut self, instance: Option<&Expr>, member: &str) -> Self::Output;
    fn visit_call(&mut self, method: &str, arguments: &[Arc<Expr>]) -> Self::Output;
    fn visit_binary(&mut self, op: BinaryOp, left: &Expr, right: &Expr) -> Self::Output;
    fn visit_not(&mut self, inner: &Expr) -> Self::Output;
    /// Host-level zero-based indexing left unlowered
    fn visit_index(&mut self, source: &Expr, index: &Expr) -> Self::Output;
    fn visit_subquery(&mut self, source: &Expr, operator: &SubqueryOperator) -> Self::Output;
    /// Render a lowered operator node
    fn visit_operator(&mut self, node: &OperatorNode) -> Self::Output;
    fn visit_any_of(&mut self, item: &Expr, array: &Expr) -> Self::Output;
    fn visit_array_length(&mut self, array: &Expr) -> Self::Output;
    /// `index` is zero-based; the generator adds the backend's offset
    fn visit_array_index(&mut self, array: &Expr, index: &Expr) -> Self::Output;
    fn visit_any_all(
        &mut self,
        op: PatternOp,
        quantifier: Quantifier,
        item: &Expr,
        array: &Expr,
    ) -> Self::Output;
    fn visit_like_prefixes(&mut self, array: &Expr) -> Self::Output;
}

/// Plain SQL-like text rendering, used for `Display` and diagnostics
///
/// Literals print in their bare text form; backend-accurate literal syntax is
/// the storage layer's job.
#[derive(Debug, Clone, Copy, Default)]
pub struct SqlText;

impl SqlText {
    /// Render a whole tree
    pub fn render(mut self, expr: &Expr) -> String {
        self.visit(expr)
    }
}

impl ExprVisitor for SqlText {
    type Output = String;

    fn visit_literal(&mut self, value: &Value, _ty: &RuntimeType) -> String {
        match value {
            Value::Text(s) => format!("'{}'", s.replace('\'', "''")),
            Value::Range(_) => format!("'{value}'"),
            other => other.to_string(),
        }
    }

    fn visit_parameter(&mut self, name: &str, _ty: &RuntimeType) -> String {
        format!("@{name}")
    }

    fn visit_variable(&mut self, name: &str, _ty: &RuntimeType) -> String {
        name.to_string()
    }

    fn visit_member(&mut self, instance: Option<&Expr>, member: &str) -> String {
        match instance {
            Some(instance) => format!("{}.{member}", self.visit(instance)),
            None => member.to_string(),
        }
    }

    fn visit_call(&mut self, method: &str, arguments: &[Arc<Expr>]) -> String {
        let args: Vec<String> = arguments.iter().map(|a| self.visit(a)).collect();
        format!("{method}({})", args.join(", "))
    }

    fn visit_binary(&mut self, op: BinaryOp, left: &Expr, right: &Expr) -> String {
        format!("({} {op} {})", self.visit(left), self.visit(right))
    }

    fn visit_not(&mut self, inner: &Expr) -> String {
        format!("NOT {}", self.visit(inner))
    }

    fn visit_index(&mut self, source: &Expr, index: &Expr) -> String {
        format!("{}[{}]", self.visit(source), self.visit(index))
    }

    fn visit_subquery(&mut self, source: &Expr, operator: &SubqueryOperator) -> String {
        let source = self.visit(source);
        match operator {
            SubqueryOperator::Count => format!("(SELECT count(*) FROM unnest({source}))"),
            SubqueryOperator::Contains(item) => format!(
                "EXISTS (SELECT 1 FROM unnest({source}) AS e WHERE e = {})",
                self.visit(item)
            ),
            SubqueryOperator::Any {
                variable,
                predicate,
            } => format!(
                "EXISTS (SELECT 1 FROM unnest({source}) AS {variable} WHERE {})",
                self.visit(predicate)
            ),
            SubqueryOperator::All {
                variable,
                predicate,
            } => format!(
                "NOT EXISTS (SELECT 1 FROM unnest({source}) AS {variable} WHERE NOT {})",
                self.visit(predicate)
            ),
        }
    }

    fn visit_operator(&mut self, node: &OperatorNode) -> String {
        format!(
            "({} {} {})",
            self.visit(&node.left),
            node.operator.symbol(),
            self.visit(&node.right)
        )
    }

    fn visit_any_of(&mut self, item: &Expr, array: &Expr) -> String {
        format!("{} = ANY ({})", self.visit(item), self.visit(array))
    }

    fn visit_array_length(&mut self, array: &Expr) -> String {
        format!("array_length({}, 1)", self.visit(array))
    }

    fn visit_array_index(&mut self, array: &Expr, index: &Expr) -> String {
        let array = self.visit(array);
        match constant_index(index).and_then(|i| i.checked_add(1)) {
            Some(subscript) => format!("{array}[{subscript}]"),
            None => format!("{array}[{} + 1]", self.visit(index)),
        }
    }

    fn visit_any_all(
        &mut self,
        op: PatternOp,
        quantifier: Quantifier,
        item: &Expr,
        array: &Expr,
    ) -> String {
        format!(
            "{} {} {} ({})",
            self.visit(item),
            op.keyword(),
            quantifier.keyword(),
            self.visit(array)
        )
    }

    fn visit_like_prefixes(&mut self, array: &Expr) -> String {
        let array = self.visit(array);
        format!(
            "ARRAY(SELECT {} || '%' FROM unnest({array}) AS p)",
            r"replace(replace(replace(p, '\', '\\'), '%', '\%'), '_', '\_')"
        )
    }
}

/// Integer literal index, folded into the rendered subscript
fn constant_index(index: &Expr) -> Option<i64> {
    match index {
        Expr::Literal { value, .. } => match value {
            Value::U8(i) => Some(i64::from(*i)),
            Value::I16(i) => Some(i64::from(*i)),
            Value::I32(i) => Some(i64::from(*i)),
            Value::I64(i) => Some(*i),
            _ => None,
        },
        _ => None,
    }
}

#[cfg(test)]
#[path = "render_test.rs"]
mod tests;
