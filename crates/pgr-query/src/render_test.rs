use super::*;
use crate::operator::OperatorTag;
use crate::test_utils::{bin, int_array_param, int_param, int_range, int_range_param, lit};

#[test]
fn test_operator_uses_tag_symbol() {
    let node = OperatorNode::new(
        OperatorTag::IsAdjacentTo,
        int_range_param("a"),
        int_range_param("b"),
        RuntimeType::Bool,
    );
    assert_eq!(Expr::Operator(node).to_string(), "(@a -|- @b)");
}

#[test]
fn test_array_nodes() {
    let any = Expr::AnyOf {
        item: int_param("x"),
        array: int_array_param("xs"),
    };
    assert_eq!(any.to_string(), "@x = ANY (@xs)");
    let len = Expr::ArrayLength {
        array: int_array_param("xs"),
    };
    assert_eq!(len.to_string(), "array_length(@xs, 1)");
}

#[test]
fn test_array_index_is_one_based() {
    let xs = int_array_param("xs");
    let constant = Expr::ArrayIndex {
        array: xs.clone(),
        index: lit(0),
        ty: RuntimeType::I32,
    };
    assert_eq!(constant.to_string(), "@xs[1]");

    let computed = Expr::ArrayIndex {
        array: xs,
        index: int_param("i"),
        ty: RuntimeType::I32,
    };
    assert_eq!(computed.to_string(), "@xs[@i + 1]");
}

#[test]
fn test_pattern_quantifiers() {
    let text = Arc::new(Expr::parameter("name", RuntimeType::String));
    let patterns = Arc::new(Expr::parameter(
        "patterns",
        RuntimeType::array(RuntimeType::String),
    ));
    let like_any = Expr::AnyAll {
        op: PatternOp::Like,
        quantifier: Quantifier::Any,
        item: text.clone(),
        array: patterns.clone(),
    };
    assert_eq!(like_any.to_string(), "@name LIKE ANY (@patterns)");

    let ilike_all = Expr::AnyAll {
        op: PatternOp::ILike,
        quantifier: Quantifier::All,
        item: text,
        array: Arc::new(Expr::LikePrefixes { array: patterns }),
    };
    let rendered = ilike_all.to_string();
    assert!(rendered.starts_with("@name ILIKE ALL (ARRAY(SELECT "));
    assert!(rendered.ends_with(" || '%' FROM unnest(@patterns) AS p))"));
}

#[test]
fn test_literals_and_connectives() {
    let e = bin(
        BinaryOp::And,
        &bin(BinaryOp::Equal, &int_param("a"), &lit("it's")),
        &Arc::new(Expr::Not(lit(true))),
    );
    assert_eq!(e.to_string(), "((@a = 'it''s') AND NOT true)");
}

#[test]
fn test_range_literal_is_quoted() {
    let r = Expr::Literal {
        value: Value::range(pgr_core::Interval::closed_open(Value::I32(1), Value::I32(5))),
        ty: int_range(),
    };
    assert_eq!(r.to_string(), "'[1,5)'");
}

/// Counts operator nodes, to show a generator hooking into the dispatch
struct OperatorCounter(usize);

impl ExprVisitor for OperatorCounter {
    type Output = ();

    fn visit_literal(&mut self, _: &Value, _: &RuntimeType) {}
    fn visit_parameter(&mut self, _: &str, _: &RuntimeType) {}
    fn visit_variable(&mut self, _: &str, _: &RuntimeType) {}
    fn visit_member(&mut self, instance: Option<&Expr>, _: &str) {
        if let Some(i) = instance {
            self.visit(i);
        }
    }
    fn visit_call(&mut self, _: &str, arguments: &[Arc<Expr>]) {
        arguments.iter().for_each(|a| self.visit(a));
    }
    fn visit_binary(&mut self, _: BinaryOp, left: &Expr, right: &Expr) {
        self.visit(left);
        self.visit(right);
    }
    fn visit_not(&mut self, inner: &Expr) {
        self.visit(inner);
    }
    fn visit_index(&mut self, source: &Expr, index: &Expr) {
        self.visit(source);
        self.visit(index);
    }
    fn visit_subquery(&mut self, source: &Expr, _: &SubqueryOperator) {
        self.visit(source);
    }
    fn visit_operator(&mut self, node: &OperatorNode) {
        self.0 += 1;
        self.visit(&node.left);
        self.visit(&node.right);
    }
    fn visit_any_of(&mut self, item: &Expr, array: &Expr) {
        self.visit(item);
        self.visit(array);
    }
    fn visit_array_length(&mut self, array: &Expr) {
        self.visit(array);
    }
    fn visit_array_index(&mut self, array: &Expr, index: &Expr) {
        self.visit(array);
        self.visit(index);
    }
    fn visit_any_all(&mut self, _: PatternOp, _: Quantifier, item: &Expr, array: &Expr) {
        self.visit(item);
        self.visit(array);
    }
    fn visit_like_prefixes(&mut self, array: &Expr) {
        self.visit(array);
    }
}

#[test]
fn test_custom_visitor_sees_operator_nodes() {
    let inner = Arc::new(Expr::Operator(OperatorNode::new(
        OperatorTag::Intersection,
        int_range_param("a"),
        int_range_param("b"),
        int_range(),
    )));
    let outer = Expr::Operator(OperatorNode::new(
        OperatorTag::Overlaps,
        inner,
        int_range_param("c"),
        RuntimeType::Bool,
    ));
    let mut counter = OperatorCounter(0);
    counter.visit(&outer);
    assert_eq!(counter.0, 2);
}
