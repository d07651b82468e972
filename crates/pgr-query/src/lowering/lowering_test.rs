use super::*;
use crate::error::QueryError;
use crate::expr::{BinaryOp, PatternOp, Quantifier, SubqueryOperator};
use crate::operator::{OperatorNode, OperatorTag};
use crate::registry::{OperandKind, OperationName, OperationSignature, Translation};
use crate::test_utils::{
    bin, call2, int_array_param, int_param, int_range, int_range_param, lit, predicate,
    quantified_text_match, text_array_param, text_param,
};
use pgr_core::{RuntimeType, Value};

fn operator(expr: &Expr) -> &OperatorNode {
    expr.as_operator()
        .unwrap_or_else(|| panic!("expected an operator node, got {expr}"))
}

#[test]
fn test_contained_by_point_swaps_operands() {
    let value = int_param("x");
    let range = int_range_param("r");
    let lowered = lower(&predicate("ContainedBy", &value, &range)).unwrap();

    let node = operator(&lowered);
    assert_eq!(node.operator, OperatorTag::Contains);
    assert!(Arc::ptr_eq(&node.left, &range));
    assert!(Arc::ptr_eq(&node.right, &value));
    assert_eq!(lowered.to_string(), "(@r @> @x)");
}

#[test]
fn test_contains_keeps_operand_order() {
    let range = int_range_param("r");
    let lowered = lower(&predicate("Contains", &range, &lit(5))).unwrap();
    let node = operator(&lowered);
    assert_eq!(node.operator, OperatorTag::Contains);
    assert!(Arc::ptr_eq(&node.left, &range));
    assert_eq!(node.ty, RuntimeType::Bool);
}

#[test]
fn test_range_predicates() {
    let a = int_range_param("a");
    let b = int_range_param("b");
    let cases = [
        ("ContainedBy", OperatorTag::ContainedBy),
        ("Overlaps", OperatorTag::Overlaps),
        ("IsStrictlyLeftOf", OperatorTag::StrictlyLeftOf),
        ("IsStrictlyRightOf", OperatorTag::StrictlyRightOf),
        ("DoesNotExtendLeftOf", OperatorTag::DoesNotExtendLeftOf),
        ("DoesNotExtendRightOf", OperatorTag::DoesNotExtendRightOf),
        ("IsAdjacentTo", OperatorTag::IsAdjacentTo),
    ];
    for (method, tag) in cases {
        let lowered = lower(&predicate(method, &a, &b)).unwrap();
        let node = operator(&lowered);
        assert_eq!(node.operator, tag, "{method}");
        assert!(Arc::ptr_eq(&node.left, &a), "{method}");
    }
}

#[test]
fn test_set_operations_carry_range_type() {
    let a = int_range_param("a");
    let b = int_range_param("b");
    for (method, tag) in [
        ("Union", OperatorTag::Union),
        ("Intersect", OperatorTag::Intersection),
        ("Except", OperatorTag::Difference),
    ] {
        let lowered = lower(&call2(method, &a, &b, int_range())).unwrap();
        let node = operator(&lowered);
        assert_eq!(node.operator, tag);
        assert_eq!(node.ty, int_range());
    }
}

#[test]
fn test_unregistered_shape_passes_through_unchanged() {
    // Overlaps(point, range) has no translation
    let call = predicate("Overlaps", &int_param("x"), &int_range_param("r"));
    let lowered = lower(&call).unwrap();
    assert!(Arc::ptr_eq(&lowered, &call));

    let other = predicate("StartsWith", &int_param("a"), &int_param("b"));
    assert!(Arc::ptr_eq(&lower(&other).unwrap(), &other));
}

#[test]
fn test_untouched_tree_keeps_identity() {
    let tree = bin(
        BinaryOp::And,
        &bin(BinaryOp::Equal, &int_param("a"), &lit(1)),
        &Arc::new(Expr::Not(bin(BinaryOp::LessThan, &int_param("b"), &lit(2)))),
    );
    let lowered = lower(&tree).unwrap();
    assert!(Arc::ptr_eq(&lowered, &tree));
}

#[test]
fn test_nested_rewrite_rebuilds_only_the_changed_path() {
    let untouched = bin(BinaryOp::Equal, &int_param("a"), &lit(1));
    let range_call = predicate("Overlaps", &int_range_param("p"), &int_range_param("q"));
    let tree = bin(BinaryOp::Or, &untouched, &range_call);

    let lowered = lower(&tree).unwrap();
    assert!(!Arc::ptr_eq(&lowered, &tree));
    let Expr::Binary { left, right, .. } = lowered.as_ref() else {
        panic!("expected binary root");
    };
    assert!(Arc::ptr_eq(left, &untouched));
    assert_eq!(operator(right).operator, OperatorTag::Overlaps);
}

#[test]
fn test_operands_are_lowered_before_the_outer_call() {
    let a = int_range_param("a");
    let b = int_range_param("b");
    let c = int_range_param("c");
    let union = call2("Union", &a, &b, int_range());
    let tree = predicate("Overlaps", &union, &c);

    let lowered = lower(&tree).unwrap();
    let outer = operator(&lowered);
    assert_eq!(outer.operator, OperatorTag::Overlaps);
    assert_eq!(operator(&outer.left).operator, OperatorTag::Union);
    assert_eq!(lowered.to_string(), "((@a + @b) && @c)");
}

#[test]
fn test_range_comparison_bypasses_registry() {
    let a = int_range_param("a");
    let b = int_range_param("b");
    let empty = OperationRegistry::new();
    let matcher = ExpressionMatcher::new(&empty);

    for (op, tag) in [
        (BinaryOp::Equal, OperatorTag::Equal),
        (BinaryOp::NotEqual, OperatorTag::NotEqual),
        (BinaryOp::LessThan, OperatorTag::LessThan),
        (BinaryOp::GreaterThan, OperatorTag::GreaterThan),
        (BinaryOp::LessOrEqual, OperatorTag::LessOrEqual),
        (BinaryOp::GreaterOrEqual, OperatorTag::GreaterOrEqual),
    ] {
        let lowered = matcher.lower(&bin(op, &a, &b)).unwrap();
        assert_eq!(operator(&lowered).operator, tag);
    }
}

#[test]
fn test_scalar_comparison_is_not_an_operator_node() {
    let cmp = bin(BinaryOp::LessThan, &int_param("a"), &int_param("b"));
    assert!(Arc::ptr_eq(&lower(&cmp).unwrap(), &cmp));

    let mixed = bin(BinaryOp::Equal, &int_range_param("r"), &int_param("b"));
    assert!(Arc::ptr_eq(&lower(&mixed).unwrap(), &mixed));
}

#[test]
fn test_array_contains_lowers_to_any() {
    let xs = int_array_param("xs");
    let x = int_param("x");
    let sub = Arc::new(Expr::Subquery {
        source: xs.clone(),
        operator: SubqueryOperator::Contains(x.clone()),
        ty: RuntimeType::Bool,
    });
    let lowered = lower(&sub).unwrap();
    assert_eq!(lowered.to_string(), "@x = ANY (@xs)");

    let call = predicate("Contains", &xs, &x);
    assert_eq!(lower(&call).unwrap().to_string(), "@x = ANY (@xs)");
}

#[test]
fn test_array_length_forms() {
    let xs = int_array_param("xs");
    let forms = [
        Arc::new(Expr::Subquery {
            source: xs.clone(),
            operator: SubqueryOperator::Count,
            ty: RuntimeType::I32,
        }),
        Arc::new(Expr::Member {
            instance: Some(xs.clone()),
            member: "Length".to_string(),
            ty: RuntimeType::I32,
        }),
        Arc::new(Expr::call("Count", vec![xs.clone()], RuntimeType::I32)),
    ];
    for form in forms {
        assert_eq!(lower(&form).unwrap().to_string(), "array_length(@xs, 1)");
    }
}

#[test]
fn test_sequence_equal_lowers_to_equality() {
    let lowered = lower(&predicate(
        "SequenceEqual",
        &int_array_param("a"),
        &int_array_param("b"),
    ))
    .unwrap();
    assert_eq!(operator(&lowered).operator, OperatorTag::Equal);
}

#[test]
fn test_multi_dimensional_array_passes_through() {
    let grid = Arc::new(Expr::parameter(
        "grid",
        RuntimeType::MultiArray {
            element: Box::new(RuntimeType::I32),
            rank: 2,
        },
    ));
    let len = Arc::new(Expr::Member {
        instance: Some(grid),
        member: "Length".to_string(),
        ty: RuntimeType::I32,
    });
    assert!(Arc::ptr_eq(&lower(&len).unwrap(), &len));
}

fn index(source: &Arc<Expr>, position: &Arc<Expr>) -> Arc<Expr> {
    Arc::new(Expr::Index {
        source: source.clone(),
        index: position.clone(),
        ty: RuntimeType::I32,
    })
}

#[test]
fn test_array_index_shifts_to_one_based() {
    let xs = int_array_param("xs");
    let lowered = lower(&index(&xs, &lit(0))).unwrap();
    assert!(matches!(&*lowered, Expr::ArrayIndex { array, .. } if Arc::ptr_eq(array, &xs)));
    assert_eq!(lowered.to_string(), "@xs[1]");

    let by_parameter = lower(&index(&xs, &int_param("i"))).unwrap();
    assert_eq!(by_parameter.to_string(), "@xs[@i + 1]");
}

#[test]
fn test_multi_dimensional_index_passes_through() {
    let grid = Arc::new(Expr::parameter(
        "grid",
        RuntimeType::MultiArray {
            element: Box::new(RuntimeType::I32),
            rank: 2,
        },
    ));
    let access = index(&grid, &lit(0));
    assert!(Arc::ptr_eq(&lower(&access).unwrap(), &access));
}

#[test]
fn test_like_over_pattern_array_lowers_to_any_all() {
    let patterns = text_array_param("patterns");
    let name = text_param("name");
    let cases = [
        ("Like", false, PatternOp::Like, Quantifier::Any, "@name LIKE ANY (@patterns)"),
        ("Like", true, PatternOp::Like, Quantifier::All, "@name LIKE ALL (@patterns)"),
        ("ILike", false, PatternOp::ILike, Quantifier::Any, "@name ILIKE ANY (@patterns)"),
        ("ILike", true, PatternOp::ILike, Quantifier::All, "@name ILIKE ALL (@patterns)"),
    ];
    for (method, every, op, quantifier, sql) in cases {
        let query = quantified_text_match(&patterns, method, &name, "p", every);
        let lowered = lower(&query).unwrap();
        match &*lowered {
            Expr::AnyAll {
                op: got_op,
                quantifier: got_quantifier,
                item,
                array,
            } => {
                assert_eq!((*got_op, *got_quantifier), (op, quantifier), "{method}");
                assert!(Arc::ptr_eq(item, &name));
                assert!(Arc::ptr_eq(array, &patterns));
            }
            other => panic!("expected a pattern quantifier, got {other}"),
        }
        assert_eq!(lowered.to_string(), sql);
        assert_eq!(lowered.ty(), RuntimeType::Bool);
    }
}

#[test]
fn test_element_as_matched_side_is_not_lowered() {
    let matches = text_array_param("matches");
    let element = Arc::new(Expr::variable("m", RuntimeType::String));
    let query = Arc::new(Expr::Subquery {
        source: matches,
        operator: SubqueryOperator::Any {
            variable: "m".to_string(),
            predicate: predicate("Like", &element, &text_param("text")),
        },
        ty: RuntimeType::Bool,
    });
    assert!(Arc::ptr_eq(&lower(&query).unwrap(), &query));

    let self_match = quantified_text_match(&text_array_param("xs"), "Like", &element, "m", false);
    assert!(Arc::ptr_eq(&lower(&self_match).unwrap(), &self_match));
}

#[test]
fn test_starts_with_constant_prefixes_are_escaped() {
    let prefixes = lit(Value::Array(vec![
        Value::Text("50%".to_string()),
        Value::Text(r"a_b\c".to_string()),
        Value::Null,
    ]));
    let query = quantified_text_match(&prefixes, "StartsWith", &text_param("name"), "p", false);
    let lowered = lower(&query).unwrap();
    let Expr::AnyAll { op, array, .. } = &*lowered else {
        panic!("expected a pattern quantifier, got {lowered}");
    };
    assert_eq!(*op, PatternOp::Like);
    let Expr::Literal {
        value: Value::Array(patterns),
        ..
    } = &**array
    else {
        panic!("expected escaped literal patterns, got {array}");
    };
    assert_eq!(
        patterns,
        &vec![
            Value::Text(r"50\%%".to_string()),
            Value::Text(r"a\_b\\c%".to_string()),
            Value::Null,
        ]
    );
}

#[test]
fn test_starts_with_parameter_prefixes_escape_in_query() {
    let prefixes = text_array_param("prefixes");
    let query = quantified_text_match(&prefixes, "StartsWith", &text_param("name"), "p", true);
    let lowered = lower(&query).unwrap();
    let Expr::AnyAll {
        quantifier, array, ..
    } = &*lowered
    else {
        panic!("expected a pattern quantifier, got {lowered}");
    };
    assert_eq!(*quantifier, Quantifier::All);
    assert!(matches!(&**array, Expr::LikePrefixes { array } if Arc::ptr_eq(array, &prefixes)));
}

#[test]
fn test_escape_like() {
    assert_eq!(array::escape_like("plain"), "plain");
    assert_eq!(array::escape_like(r"100%_\"), r"100\%\_\\");
}

#[test]
fn test_unrecognized_quantified_predicate_passes_through() {
    let query = quantified_text_match(
        &text_array_param("xs"),
        "EndsWith",
        &text_param("name"),
        "p",
        false,
    );
    assert!(Arc::ptr_eq(&lower(&query).unwrap(), &query));
}

#[test]
fn test_set_operator_on_point_is_internal_inconsistency() {
    let mut registry = OperationRegistry::new();
    registry.register(
        OperationSignature::new(OperationName::Union, OperandKind::Point, OperandKind::Interval),
        Translation::preserve(OperatorTag::Union),
    );
    let matcher = ExpressionMatcher::new(&registry);
    let call = call2("Union", &int_param("x"), &int_range_param("r"), int_range());

    let err = matcher.lower(&call).unwrap_err();
    assert!(matches!(err, QueryError::InternalInconsistency { .. }));
    assert!(err.to_string().starts_with("[Q001]"));
}

#[test]
fn test_rules_run_in_priority_order() {
    struct Never;
    impl RewriteRule for Never {
        fn name(&self) -> &'static str {
            "never"
        }
        fn rewrite(&self, _: &Expr, _: &OperationRegistry) -> QueryResult<Option<Expr>> {
            Ok(None)
        }
    }
    struct Everything;
    impl RewriteRule for Everything {
        fn name(&self) -> &'static str {
            "everything"
        }
        fn rewrite(&self, expr: &Expr, _: &OperationRegistry) -> QueryResult<Option<Expr>> {
            Ok(match expr {
                Expr::Parameter { .. } => Some(Expr::literal(pgr_core::Value::I32(0))),
                _ => None,
            })
        }
    }

    let matcher = ExpressionMatcher::with_rules(
        OperationRegistry::builtin(),
        vec![Box::new(Never), Box::new(Everything)],
    );
    assert_eq!(matcher.rule_names(), vec!["never", "everything"]);
    assert_eq!(matcher.lower(&int_param("p")).unwrap().to_string(), "0");
    assert_eq!(
        ExpressionMatcher::with_defaults().rule_names(),
        vec!["operation_call", "range_comparison", "array_operation"]
    );
}
