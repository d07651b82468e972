use super::*;

fn empty() -> Interval<i32> {
    Interval::empty()
}

fn all() -> Interval<i32> {
    Interval::unbounded()
}

#[test]
fn test_closed_interval_contains_its_endpoints() {
    let r = Interval::closed(0, 10);
    assert!(r.contains(&0));
    assert!(r.contains(&10));
    assert!(r.contains(&5));
    assert!(!r.contains(&-1));
    assert!(!r.contains(&11));
}

#[test]
fn test_open_interval_excludes_its_endpoints() {
    let r = Interval::open(0, 10);
    assert!(!r.contains(&0));
    assert!(!r.contains(&10));
    assert!(r.contains(&5));
}

#[test]
fn test_contains_requires_both_bounds() {
    // 20 clears the lower bound only, -5 clears the upper bound only
    let r = Interval::closed(0, 10);
    assert!(!r.contains(&20));
    assert!(!r.contains(&-5));
}

#[test]
fn test_empty_contains_no_point() {
    assert!(!empty().contains(&0));
    assert!(all().contains(&i32::MIN));
    assert!(Interval::at_least(3).contains(&i32::MAX));
    assert!(!Interval::greater_than(3).contains(&3));
}

#[test]
fn test_contains_range() {
    let outer = Interval::closed(0, 5);
    assert!(outer.contains_range(&Interval::closed(1, 3)));
    assert!(!outer.contains_range(&Interval::closed(-1, 3)));
    assert!(outer.contains_range(&Interval::closed(0, 5)));
    assert!(outer.contains_range(&Interval::open(0, 5)));
    assert!(!Interval::open(0, 5).contains_range(&outer));
    assert!(!outer.contains_range(&Interval::at_least(1)));
}

#[test]
fn test_contains_range_with_infinite_bounds() {
    assert!(Interval::at_least(0).contains_range(&Interval::closed(3, 100)));
    assert!(Interval::at_least(0).contains_range(&Interval::greater_than(0)));
    assert!(!Interval::greater_than(0).contains_range(&Interval::at_least(0)));
    assert!(all().contains_range(&Interval::less_than(7)));
    assert!(!Interval::less_than(7).contains_range(&all()));
}

#[test]
fn test_empty_containment_laws() {
    assert!(Interval::closed(1, 2).contains_range(&empty()));
    assert!(empty().contains_range(&empty()));
    assert!(!empty().contains_range(&Interval::closed(1, 2)));
    assert!(empty().contained_by(&Interval::closed(1, 2)));
}

#[test]
fn test_contained_by_mirrors_contains() {
    let inner = Interval::closed(2, 3);
    let outer = Interval::closed(0, 10);
    assert!(inner.contained_by(&outer));
    assert!(!outer.contained_by(&inner));
}

#[test]
fn test_unbounded_overlaps_everything_but_empty() {
    assert!(all().overlaps(&all()));
    assert!(all().overlaps(&Interval::closed(1, 2)));
    assert!(Interval::singleton(9).overlaps(&all()));
    assert!(!all().overlaps(&empty()));
    assert!(!empty().overlaps(&empty()));
}

#[test]
fn test_overlaps_at_shared_endpoint() {
    assert!(Interval::closed(0, 1).overlaps(&Interval::closed(1, 2)));
    assert!(Interval::closed(0, 10).overlaps(&Interval::closed(3, 4)));
    assert!(Interval::less_than(5).overlaps(&Interval::greater_than(4)));
}

#[test]
fn test_overlaps_when_an_endpoint_value_is_inside_the_other() {
    // 5 is excluded by [0,5) but included by [5,10]
    assert!(Interval::closed_open(0, 5).overlaps(&Interval::closed(5, 10)));
    assert!(Interval::closed(5, 10).overlaps(&Interval::closed_open(0, 5)));
    assert!(Interval::open(0, 1).overlaps(&Interval::closed(1, 2)));
    assert!(Interval::less_than(5).overlaps(&Interval::at_least(5)));
    assert!(Interval::at_most(5).overlaps(&Interval::greater_than(5)));
}

#[test]
fn test_no_overlap_when_both_sides_exclude_the_meeting_value() {
    assert!(!Interval::open(0, 5).overlaps(&Interval::open(5, 10)));
    assert!(!Interval::closed_open(0, 5).overlaps(&Interval::open_closed(5, 10)));
    assert!(!Interval::less_than(5).overlaps(&Interval::greater_than(5)));
    assert!(!Interval::closed(0, 4).overlaps(&Interval::closed(6, 9)));
}

#[test]
fn test_degenerate_span_overlaps_nothing() {
    let void = Interval::new(Bound::Excluded(3), Bound::Excluded(3));
    assert!(!void.overlaps(&Interval::closed(0, 9)));
    assert!(!Interval::closed(0, 9).overlaps(&void));
}

#[test]
fn test_set_operations_treat_degenerate_spans_as_empty() {
    let void = Interval::new(Bound::Excluded(3), Bound::Excluded(3));
    let span = Interval::closed(5, 6);
    assert_eq!(void.union(&span).unwrap(), span);
    assert_eq!(span.union(&void).unwrap(), span);
    assert_eq!(void.intersect(&span), Interval::Empty);
    assert_eq!(span.difference(&void).unwrap(), span);
    assert_eq!(void.difference(&span).unwrap(), Interval::Empty);
}

#[test]
fn test_touching_overlap_leaves_intersection_empty() {
    let left = Interval::closed_open(0, 5);
    let right = Interval::closed(5, 10);
    assert!(left.overlaps(&right));
    assert_eq!(left.intersect(&right), Interval::Empty);
    assert_eq!(left.difference(&right).unwrap(), left);
    assert_eq!(left.union(&right).unwrap(), Interval::closed(0, 10));
}

#[test]
fn test_strict_position() {
    let left = Interval::closed_open(0, 5);
    let right = Interval::closed(5, 9);
    assert!(left.strictly_left_of(&right));
    assert!(right.strictly_right_of(&left));
    assert!(!Interval::closed(0, 5).strictly_left_of(&right));
    assert!(!Interval::less_than(3).strictly_right_of(&Interval::closed(0, 1)));
    assert!(!Interval::at_least(10).strictly_left_of(&Interval::closed(20, 30)));
    assert!(!empty().strictly_left_of(&right));
}

#[test]
fn test_does_not_extend() {
    let a = Interval::closed(1, 5);
    assert!(a.does_not_extend_right_of(&Interval::closed(0, 5)));
    assert!(!a.does_not_extend_right_of(&Interval::closed_open(0, 5)));
    assert!(a.does_not_extend_right_of(&Interval::at_least(9)));
    assert!(a.does_not_extend_left_of(&Interval::closed(1, 2)));
    assert!(!a.does_not_extend_left_of(&Interval::closed(2, 9)));
    assert!(a.does_not_extend_left_of(&Interval::at_most(0)));
    assert!(!Interval::at_most(0).does_not_extend_left_of(&a));
    assert!(!a.does_not_extend_right_of(&empty()));
}

#[test]
fn test_adjacency() {
    assert!(Interval::closed_open(0, 5).is_adjacent_to(&Interval::closed(5, 9)));
    assert!(Interval::closed(5, 9).is_adjacent_to(&Interval::closed_open(0, 5)));
    assert!(!Interval::closed(0, 5).is_adjacent_to(&Interval::closed(5, 9)));
    assert!(!Interval::open(0, 5).is_adjacent_to(&Interval::open(5, 9)));
    assert!(!Interval::less_than(5).is_adjacent_to(&all()));
    assert!(!empty().is_adjacent_to(&Interval::closed(0, 1)));
}

#[test]
fn test_union() {
    assert_eq!(
        Interval::closed(0, 5).union(&Interval::closed(3, 9)).unwrap(),
        Interval::closed(0, 9)
    );
    assert_eq!(
        Interval::closed_open(0, 5).union(&Interval::closed(5, 9)).unwrap(),
        Interval::closed(0, 9)
    );
    assert_eq!(
        Interval::open(0, 5).union(&Interval::at_least(2)).unwrap(),
        Interval::greater_than(0)
    );
    assert_eq!(empty().union(&Interval::closed(1, 2)).unwrap(), Interval::closed(1, 2));
    assert_eq!(Interval::closed(1, 2).union(&empty()).unwrap(), Interval::closed(1, 2));
}

#[test]
fn test_union_with_gap_fails() {
    let err = Interval::closed(0, 1).union(&Interval::closed(3, 4)).unwrap_err();
    assert_eq!(err, CoreError::NonContiguous { operation: "union" });
    assert!(err.to_string().contains("[R002]"));
    assert!(Interval::open(0, 5).union(&Interval::open(5, 9)).is_err());
}

#[test]
fn test_intersect() {
    assert_eq!(
        Interval::closed(0, 5).intersect(&Interval::open(3, 9)),
        Interval::open_closed(3, 5)
    );
    assert_eq!(
        Interval::closed(0, 5).intersect(&Interval::closed(5, 9)),
        Interval::singleton(5)
    );
    assert!(Interval::closed_open(0, 5).intersect(&Interval::closed(5, 9)).is_empty());
    assert!(Interval::closed(0, 5).intersect(&empty()).is_empty());
    assert_eq!(all().intersect(&Interval::less_than(3)), Interval::less_than(3));
}

#[test]
fn test_difference() {
    assert_eq!(
        Interval::closed(0, 10).difference(&Interval::closed(5, 20)).unwrap(),
        Interval::closed_open(0, 5)
    );
    assert_eq!(
        Interval::closed(0, 10).difference(&Interval::at_most(3)).unwrap(),
        Interval::open_closed(3, 10)
    );
    assert!(Interval::closed(2, 3)
        .difference(&Interval::closed(0, 10))
        .unwrap()
        .is_empty());
    assert_eq!(
        Interval::closed(0, 1).difference(&Interval::closed(5, 6)).unwrap(),
        Interval::closed(0, 1)
    );
    assert_eq!(
        Interval::closed(0, 1).difference(&empty()).unwrap(),
        Interval::closed(0, 1)
    );
    assert!(empty().difference(&Interval::closed(0, 1)).unwrap().is_empty());
}

#[test]
fn test_difference_splitting_fails() {
    let err = Interval::closed(0, 10).difference(&Interval::closed(3, 4)).unwrap_err();
    assert_eq!(err, CoreError::NonContiguous { operation: "difference" });
}
