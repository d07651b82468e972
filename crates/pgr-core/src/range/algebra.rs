//! Range algebra: containment, overlap, position, adjacency and set operations
//!
//! All operations are pure and total over well-formed intervals. Empty
//! operands and unbounded ends are special-cased the same way throughout:
//! an empty interval contains nothing and overlaps nothing, and an unbounded
//! end never equals, and is never strictly beside, a finite one.

use super::bound::{bound_value, cmp_lower, cmp_upper, complement, lower_reaches_upper, touches};
use super::interval::Interval;
use crate::error::{CoreError, CoreResult};
use std::cmp::Ordering;
use std::ops::Bound;

impl<T: Ord> Interval<T> {
    /// Does this interval contain `point`?
    ///
    /// Both the lower and the upper test must hold.
    pub fn contains(&self, point: &T) -> bool {
        let Interval::Span { lower, upper } = self else {
            return false;
        };

        let lower_ok = match lower {
            Bound::Unbounded => true,
            Bound::Included(l) => point >= l,
            Bound::Excluded(l) => point > l,
        };
        let upper_ok = match upper {
            Bound::Unbounded => true,
            Bound::Included(u) => point <= u,
            Bound::Excluded(u) => point < u,
        };

        lower_ok && upper_ok
    }

    /// Does this interval contain every point of `other`?
    ///
    /// Every interval contains itself and the empty interval; `(,)` contains
    /// everything.
    pub fn contains_range(&self, other: &Self) -> bool {
        if self == other {
            return true;
        }
        let Interval::Span {
            lower: b_lower,
            upper: b_upper,
        } = other
        else {
            return true;
        };
        let Interval::Span {
            lower: a_lower,
            upper: a_upper,
        } = self
        else {
            return false;
        };
        if self.is_unbounded() {
            return true;
        }

        let lower_ok = cmp_lower(a_lower.as_ref(), b_lower.as_ref()) != Ordering::Greater;
        let upper_ok = cmp_upper(b_upper.as_ref(), a_upper.as_ref()) != Ordering::Greater;
        lower_ok && upper_ok
    }

    /// Is this interval contained by `other`?
    pub fn contained_by(&self, other: &Self) -> bool {
        other.contains_range(self)
    }

    /// Do the intervals overlap? (`&&`)
    ///
    /// True when either interval contains a finite endpoint value of the
    /// other, whether or not that endpoint is inclusive on its own side:
    /// `[0,5)` and `[5,10]` overlap, `(0,5)` and `(5,10)` do not. Spans
    /// without points overlap nothing.
    pub fn overlaps(&self, other: &Self) -> bool {
        if self.is_empty() || other.is_empty() || self.is_degenerate() || other.is_degenerate() {
            return false;
        }
        if self == other || self.is_unbounded() || other.is_unbounded() {
            return true;
        }

        self.contains_endpoint_of(other) || other.contains_endpoint_of(self)
    }

    fn contains_endpoint_of(&self, other: &Self) -> bool {
        [other.lower(), other.upper()]
            .into_iter()
            .flatten()
            .filter_map(bound_value)
            .any(|point| self.contains(point))
    }

    /// Do the two intervals share at least one point?
    fn shares_point(&self, other: &Self) -> bool {
        let (
            Interval::Span {
                lower: a_lower,
                upper: a_upper,
            },
            Interval::Span {
                lower: b_lower,
                upper: b_upper,
            },
        ) = (self, other)
        else {
            return false;
        };

        lower_reaches_upper(a_lower.as_ref(), b_upper.as_ref())
            && lower_reaches_upper(b_lower.as_ref(), a_upper.as_ref())
    }

    /// Does every point of this interval lie before every point of `other`? (`<<`)
    pub fn strictly_left_of(&self, other: &Self) -> bool {
        match (self.upper(), other.lower()) {
            (Some(a_upper), Some(b_lower)) => !lower_reaches_upper(b_lower, a_upper),
            _ => false,
        }
    }

    /// Does every point of this interval lie after every point of `other`? (`>>`)
    pub fn strictly_right_of(&self, other: &Self) -> bool {
        other.strictly_left_of(self)
    }

    /// Does this interval end no later than `other` ends? (`&<`)
    pub fn does_not_extend_right_of(&self, other: &Self) -> bool {
        match (self.upper(), other.upper()) {
            (Some(a_upper), Some(b_upper)) => cmp_upper(a_upper, b_upper) != Ordering::Greater,
            _ => false,
        }
    }

    /// Does this interval start no earlier than `other` starts? (`&>`)
    pub fn does_not_extend_left_of(&self, other: &Self) -> bool {
        match (self.lower(), other.lower()) {
            (Some(a_lower), Some(b_lower)) => cmp_lower(a_lower, b_lower) != Ordering::Less,
            _ => false,
        }
    }

    /// Do the intervals meet without a gap and without sharing a point? (`-|-`)
    pub fn is_adjacent_to(&self, other: &Self) -> bool {
        match (self, other) {
            (
                Interval::Span {
                    lower: a_lower,
                    upper: a_upper,
                },
                Interval::Span {
                    lower: b_lower,
                    upper: b_upper,
                },
            ) => {
                touches(a_upper.as_ref(), b_lower.as_ref())
                    || touches(b_upper.as_ref(), a_lower.as_ref())
            }
            _ => false,
        }
    }
}

impl<T: Ord + Clone> Interval<T> {
    /// Set union (`+`)
    ///
    /// Empty is the identity. Fails with [`CoreError::NonContiguous`] when the
    /// intervals neither overlap nor touch.
    pub fn union(&self, other: &Self) -> CoreResult<Self> {
        self.clone()
            .normalized()
            .union_of_normalized(&other.clone().normalized())
    }

    fn union_of_normalized(&self, other: &Self) -> CoreResult<Self> {
        let (
            Interval::Span {
                lower: a_lower,
                upper: a_upper,
            },
            Interval::Span {
                lower: b_lower,
                upper: b_upper,
            },
        ) = (self, other)
        else {
            return Ok(if self.is_empty() {
                other.clone()
            } else {
                self.clone()
            });
        };
        if !self.shares_point(other) && !self.is_adjacent_to(other) {
            return Err(CoreError::NonContiguous { operation: "union" });
        }

        let lower = if cmp_lower(a_lower.as_ref(), b_lower.as_ref()) == Ordering::Greater {
            b_lower
        } else {
            a_lower
        };
        let upper = if cmp_upper(a_upper.as_ref(), b_upper.as_ref()) == Ordering::Less {
            b_upper
        } else {
            a_upper
        };
        Ok(Interval::new(lower.clone(), upper.clone()).normalized())
    }

    /// Set intersection (`*`); empty is absorbing
    pub fn intersect(&self, other: &Self) -> Self {
        self.clone()
            .normalized()
            .intersect_normalized(&other.clone().normalized())
    }

    fn intersect_normalized(&self, other: &Self) -> Self {
        let (
            Interval::Span {
                lower: a_lower,
                upper: a_upper,
            },
            Interval::Span {
                lower: b_lower,
                upper: b_upper,
            },
        ) = (self, other)
        else {
            return Interval::Empty;
        };
        if !self.shares_point(other) {
            return Interval::Empty;
        }

        let lower = if cmp_lower(a_lower.as_ref(), b_lower.as_ref()) == Ordering::Less {
            b_lower
        } else {
            a_lower
        };
        let upper = if cmp_upper(a_upper.as_ref(), b_upper.as_ref()) == Ordering::Greater {
            b_upper
        } else {
            a_upper
        };
        Interval::new(lower.clone(), upper.clone()).normalized()
    }

    /// Set difference (`-`): the points of this interval not in `other`
    ///
    /// Fails with [`CoreError::NonContiguous`] when `other` sits strictly inside
    /// this interval and would split it in two.
    pub fn difference(&self, other: &Self) -> CoreResult<Self> {
        self.clone()
            .normalized()
            .difference_of_normalized(&other.clone().normalized())
    }

    fn difference_of_normalized(&self, other: &Self) -> CoreResult<Self> {
        let (
            Interval::Span {
                lower: a_lower,
                upper: a_upper,
            },
            Interval::Span {
                lower: b_lower,
                upper: b_upper,
            },
        ) = (self, other)
        else {
            return Ok(self.clone());
        };
        if !self.shares_point(other) {
            return Ok(self.clone());
        }

        let keeps_left = cmp_lower(a_lower.as_ref(), b_lower.as_ref()) == Ordering::Less;
        let keeps_right = cmp_upper(a_upper.as_ref(), b_upper.as_ref()) == Ordering::Greater;

        match (keeps_left, keeps_right) {
            (true, true) => Err(CoreError::NonContiguous {
                operation: "difference",
            }),
            (false, false) => Ok(Interval::Empty),
            (true, false) => {
                Ok(Interval::new(a_lower.clone(), complement(b_lower.clone())).normalized())
            }
            (false, true) => {
                Ok(Interval::new(complement(b_upper.clone()), a_upper.clone()).normalized())
            }
        }
    }
}

#[cfg(test)]
#[path = "algebra_test.rs"]
mod tests;
