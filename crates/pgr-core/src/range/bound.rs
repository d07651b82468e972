//! Bound comparison discipline shared by every algebra operation
//!
//! Lower and upper bounds order differently at the same value: an inclusive
//! lower bound starts before an exclusive one, while an inclusive upper bound
//! ends after an exclusive one. An unbounded end is never equal to a finite one.

use std::cmp::Ordering;
use std::ops::Bound;

/// Finite value of a bound, if any
pub(crate) fn bound_value<T>(bound: Bound<&T>) -> Option<&T> {
    match bound {
        Bound::Included(v) | Bound::Excluded(v) => Some(v),
        Bound::Unbounded => None,
    }
}

/// Order two lower bounds by where the interval starts
pub(crate) fn cmp_lower<T: Ord>(a: Bound<&T>, b: Bound<&T>) -> Ordering {
    match (a, b) {
        (Bound::Unbounded, Bound::Unbounded) => Ordering::Equal,
        (Bound::Unbounded, _) => Ordering::Less,
        (_, Bound::Unbounded) => Ordering::Greater,
        (Bound::Included(x), Bound::Included(y)) | (Bound::Excluded(x), Bound::Excluded(y)) => {
            x.cmp(y)
        }
        (Bound::Included(x), Bound::Excluded(y)) => x.cmp(y).then(Ordering::Less),
        (Bound::Excluded(x), Bound::Included(y)) => x.cmp(y).then(Ordering::Greater),
    }
}

/// Order two upper bounds by where the interval ends
pub(crate) fn cmp_upper<T: Ord>(a: Bound<&T>, b: Bound<&T>) -> Ordering {
    match (a, b) {
        (Bound::Unbounded, Bound::Unbounded) => Ordering::Equal,
        (Bound::Unbounded, _) => Ordering::Greater,
        (_, Bound::Unbounded) => Ordering::Less,
        (Bound::Included(x), Bound::Included(y)) | (Bound::Excluded(x), Bound::Excluded(y)) => {
            x.cmp(y)
        }
        (Bound::Included(x), Bound::Excluded(y)) => x.cmp(y).then(Ordering::Greater),
        (Bound::Excluded(x), Bound::Included(y)) => x.cmp(y).then(Ordering::Less),
    }
}

/// True when some point can lie at or after `lower` and at or before `upper`
pub(crate) fn lower_reaches_upper<T: Ord>(lower: Bound<&T>, upper: Bound<&T>) -> bool {
    match (lower, upper) {
        (Bound::Unbounded, _) | (_, Bound::Unbounded) => true,
        (Bound::Included(l), Bound::Included(u)) => l <= u,
        (Bound::Included(l) | Bound::Excluded(l), Bound::Included(u) | Bound::Excluded(u)) => {
            l < u
        }
    }
}

/// True when an upper bound and a lower bound meet at one finite value with
/// exactly one side including it, leaving neither a gap nor a shared point
pub(crate) fn touches<T: Ord>(upper: Bound<&T>, lower: Bound<&T>) -> bool {
    match (upper, lower) {
        (Bound::Included(u), Bound::Excluded(l)) | (Bound::Excluded(u), Bound::Included(l)) => {
            u == l
        }
        _ => false,
    }
}

/// The bound that starts (or ends) exactly where this one stops
pub(crate) fn complement<T>(bound: Bound<T>) -> Bound<T> {
    match bound {
        Bound::Included(v) => Bound::Excluded(v),
        Bound::Excluded(v) => Bound::Included(v),
        Bound::Unbounded => Bound::Unbounded,
    }
}

#[cfg(test)]
#[path = "bound_test.rs"]
mod tests;
