//! The interval value type

use super::bound::{bound_value, cmp_lower, cmp_upper};
use crate::error::{CoreError, CoreResult};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::ops::Bound;

/// A possibly-infinite, possibly-empty interval over an ordered element type
///
/// Each end of a [`Interval::Span`] is independently [`Bound::Included`],
/// [`Bound::Excluded`] or [`Bound::Unbounded`]. An unbounded end carries no
/// value and no inclusivity, so two intervals built from the same bounds are
/// equal no matter how they were constructed.
///
/// Intervals are immutable: every algebra operation returns a new value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Interval<T> {
    /// The empty interval; contains no points
    Empty,
    /// An interval between two ends
    Span {
        /// Where the interval starts
        lower: Bound<T>,
        /// Where the interval ends
        upper: Bound<T>,
    },
}

impl<T> Interval<T> {
    /// Create an interval from two bounds, exactly as given
    ///
    /// Bounds that admit no point (`(3,3)`, `[5,3]`) are kept as a span;
    /// the set operations treat such a span as empty.
    pub fn new(lower: Bound<T>, upper: Bound<T>) -> Self {
        Interval::Span { lower, upper }
    }

    /// The empty interval
    pub fn empty() -> Self {
        Interval::Empty
    }

    /// The doubly-infinite interval `(,)`
    pub fn unbounded() -> Self {
        Interval::Span {
            lower: Bound::Unbounded,
            upper: Bound::Unbounded,
        }
    }

    /// `[lower,upper]`
    pub fn closed(lower: T, upper: T) -> Self {
        Self::new(Bound::Included(lower), Bound::Included(upper))
    }

    /// `(lower,upper)`
    pub fn open(lower: T, upper: T) -> Self {
        Self::new(Bound::Excluded(lower), Bound::Excluded(upper))
    }

    /// `[lower,upper)`
    pub fn closed_open(lower: T, upper: T) -> Self {
        Self::new(Bound::Included(lower), Bound::Excluded(upper))
    }

    /// `(lower,upper]`
    pub fn open_closed(lower: T, upper: T) -> Self {
        Self::new(Bound::Excluded(lower), Bound::Included(upper))
    }

    /// `[lower,)`
    pub fn at_least(lower: T) -> Self {
        Self::new(Bound::Included(lower), Bound::Unbounded)
    }

    /// `(lower,)`
    pub fn greater_than(lower: T) -> Self {
        Self::new(Bound::Excluded(lower), Bound::Unbounded)
    }

    /// `(,upper]`
    pub fn at_most(upper: T) -> Self {
        Self::new(Bound::Unbounded, Bound::Included(upper))
    }

    /// `(,upper)`
    pub fn less_than(upper: T) -> Self {
        Self::new(Bound::Unbounded, Bound::Excluded(upper))
    }

    /// `[value,value]`
    pub fn singleton(value: T) -> Self
    where
        T: Clone,
    {
        Self::closed(value.clone(), value)
    }

    /// Returns true for the empty interval
    pub fn is_empty(&self) -> bool {
        matches!(self, Interval::Empty)
    }

    /// Lower bound, or `None` for the empty interval
    pub fn lower(&self) -> Option<Bound<&T>> {
        match self {
            Interval::Empty => None,
            Interval::Span { lower, .. } => Some(lower.as_ref()),
        }
    }

    /// Upper bound, or `None` for the empty interval
    pub fn upper(&self) -> Option<Bound<&T>> {
        match self {
            Interval::Empty => None,
            Interval::Span { upper, .. } => Some(upper.as_ref()),
        }
    }

    /// Finite lower bound value
    pub fn lower_bound(&self) -> Option<&T> {
        self.lower().and_then(bound_value)
    }

    /// Finite upper bound value
    pub fn upper_bound(&self) -> Option<&T> {
        self.upper().and_then(bound_value)
    }

    /// True when the lower bound is finite and inclusive
    pub fn lower_inclusive(&self) -> bool {
        matches!(self.lower(), Some(Bound::Included(_)))
    }

    /// True when the upper bound is finite and inclusive
    pub fn upper_inclusive(&self) -> bool {
        matches!(self.upper(), Some(Bound::Included(_)))
    }

    /// True when the interval is non-empty and unbounded below
    pub fn lower_infinite(&self) -> bool {
        matches!(self.lower(), Some(Bound::Unbounded))
    }

    /// True when the interval is non-empty and unbounded above
    pub fn upper_infinite(&self) -> bool {
        matches!(self.upper(), Some(Bound::Unbounded))
    }

    /// True for `(,)`
    pub fn is_unbounded(&self) -> bool {
        self.lower_infinite() && self.upper_infinite()
    }

    /// Convert every bound value, keeping flags intact
    pub fn try_map<U, E>(self, mut f: impl FnMut(T) -> Result<U, E>) -> Result<Interval<U>, E> {
        let map_bound = |bound: Bound<T>, f: &mut dyn FnMut(T) -> Result<U, E>| match bound {
            Bound::Included(v) => f(v).map(Bound::Included),
            Bound::Excluded(v) => f(v).map(Bound::Excluded),
            Bound::Unbounded => Ok(Bound::Unbounded),
        };
        match self {
            Interval::Empty => Ok(Interval::Empty),
            Interval::Span { lower, upper } => Ok(Interval::Span {
                lower: map_bound(lower, &mut f)?,
                upper: map_bound(upper, &mut f)?,
            }),
        }
    }

    /// Render in the backend range text format, formatting bound values with `f`
    ///
    /// `[0,5)`, `(,10]`, `(,)` and `empty`. Unbounded ends always use the
    /// exclusive bracket.
    pub fn to_text_with(&self, mut f: impl FnMut(&T) -> String) -> String {
        match self {
            Interval::Empty => "empty".to_string(),
            Interval::Span { lower, upper } => {
                let (open, low) = match lower {
                    Bound::Included(v) => ('[', f(v)),
                    Bound::Excluded(v) => ('(', f(v)),
                    Bound::Unbounded => ('(', String::new()),
                };
                let (close, high) = match upper {
                    Bound::Included(v) => (']', f(v)),
                    Bound::Excluded(v) => (')', f(v)),
                    Bound::Unbounded => (')', String::new()),
                };
                format!("{open}{low},{high}{close}")
            }
        }
    }
}

impl<T: Ord + fmt::Debug> Interval<T> {
    /// Create an interval, rejecting a lower bound above the upper bound
    pub fn try_new(lower: Bound<T>, upper: Bound<T>) -> CoreResult<Self> {
        if let (Some(l), Some(u)) = (bound_value(lower.as_ref()), bound_value(upper.as_ref())) {
            if l > u {
                return Err(CoreError::InvertedBounds {
                    lower: format!("{l:?}"),
                    upper: format!("{u:?}"),
                });
            }
        }
        Ok(Self::new(lower, upper))
    }
}

impl<T: Ord> Interval<T> {
    /// Collapse intervals that contain no points to [`Interval::Empty`]
    ///
    /// `[5,3]`, `[3,3)` and `(3,3)` are all empty; `[3,3]` is not.
    pub fn normalized(self) -> Self {
        if self.is_degenerate() {
            Interval::Empty
        } else {
            self
        }
    }

    /// Returns true for a [`Interval::Span`] whose bounds admit no point
    pub fn is_degenerate(&self) -> bool {
        match self {
            Interval::Empty => false,
            Interval::Span { lower, upper } => match (lower, upper) {
                (Bound::Included(l), Bound::Included(u)) => l > u,
                (
                    Bound::Included(l) | Bound::Excluded(l),
                    Bound::Included(u) | Bound::Excluded(u),
                ) => l >= u,
                _ => false,
            },
        }
    }
}

/// Intervals order empty first, then by lower bound, then by upper bound
impl<T: Ord> Ord for Interval<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Interval::Empty, Interval::Empty) => Ordering::Equal,
            (Interval::Empty, _) => Ordering::Less,
            (_, Interval::Empty) => Ordering::Greater,
            (
                Interval::Span {
                    lower: al,
                    upper: au,
                },
                Interval::Span {
                    lower: bl,
                    upper: bu,
                },
            ) => cmp_lower(al.as_ref(), bl.as_ref())
                .then_with(|| cmp_upper(au.as_ref(), bu.as_ref())),
        }
    }
}

impl<T: Ord> PartialOrd for Interval<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T: fmt::Display> fmt::Display for Interval<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_text_with(|v| v.to_string()))
    }
}

#[cfg(test)]
#[path = "interval_test.rs"]
mod tests;
