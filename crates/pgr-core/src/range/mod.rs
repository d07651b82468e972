//! Interval model and range algebra
//!
//! An [`Interval`] is either empty or a span between two independently
//! inclusive, exclusive or unbounded ends. The algebra (containment, overlap,
//! adjacency, union, intersection, difference) lives in [`algebra`] and is
//! expressed entirely in terms of the bound comparisons in [`bound`].

pub mod algebra;
pub(crate) mod bound;
pub mod interval;

pub use interval::Interval;
