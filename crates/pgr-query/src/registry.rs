//! Static table of translatable range operations
//!
//! Each supported operation is identified by its name and the kinds of its two
//! operands. The table is generic over the range element type, so
//! `Contains(Range<i32>, i32)` and `Contains(Range<Date>, Date)` share one
//! entry.

use crate::operator::OperatorTag;
use pgr_core::RuntimeType;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::OnceLock;

/// Name of an application-level range operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum OperationName {
    /// Range holds a value or another range (`@>`)
    Contains,
    /// Value or range lies within a range (`<@`)
    ContainedBy,
    /// Ranges have points in common (`&&`)
    Overlaps,
    /// Every point of the left range is below the right range (`<<`)
    IsStrictlyLeftOf,
    /// Every point of the left range is above the right range (`>>`)
    IsStrictlyRightOf,
    /// Left range starts at or after the right range's start (`&>`)
    DoesNotExtendLeftOf,
    /// Left range ends at or before the right range's end (`&<`)
    DoesNotExtendRightOf,
    /// Ranges meet with no gap and no shared point (`-|-`)
    IsAdjacentTo,
    /// Range union (`+`)
    Union,
    /// Range intersection (`*`)
    Intersect,
    /// Range difference (`-`)
    Except,
}

impl OperationName {
    /// Method name as it appears in a call node
    pub fn method_name(self) -> &'static str {
        match self {
            OperationName::Contains => "Contains",
            OperationName::ContainedBy => "ContainedBy",
            OperationName::Overlaps => "Overlaps",
            OperationName::IsStrictlyLeftOf => "IsStrictlyLeftOf",
            OperationName::IsStrictlyRightOf => "IsStrictlyRightOf",
            OperationName::DoesNotExtendLeftOf => "DoesNotExtendLeftOf",
            OperationName::DoesNotExtendRightOf => "DoesNotExtendRightOf",
            OperationName::IsAdjacentTo => "IsAdjacentTo",
            OperationName::Union => "Union",
            OperationName::Intersect => "Intersect",
            OperationName::Except => "Except",
        }
    }

    /// Parse a call node's method name
    pub fn from_method(name: &str) -> Option<Self> {
        let op = match name {
            "Contains" => OperationName::Contains,
            "ContainedBy" => OperationName::ContainedBy,
            "Overlaps" => OperationName::Overlaps,
            "IsStrictlyLeftOf" => OperationName::IsStrictlyLeftOf,
            "IsStrictlyRightOf" => OperationName::IsStrictlyRightOf,
            "DoesNotExtendLeftOf" => OperationName::DoesNotExtendLeftOf,
            "DoesNotExtendRightOf" => OperationName::DoesNotExtendRightOf,
            "IsAdjacentTo" => OperationName::IsAdjacentTo,
            "Union" => OperationName::Union,
            "Intersect" => OperationName::Intersect,
            "Except" => OperationName::Except,
            _ => return None,
        };
        Some(op)
    }
}

impl std::fmt::Display for OperationName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.method_name())
    }
}

/// Whether an operand is a single value or a range of values
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum OperandKind {
    /// A single element value
    Point,
    /// A range of element values
    Interval,
}

impl OperandKind {
    /// Classify an operand by its runtime type
    pub fn of(ty: &RuntimeType) -> Self {
        if ty.is_range() {
            OperandKind::Interval
        } else {
            OperandKind::Point
        }
    }
}

/// Registry key: operation name plus ordered operand kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct OperationSignature {
    pub name: OperationName,
    pub operands: (OperandKind, OperandKind),
}

impl OperationSignature {
    /// Create a signature
    pub fn new(name: OperationName, left: OperandKind, right: OperandKind) -> Self {
        Self {
            name,
            operands: (left, right),
        }
    }
}

impl std::fmt::Display for OperationSignature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}({:?}, {:?})",
            self.name, self.operands.0, self.operands.1
        )
    }
}

/// Operand order of the rendered operator relative to the call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Orientation {
    /// Keep the call's operand order
    Preserve,
    /// Render the call's second operand on the left
    Swap,
}

/// What a registered signature lowers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Translation {
    pub operator: OperatorTag,
    pub orientation: Orientation,
}

impl Translation {
    /// Keep operand order
    pub fn preserve(operator: OperatorTag) -> Self {
        Self {
            operator,
            orientation: Orientation::Preserve,
        }
    }

    /// Swap operands
    pub fn swap(operator: OperatorTag) -> Self {
        Self {
            operator,
            orientation: Orientation::Swap,
        }
    }
}

/// Signature-to-translation table
#[derive(Debug, Clone, Default)]
pub struct OperationRegistry {
    entries: HashMap<OperationSignature, Translation>,
}

impl OperationRegistry {
    /// An empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// The process-wide registry of built-in range operations
    pub fn builtin() -> &'static OperationRegistry {
        static BUILTIN: OnceLock<OperationRegistry> = OnceLock::new();
        BUILTIN.get_or_init(Self::with_builtins)
    }

    /// A fresh registry holding the built-in range operations
    pub fn with_builtins() -> Self {
        use OperandKind::{Interval, Point};
        use OperationName as N;
        use OperatorTag as T;

        let table = [
            (N::Contains, Interval, Point, Translation::preserve(T::Contains)),
            (N::Contains, Interval, Interval, Translation::preserve(T::Contains)),
            // `value.ContainedBy(range)` renders as `range @> value`
            (N::ContainedBy, Point, Interval, Translation::swap(T::Contains)),
            (N::ContainedBy, Interval, Interval, Translation::preserve(T::ContainedBy)),
            (N::Overlaps, Interval, Interval, Translation::preserve(T::Overlaps)),
            (N::IsStrictlyLeftOf, Interval, Interval, Translation::preserve(T::StrictlyLeftOf)),
            (N::IsStrictlyRightOf, Interval, Interval, Translation::preserve(T::StrictlyRightOf)),
            (
                N::DoesNotExtendLeftOf,
                Interval,
                Interval,
                Translation::preserve(T::DoesNotExtendLeftOf),
            ),
            (
                N::DoesNotExtendRightOf,
                Interval,
                Interval,
                Translation::preserve(T::DoesNotExtendRightOf),
            ),
            (N::IsAdjacentTo, Interval, Interval, Translation::preserve(T::IsAdjacentTo)),
            (N::Union, Interval, Interval, Translation::preserve(T::Union)),
            (N::Intersect, Interval, Interval, Translation::preserve(T::Intersection)),
            (N::Except, Interval, Interval, Translation::preserve(T::Difference)),
        ];

        let mut registry = Self::new();
        for (name, left, right, translation) in table {
            registry.register(OperationSignature::new(name, left, right), translation);
        }
        registry
    }

    /// Register a translation
    ///
    /// Returns false, leaving the existing entry in place, when the signature
    /// is already registered.
    pub fn register(&mut self, signature: OperationSignature, translation: Translation) -> bool {
        if let Some(existing) = self.entries.get(&signature) {
            log::warn!(
                "Ignoring duplicate registration of {signature} (already lowers to '{}')",
                existing.operator
            );
            return false;
        }
        self.entries.insert(signature, translation);
        true
    }

    /// Look up the translation for a signature; `None` means not translatable
    pub fn lookup(&self, signature: &OperationSignature) -> Option<Translation> {
        self.entries.get(signature).copied()
    }

    /// Number of registered signatures
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true when nothing is registered
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All registered signatures, sorted
    pub fn signatures(&self) -> Vec<OperationSignature> {
        let mut sigs: Vec<_> = self.entries.keys().copied().collect();
        sigs.sort();
        sigs
    }
}

#[cfg(test)]
#[path = "registry_test.rs"]
mod tests;
