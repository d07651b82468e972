//! Type mapping descriptors
//!
//! A [`TypeMapping`] pairs a runtime type with a backend store type and knows
//! how to render values of it as SQL literals and how to coerce them into
//! parameter values. Descriptors are immutable; facet specialization returns a
//! new descriptor.

mod coerce;
mod literal;

use crate::facets::{store_type_base, with_facet_args};
use pgr_core::RuntimeType;
use std::sync::Arc;

/// Store type family of a descriptor
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum MappingKind {
    Bool,
    /// `smallint`
    Int2,
    /// `integer`
    Int4,
    /// `bigint`
    Int8,
    /// `real`
    Float4,
    /// `double precision`
    Float8,
    Numeric,
    Money,
    /// Unbounded `text`
    Text,
    /// `character varying`
    VarChar,
    /// `character`
    Char,
    Citext,
    Xml,
    Json,
    Jsonb,
    Bytea,
    Uuid,
    Date,
    Time,
    Timestamp,
    TimestampTz,
    Interval,
    Inet,
    Cidr,
    MacAddr,
    Bit,
    VarBit,
    Hstore,
    Point,
    /// PostGIS geometry through the legacy built-in mapping
    LegacyGeometry,
    /// Range over the element descriptor's store type
    Range { element: Arc<TypeMapping> },
    /// One-dimensional array of the element descriptor's store type
    Array { element: Arc<TypeMapping> },
}

impl MappingKind {
    /// Families whose single facet is a length
    fn takes_size(&self) -> bool {
        matches!(
            self,
            MappingKind::VarChar | MappingKind::Char | MappingKind::Bit | MappingKind::VarBit
        )
    }

    /// Families whose single facet is a fractional-seconds precision
    fn takes_time_precision(&self) -> bool {
        matches!(
            self,
            MappingKind::Time
                | MappingKind::Timestamp
                | MappingKind::TimestampTz
                | MappingKind::Interval
        )
    }
}

/// An immutable runtime type to store type descriptor
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TypeMapping {
    clr_type: RuntimeType,
    store_type: String,
    store_type_base: String,
    size: Option<u32>,
    precision: Option<u32>,
    scale: Option<u32>,
    kind: MappingKind,
}

impl TypeMapping {
    /// Unfaceted descriptor
    pub fn new(store_type: impl Into<String>, clr_type: RuntimeType, kind: MappingKind) -> Self {
        let store_type = store_type.into();
        Self {
            clr_type,
            store_type_base: store_type_base(&store_type),
            store_type,
            size: None,
            precision: None,
            scale: None,
            kind,
        }
    }

    /// Range descriptor over `element`
    pub fn range(store_type: impl Into<String>, element: Arc<TypeMapping>) -> Self {
        let clr_type = RuntimeType::range(element.clr_type.clone());
        Self::new(store_type, clr_type, MappingKind::Range { element })
    }

    /// Array descriptor over `element`, for an array or list runtime type
    pub fn array(
        store_type: impl Into<String>,
        element: Arc<TypeMapping>,
        clr_type: RuntimeType,
    ) -> Self {
        Self::new(store_type, clr_type, MappingKind::Array { element })
    }

    /// Runtime type
    pub fn clr_type(&self) -> &RuntimeType {
        &self.clr_type
    }

    /// Full store type name, facets included
    pub fn store_type(&self) -> &str {
        &self.store_type
    }

    /// Store type name without facets
    pub fn store_type_base(&self) -> &str {
        &self.store_type_base
    }

    /// Length facet
    pub fn size(&self) -> Option<u32> {
        self.size
    }

    /// Precision facet
    pub fn precision(&self) -> Option<u32> {
        self.precision
    }

    /// Scale facet
    pub fn scale(&self) -> Option<u32> {
        self.scale
    }

    /// Store type family
    pub fn kind(&self) -> &MappingKind {
        &self.kind
    }

    /// Element descriptor of a range or array descriptor
    pub fn element(&self) -> Option<&Arc<TypeMapping>> {
        match &self.kind {
            MappingKind::Range { element } | MappingKind::Array { element } => Some(element),
            _ => None,
        }
    }

    /// Returns true for array descriptors
    pub fn is_array(&self) -> bool {
        matches!(self.kind, MappingKind::Array { .. })
    }

    /// Specialized copy under a new store type name
    ///
    /// Only the facets meaningful to this descriptor's family are kept: a
    /// length for sized text and bit strings, precision and scale for
    /// numerics, precision for temporal types.
    pub fn clone_with_facets(
        &self,
        store_type: impl Into<String>,
        size: Option<u32>,
        precision: Option<u32>,
        scale: Option<u32>,
    ) -> Self {
        let store_type = store_type.into();
        let (size, precision, scale) = match &self.kind {
            k if k.takes_size() => (size, None, None),
            MappingKind::Numeric => (None, precision, precision.and(scale)),
            k if k.takes_time_precision() => (None, precision, None),
            _ => (None, None, None),
        };
        Self {
            clr_type: self.clr_type.clone(),
            store_type_base: store_type_base(&store_type),
            store_type,
            size,
            precision,
            scale,
            kind: self.kind.clone(),
        }
    }

    /// Parenthesized facet list this descriptor's family would take, if any
    pub(crate) fn facet_args(
        &self,
        size: Option<u32>,
        precision: Option<u32>,
        scale: Option<u32>,
    ) -> Option<String> {
        match (&self.kind, size, precision, scale) {
            (k, Some(size), _, _) if k.takes_size() => Some(size.to_string()),
            (MappingKind::Numeric, _, Some(p), Some(s)) => Some(format!("{p},{s}")),
            (MappingKind::Numeric, _, Some(p), None) => Some(p.to_string()),
            (k, _, Some(p), _) if k.takes_time_precision() => Some(p.to_string()),
            _ => None,
        }
    }

    /// Specialized copy whose store type name is generated from the facets
    ///
    /// Returns an unchanged copy when none of the facets apply to this
    /// descriptor's family.
    pub fn with_facets(
        &self,
        size: Option<u32>,
        precision: Option<u32>,
        scale: Option<u32>,
    ) -> Self {
        match self.facet_args(size, precision, scale) {
            Some(args) => self.clone_with_facets(
                with_facet_args(&self.store_type_base, &args),
                size,
                precision,
                scale,
            ),
            None => self.clone(),
        }
    }
}

impl std::fmt::Display for TypeMapping {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} <-> {}", self.clr_type, self.store_type)
    }
}

#[cfg(test)]
#[path = "mapping_test.rs"]
mod tests;
