//! Resolution requests

use crate::facets::parse_store_type;
use pgr_core::RuntimeType;

/// What a caller knows about a property when asking for its descriptor
///
/// Built either from a runtime type or from a store type name, with the
/// facets given explicitly or parsed out of the name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct MappingInfo {
    /// Runtime type, if declared
    pub clr_type: Option<RuntimeType>,
    /// Store type name as written, facets included
    pub store_type: Option<String>,
    pub size: Option<u32>,
    pub precision: Option<u32>,
    pub scale: Option<u32>,
}

impl MappingInfo {
    /// Request keyed by runtime type only
    pub fn for_clr(clr_type: RuntimeType) -> Self {
        Self {
            clr_type: Some(clr_type),
            ..Self::default()
        }
    }

    /// Request keyed by store type name, facets taken from the name
    pub fn for_store_type(store_type: impl Into<String>) -> Self {
        let store_type = store_type.into();
        let parsed = parse_store_type(&store_type);
        Self {
            clr_type: None,
            store_type: Some(store_type),
            size: parsed.size,
            precision: parsed.precision,
            scale: parsed.scale,
        }
    }

    pub fn with_clr(mut self, clr_type: RuntimeType) -> Self {
        self.clr_type = Some(clr_type);
        self
    }

    pub fn with_size(mut self, size: u32) -> Self {
        self.size = Some(size);
        self
    }

    pub fn with_precision(mut self, precision: u32) -> Self {
        self.precision = Some(precision);
        self
    }

    pub fn with_scale(mut self, scale: u32) -> Self {
        self.scale = Some(scale);
        self
    }

    /// Store type name with facets removed
    pub fn store_type_base(&self) -> Option<String> {
        self.store_type
            .as_deref()
            .map(|name| parse_store_type(name).base)
    }

    pub(crate) fn facets(&self) -> (Option<u32>, Option<u32>, Option<u32>) {
        (self.size, self.precision, self.scale)
    }
}
