//! Shared test utilities for pgr-storage

use crate::error::MappingError;
use crate::mapping::TypeMapping;
use crate::resolver::{MappingInfo, TypeMappingSource};
use pgr_core::RuntimeType;
use std::sync::Arc;

/// Resolve a store type name with facets parsed from it, panicking on absence
pub fn store(source: &TypeMappingSource, name: &str) -> Arc<TypeMapping> {
    source
        .find_mapping_for_store_type(name)
        .unwrap_or_else(|e| panic!("resolving '{name}' failed: {e}"))
        .unwrap_or_else(|| panic!("no mapping for '{name}'"))
}

/// Resolve a runtime type, panicking on absence
pub fn clr(source: &TypeMappingSource, clr_type: &RuntimeType) -> Arc<TypeMapping> {
    source
        .find_mapping_for_clr(clr_type)
        .unwrap_or_else(|e| panic!("resolving {clr_type} failed: {e}"))
        .unwrap_or_else(|| panic!("no mapping for {clr_type}"))
}

/// Resolve `info` expecting an unsupported shape
pub fn expect_unsupported(source: &TypeMappingSource, info: &MappingInfo) -> String {
    match source.find_mapping(info) {
        Err(MappingError::UnsupportedShape { shape }) => shape,
        other => panic!("expected an unsupported shape for {info:?}, got {other:?}"),
    }
}
