//! pgr-storage: store type mapping for pgrange
//!
//! This crate pairs runtime types with backend store types. A
//! [`TypeMapping`] renders literals and coerces parameters for one pairing;
//! a [`TypeMappingSource`] finds the pairing for a property from its runtime
//! type, its declared store type name, or both.

pub mod config;
pub mod error;
pub mod facets;
pub mod mapping;
pub mod resolver;

#[cfg(any(test, feature = "test-support"))]
pub mod test_utils;

pub use config::{ResolverConfig, UserRange};
pub use error::{MappingError, MappingResult};
pub use facets::{parse_store_type, ParsedStoreType};
pub use mapping::{MappingKind, TypeMapping};
pub use resolver::{MappingInfo, TypeMappingSource};
