//! Type mapping resolution
//!
//! [`TypeMappingSource`] answers "which descriptor carries this property?"
//! from a runtime type, a store type name, or both. Specialized clones and
//! array descriptors built along the way are memoized, so repeated requests
//! for the same shape return the same `Arc`.

mod builtin;
mod info;

pub use info::MappingInfo;

use crate::config::ResolverConfig;
use crate::error::{MappingError, MappingResult};
use crate::facets::parse_store_type;
use crate::mapping::{MappingKind, TypeMapping};
use builtin::{builtin_tables, ClrTable, SizedDescriptors, StoreTable};
use dashmap::DashMap;
use log::{debug, trace, warn};
use pgr_core::RuntimeType;
use std::fmt;
use std::hash::Hash;
use std::sync::Arc;

type Facets = (Option<u32>, Option<u32>, Option<u32>);

const ARRAY_SUFFIX: &str = "[]";

/// Memoization key for descriptors derived from a store type name
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct StoreKey {
    name: String,
    clr_type: RuntimeType,
    facets: Facets,
}

/// Memoization key for descriptors derived from a runtime type
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct ClrKey {
    clr_type: RuntimeType,
    facets: Facets,
}

/// Resolves runtime types and store type names to [`TypeMapping`] descriptors
///
/// The lookup tables are fixed at construction. The only mutable state is
/// the memoization cache, which is safe to share across threads: concurrent
/// misses on one key may each build a descriptor, but a single one is kept
/// and every caller observes it afterwards.
pub struct TypeMappingSource {
    store_types: StoreTable,
    clr_types: ClrTable,
    sized: SizedDescriptors,
    max_varchar_size: u32,
    store_cache: DashMap<StoreKey, Arc<TypeMapping>>,
    clr_cache: DashMap<ClrKey, Arc<TypeMapping>>,
}

impl TypeMappingSource {
    /// Resolver over the built-in tables with the default configuration
    pub fn with_defaults() -> Self {
        Self::from_tables(&ResolverConfig::default())
    }

    /// Resolver for `config`, registering its user-defined range types
    pub fn new(config: ResolverConfig) -> MappingResult<Self> {
        config.validate()?;
        let mut source = Self::from_tables(&config);
        for range in &config.ranges {
            source.register_range(&range.store_type, &range.subtype)?;
        }
        Ok(source)
    }

    fn from_tables(config: &ResolverConfig) -> Self {
        let tables = builtin_tables(config.legacy_geometry);
        Self {
            store_types: tables.store,
            clr_types: tables.clr,
            sized: tables.sized,
            max_varchar_size: config.max_varchar_size,
            store_cache: DashMap::new(),
            clr_cache: DashMap::new(),
        }
    }

    fn register_range(&mut self, store_type: &str, subtype: &str) -> MappingResult<()> {
        let name = store_type.trim().to_lowercase();
        if self.store_types.contains_key(&name) {
            return Err(MappingError::ConfigInvalid {
                message: format!("Range '{store_type}' collides with a built-in store type"),
            });
        }

        let element = self
            .find_by_store_type(subtype, None, (None, None, None))?
            .ok_or_else(|| MappingError::ConfigInvalid {
                message: format!("Range '{store_type}' has unknown subtype '{subtype}'"),
            })?;

        let mapping = Arc::new(TypeMapping::range(name.clone(), element));
        debug!("Registered range type {}", mapping);
        self.clr_types
            .entry(mapping.clr_type().clone())
            .or_insert_with(|| Arc::clone(&mapping));
        self.store_types.insert(name, vec![mapping]);
        Ok(())
    }

    /// Find the descriptor for `info`
    ///
    /// Returns `Ok(None)` when nothing maps the requested combination and
    /// `Err(UnsupportedShape)` for arrays of arrays and multi-dimensional
    /// arrays.
    pub fn find_mapping(&self, info: &MappingInfo) -> MappingResult<Option<Arc<TypeMapping>>> {
        match (&info.store_type, &info.clr_type) {
            (Some(name), clr_type) => {
                self.find_by_store_type(name, clr_type.as_ref(), info.facets())
            }
            (None, Some(clr_type)) => self.find_by_clr(clr_type, info.facets()),
            (None, None) => Ok(None),
        }
    }

    /// Like [`find_mapping`](Self::find_mapping), reporting absence as
    /// [`MappingError::NotFound`]
    pub fn resolve(&self, info: &MappingInfo) -> MappingResult<Arc<TypeMapping>> {
        self.find_mapping(info)?
            .ok_or_else(|| MappingError::NotFound {
                clr_type: info.clr_type.as_ref().map(|t| t.to_string()),
                store_type: info.store_type.clone(),
            })
    }

    /// Shorthand for a runtime-type-only request
    pub fn find_mapping_for_clr(
        &self,
        clr_type: &RuntimeType,
    ) -> MappingResult<Option<Arc<TypeMapping>>> {
        self.find_by_clr(clr_type, (None, None, None))
    }

    /// Shorthand for a store-type-only request, facets parsed from the name
    pub fn find_mapping_for_store_type(
        &self,
        store_type: &str,
    ) -> MappingResult<Option<Arc<TypeMapping>>> {
        self.find_mapping(&MappingInfo::for_store_type(store_type))
    }

    /// Number of memoized descriptors
    pub fn cached_len(&self) -> usize {
        self.store_cache.len() + self.clr_cache.len()
    }

    fn find_by_store_type(
        &self,
        name: &str,
        clr_type: Option<&RuntimeType>,
        facets: Facets,
    ) -> MappingResult<Option<Arc<TypeMapping>>> {
        let name = name.trim();
        let key = name.to_lowercase();

        if let Some(candidates) = self.store_types.get(&key) {
            return Ok(pick(candidates, clr_type));
        }

        let parsed = parse_store_type(&key);
        if parsed.out_of_range {
            debug!("Store type '{}' has a facet out of range", name);
            return Ok(None);
        }
        if parsed.base != key {
            if let Some(candidates) = self.store_types.get(&parsed.base) {
                let Some(found) = pick(candidates, clr_type) else {
                    return Ok(None);
                };
                let facets = (
                    facets.0.or(parsed.size),
                    facets.1.or(parsed.precision),
                    facets.2.or(parsed.scale),
                );
                let cache_key = StoreKey {
                    name: key,
                    clr_type: found.clr_type().clone(),
                    facets,
                };
                let (size, precision, scale) = facets;
                return Ok(Some(memoize(&self.store_cache, cache_key, || {
                    found.clone_with_facets(name, size, precision, scale)
                })));
            }
        }

        if let Some(element_name) = key.strip_suffix(ARRAY_SUFFIX) {
            return self.find_store_array(name, &key, element_name.trim_end(), clr_type, facets);
        }

        Ok(None)
    }

    fn find_store_array(
        &self,
        name: &str,
        key: &str,
        element_name: &str,
        clr_type: Option<&RuntimeType>,
        facets: Facets,
    ) -> MappingResult<Option<Arc<TypeMapping>>> {
        if element_name.ends_with(ARRAY_SUFFIX) {
            return Err(unsupported(format!("array of arrays '{name}'")));
        }

        let element_clr = match clr_type {
            None => None,
            Some(clr) if matches!(clr, RuntimeType::MultiArray { .. }) => {
                return Err(unsupported(format!("multi-dimensional array {clr}")));
            }
            Some(clr) => match clr.collection_element() {
                Some(element) if element.is_collection() => {
                    return Err(unsupported(format!("array of arrays {clr}")));
                }
                Some(element) => Some(element),
                None => return Ok(None),
            },
        };

        let Some(element) = self.find_by_store_type(element_name, element_clr, facets)? else {
            return Ok(None);
        };

        let clr_type = clr_type
            .cloned()
            .unwrap_or_else(|| RuntimeType::array(element.clr_type().clone()));
        let cache_key = StoreKey {
            name: key.to_string(),
            clr_type: clr_type.clone(),
            facets,
        };
        Ok(Some(memoize(&self.store_cache, cache_key, || {
            TypeMapping::array(name, element, clr_type)
        })))
    }

    fn find_by_clr(
        &self,
        clr_type: &RuntimeType,
        facets: Facets,
    ) -> MappingResult<Option<Arc<TypeMapping>>> {
        if let Some(mapping) = self.clr_types.get(clr_type) {
            return Ok(Some(self.specialize(clr_type, mapping, facets)));
        }

        match clr_type {
            RuntimeType::MultiArray { .. } => {
                Err(unsupported(format!("multi-dimensional array {clr_type}")))
            }
            RuntimeType::Array(element) | RuntimeType::List(element) => {
                if element.is_collection() {
                    return Err(unsupported(format!("array of arrays {clr_type}")));
                }
                let Some(element) = self.find_by_clr(element, facets)? else {
                    return Ok(None);
                };
                let cache_key = ClrKey {
                    clr_type: clr_type.clone(),
                    facets,
                };
                Ok(Some(memoize(&self.clr_cache, cache_key, || {
                    let store_type = format!("{}{ARRAY_SUFFIX}", element.store_type());
                    TypeMapping::array(store_type, element, clr_type.clone())
                })))
            }
            _ => Ok(None),
        }
    }

    /// Apply requested facets to a runtime type's default descriptor
    fn specialize(
        &self,
        clr_type: &RuntimeType,
        mapping: &Arc<TypeMapping>,
        facets: Facets,
    ) -> Arc<TypeMapping> {
        let (size, precision, scale) = facets;
        let target = match (mapping.kind(), size) {
            (MappingKind::Text, Some(size)) if size > self.max_varchar_size => {
                warn!(
                    "Requested size {} for {} exceeds the maximum of {}, using {}",
                    size,
                    clr_type,
                    self.max_varchar_size,
                    mapping.store_type()
                );
                return Arc::clone(mapping);
            }
            (MappingKind::Text, Some(_)) => &self.sized.varchar,
            _ => mapping,
        };

        if target.facet_args(size, precision, scale).is_none() {
            return Arc::clone(mapping);
        }

        let cache_key = ClrKey {
            clr_type: clr_type.clone(),
            facets,
        };
        memoize(&self.clr_cache, cache_key, || {
            target.with_facets(size, precision, scale)
        })
    }
}

impl Default for TypeMappingSource {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl fmt::Debug for TypeMappingSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeMappingSource")
            .field("store_types", &self.store_types.len())
            .field("clr_types", &self.clr_types.len())
            .field("cached", &self.cached_len())
            .finish()
    }
}

/// Default candidate, or the one carrying `clr_type` when given
fn pick(
    candidates: &[Arc<TypeMapping>],
    clr_type: Option<&RuntimeType>,
) -> Option<Arc<TypeMapping>> {
    match clr_type {
        None => candidates.first().cloned(),
        Some(clr_type) => candidates.iter().find(|m| m.clr_type() == clr_type).cloned(),
    }
}

fn unsupported(shape: String) -> MappingError {
    MappingError::UnsupportedShape { shape }
}

/// Get the cached descriptor for `key`, or build and insert one
///
/// `build` runs outside the map lock; if another thread inserted first, its
/// descriptor wins and ours is dropped.
fn memoize<K>(
    cache: &DashMap<K, Arc<TypeMapping>>,
    key: K,
    build: impl FnOnce() -> TypeMapping,
) -> Arc<TypeMapping>
where
    K: Eq + Hash + fmt::Debug,
{
    if let Some(hit) = cache.get(&key) {
        trace!("Type mapping cache hit for {:?}", key);
        return Arc::clone(hit.value());
    }

    let built = Arc::new(build());
    let entry = cache.entry(key).or_insert_with(|| {
        debug!("Memoized type mapping {}", built);
        Arc::clone(&built)
    });
    Arc::clone(entry.value())
}

#[cfg(test)]
#[path = "resolver_test.rs"]
mod tests;
