//! Resolver configuration loaded from YAML

use crate::error::{MappingError, MappingResult};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

/// Largest length the backend accepts for `character varying(n)`
pub const DEFAULT_MAX_VARCHAR_SIZE: u32 = 10_485_760;

/// Resolver configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ResolverConfig {
    /// Map store type `geometry` and the geometry runtime type through the
    /// legacy built-in descriptor
    #[serde(default)]
    pub legacy_geometry: bool,

    /// Ceiling for sized text; larger requests resolve to unbounded `text`
    #[serde(default = "default_max_varchar_size")]
    pub max_varchar_size: u32,

    /// User-defined range types
    #[serde(default)]
    pub ranges: Vec<UserRange>,
}

/// A user-defined range type over an existing store type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UserRange {
    /// Name of the range type, e.g. `floatrange`
    pub store_type: String,

    /// Store type of the range bounds, e.g. `double precision`
    pub subtype: String,
}

impl UserRange {
    /// Create a range declaration
    pub fn new(store_type: impl Into<String>, subtype: impl Into<String>) -> Self {
        Self {
            store_type: store_type.into(),
            subtype: subtype.into(),
        }
    }
}

fn default_max_varchar_size() -> u32 {
    DEFAULT_MAX_VARCHAR_SIZE
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            legacy_geometry: false,
            max_varchar_size: DEFAULT_MAX_VARCHAR_SIZE,
            ranges: Vec::new(),
        }
    }
}

impl ResolverConfig {
    /// Load configuration from a YAML file
    pub fn load(path: &Path) -> MappingResult<Self> {
        if !path.exists() {
            return Err(MappingError::ConfigNotFound {
                path: path.display().to_string(),
            });
        }

        let content = std::fs::read_to_string(path).map_err(|e| MappingError::Io {
            path: path.display().to_string(),
            source: e,
        })?;
        Self::from_yaml_str(&content)
    }

    /// Parse configuration from YAML text
    pub fn from_yaml_str(yaml: &str) -> MappingResult<Self> {
        let config: ResolverConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Add a user-defined range type
    pub fn with_range(mut self, store_type: impl Into<String>, subtype: impl Into<String>) -> Self {
        self.ranges.push(UserRange::new(store_type, subtype));
        self
    }

    /// Enable the legacy geometry descriptor
    pub fn with_legacy_geometry(mut self, enabled: bool) -> Self {
        self.legacy_geometry = enabled;
        self
    }

    /// Validate the configuration
    ///
    /// Collisions with built-in store types are checked by the resolver,
    /// which owns the built-in table.
    pub fn validate(&self) -> MappingResult<()> {
        if self.max_varchar_size == 0 {
            return Err(MappingError::ConfigInvalid {
                message: "max_varchar_size must be greater than zero".to_string(),
            });
        }

        let mut seen = HashSet::new();
        for range in &self.ranges {
            let name = range.store_type.trim().to_lowercase();
            if name.is_empty() {
                return Err(MappingError::ConfigInvalid {
                    message: "Range store_type cannot be empty".to_string(),
                });
            }
            if range.subtype.trim().is_empty() {
                return Err(MappingError::ConfigInvalid {
                    message: format!("Range '{}' has an empty subtype", range.store_type),
                });
            }
            if !seen.insert(name) {
                return Err(MappingError::ConfigInvalid {
                    message: format!("Range '{}' is declared more than once", range.store_type),
                });
            }
        }

        Ok(())
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
