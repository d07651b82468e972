//! Error types for pgr-storage

use thiserror::Error;

/// Mapping error type
#[derive(Error, Debug)]
pub enum MappingError {
    /// M001: No descriptor exists for the requested type/name combination
    #[error(
        "[M001] No type mapping found for runtime type '{}' and store type '{}'",
        clr_type.as_deref().unwrap_or("<none>"),
        store_type.as_deref().unwrap_or("<none>")
    )]
    NotFound {
        clr_type: Option<String>,
        store_type: Option<String>,
    },

    /// M002: Recognized but unsupported type shape
    #[error("[M002] Unsupported type shape: {shape}")]
    UnsupportedShape { shape: String },

    /// M003: Value cannot be carried by the descriptor's store type
    #[error("[M003] Cannot use a {value} value with store type '{store_type}'")]
    ValueMismatch { store_type: String, value: String },

    /// M004: Invalid resolver configuration
    #[error("[M004] Invalid resolver config: {message}")]
    ConfigInvalid { message: String },

    /// M005: Resolver configuration YAML parse error
    #[error("[M005] Failed to parse resolver config: {0}")]
    ConfigParse(#[from] serde_yaml::Error),

    /// M007: Resolver configuration file does not exist
    #[error("[M007] Resolver config not found: {path}")]
    ConfigNotFound { path: String },

    /// M006: IO error with file path context
    #[error("[M006] Failed to read '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
}

/// Result type alias for MappingError
pub type MappingResult<T> = Result<T, MappingError>;
