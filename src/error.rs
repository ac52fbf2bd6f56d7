//! Structured error type shared across the library.
//!
//! Invalid input and initialization failures carry the offending value, and
//! the supported set where an enumeration is involved, so callers can render
//! actionable messages without string matching.

use std::path::PathBuf;

use thiserror::Error;

/// Convenience alias used by all fallible library functions.
pub type Result<T> = std::result::Result<T, Error>;

/// The error type for docpack library operations.
#[derive(Error, Debug)]
pub enum Error {
    /// The scan root was the empty string.
    #[error("scan root cannot be empty")]
    EmptyRoot,

    /// The scan root does not exist or could not be resolved.
    #[error("scan root {path:?} does not exist: {source}")]
    RootNotFound {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The scan root exists but is not a directory.
    #[error("scan root {path:?} is not a directory")]
    RootNotDirectory { path: PathBuf },

    /// A chunking strategy name was not recognized.
    #[error("unknown chunking strategy: {name} (supported: {supported:?})")]
    UnknownStrategy {
        name: String,
        supported: Vec<&'static str>,
    },

    /// Chunk limits were inconsistent: the size must be positive and the
    /// overlap strictly smaller than the size.
    #[error("invalid chunk limits: overlap ({overlap_tokens}) must be less than size ({max_tokens}), and size must be > 0")]
    InvalidChunkLimits {
        max_tokens: usize,
        overlap_tokens: usize,
    },

    /// The `cl100k_base` encoding table could not be loaded.
    #[error("failed to initialize cl100k_base tokenizer: {message}")]
    Tokenizer { message: String },

    /// A filesystem operation on a specific path failed.
    #[error("{path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The project configuration file could not be parsed.
    #[error("failed to parse config {path:?}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    /// The project configuration was parsed but holds inconsistent values.
    #[error("invalid config: {message}")]
    InvalidConfig { message: String },

    /// A chunk record could not be serialized to JSON.
    #[error("failed to serialize chunk record: {0}")]
    Json(#[from] serde_json::Error),

    /// A document metadata header could not be serialized to YAML.
    #[error("failed to serialize document header: {0}")]
    Yaml(#[from] serde_yaml::Error),
}
