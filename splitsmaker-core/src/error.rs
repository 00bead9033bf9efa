//! Error types for SplitsMaker.
//!
//! Fatal conditions abort the whole operation and never yield a partial
//! tree. Recoverable anomalies are reported as
//! [`ImportWarning`](crate::models::ImportWarning)s instead.

use std::path::PathBuf;

use thiserror::Error;

/// Malformed input structure, identified by the offending path.
///
/// Paths use dotted field names and bracketed indices, e.g.
/// `splits[0].conditions[1].count`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid value at `{path}`: {reason}")]
pub struct SchemaError {
    /// Location of the violating field
    pub path: String,
    /// What is wrong with it
    pub reason: String,
}

impl SchemaError {
    /// Creates a schema error for `path`
    #[must_use]
    pub fn new(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Shorthand for a missing required field
    #[must_use]
    pub fn missing(path: impl Into<String>) -> Self {
        Self::new(path, "required field is missing")
    }

    /// Shorthand for a field of the wrong type
    #[must_use]
    pub fn expected(path: impl Into<String>, what: &str) -> Self {
        Self::new(path, format!("expected {what}"))
    }
}

/// Errors raised while upgrading a config to the current schema version
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MigrationError {
    /// The payload names a version no upgrade path exists for
    #[error("Unsupported configVersion {found}. Expected {expected}.")]
    UnsupportedVersion {
        /// Version found in the payload
        found: String,
        /// Current schema version
        expected: u32,
    },

    /// The upgraded payload failed validation
    #[error(transparent)]
    Schema(#[from] SchemaError),
}

/// Errors raised while importing a JSON or XML document
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ImportError {
    /// The text is not well-formed XML
    #[error("Failed to parse XML: {0}")]
    Xml(String),

    /// The text is not well-formed JSON
    #[error("Failed to parse JSON: {0}")]
    Json(String),

    /// The document is well-formed but structurally invalid
    #[error(transparent)]
    Schema(#[from] SchemaError),

    /// The document could not be migrated
    #[error(transparent)]
    Migration(#[from] MigrationError),
}

/// Errors raised while exporting a config
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExportError {
    /// The config violates the model invariants
    #[error(transparent)]
    Schema(#[from] SchemaError),

    /// The XML writer failed
    #[error("Failed to write XML: {0}")]
    Xml(String),

    /// Serialization failed
    #[error("Serialization failed: {0}")]
    Serialization(String),
}

/// Errors raised by the share-link codec
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShareError {
    /// Even the icon-stripped link exceeds the URL budget
    #[error("Share link is {length} characters long, exceeding the {budget} character limit")]
    TooLarge {
        /// Length of the smallest link that could be produced
        length: usize,
        /// Configured budget
        budget: usize,
    },

    /// The token could not be decompressed or does not have the expected shape
    #[error("Invalid share payload: {0}")]
    InvalidPayload(String),

    /// The base or share URL could not be parsed
    #[error("Invalid share URL: {0}")]
    InvalidUrl(String),

    /// The decoded config failed migration or validation
    #[error(transparent)]
    Migration(#[from] MigrationError),

    /// Serialization failed
    #[error("Serialization failed: {0}")]
    Serialization(String),
}

impl From<SchemaError> for ShareError {
    fn from(err: SchemaError) -> Self {
        Self::Migration(MigrationError::Schema(err))
    }
}

/// Errors raised while loading split and enum catalogs
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    /// A catalog table is not valid JSON of the expected shape
    #[error("Failed to parse catalog {name}: {reason}")]
    Parse {
        /// Catalog table name
        name: String,
        /// Parser message
        reason: String,
    },

    /// A catalog file could not be read
    #[error("Failed to read catalog {}: {reason}", path.display())]
    Read {
        /// File path
        path: PathBuf,
        /// I/O message
        reason: String,
    },
}

/// Errors raised while loading or saving application settings
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The settings file is not valid TOML of the expected shape
    #[error("Failed to parse settings: {0}")]
    Parse(String),

    /// Settings could not be serialized
    #[error("Failed to serialize settings: {0}")]
    Serialize(String),

    /// No configuration directory could be determined
    #[error("Could not determine configuration directory")]
    NoConfigDir,

    /// File system error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Top-level error type for SplitsMaker
#[derive(Debug, Error)]
pub enum SplitsMakerError {
    /// Schema violation
    #[error(transparent)]
    Schema(#[from] SchemaError),

    /// Migration failure
    #[error(transparent)]
    Migration(#[from] MigrationError),

    /// Import failure
    #[error(transparent)]
    Import(#[from] ImportError),

    /// Export failure
    #[error(transparent)]
    Export(#[from] ExportError),

    /// Share-link failure
    #[error(transparent)]
    Share(#[from] ShareError),

    /// Catalog failure
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    /// Settings failure
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Editor failure
    #[error(transparent)]
    Editor(#[from] crate::editor::EditorError),

    /// Logging setup failure
    #[error(transparent)]
    Tracing(#[from] crate::tracing::TracingError),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for SplitsMaker operations
pub type SplitsMakerResult<T> = Result<T, SplitsMakerError>;
