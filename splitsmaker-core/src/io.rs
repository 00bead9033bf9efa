//! Document import and export entry points.
//!
//! Every path validates: exports refuse configs that fail the schema, and
//! imports return sanitized configs plus any warnings collected on the way.

use crate::catalog::Catalogs;
use crate::error::{ExportError, ImportError};
use crate::lss;
use crate::migration::migrate_config;
use crate::models::{ImportResult, RunConfig};
use crate::tracing::{field_names, span_names};
use crate::validate::check_config;

pub use crate::filename::{build_suggested_filename, resolve_lss_filename};

/// Serializes a config as pretty-printed JSON
///
/// # Errors
///
/// Returns `ExportError::Serialization` if serialization fails.
pub fn export_json(config: &RunConfig) -> Result<String, ExportError> {
    serde_json::to_string_pretty(config).map_err(|e| ExportError::Serialization(e.to_string()))
}

/// Serializes a config as single-line JSON
///
/// # Errors
///
/// Returns `ExportError::Serialization` if serialization fails.
pub fn export_json_compact(config: &RunConfig) -> Result<String, ExportError> {
    serde_json::to_string(config).map_err(|e| ExportError::Serialization(e.to_string()))
}

/// Parses a JSON document of any supported version
///
/// # Errors
///
/// Returns `ImportError::Json` for malformed JSON and
/// `ImportError::Migration` if migration or validation fails.
pub fn import_json(raw: &str) -> Result<ImportResult, ImportError> {
    let value: serde_json::Value = serde_json::from_str(raw.trim_start_matches('\u{feff}'))
        .map_err(|e| ImportError::Json(e.to_string()))?;
    Ok(migrate_config(&value)?)
}

/// Validates a config and renders it as a LiveSplit document
///
/// # Errors
///
/// Returns `ExportError::Schema` if the config is invalid, or
/// `ExportError::Xml` if writing fails.
pub fn export_lss(config: &RunConfig) -> Result<String, ExportError> {
    let _span = crate::trace_operation!(
        span_names::LSS_EXPORT,
        { field_names::SPLIT_COUNT } = config.splits.len()
    )
    .entered();

    let checked = check_config(config)?;
    let xml = lss::write_document(&checked)?;
    tracing::debug!(bytes = xml.len(), "Exported LiveSplit document");
    Ok(xml)
}

/// Imports a LiveSplit document and validates the result
///
/// # Errors
///
/// Returns `ImportError::Xml` for malformed XML and `ImportError::Schema`
/// for a document missing required elements or producing an invalid
/// config.
pub fn import_lss(raw: &str, catalogs: &Catalogs) -> Result<ImportResult, ImportError> {
    let _span = crate::trace_operation!(span_names::LSS_IMPORT).entered();

    let imported = lss::read_document(raw, catalogs)?;
    let config = check_config(&imported.config)?;
    tracing::info!(
        { field_names::SPLIT_COUNT } = config.splits.len(),
        { field_names::WARNING_COUNT } = imported.warnings.len(),
        "Imported LiveSplit document"
    );
    Ok(ImportResult {
        config,
        warnings: imported.warnings,
    })
}
