//! Upgrades versionless payloads to the current schema.
//!
//! Two states exist: unversioned (no `configVersion`, or a falsy one) and
//! current. Any other version is rejected rather than guessed at.

use serde_json::{Map, Value};

use crate::error::{MigrationError, SchemaError};
use crate::models::{
    CURRENT_CONFIG_VERSION, GlobalSettings, ImportResult, ImportWarning, RunMetadata, WarningCode,
};
use crate::tracing::span_names;
use crate::validate::parse_run_config;

/// Schema version found in a payload
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DetectedVersion {
    /// No usable version tag
    Unversioned,
    /// Tagged with a number
    Numbered(f64),
}

/// Reads the version tag of a raw payload.
///
/// Absent, `null`, `false`, `0` and `""` count as unversioned.
///
/// # Errors
///
/// Returns a `SchemaError` if the tag is neither a number nor falsy.
pub fn detect_version(value: &Value) -> Result<DetectedVersion, SchemaError> {
    let tag = value.as_object().and_then(|root| root.get("configVersion"));
    match tag {
        None | Some(Value::Null | Value::Bool(false)) => Ok(DetectedVersion::Unversioned),
        Some(Value::String(text)) if text.is_empty() => Ok(DetectedVersion::Unversioned),
        Some(Value::String(text)) => text
            .trim()
            .parse::<f64>()
            .map(classify)
            .map_err(|_| SchemaError::expected("configVersion", "a number")),
        Some(Value::Number(number)) => number
            .as_f64()
            .map(classify)
            .ok_or_else(|| SchemaError::expected("configVersion", "a number")),
        Some(_) => Err(SchemaError::expected("configVersion", "a number")),
    }
}

fn classify(version: f64) -> DetectedVersion {
    if version == 0.0 || version.is_nan() {
        DetectedVersion::Unversioned
    } else {
        DetectedVersion::Numbered(version)
    }
}

fn format_version(version: f64) -> String {
    if version.fract() == 0.0 && version.abs() < 1.0e15 {
        format!("{}", version as i64)
    } else {
        version.to_string()
    }
}

/// Migrates and validates a raw payload.
///
/// Unversioned payloads keep whichever top-level fields they carry and take
/// defaults for the rest, producing one `migration-applied` warning.
/// Current payloads pass through validation unchanged and warning-free.
///
/// # Errors
///
/// Returns `MigrationError::UnsupportedVersion` for any other version, or
/// `MigrationError::Schema` if the result fails validation.
pub fn migrate_config(value: &Value) -> Result<ImportResult, MigrationError> {
    let _span = crate::trace_operation!(span_names::CONFIG_MIGRATE).entered();

    match detect_version(value)? {
        DetectedVersion::Unversioned => {
            let upgraded = upgrade_unversioned(value);
            let config = parse_run_config(&upgraded)?;
            tracing::info!(
                to = CURRENT_CONFIG_VERSION,
                split_count = config.splits.len(),
                "Upgraded legacy config"
            );
            Ok(ImportResult {
                config,
                warnings: vec![ImportWarning::new(
                    WarningCode::MigrationApplied,
                    format!(
                        "Imported legacy config and upgraded it to configVersion {CURRENT_CONFIG_VERSION}."
                    ),
                )],
            })
        }
        DetectedVersion::Numbered(version)
            if version == f64::from(CURRENT_CONFIG_VERSION) =>
        {
            Ok(ImportResult::clean(parse_run_config(value)?))
        }
        DetectedVersion::Numbered(version) => Err(MigrationError::UnsupportedVersion {
            found: format_version(version),
            expected: CURRENT_CONFIG_VERSION,
        }),
    }
}

fn upgrade_unversioned(value: &Value) -> Value {
    let legacy = value.as_object();
    let carried = |key: &str| legacy.and_then(|root| root.get(key)).filter(|v| !v.is_null()).cloned();

    let metadata = carried("metadata").unwrap_or_else(|| {
        serde_json::to_value(RunMetadata::imported()).unwrap_or(Value::Null)
    });
    let global_settings = carried("globalSettings").unwrap_or_else(|| {
        serde_json::to_value(GlobalSettings::default()).unwrap_or(Value::Null)
    });
    let splits = carried("splits").unwrap_or_else(|| Value::Array(Vec::new()));

    let mut upgraded = Map::new();
    upgraded.insert("configVersion".to_string(), Value::from(CURRENT_CONFIG_VERSION));
    upgraded.insert("metadata".to_string(), metadata);
    upgraded.insert("globalSettings".to_string(), global_settings);
    upgraded.insert("splits".to_string(), splits);
    Value::Object(upgraded)
}
