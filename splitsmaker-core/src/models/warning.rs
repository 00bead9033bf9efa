//! Non-fatal import diagnostics.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::config::RunConfig;

/// Category of an import warning
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WarningCode {
    /// Split name matched no catalog entry and was kept as legacy-raw
    UnknownSplitName,
    /// Payload id is not in the matching enum catalog
    UnknownEnumValue,
    /// Document shape deviated from the expected layout
    InvalidXmlShape,
    /// Legacy data was rewritten to the current convention
    LegacyPreserved,
    /// A versionless config was upgraded
    MigrationApplied,
}

impl WarningCode {
    /// Returns the serialized tag
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::UnknownSplitName => "unknown-split-name",
            Self::UnknownEnumValue => "unknown-enum-value",
            Self::InvalidXmlShape => "invalid-xml-shape",
            Self::LegacyPreserved => "legacy-preserved",
            Self::MigrationApplied => "migration-applied",
        }
    }
}

impl fmt::Display for WarningCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A recoverable anomaly recorded while importing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportWarning {
    /// Warning category
    pub code: WarningCode,
    /// Human-readable detail
    pub message: String,
    /// Node the warning refers to, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub node_id: Option<String>,
}

impl ImportWarning {
    /// Creates a warning not tied to a node
    #[must_use]
    pub fn new(code: WarningCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            node_id: None,
        }
    }

    /// Creates a warning tied to a node
    #[must_use]
    pub fn for_node(code: WarningCode, message: impl Into<String>, node_id: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            node_id: Some(node_id.into()),
        }
    }
}

impl fmt::Display for ImportWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

/// A successfully imported config plus the warnings collected on the way
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportResult {
    /// Validated config
    pub config: RunConfig,
    /// Recoverable anomalies
    pub warnings: Vec<ImportWarning>,
}

impl ImportResult {
    /// Creates a result without warnings
    #[must_use]
    pub const fn clean(config: RunConfig) -> Self {
        Self {
            config,
            warnings: Vec::new(),
        }
    }

    /// Returns true if any warnings were recorded
    #[must_use]
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    /// Returns the warnings with the given code
    #[must_use]
    pub fn warnings_with(&self, code: WarningCode) -> Vec<&ImportWarning> {
        self.warnings.iter().filter(|w| w.code == code).collect()
    }

    /// Returns a summary string of the import
    #[must_use]
    pub fn summary(&self) -> String {
        format!("{}, Warnings: {}", self.config.summary(), self.warnings.len())
    }
}
