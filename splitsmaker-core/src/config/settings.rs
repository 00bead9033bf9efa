//! Application settings model.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::filename::LSS_EXTENSION;
use crate::share::{DEFAULT_BASE_URL, DEFAULT_MAX_URL_LENGTH, ShareOptions};
use crate::tracing::{TracingConfig, TracingLevel, TracingOutput};

/// Share link settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShareSettings {
    /// Page share links open
    pub base_url: String,
    /// Maximum share URL length
    pub max_url_length: usize,
}

impl Default for ShareSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            max_url_length: DEFAULT_MAX_URL_LENGTH,
        }
    }
}

impl ShareSettings {
    /// Converts into codec options
    #[must_use]
    pub fn to_options(&self) -> ShareOptions {
        ShareOptions::new(self.base_url.clone()).with_max_url_length(self.max_url_length)
    }
}

/// Export settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportSettings {
    /// Extension of splits files; always `lss`
    pub default_extension: String,
    /// Pretty-print JSON exports
    pub pretty_json: bool,
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self {
            default_extension: LSS_EXTENSION.to_string(),
            pretty_json: true,
        }
    }
}

/// Logging settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// Level name (`error`, `warn`, `info`, `debug`, `trace`)
    pub level: String,
    /// Log file; stderr when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,
    /// `EnvFilter` directives that replace `level`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter: Option<String>,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: TracingLevel::default().to_string(),
            file: None,
            filter: None,
        }
    }
}

impl LoggingSettings {
    /// Builds a tracing config; unknown level names fall back to the default
    #[must_use]
    pub fn to_tracing_config(&self) -> TracingConfig {
        let level: TracingLevel = self.level.parse().unwrap_or_default();
        let output = self
            .file
            .clone()
            .map_or(TracingOutput::Stderr, TracingOutput::File);
        let config = TracingConfig::new().with_level(level).with_output(output);
        match &self.filter {
            Some(filter) if !filter.trim().is_empty() => config.with_filter(filter.trim()),
            _ => config,
        }
    }
}

/// Settings persisted in `settings.toml`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppSettings {
    /// Share link settings
    pub share: ShareSettings,
    /// Export settings
    pub export: ExportSettings,
    /// Logging settings
    pub logging: LoggingSettings,
}

impl AppSettings {
    /// Restores values that must not be overridden
    #[must_use]
    pub fn normalized(mut self) -> Self {
        if self.export.default_extension != LSS_EXTENSION {
            tracing::warn!(
                extension = %self.export.default_extension,
                "Ignoring unsupported export extension"
            );
            self.export.default_extension = LSS_EXTENSION.to_string();
        }
        if self.share.max_url_length == 0 {
            self.share.max_url_length = DEFAULT_MAX_URL_LENGTH;
        }
        self
    }
}
