//! Shared utility functions used across command modules.

use std::path::{Path, PathBuf};

use splitsmaker_core::catalog::Catalogs;
use splitsmaker_core::config::{AppSettings, ConfigManager};
use splitsmaker_core::models::{ImportResult, RunConfig};
use splitsmaker_core::filename::LSS_EXTENSION;
use splitsmaker_core::io;

use crate::error::CliError;

/// State shared by every command
pub struct Context {
    /// Loaded settings
    pub settings: AppSettings,
    /// Catalog table directory from the command line
    pub catalog_dir: Option<PathBuf>,
    /// Suppress stdout summaries
    pub quiet: bool,
}

impl Context {
    /// Loads the catalogs from `--catalog-dir`, or the built-in tables
    pub fn catalogs(&self) -> Result<Catalogs, CliError> {
        match &self.catalog_dir {
            Some(dir) => {
                Catalogs::load_dir(dir).map_err(|e| CliError::Catalog(format!("{}: {e}", dir.display())))
            }
            None => Ok(Catalogs::builtin()),
        }
    }

    /// Prints a line unless `--quiet` was given
    pub fn say(&self, line: &str) {
        if !self.quiet {
            println!("{line}");
        }
    }
}

/// Creates a `ConfigManager` for the optional settings file from CLI args
pub fn create_config_manager(config_path: Option<&Path>) -> Result<ConfigManager, CliError> {
    match config_path {
        Some(path) => Ok(ConfigManager::for_settings_file(path)),
        None => ConfigManager::new()
            .map_err(|e| CliError::Config(format!("Failed to initialize config: {e}"))),
    }
}

/// Loads settings through `manager`
pub fn load_settings(manager: &ConfigManager) -> Result<AppSettings, CliError> {
    manager
        .load_settings()
        .map_err(|e| CliError::Config(format!("Failed to load settings: {e}")))
}

fn is_lss(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case(LSS_EXTENSION))
}

/// Reads a config file, choosing the codec by extension
pub fn read_config(path: &Path, context: &Context) -> Result<ImportResult, CliError> {
    let raw = std::fs::read_to_string(path)?;
    let result = if is_lss(path) {
        io::import_lss(&raw, &context.catalogs()?)
    } else {
        io::import_json(&raw)
    };
    result.map_err(|e| CliError::Import(format!("{}: {e}", path.display())))
}

/// Logs every warning to stderr
pub fn log_warnings(result: &ImportResult) {
    for warning in &result.warnings {
        match &warning.node_id {
            Some(node) => {
                tracing::warn!(code = warning.code.as_str(), node = %node, "{}", warning.message);
            }
            None => tracing::warn!(code = warning.code.as_str(), "{}", warning.message),
        }
    }
}

/// Logs every warning and prints a one-line summary
pub fn report(result: &ImportResult, context: &Context) {
    log_warnings(result);
    context.say(&result.summary());
}

/// Serializes `config`; single-line when asked or when settings disable
/// pretty output
pub fn render_json(config: &RunConfig, compact: bool, context: &Context) -> Result<String, CliError> {
    let rendered = if compact || !context.settings.export.pretty_json {
        io::export_json_compact(config)
    } else {
        io::export_json(config)
    };
    rendered.map_err(|e| CliError::Export(e.to_string()))
}

/// Writes `content` to `output`, or stdout when unset
pub fn write_output(output: Option<&Path>, content: &str) -> Result<(), CliError> {
    match output {
        Some(path) => {
            std::fs::write(path, content)?;
            tracing::info!(path = %path.display(), bytes = content.len(), "Wrote output");
        }
        None => println!("{content}"),
    }
    Ok(())
}
