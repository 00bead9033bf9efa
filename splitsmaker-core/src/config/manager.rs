//! Settings file location and persistence.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::ConfigError;
use crate::tracing::span_names;

use super::settings::AppSettings;

/// Directory created under the user config dir
pub const CONFIG_DIR_NAME: &str = "splitsmaker";

/// Settings file inside the config directory
pub const SETTINGS_FILE_NAME: &str = "settings.toml";

/// Loads and saves [`AppSettings`]
#[derive(Debug, Clone)]
pub struct ConfigManager {
    settings_path: PathBuf,
}

impl ConfigManager {
    /// Creates a manager for the user's configuration directory
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::NoConfigDir` if the platform reports none.
    pub fn new() -> Result<Self, ConfigError> {
        let base = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
        Ok(Self::with_config_dir(base.join(CONFIG_DIR_NAME)))
    }

    /// Creates a manager rooted at `config_dir`
    #[must_use]
    pub fn with_config_dir(config_dir: impl Into<PathBuf>) -> Self {
        Self {
            settings_path: config_dir.into().join(SETTINGS_FILE_NAME),
        }
    }

    /// Creates a manager for an explicit settings file path
    #[must_use]
    pub fn for_settings_file(path: impl Into<PathBuf>) -> Self {
        Self {
            settings_path: path.into(),
        }
    }

    /// Returns the directory holding the settings file
    #[must_use]
    pub fn config_dir(&self) -> &Path {
        self.settings_path.parent().unwrap_or_else(|| Path::new(""))
    }

    /// Returns the settings file path
    #[must_use]
    pub fn settings_path(&self) -> &Path {
        &self.settings_path
    }

    /// Loads settings, returning defaults when the file does not exist
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Io` if the file cannot be read and
    /// `ConfigError::Parse` if it is not valid settings TOML.
    pub fn load_settings(&self) -> Result<AppSettings, ConfigError> {
        let path = self.settings_path();
        let _span = crate::trace_operation_debug!(span_names::SETTINGS_LOAD, path = %path.display())
            .entered();

        if !path.exists() {
            tracing::debug!("No settings file, using defaults");
            return Ok(AppSettings::default());
        }
        let content = fs::read_to_string(path)?;
        let settings: AppSettings = toml::from_str(&content).map_err(|e| {
            ConfigError::Parse(format!("{}: {e}", path.display()))
        })?;
        Ok(settings.normalized())
    }

    /// Writes settings, creating the directory when needed
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Serialize` if the settings cannot be encoded and
    /// `ConfigError::Io` if the file cannot be written.
    pub fn save_settings(&self, settings: &AppSettings) -> Result<(), ConfigError> {
        let content =
            toml::to_string_pretty(settings).map_err(|e| ConfigError::Serialize(e.to_string()))?;
        let path = self.settings_path();
        if let Some(dir) = path.parent()
            && !dir.as_os_str().is_empty()
        {
            fs::create_dir_all(dir)?;
        }
        let staging = path.with_extension("toml.tmp");
        fs::write(&staging, content)?;
        fs::rename(&staging, path)?;
        tracing::info!(path = %path.display(), "Saved settings");
        Ok(())
    }
}
