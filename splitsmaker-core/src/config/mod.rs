//! Configuration management for `SplitsMaker`
//!
//! This module provides the `ConfigManager` for loading and saving
//! application settings in TOML format.

mod manager;
pub mod settings;

pub use manager::{CONFIG_DIR_NAME, ConfigManager, SETTINGS_FILE_NAME};
pub use settings::{AppSettings, ExportSettings, LoggingSettings, ShareSettings};
