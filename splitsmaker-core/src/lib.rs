//! `SplitsMaker` Core Library
//!
//! This crate builds and converts Subnautica autosplitter configurations:
//! the split tree, its LiveSplit `.lss` form, plain JSON and compact share
//! links.
//!
//! # Crate Structure
//!
//! - [`models`] - Split nodes, run config, global settings, warnings
//! - [`tree`] - Pure operations over the split forest
//! - [`validate`] / [`migration`] - Schema checks, sanitization, version upgrades
//! - [`lss`] - LiveSplit XML codec and icon repair
//! - [`share`] - Share tokens and URLs
//! - [`io`] - Validated import/export entry points and filenames
//! - [`catalog`] - Split definitions and enum tables
//! - [`editor`] - Editing session owning one config
//! - [`config`] - Application settings and persistence

// Enable missing_docs warning for public API documentation
#![warn(missing_docs)]

pub mod catalog;
pub mod config;
pub mod editor;
pub mod error;
pub mod filename;
pub mod io;
pub mod lss;
pub mod migration;
pub mod models;
pub mod share;
pub mod tracing;
pub mod tree;
pub mod validate;

pub use catalog::{
    CatalogTables, Catalogs, EnumOption, Lookup, SplitDataKind, SplitDefinition, StaticCatalog,
};
pub use config::{AppSettings, ConfigManager};
pub use editor::{EditorError, EditorResult, RunEditor, VariableMove};
pub use error::{
    CatalogError, ConfigError, ExportError, ImportError, MigrationError, SchemaError, ShareError,
    SplitsMakerError, SplitsMakerResult,
};
pub use filename::{build_suggested_filename, resolve_lss_filename};
pub use io::{export_json, export_lss, import_json, import_lss};
pub use migration::migrate_config;
pub use models::{
    GlobalSettingKey, GlobalSettings, ImportResult, ImportWarning, PresetDefinition, RunConfig,
    RunMetadata, SplitKind, SplitNode, SplitPayload, WarningCode, create_blank_config,
};
pub use share::{
    ShareLink, ShareOptions, build_share_url, decode_share_config, encode_share_config,
};
pub use tracing::{
    TracingConfig, TracingError, TracingLevel, TracingOutput, field_names, init_tracing,
    installed_config, span_names,
};
pub use validate::{check_config, sanitize_config};
