//! Core data structures: split nodes, run config, settings and warnings.

mod config;
mod settings;
mod split;
mod warning;

pub use config::{
    CURRENT_CONFIG_VERSION, DEFAULT_CATEGORY_NAME, DEFAULT_GAME_NAME, DEFAULT_OFFSET,
    IMPORTED_CATEGORY_NAME, PresetDefinition, RunConfig, RunMetadata, create_blank_config,
};
pub use settings::{GlobalSettingKey, GlobalSettings};
pub use split::{
    MAX_INVENTORY_COUNT, MIN_INVENTORY_COUNT, SplitKind, SplitNode, SplitPayload, new_split_id,
};
pub use warning::{ImportResult, ImportWarning, WarningCode};
