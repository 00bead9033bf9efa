//! Run configuration aggregate.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::settings::GlobalSettings;
use super::split::SplitNode;

/// Current schema version of [`RunConfig`]
pub const CURRENT_CONFIG_VERSION: u32 = 1;

/// Game name written when metadata carries none
pub const DEFAULT_GAME_NAME: &str = "Subnautica";

/// Category used when metadata carries a blank one
pub const DEFAULT_CATEGORY_NAME: &str = "Any%";

/// Category used for configs recovered from legacy or XML sources
pub const IMPORTED_CATEGORY_NAME: &str = "Imported Category";

/// Timer offset used when metadata carries a blank one
pub const DEFAULT_OFFSET: &str = "00:00:00";

/// Run metadata shown in LiveSplit and used for filenames.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunMetadata {
    /// Game name
    pub game_name: String,
    /// Speedrun category
    pub category_name: String,
    /// Category variables; insertion order is display order
    #[serde(default)]
    pub variables: IndexMap<String, String>,
    /// Timer offset, `HH:MM:SS`-like
    pub offset: String,
}

impl RunMetadata {
    /// Variables a blank config starts with
    #[must_use]
    pub fn default_variables() -> IndexMap<String, String> {
        IndexMap::from([
            ("Run Type".to_string(), "Glitchless".to_string()),
            ("Game Mode".to_string(), "Survival".to_string()),
        ])
    }

    /// Metadata used when a legacy payload carries none
    #[must_use]
    pub fn imported() -> Self {
        Self {
            game_name: DEFAULT_GAME_NAME.to_string(),
            category_name: IMPORTED_CATEGORY_NAME.to_string(),
            variables: IndexMap::new(),
            offset: DEFAULT_OFFSET.to_string(),
        }
    }
}

impl Default for RunMetadata {
    fn default() -> Self {
        Self {
            game_name: DEFAULT_GAME_NAME.to_string(),
            category_name: DEFAULT_CATEGORY_NAME.to_string(),
            variables: Self::default_variables(),
            offset: DEFAULT_OFFSET.to_string(),
        }
    }
}

/// Aggregate root: everything needed to produce a splits file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunConfig {
    /// Schema version, always [`CURRENT_CONFIG_VERSION`] once validated
    pub config_version: u32,
    /// Run metadata
    pub metadata: RunMetadata,
    /// Autosplitter flags
    pub global_settings: GlobalSettings,
    /// Top-level split forest
    pub splits: Vec<SplitNode>,
}

impl Default for RunConfig {
    fn default() -> Self {
        create_blank_config()
    }
}

impl RunConfig {
    /// Returns the number of nodes in the split forest, conditions included
    #[must_use]
    pub fn node_count(&self) -> usize {
        fn count(nodes: &[SplitNode]) -> usize {
            nodes.iter().map(|node| 1 + count(&node.conditions)).sum()
        }
        count(&self.splits)
    }

    /// Returns a one-line summary of the config contents
    #[must_use]
    pub fn summary(&self) -> String {
        let total = self.node_count();
        format!(
            "{} - {}: {} splits, {} conditions",
            self.metadata.game_name,
            self.metadata.category_name,
            self.splits.len(),
            total - self.splits.len()
        )
    }
}

/// Creates the config an editor starts from.
#[must_use]
pub fn create_blank_config() -> RunConfig {
    RunConfig {
        config_version: CURRENT_CONFIG_VERSION,
        metadata: RunMetadata::default(),
        global_settings: GlobalSettings::default(),
        splits: Vec::new(),
    }
}

/// A named starting point an editor can load wholesale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PresetDefinition {
    /// Preset key
    pub id: String,
    /// Display label
    pub label: String,
    /// Group heading
    pub group: String,
    /// Optional longer description
    #[serde(default)]
    pub description: Option<String>,
    /// Metadata copied into the config
    pub metadata: RunMetadata,
    /// Settings copied into the config
    pub global_settings: GlobalSettings,
    /// Splits copied into the config
    pub splits: Vec<SplitNode>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{SplitKind, SplitPayload};

    #[test]
    fn blank_config_uses_defaults() {
        let config = create_blank_config();
        assert_eq!(config.config_version, CURRENT_CONFIG_VERSION);
        assert_eq!(config.metadata.category_name, "Any%");
        assert_eq!(config.metadata.offset, "00:00:00");
        let keys: Vec<_> = config.metadata.variables.keys().cloned().collect();
        assert_eq!(keys, vec!["Run Type", "Game Mode"]);
        assert!(config.splits.is_empty());
    }

    #[test]
    fn node_count_includes_conditions() {
        let mut parent = SplitNode::with_id("a", SplitPayload::default_for(SplitKind::Prefab), false);
        parent.conditions.push(SplitNode::with_id(
            "b",
            SplitPayload::default_for(SplitKind::Biome),
            true,
        ));
        let config = RunConfig {
            splits: vec![parent],
            ..create_blank_config()
        };
        assert_eq!(config.node_count(), 2);
        assert!(config.summary().contains("1 splits, 1 conditions"));
    }

    #[test]
    fn serializes_with_camel_case_keys() {
        let json = serde_json::to_string(&create_blank_config()).unwrap();
        assert!(json.contains("\"configVersion\":1"));
        assert!(json.contains("\"globalSettings\""));
        assert!(json.contains("\"categoryName\":\"Any%\""));
    }
}
