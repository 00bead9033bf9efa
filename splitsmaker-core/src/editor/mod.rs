//! Editing session over a single run config.
//!
//! [`RunEditor`] owns the current config, the selected split and the
//! warnings of the last import. Every mutation builds the next config from
//! the tree operations and swaps it in whole.

use thiserror::Error;

use crate::models::{
    GlobalSettingKey, GlobalSettings, ImportResult, ImportWarning, PresetDefinition, RunConfig,
    SplitKind, SplitNode, create_blank_config,
};
use crate::tree::{self, CONDITION_KINDS};

/// Errors raised by editor operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EditorError {
    /// No split has the given id
    #[error("Split not found: {0}")]
    SplitNotFound(String),

    /// The parent split cannot carry conditions
    #[error("{kind} splits cannot have conditions")]
    ConditionsNotSupported {
        /// Kind of the parent
        kind: SplitKind,
    },

    /// The kind cannot be used as a condition
    #[error("{kind} splits cannot be used as conditions")]
    NotAllowedAsCondition {
        /// Requested kind
        kind: SplitKind,
    },

    /// No metadata variable has the given name
    #[error("Variable not found: {0}")]
    VariableNotFound(String),
}

/// Result type alias for editor operations
pub type EditorResult<T> = Result<T, EditorError>;

/// Direction for [`RunEditor::reorder_variable`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VariableMove {
    /// Towards the front
    Up,
    /// Towards the back
    Down,
}

/// Owner of the config being edited
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunEditor {
    config: RunConfig,
    preset_id: Option<String>,
    selected_split_id: Option<String>,
    warnings: Vec<ImportWarning>,
}

impl Default for RunEditor {
    fn default() -> Self {
        Self::new()
    }
}

impl RunEditor {
    /// Creates an editor over a blank config
    #[must_use]
    pub fn new() -> Self {
        Self {
            config: create_blank_config(),
            preset_id: None,
            selected_split_id: None,
            warnings: Vec::new(),
        }
    }

    /// Creates an editor over an import result
    #[must_use]
    pub fn from_import(result: ImportResult) -> Self {
        let mut editor = Self::new();
        editor.set_config(result.config, result.warnings);
        editor
    }

    /// Returns the current config
    #[must_use]
    pub const fn config(&self) -> &RunConfig {
        &self.config
    }

    /// Consumes the editor, returning its config
    #[must_use]
    pub fn into_config(self) -> RunConfig {
        self.config
    }

    /// Returns the warnings of the last loaded config
    #[must_use]
    pub fn warnings(&self) -> &[ImportWarning] {
        &self.warnings
    }

    /// Returns the id of the applied preset, if the config came from one
    #[must_use]
    pub fn preset_id(&self) -> Option<&str> {
        self.preset_id.as_deref()
    }

    /// Returns the selected split id
    #[must_use]
    pub fn selected_split_id(&self) -> Option<&str> {
        self.selected_split_id.as_deref()
    }

    /// Returns the selected split, wherever it sits in the tree
    #[must_use]
    pub fn selected_split(&self) -> Option<&SplitNode> {
        let id = self.selected_split_id.as_deref()?;
        tree::find_by_id(&self.config.splits, id).map(|found| found.node)
    }

    /// Selects a split, or clears the selection with `None`
    pub fn select_split(&mut self, id: Option<&str>) {
        self.selected_split_id = id.map(str::to_string);
    }

    /// Replaces the whole config and its warnings.
    ///
    /// Exclusive settings are normalized and the first split is selected.
    pub fn set_config(&mut self, config: RunConfig, warnings: Vec<ImportWarning>) {
        self.selected_split_id = config.splits.first().map(|split| split.id.clone());
        self.config = RunConfig {
            global_settings: config.global_settings.normalized(),
            ..config
        };
        self.warnings = warnings;
    }

    /// Sets the game name
    pub fn set_game_name(&mut self, game_name: impl Into<String>) {
        self.config.metadata.game_name = game_name.into();
    }

    /// Sets the category name
    pub fn set_category_name(&mut self, category_name: impl Into<String>) {
        self.config.metadata.category_name = category_name.into();
    }

    /// Sets the timer offset
    pub fn set_offset(&mut self, offset: impl Into<String>) {
        self.config.metadata.offset = offset.into();
    }

    /// Sets a variable; new keys go last, existing keys keep their place
    pub fn set_variable(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.config.metadata.variables.insert(key.into(), value.into());
    }

    /// Removes a variable, keeping the order of the rest
    ///
    /// # Errors
    ///
    /// Returns `EditorError::VariableNotFound` if `key` is absent.
    pub fn remove_variable(&mut self, key: &str) -> EditorResult<String> {
        self.config
            .metadata
            .variables
            .shift_remove(key)
            .ok_or_else(|| EditorError::VariableNotFound(key.to_string()))
    }

    /// Moves a variable one place.
    ///
    /// Moving past either end is a no-op.
    ///
    /// # Errors
    ///
    /// Returns `EditorError::VariableNotFound` if `key` is absent.
    pub fn reorder_variable(&mut self, key: &str, direction: VariableMove) -> EditorResult<()> {
        let variables = &mut self.config.metadata.variables;
        let index = variables
            .get_index_of(key)
            .ok_or_else(|| EditorError::VariableNotFound(key.to_string()))?;
        let target = match direction {
            VariableMove::Up => index.checked_sub(1),
            VariableMove::Down => Some(index + 1).filter(|&next| next < variables.len()),
        };
        if let Some(target) = target {
            variables.move_index(index, target);
        }
        Ok(())
    }

    /// Assigns one flag; a flag switched on turns its exclusive partner off
    pub fn update_global_setting(&mut self, key: GlobalSettingKey, value: bool) {
        self.config.global_settings = self.config.global_settings.with_setting(key, value);
    }

    /// Replaces every flag, then resolves conflicting pairs
    pub fn set_global_settings(&mut self, settings: GlobalSettings) {
        self.config.global_settings = settings.normalized();
    }

    /// Restores the default flags
    pub fn reset_global_settings(&mut self) {
        self.config.global_settings = GlobalSettings::default();
    }

    /// Appends a top-level split of `kind`, selects it and returns its id
    pub fn add_top_level_split(&mut self, kind: SplitKind) -> String {
        let node = tree::create_split_node(kind, false);
        let id = node.id.clone();
        self.config.splits.push(node);
        self.selected_split_id = Some(id.clone());
        id
    }

    /// Removes every split and forgets the preset
    pub fn clear_all_splits(&mut self) {
        self.config.splits.clear();
        self.preset_id = None;
        self.selected_split_id = None;
    }

    /// Appends a condition of `kind` under `parent_id`, selects it and
    /// returns its id
    ///
    /// # Errors
    ///
    /// Returns `EditorError::SplitNotFound` for an unknown parent,
    /// `EditorError::ConditionsNotSupported` when the parent's kind takes no
    /// conditions and `EditorError::NotAllowedAsCondition` for a kind that
    /// cannot be a condition.
    pub fn add_condition_split(&mut self, parent_id: &str, kind: SplitKind) -> EditorResult<String> {
        let parent = tree::find_by_id(&self.config.splits, parent_id)
            .ok_or_else(|| EditorError::SplitNotFound(parent_id.to_string()))?;
        if !tree::can_add_condition(parent.node.kind()) {
            return Err(EditorError::ConditionsNotSupported {
                kind: parent.node.kind(),
            });
        }
        if !CONDITION_KINDS.contains(&kind) {
            return Err(EditorError::NotAllowedAsCondition { kind });
        }

        let node = tree::create_split_node(kind, true);
        let id = node.id.clone();
        self.config.splits = tree::add_condition(&self.config.splits, parent_id, node);
        self.selected_split_id = Some(id.clone());
        Ok(id)
    }

    /// Removes a split and its conditions.
    ///
    /// If it was selected, the first top-level split becomes selected.
    ///
    /// # Errors
    ///
    /// Returns `EditorError::SplitNotFound` if no split has `id`.
    pub fn remove_split(&mut self, id: &str) -> EditorResult<()> {
        self.require(id)?;
        self.config.splits = tree::remove_by_id(&self.config.splits, id);
        if self.selected_split_id.as_deref() == Some(id) {
            self.selected_split_id = self.config.splits.first().map(|split| split.id.clone());
        }
        Ok(())
    }

    /// Replaces the split `id` with `updater(split)`
    ///
    /// Conditions are dropped when the updated split's kind cannot hold any.
    ///
    /// # Errors
    ///
    /// Returns `EditorError::SplitNotFound` if no split has `id`.
    pub fn update_split<F>(&mut self, id: &str, updater: F) -> EditorResult<()>
    where
        F: FnOnce(SplitNode) -> SplitNode,
    {
        self.require(id)?;
        self.config.splits = tree::update_by_id(&self.config.splits, id, |node| {
            let mut node = updater(node);
            if !node.conditions.is_empty() && !node.kind().supports_conditions() {
                tracing::debug!(
                    id = %node.id,
                    kind = %node.kind(),
                    dropped = node.conditions.len(),
                    "Dropped conditions from a split kind without condition support"
                );
                node.conditions.clear();
            }
            node
        });
        Ok(())
    }

    /// Moves a top-level split to the position of another
    pub fn reorder_top_level(&mut self, active_id: &str, over_id: &str) {
        self.config.splits = tree::reorder_top_level(&self.config.splits, active_id, over_id);
    }

    /// Moves a condition to the position of a sibling
    ///
    /// # Errors
    ///
    /// Returns `EditorError::SplitNotFound` if no split has `parent_id`.
    pub fn reorder_conditions(&mut self, parent_id: &str, active_id: &str, over_id: &str) -> EditorResult<()> {
        self.require(parent_id)?;
        self.config.splits =
            tree::reorder_conditions(&self.config.splits, parent_id, active_id, over_id);
        Ok(())
    }

    /// Loads a preset wholesale, clearing warnings
    pub fn apply_preset(&mut self, preset: &PresetDefinition) {
        self.set_config(
            RunConfig {
                metadata: preset.metadata.clone(),
                global_settings: preset.global_settings,
                splits: preset.splits.clone(),
                ..create_blank_config()
            },
            Vec::new(),
        );
        self.preset_id = Some(preset.id.clone());
    }

    /// Discards everything and starts from a blank config
    pub fn reset_to_blank(&mut self) {
        *self = Self::new();
    }

    fn require(&self, id: &str) -> EditorResult<()> {
        tree::find_by_id(&self.config.splits, id)
            .map(|_| ())
            .ok_or_else(|| EditorError::SplitNotFound(id.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{RunMetadata, SplitPayload, WarningCode};

    #[test]
    fn add_condition_enforces_kinds() {
        let mut editor = RunEditor::new();
        let prefab = editor.add_top_level_split(SplitKind::Prefab);
        let craft = editor.add_top_level_split(SplitKind::Craft);

        let condition = editor.add_condition_split(&prefab, SplitKind::Biome).unwrap();
        assert_eq!(editor.selected_split_id(), Some(condition.as_str()));
        assert!(editor.selected_split().unwrap().is_sub_condition);

        assert_eq!(
            editor.add_condition_split(&craft, SplitKind::Biome),
            Err(EditorError::ConditionsNotSupported { kind: SplitKind::Craft })
        );
        assert_eq!(
            editor.add_condition_split(&prefab, SplitKind::Manual),
            Err(EditorError::NotAllowedAsCondition { kind: SplitKind::Manual })
        );
        assert!(matches!(
            editor.add_condition_split("missing", SplitKind::Biome),
            Err(EditorError::SplitNotFound(_))
        ));
        assert_eq!(editor.config().splits[0].conditions.len(), 1);
    }

    #[test]
    fn changing_kind_drops_unsupported_conditions() {
        let mut editor = RunEditor::new();
        let prefab = editor.add_top_level_split(SplitKind::Prefab);
        editor.add_condition_split(&prefab, SplitKind::Biome).unwrap();

        editor
            .update_split(&prefab, |mut node| {
                node.display_name_override = "Renamed".to_string();
                node
            })
            .unwrap();
        assert_eq!(editor.config().splits[0].conditions.len(), 1);

        editor
            .update_split(&prefab, |mut node| {
                node.payload = SplitPayload::Craft {
                    craftable_id: "FiberMesh".to_string(),
                };
                node
            })
            .unwrap();
        let split = &editor.config().splits[0];
        assert_eq!(split.kind(), SplitKind::Craft);
        assert!(split.conditions.is_empty());
    }

    #[test]
    fn removing_selected_split_reselects_first() {
        let mut editor = RunEditor::new();
        let first = editor.add_top_level_split(SplitKind::Manual);
        let second = editor.add_top_level_split(SplitKind::Manual);
        assert_eq!(editor.selected_split_id(), Some(second.as_str()));

        editor.remove_split(&second).unwrap();
        assert_eq!(editor.selected_split_id(), Some(first.as_str()));
        editor.remove_split(&first).unwrap();
        assert_eq!(editor.selected_split_id(), None);
        assert!(editor.remove_split(&first).is_err());
    }

    #[test]
    fn variables_reorder_within_bounds() {
        let mut editor = RunEditor::new();
        editor.set_variable("Notes", "x");
        editor.reorder_variable("Notes", VariableMove::Up).unwrap();
        editor.reorder_variable("Run Type", VariableMove::Up).unwrap();
        let keys: Vec<_> = editor.config().metadata.variables.keys().cloned().collect();
        assert_eq!(keys, ["Run Type", "Notes", "Game Mode"]);

        editor.reorder_variable("Game Mode", VariableMove::Down).unwrap();
        assert_eq!(editor.remove_variable("Notes").unwrap(), "x");
        let keys: Vec<_> = editor.config().metadata.variables.keys().cloned().collect();
        assert_eq!(keys, ["Run Type", "Game Mode"]);
        assert!(editor.reorder_variable("Nope", VariableMove::Down).is_err());
    }

    #[test]
    fn setting_a_flag_clears_its_partner() {
        let mut editor = RunEditor::new();
        editor.update_global_setting(GlobalSettingKey::CreativeStart, true);
        let settings = editor.config().global_settings;
        assert!(settings.creative_start);
        assert!(!settings.intro_start);

        editor.set_global_settings(GlobalSettings {
            ordered_auto_splits: true,
            ..GlobalSettings::default()
        });
        assert!(editor.config().global_settings.is_consistent());
        editor.reset_global_settings();
        assert_eq!(editor.config().global_settings, GlobalSettings::default());
    }

    #[test]
    fn set_config_normalizes_and_selects() {
        let mut config = create_blank_config();
        config.global_settings.creative_start = true;
        config.splits.push(SplitNode::with_id("a", SplitPayload::Manual, false));
        let warning = ImportWarning::new(WarningCode::InvalidXmlShape, "odd");

        let editor = RunEditor::from_import(ImportResult {
            config,
            warnings: vec![warning],
        });
        assert!(!editor.config().global_settings.creative_start);
        assert_eq!(editor.selected_split_id(), Some("a"));
        assert_eq!(editor.warnings().len(), 1);
    }

    #[test]
    fn preset_replaces_config() {
        let preset = PresetDefinition {
            id: "any-survival".to_string(),
            label: "Any% Survival".to_string(),
            group: "Any%".to_string(),
            description: None,
            metadata: RunMetadata::default(),
            global_settings: GlobalSettings {
                ordered_auto_splits: true,
                ..GlobalSettings::default()
            },
            splits: vec![SplitNode::with_id("p", SplitPayload::Manual, false)],
        };
        let mut editor = RunEditor::new();
        editor.set_game_name("Other");
        editor.apply_preset(&preset);
        assert_eq!(editor.preset_id(), Some("any-survival"));
        assert_eq!(editor.config().metadata.game_name, "Subnautica");
        assert!(!editor.config().global_settings.ordered_auto_splits);
        assert_eq!(editor.selected_split_id(), Some("p"));

        editor.clear_all_splits();
        assert_eq!(editor.preset_id(), None);
        editor.reset_to_blank();
        assert_eq!(editor, RunEditor::new());
    }

    #[test]
    fn update_and_reorder_splits() {
        let mut editor = RunEditor::new();
        let a = editor.add_top_level_split(SplitKind::Manual);
        let b = editor.add_top_level_split(SplitKind::Manual);
        editor
            .update_split(&a, |mut node| {
                node.display_name_override = "First".to_string();
                node
            })
            .unwrap();
        editor.reorder_top_level(&b, &a);
        assert_eq!(editor.config().splits[0].id, b);
        assert_eq!(editor.config().splits[1].display_name_override, "First");
        assert!(editor.update_split("zzz", |node| node).is_err());
        assert!(editor.reorder_conditions("zzz", &a, &b).is_err());
    }
}
