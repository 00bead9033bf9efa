//! Editing session tests spanning editor, codecs and filenames

use splitsmaker_core::catalog::Catalogs;
use splitsmaker_core::editor::{RunEditor, VariableMove};
use splitsmaker_core::io::{
    build_suggested_filename, export_lss, import_lss, resolve_lss_filename,
};
use splitsmaker_core::models::{GlobalSettingKey, SplitKind, SplitPayload};
use splitsmaker_core::tree::node_label;

use super::without_ids;

#[test]
fn test_build_export_and_reload() {
    let mut editor = RunEditor::new();
    editor.set_category_name("No Damage");
    editor.set_variable("Game Mode", "Hardcore");
    editor.reorder_variable("Game Mode", VariableMove::Up).unwrap();
    editor.update_global_setting(GlobalSettingKey::OrderedAutoSplits, true);

    let rocket = editor.add_top_level_split(SplitKind::Prefab);
    editor.add_condition_split(&rocket, SplitKind::Inventory).unwrap();
    let biome = editor.add_condition_split(&rocket, SplitKind::Biome).unwrap();
    editor
        .update_split(&biome, |mut node| {
            node.payload = SplitPayload::Biome {
                from_biome_id: "SafeShallows".to_string(),
                to_biome_id: "Any".to_string(),
            };
            node
        })
        .unwrap();

    let xml = export_lss(editor.config()).unwrap();
    let reloaded = RunEditor::from_import(import_lss(&xml, &Catalogs::builtin()).unwrap());

    assert!(reloaded.warnings().is_empty());
    assert_eq!(without_ids(reloaded.config()), without_ids(editor.config()));
    let settings = reloaded.config().global_settings;
    assert!(settings.ordered_auto_splits);
    assert!(!settings.ordered_live_split);

    let selected = reloaded.selected_split().unwrap();
    assert_eq!(node_label(selected), "RocketSplit");
    assert_eq!(
        node_label(&selected.conditions[1]),
        "SafeShallows -> Any"
    );
}

#[test]
fn test_suggested_filename_follows_variables() {
    let mut editor = RunEditor::new();
    editor.set_category_name("Any%");
    editor.set_variable("Special Rule", "No Coffee");

    let suggested = build_suggested_filename(editor.config());
    assert_eq!(suggested, "Subnautica - Any% Survival Glitchless No Coffee.lss");
    assert_eq!(resolve_lss_filename(Some("  "), &suggested), suggested);
    assert_eq!(resolve_lss_filename(Some("route<1>"), &suggested), "route 1.lss");
}
