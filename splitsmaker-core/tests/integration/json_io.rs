//! JSON import/export tests

use splitsmaker_core::error::{ImportError, MigrationError};
use splitsmaker_core::io::{export_json, import_json};
use splitsmaker_core::models::{SplitPayload, WarningCode};

use super::sample_route;

#[test]
fn test_json_round_trip_keeps_ids() {
    let config = sample_route();
    let json = export_json(&config).unwrap();
    let imported = import_json(&json).unwrap();
    assert_eq!(imported.config, config);
    assert!(!imported.has_warnings());
}

#[test]
fn test_legacy_document_is_upgraded_and_sanitized() {
    let legacy = r#"{
        "metadata": { "gameName": "  ", "categoryName": " Glitched ", "offset": "" },
        "globalSettings": {
            "IntroStart": true, "CreativeStart": true, "Reset": true,
            "AskForGoldSave": false, "SRCLoadtimes": false,
            "OrderedLiveSplit": true, "OrderedAutoSplits": true
        },
        "splits": [{
            "id": "q", "kind": "inventory", "itemId": "Quartz",
            "pickUp": true, "isCount": true, "count": 48,
            "onlySplitOnce": true, "isSubCondition": false, "conditions": []
        }]
    }"#;
    let imported = import_json(legacy).unwrap();
    let config = &imported.config;

    assert_eq!(imported.warnings.len(), 1);
    assert_eq!(imported.warnings[0].code, WarningCode::MigrationApplied);
    assert_eq!(config.metadata.game_name, "Subnautica");
    assert_eq!(config.metadata.category_name, "Glitched");
    assert_eq!(config.metadata.offset, "00:00:00");
    assert!(config.global_settings.is_consistent());
    assert!(matches!(config.splits[0].payload, SplitPayload::Inventory { count: 48, .. }));
}

#[test]
fn test_schema_errors_name_the_field() {
    let bad = r#"{
        "configVersion": 1,
        "metadata": { "gameName": "Subnautica", "categoryName": "Any%", "offset": "00:00:00" },
        "splits": [{ "id": "b", "kind": "biome", "fromBiomeId": "Any",
                     "onlySplitOnce": true, "isSubCondition": false }]
    }"#;
    match import_json(bad) {
        Err(ImportError::Migration(MigrationError::Schema(err))) => {
            assert!(err.path.contains("splits[0]"), "path was {}", err.path);
        }
        other => panic!("expected schema error, got {other:?}"),
    }
}

#[test]
fn test_future_version_is_rejected() {
    let err = import_json(r#"{ "configVersion": 3, "splits": [] }"#).unwrap_err();
    assert!(err.to_string().contains("Unsupported configVersion 3"));
}
