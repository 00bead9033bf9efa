//! Property tests for the LiveSplit XML codec

use proptest::prelude::*;
use splitsmaker_core::catalog::Catalogs;
use splitsmaker_core::io::{export_lss, import_lss};
use splitsmaker_core::models::{GlobalSettings, RunConfig, SplitNode, SplitPayload, create_blank_config};

use super::{arb_condition_payload, arb_id, arb_text};

// ============================================================================
// Generators
// ============================================================================

/// Top-level payloads the XML names can carry back unchanged
fn arb_top_level_payload() -> impl Strategy<Value = SplitPayload> {
    prop_oneof![
        prop::sample::select(vec!["GantrySplit", "RocketSplit"])
            .prop_map(|id| SplitPayload::Prefab { prefab_id: id.to_string() }),
        Just(SplitPayload::Manual),
        (arb_id(), any::<bool>(), any::<bool>(), 1..=48i32).prop_map(
            |(item_id, pick_up, is_count, count)| SplitPayload::Inventory {
                item_id,
                pick_up,
                is_count,
                count,
            }
        ),
        arb_condition_payload(),
        arb_id().prop_map(|craftable_id| SplitPayload::Craft { craftable_id }),
        (arb_id(), arb_text()).prop_map(|(name, raw_value)| SplitPayload::LegacyRaw {
            raw_name: format!("Old{name}"),
            raw_value,
        }),
    ]
}

/// Segments only carry top-level labels and icons, so conditions have none
fn arb_lss_condition() -> impl Strategy<Value = SplitNode> {
    (arb_condition_payload(), any::<bool>()).prop_map(|(payload, once)| {
        let mut node = SplitNode::new(payload, true);
        node.only_split_once = once;
        node
    })
}

/// Overrides contain `#`, which no derived label does
fn arb_lss_split() -> impl Strategy<Value = SplitNode> {
    (
        arb_top_level_payload(),
        prop::option::of("[A-Z][a-z]{2,8} #[0-9]{1,3}"),
        prop::option::of("[A-Za-z0-9+/]{4,40}"),
        any::<bool>(),
        prop::collection::vec(arb_lss_condition(), 0..3),
    )
        .prop_map(|(payload, name, icon, once, conditions)| {
            let mut node = SplitNode::new(payload, false);
            node.display_name_override = name.unwrap_or_default();
            node.icon_data = icon.unwrap_or_default();
            node.only_split_once = once;
            if node.kind().supports_conditions() {
                node.conditions = conditions;
            }
            node
        })
}

fn clear_ids(nodes: &mut [SplitNode]) {
    for node in nodes {
        node.id.clear();
        clear_ids(&mut node.conditions);
    }
}

fn without_ids(mut config: RunConfig) -> RunConfig {
    clear_ids(&mut config.splits);
    config
}

// ============================================================================
// Round trip
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn exported_documents_import_back_unchanged(
        splits in prop::collection::vec(arb_lss_split(), 0..8),
        category in "[A-Za-z0-9][ -~]{0,20}[A-Za-z0-9]",
        notes in arb_text(),
        bits in 0u8..128,
    ) {
        let mut config = create_blank_config();
        config.metadata.category_name = category;
        config.metadata.variables.insert("Notes".to_string(), notes);
        config.global_settings = GlobalSettings::from_bits(bits).normalized();
        config.splits = splits;

        let xml = export_lss(&config).unwrap();
        let imported = import_lss(&xml, &Catalogs::builtin()).unwrap();
        prop_assert_eq!(without_ids(imported.config), without_ids(config));
    }
}
