//! Property test modules

mod lss_tests;
mod sanitize_tests;
mod settings_tests;
mod share_tests;
mod tree_tests;

use proptest::prelude::*;
use splitsmaker_core::models::{SplitKind, SplitNode, SplitPayload};

/// Strategy for catalog-like identifiers
pub fn arb_id() -> impl Strategy<Value = String> {
    "[A-Z][A-Za-z0-9]{0,15}"
}

/// Strategy for free text, including characters XML must escape
pub fn arb_text() -> impl Strategy<Value = String> {
    "[ -~]{0,24}"
}

/// Strategy for condition payloads
pub fn arb_condition_payload() -> impl Strategy<Value = SplitPayload> {
    prop_oneof![
        (arb_id(), any::<bool>(), 1..=48i32).prop_map(|(item_id, is_count, count)| {
            SplitPayload::Inventory {
                item_id,
                pick_up: true,
                is_count,
                count,
            }
        }),
        arb_id().prop_map(|blueprint_id| SplitPayload::Blueprint { blueprint_id }),
        arb_id().prop_map(|encyclopedia_id| SplitPayload::Encyclopedia { encyclopedia_id }),
        (arb_id(), arb_id()).prop_map(|(from_biome_id, to_biome_id)| SplitPayload::Biome {
            from_biome_id,
            to_biome_id
        }),
    ]
}

/// Strategy for any payload
pub fn arb_payload() -> impl Strategy<Value = SplitPayload> {
    prop_oneof![
        arb_id().prop_map(|prefab_id| SplitPayload::Prefab { prefab_id }),
        Just(SplitPayload::Manual),
        arb_condition_payload(),
        arb_id().prop_map(|craftable_id| SplitPayload::Craft { craftable_id }),
        (arb_id(), arb_text()).prop_map(|(raw_name, raw_value)| SplitPayload::LegacyRaw {
            raw_name,
            raw_value
        }),
    ]
}

/// Strategy for a condition node
pub fn arb_condition() -> impl Strategy<Value = SplitNode> {
    (arb_condition_payload(), arb_text(), any::<bool>()).prop_map(|(payload, name, once)| {
        let mut node = SplitNode::new(payload, true);
        node.display_name_override = name;
        node.only_split_once = once;
        node
    })
}

/// Strategy for a top-level node with up to three conditions
pub fn arb_split() -> impl Strategy<Value = SplitNode> {
    (
        arb_payload(),
        arb_text(),
        prop::option::of("[A-Za-z0-9+/]{4,40}"),
        prop::collection::vec(arb_condition(), 0..3),
    )
        .prop_map(|(payload, name, icon, conditions)| {
            let mut node = SplitNode::new(payload, false);
            node.display_name_override = name;
            node.icon_data = icon.unwrap_or_default();
            if node.kind().supports_conditions() {
                node.conditions = conditions;
            }
            node
        })
}

/// Strategy for a kind usable anywhere
pub fn arb_kind() -> impl Strategy<Value = SplitKind> {
    prop::sample::select(SplitKind::ALL.to_vec())
}
