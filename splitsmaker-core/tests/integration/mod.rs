//! Integration test modules

mod editor_flow;
mod json_io;
mod lss_roundtrip;
mod share_roundtrip;

use splitsmaker_core::models::{RunConfig, SplitKind, SplitNode, SplitPayload, create_blank_config};
use splitsmaker_core::tree::create_split_node;

/// A 1x1 PNG
pub const PIXEL_PNG: &str =
    "iVBORw0KGgoAAAANSUhEUgAAAAEAAAABCAQAAAC1HAwCAAAAC0lEQVR42mP8Xw8AAoMBg7Sxr9wAAAAASUVORK5CYII=";

/// Clears every id so configs can be compared across XML, which does not
/// carry ids
pub fn without_ids(config: &RunConfig) -> RunConfig {
    fn strip(nodes: &[SplitNode]) -> Vec<SplitNode> {
        nodes
            .iter()
            .map(|node| SplitNode {
                id: String::new(),
                conditions: strip(&node.conditions),
                ..node.clone()
            })
            .collect()
    }
    RunConfig {
        splits: strip(&config.splits),
        ..config.clone()
    }
}

/// A route touching every kind the builtin catalogs know
pub fn sample_route() -> RunConfig {
    let mut config = create_blank_config();
    config.metadata.category_name = "Any% Survival".to_string();
    config
        .metadata
        .variables
        .insert("Special Rule".to_string(), "No Coffee".to_string());

    let mut rocket = create_split_node(SplitKind::Prefab, false);
    rocket.display_name_override = "Launch".to_string();
    rocket.icon_data = PIXEL_PNG.to_string();
    rocket.conditions.push(create_split_node(SplitKind::Inventory, true));
    rocket.conditions.push(create_split_node(SplitKind::Biome, true));

    let mut quartz = create_split_node(SplitKind::Inventory, false);
    if let SplitPayload::Inventory { count, is_count, .. } = &mut quartz.payload {
        *count = 5;
        *is_count = true;
    }
    quartz.only_split_once = false;
    let mut blueprint = create_split_node(SplitKind::Blueprint, false);
    blueprint.conditions.push(create_split_node(SplitKind::Encyclopedia, true));

    config.splits = vec![
        create_split_node(SplitKind::Manual, false),
        quartz,
        blueprint,
        create_split_node(SplitKind::Craft, false),
        create_split_node(SplitKind::Encyclopedia, false),
        rocket,
    ];
    config
}
