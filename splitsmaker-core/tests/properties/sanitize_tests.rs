//! Property tests for sanitization

use proptest::prelude::*;
use splitsmaker_core::models::{
    GlobalSettings, MAX_INVENTORY_COUNT, MIN_INVENTORY_COUNT, SplitNode, SplitPayload,
    create_blank_config,
};
use splitsmaker_core::validate::sanitize_config;

use super::{arb_split, arb_text};

fn inventory_with_count(count: i32) -> SplitNode {
    SplitNode::new(
        SplitPayload::Inventory {
            item_id: "Quartz".to_string(),
            pick_up: true,
            is_count: true,
            count,
        },
        false,
    )
}

proptest! {
    #[test]
    fn sanitize_is_idempotent(
        splits in prop::collection::vec(arb_split(), 0..6),
        category in arb_text(),
        offset in arb_text(),
        game in arb_text(),
        bits in 0u8..128,
    ) {
        let mut config = create_blank_config();
        config.metadata.category_name = category;
        config.metadata.offset = offset;
        config.metadata.game_name = game;
        config.global_settings = GlobalSettings::from_bits(bits);
        config.splits = splits;

        let once = sanitize_config(config);
        let twice = sanitize_config(once.clone());
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn inventory_count_is_clamped(count in any::<i32>()) {
        let mut parent = inventory_with_count(count);
        parent.conditions.push(inventory_with_count(count));
        let mut config = create_blank_config();
        config.splits.push(parent);

        let sanitized = sanitize_config(config);
        let expected = count.clamp(MIN_INVENTORY_COUNT, MAX_INVENTORY_COUNT);
        let top = &sanitized.splits[0];
        prop_assert!(
            matches!(top.payload, SplitPayload::Inventory { count: c, .. } if c == expected),
            "top-level inventory count not clamped to {}",
            expected
        );
        prop_assert!(matches!(
            top.conditions[0].payload,
            SplitPayload::Inventory { count: c, .. } if c == expected
        ), "nested inventory count not clamped to {}", expected);
    }

    #[test]
    fn sanitized_metadata_is_never_blank(category in "[ \t]{0,4}", offset in "[ \t]{0,4}") {
        let mut config = create_blank_config();
        config.metadata.category_name = category;
        config.metadata.offset = offset;
        let sanitized = sanitize_config(config);
        prop_assert_eq!(sanitized.metadata.category_name, "Any%");
        prop_assert_eq!(sanitized.metadata.offset, "00:00:00");
    }
}
