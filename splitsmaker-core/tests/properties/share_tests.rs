//! Property tests for the share codec

use proptest::prelude::*;
use splitsmaker_core::models::{GlobalSettings, create_blank_config};
use splitsmaker_core::share::{decode_share_config, encode_share_config};

use super::{arb_split, arb_text};

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn packed_tokens_decode_exactly(
        splits in prop::collection::vec(arb_split(), 0..8),
        category in "[A-Za-z0-9%][ -~]{0,20}[A-Za-z0-9%]",
        variable in arb_text(),
        bits in 0u8..128,
    ) {
        let mut config = create_blank_config();
        config.metadata.category_name = category;
        config.metadata.variables.insert("Notes".to_string(), variable);
        config.global_settings = GlobalSettings::from_bits(bits).normalized();
        config.splits = splits;

        let token = encode_share_config(&config).unwrap();
        let decoded = decode_share_config(&token).unwrap();
        prop_assert!(decoded.warnings.is_empty());
        prop_assert_eq!(decoded.config, config);
    }
}
