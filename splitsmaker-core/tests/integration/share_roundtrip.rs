//! Share link round-trip tests

use splitsmaker_core::error::ShareError;
use splitsmaker_core::models::{SplitKind, WarningCode, create_blank_config};
use splitsmaker_core::share::{
    ShareOptions, build_share_url, clear_share_param, decode_share_config, encode_share_config,
    share_param_from_url,
};
use splitsmaker_core::tree::create_split_node;

use super::{PIXEL_PNG, sample_route};

#[test]
fn test_packed_token_is_exact() {
    let mut config = sample_route();
    config.splits[1].conditions.clear();
    config.splits[2].conditions[0].icon_data = PIXEL_PNG.to_string();
    config.splits[2].conditions[0].display_name_override = "Cuddlefish scanned".to_string();

    let token = encode_share_config(&config).unwrap();
    let decoded = decode_share_config(&token).unwrap();

    assert_eq!(decoded.config, config);
    assert!(decoded.warnings.is_empty());
}

#[test]
fn test_url_round_trip_through_fragment() {
    let config = sample_route();
    let options = ShareOptions::new("https://splits.test/SubnauticaSplitsMaker/index.html");
    let link = build_share_url(&config, &options).unwrap();

    assert!(link.url.contains("#share=v2:"));
    let token = share_param_from_url(&link.url).unwrap().expect("token present");
    assert_eq!(decode_share_config(&token).unwrap().config, config);

    let cleared = clear_share_param(&link.url).unwrap();
    assert_eq!(cleared, "https://splits.test/SubnauticaSplitsMaker/");
    assert_eq!(share_param_from_url(&cleared).unwrap(), None);
}

#[test]
fn test_legacy_query_link_still_decodes() {
    let legacy_json = serde_json::to_string(&sample_route()).unwrap();
    let token = lz_str::compress_to_encoded_uri_component(legacy_json.as_str());
    // Older builds wrote the token through URLSearchParams, escaping `+`
    let url = format!("https://splits.test/?share={}", token.replace('+', "%2B"));

    let found = share_param_from_url(&url).unwrap().unwrap();
    let decoded = decode_share_config(&found).unwrap();
    assert_eq!(decoded.config, sample_route());
    assert!(decoded.warnings.is_empty());
}

#[test]
fn test_unversioned_legacy_token_reports_migration() {
    let token = lz_str::compress_to_encoded_uri_component(r#"{"splits":[]}"#);
    let decoded = decode_share_config(&token).unwrap();
    assert_eq!(decoded.warnings_with(WarningCode::MigrationApplied).len(), 1);
}

#[test]
fn test_budget_is_never_exceeded() {
    let mut config = create_blank_config();
    for _ in 0..400 {
        config.splits.push(create_split_node(SplitKind::Manual, false));
    }
    let options = ShareOptions::default().with_max_url_length(500);
    match build_share_url(&config, &options) {
        Err(ShareError::TooLarge { length, budget }) => {
            assert_eq!(budget, 500);
            assert!(length > 500);
        }
        other => panic!("expected TooLarge, got {other:?}"),
    }
}
