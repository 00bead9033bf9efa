//! LiveSplit document round-trip tests

use splitsmaker_core::catalog::Catalogs;
use splitsmaker_core::io::{export_lss, import_lss};
use splitsmaker_core::models::{SplitKind, SplitPayload, WarningCode, create_blank_config};
use splitsmaker_core::tree::create_split_node;

use super::{PIXEL_PNG, sample_route, without_ids};

const LEGACY_LAUNCH_DOCUMENT: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<Run version="1.7.0">
  <GameIcon />
  <GameName>Subnautica</GameName>
  <CategoryName>Any% Creative</CategoryName>
  <Metadata>
    <Run id="" />
    <Platform usesEmulator="False" />
    <Variables>
      <Variable name="Game Mode">Creative</Variable>
    </Variables>
  </Metadata>
  <Offset>00:00:00</Offset>
  <AttemptCount>12</AttemptCount>
  <Segments>
    <Segment>
      <Name>Launch</Name>
      <Icon />
    </Segment>
  </Segments>
  <AutoSplitterSettings>
    <Settings>
      <IntroStart>False</IntroStart>
      <CreativeStart>True</CreativeStart>
      <Reset>True</Reset>
      <AskForGoldSave>False</AskForGoldSave>
      <SRCLoadtimes>False</SRCLoadtimes>
      <OrderedLiveSplit>True</OrderedLiveSplit>
      <OrderedAutoSplits>False</OrderedAutoSplits>
      <Splits>
        <Split>
          <OnlySplitOnce>True</OnlySplitOnce>
          <IsSubCondition>False</IsSubCondition>
          <Name>GantrySplit</Name>
          <Value>GantrySplit</Value>
        </Split>
        <Split>
          <OnlySplitOnce>True</OnlySplitOnce>
          <IsSubCondition>False</IsSubCondition>
          <Name>RocketSplit</Name>
          <Value>RocketSplit</Value>
        </Split>
      </Splits>
    </Settings>
  </AutoSplitterSettings>
</Run>"#;

#[test]
fn test_constructed_route_survives_xml() {
    let config = sample_route();
    let catalogs = Catalogs::builtin();

    let xml = export_lss(&config).expect("export should succeed");
    let imported = import_lss(&xml, &catalogs).expect("import should succeed");

    assert!(
        imported.warnings.is_empty(),
        "unexpected warnings: {:?}",
        imported.warnings
    );
    assert_eq!(without_ids(&imported.config), without_ids(&config));
}

#[test]
fn test_one_segment_per_top_level_split() {
    let config = sample_route();
    let xml = export_lss(&config).unwrap();
    assert_eq!(xml.matches("<Segment>").count(), config.splits.len());
    assert_eq!(xml.matches("<IsSubCondition>True</IsSubCondition>").count(), 3);
    assert!(xml.contains("<Name>Launch</Name>"));
    assert!(xml.contains(&format!("<Icon><![CDATA[{PIXEL_PNG}]]></Icon>")));
}

#[test]
fn test_inventory_value_literal() {
    let mut config = create_blank_config();
    config.splits.push(create_split_node(SplitKind::Inventory, false));
    let xml = export_lss(&config).unwrap();
    assert!(xml.contains("<Value>Quartz:True:False:1</Value>"));
}

#[test]
fn test_legacy_launch_pair_collapses() {
    let imported = import_lss(LEGACY_LAUNCH_DOCUMENT, &Catalogs::builtin()).unwrap();
    let config = &imported.config;

    assert_eq!(config.splits.len(), 1);
    assert_eq!(
        config.splits[0].payload,
        SplitPayload::Prefab {
            prefab_id: "RocketSplit".to_string()
        }
    );
    assert_eq!(config.splits[0].display_name_override, "Launch");
    assert_eq!(imported.warnings_with(WarningCode::LegacyPreserved).len(), 1);
    assert!(config.global_settings.creative_start);
    assert!(!config.global_settings.intro_start);
    assert_eq!(config.metadata.variables.get("Game Mode").map(String::as_str), Some("Creative"));

    let xml = export_lss(config).unwrap();
    assert!(!xml.contains("<Name>GantrySplit</Name>"));
    assert!(xml.contains("<Name>RocketSplit</Name>"));
}

#[test]
fn test_unknown_split_is_preserved_verbatim() {
    let document = LEGACY_LAUNCH_DOCUMENT
        .replace("<Name>GantrySplit</Name>", "<Name>MysteryTrigger</Name>")
        .replace("<Value>GantrySplit</Value>", "<Value>a:b</Value>");
    let imported = import_lss(&document, &Catalogs::builtin()).unwrap();

    let legacy: Vec<_> = imported
        .config
        .splits
        .iter()
        .filter(|split| split.kind() == SplitKind::LegacyRaw)
        .collect();
    assert_eq!(legacy.len(), 1);
    assert_eq!(
        legacy[0].payload,
        SplitPayload::LegacyRaw {
            raw_name: "MysteryTrigger".to_string(),
            raw_value: "a:b".to_string()
        }
    );
    assert_eq!(imported.warnings_with(WarningCode::UnknownSplitName).len(), 1);

    let xml = export_lss(&imported.config).unwrap();
    assert!(xml.contains("<Name>MysteryTrigger</Name>"));
    assert!(xml.contains("<Value>a:b</Value>"));
}

#[test]
fn test_unknown_enum_value_is_kept() {
    let document = LEGACY_LAUNCH_DOCUMENT
        .replace("<Name>GantrySplit</Name>", "<Name>Blueprint</Name>")
        .replace("<Value>GantrySplit</Value>", "<Value>FutureBlueprint</Value>");
    let imported = import_lss(&document, &Catalogs::builtin()).unwrap();

    assert_eq!(
        imported.config.splits[0].payload,
        SplitPayload::Blueprint {
            blueprint_id: "FutureBlueprint".to_string()
        }
    );
    assert_eq!(imported.warnings_with(WarningCode::UnknownEnumValue).len(), 1);
    assert_eq!(imported.warnings_with(WarningCode::InvalidXmlShape).len(), 1);
}

#[test]
fn test_bom_and_missing_settings() {
    let with_bom = format!("\u{feff}{LEGACY_LAUNCH_DOCUMENT}");
    assert!(import_lss(&with_bom, &Catalogs::builtin()).is_ok());

    let start = LEGACY_LAUNCH_DOCUMENT.find("<AutoSplitterSettings>").unwrap();
    let end = LEGACY_LAUNCH_DOCUMENT.find("</AutoSplitterSettings>").unwrap()
        + "</AutoSplitterSettings>".len();
    let mut broken = LEGACY_LAUNCH_DOCUMENT.to_string();
    broken.replace_range(start..end, "");
    assert!(import_lss(&broken, &Catalogs::builtin()).is_err());
}
