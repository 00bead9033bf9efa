//! Run config to LiveSplit XML.

use quick_xml::Writer;
use quick_xml::events::{BytesCData, BytesEnd, BytesStart, BytesText, Event};

use crate::error::ExportError;
use crate::models::{GlobalSettingKey, RunConfig, SplitNode, SplitPayload};
use crate::tree::node_label;

use super::{FALSE_TEXT, LIVESPLIT_VERSION, TRUE_TEXT, XML_DECLARATION};

const fn bool_text(value: bool) -> &'static str {
    if value { TRUE_TEXT } else { FALSE_TEXT }
}

/// Returns the XML `Name` token of a node
#[must_use]
pub fn split_name(node: &SplitNode) -> &str {
    match &node.payload {
        SplitPayload::Prefab { prefab_id } => prefab_id,
        SplitPayload::Manual => "None",
        SplitPayload::Inventory { .. } => "Inventory",
        SplitPayload::Blueprint { .. } => "Blueprint",
        SplitPayload::Encyclopedia { .. } => "Encyclopedia",
        SplitPayload::Biome { .. } => "Biome",
        SplitPayload::Craft { .. } => "Craft",
        SplitPayload::LegacyRaw { raw_name, .. } => raw_name,
    }
}

/// Returns the XML `Value` text of a node.
///
/// Inventory conditions always encode `pickUp` as `True`.
#[must_use]
pub fn split_value(node: &SplitNode) -> String {
    match &node.payload {
        SplitPayload::Prefab { prefab_id } => prefab_id.clone(),
        SplitPayload::Manual => "None".to_string(),
        SplitPayload::Inventory {
            item_id,
            pick_up,
            is_count,
            count,
        } => format!(
            "{item_id}:{}:{}:{count}",
            bool_text(node.is_sub_condition || *pick_up),
            bool_text(*is_count)
        ),
        SplitPayload::Blueprint { blueprint_id } => blueprint_id.clone(),
        SplitPayload::Encyclopedia { encyclopedia_id } => encyclopedia_id.clone(),
        SplitPayload::Biome {
            from_biome_id,
            to_biome_id,
        } => format!("{from_biome_id}:{to_biome_id}"),
        SplitPayload::Craft { craftable_id } => craftable_id.clone(),
        SplitPayload::LegacyRaw { raw_value, .. } => raw_value.clone(),
    }
}

struct LssWriter {
    inner: Writer<Vec<u8>>,
}

impl LssWriter {
    fn new() -> Self {
        Self {
            inner: Writer::new_with_indent(Vec::new(), b' ', 2),
        }
    }

    fn event(&mut self, event: Event<'_>) -> Result<(), ExportError> {
        self.inner
            .write_event(event)
            .map_err(|e| ExportError::Xml(e.to_string()))
    }

    fn open(&mut self, start: BytesStart<'_>) -> Result<(), ExportError> {
        self.event(Event::Start(start))
    }

    fn close(&mut self, name: &str) -> Result<(), ExportError> {
        self.event(Event::End(BytesEnd::new(name)))
    }

    fn empty(&mut self, start: BytesStart<'_>) -> Result<(), ExportError> {
        self.event(Event::Empty(start))
    }

    /// `<name>text</name>`, or `<name/>` when the text is empty
    fn text(&mut self, name: &str, text: &str) -> Result<(), ExportError> {
        if text.is_empty() {
            return self.empty(BytesStart::new(name));
        }
        self.open(BytesStart::new(name))?;
        self.event(Event::Text(BytesText::new(text)))?;
        self.close(name)
    }

    /// Writes an icon as a CDATA section so base64 padding stays literal
    fn icon(&mut self, icon: &str) -> Result<(), ExportError> {
        if icon.is_empty() {
            return self.empty(BytesStart::new("Icon"));
        }
        self.open(BytesStart::new("Icon"))?;
        if icon.contains("]]>") {
            self.event(Event::Text(BytesText::new(icon)))?;
        } else {
            self.event(Event::CData(BytesCData::new(icon)))?;
        }
        self.close("Icon")
    }

    fn finish(self) -> Result<String, ExportError> {
        let body = String::from_utf8(self.inner.into_inner())
            .map_err(|e| ExportError::Xml(e.to_string()))?;
        Ok(format!("{XML_DECLARATION}\n{body}"))
    }
}

/// Serializes a config into the LiveSplit splits document.
///
/// One `Segment` is written per top-level split; conditions only appear in
/// the nested `AutoSplitterSettings` tree.
///
/// # Errors
///
/// Returns `ExportError::Xml` if the writer fails.
pub fn write_document(config: &RunConfig) -> Result<String, ExportError> {
    let mut w = LssWriter::new();

    w.open(BytesStart::new("Run").with_attributes([("version", LIVESPLIT_VERSION)]))?;
    w.empty(BytesStart::new("GameIcon"))?;
    w.text("GameName", &config.metadata.game_name)?;
    w.text("CategoryName", &config.metadata.category_name)?;

    w.open(BytesStart::new("Metadata"))?;
    w.empty(BytesStart::new("Run").with_attributes([("id", "")]))?;
    w.empty(BytesStart::new("Platform").with_attributes([("usesEmulator", FALSE_TEXT)]))?;
    if config.metadata.variables.is_empty() {
        w.empty(BytesStart::new("Variables"))?;
    } else {
        w.open(BytesStart::new("Variables"))?;
        for (name, value) in &config.metadata.variables {
            let start = BytesStart::new("Variable").with_attributes([("name", name.as_str())]);
            if value.is_empty() {
                w.empty(start)?;
            } else {
                w.open(start)?;
                w.event(Event::Text(BytesText::new(value)))?;
                w.close("Variable")?;
            }
        }
        w.close("Variables")?;
    }
    w.close("Metadata")?;

    w.text("Offset", &config.metadata.offset)?;
    w.text("AttemptCount", "0")?;
    w.empty(BytesStart::new("AttemptHistory"))?;

    w.open(BytesStart::new("Segments"))?;
    for split in &config.splits {
        write_segment(&mut w, split)?;
    }
    w.close("Segments")?;

    w.open(BytesStart::new("AutoSplitterSettings"))?;
    w.open(BytesStart::new("Settings"))?;
    for key in GlobalSettingKey::ALL {
        w.text(key.as_str(), bool_text(config.global_settings.get(key)))?;
    }
    w.open(BytesStart::new("Splits"))?;
    for split in &config.splits {
        write_split(&mut w, split)?;
    }
    w.close("Splits")?;
    w.close("Settings")?;
    w.close("AutoSplitterSettings")?;

    w.close("Run")?;
    w.finish()
}

fn write_segment(w: &mut LssWriter, split: &SplitNode) -> Result<(), ExportError> {
    w.open(BytesStart::new("Segment"))?;
    w.text("Name", &node_label(split))?;
    w.icon(&split.icon_data)?;
    w.open(BytesStart::new("SplitTimes"))?;
    w.empty(BytesStart::new("SplitTime").with_attributes([("name", "Personal Best")]))?;
    w.close("SplitTimes")?;
    w.empty(BytesStart::new("BestSegmentTime"))?;
    w.empty(BytesStart::new("SegmentHistory"))?;
    w.close("Segment")
}

fn write_split(w: &mut LssWriter, split: &SplitNode) -> Result<(), ExportError> {
    w.open(BytesStart::new("Split"))?;
    w.text("OnlySplitOnce", bool_text(split.only_split_once))?;
    w.text("IsSubCondition", bool_text(split.is_sub_condition))?;
    w.text("Name", split_name(split))?;
    w.text("Value", &split_value(split))?;
    if !split.conditions.is_empty() {
        w.open(BytesStart::new("Conditions"))?;
        for condition in &split.conditions {
            write_split(w, condition)?;
        }
        w.close("Conditions")?;
    }
    w.close("Split")
}
