//! LiveSplit XML to run config.
//!
//! Import is best effort: unknown names and enum values become warnings,
//! while a missing `Run` or `AutoSplitterSettings` element aborts.
//!
//! Names, flags and typed values are read trimmed. A legacy-raw `Value` and
//! metadata variable values are kept verbatim. Segment names are display
//! labels and lose surrounding whitespace, so an override of `" Boss "`
//! comes back as `"Boss"`.

use indexmap::IndexMap;
use roxmltree::{Document, Node};

use crate::catalog::{Catalogs, EnumOption, Lookup, StaticCatalog};
use crate::error::{ImportError, SchemaError};
use crate::models::{
    CURRENT_CONFIG_VERSION, DEFAULT_GAME_NAME, DEFAULT_OFFSET, GlobalSettingKey, GlobalSettings,
    IMPORTED_CATEGORY_NAME, ImportResult, ImportWarning, MAX_INVENTORY_COUNT, MIN_INVENTORY_COUNT,
    RunConfig, RunMetadata, SplitNode, SplitPayload, WarningCode,
};
use crate::tree::node_label;

use super::icon::repair_icon_payload;

const GANTRY_SPLIT: &str = "GantrySplit";
const ROCKET_SPLIT: &str = "RocketSplit";

fn child<'a, 'input>(node: Node<'a, 'input>, name: &str) -> Option<Node<'a, 'input>> {
    node.children().find(|c| c.has_tag_name(name))
}

fn children<'a, 'input: 'a>(
    node: Node<'a, 'input>,
    name: &'a str,
) -> impl Iterator<Item = Node<'a, 'input>> + 'a {
    node.children().filter(move |c| c.has_tag_name(name))
}

/// Concatenated text and CDATA of an element, as written
fn raw_text_of(node: Option<Node<'_, '_>>) -> String {
    node.map(|n| {
        n.children()
            .filter(Node::is_text)
            .filter_map(|c| c.text())
            .collect::<String>()
    })
    .unwrap_or_default()
}

fn text_of(node: Option<Node<'_, '_>>) -> String {
    raw_text_of(node).trim().to_string()
}

/// `True` (any case, surrounding whitespace ignored) is true; an absent
/// element takes the fallback
fn bool_of(node: Option<Node<'_, '_>>, fallback: bool) -> bool {
    node.map_or(fallback, |n| text_of(Some(n)).eq_ignore_ascii_case("true"))
}

/// Leading integer of `text`, like a lenient `parseInt`
fn leading_int(text: &str) -> Option<i64> {
    let trimmed = text.trim_start();
    let (sign, digits) = match trimmed.strip_prefix('-') {
        Some(rest) => (-1, rest),
        None => (1, trimmed.strip_prefix('+').unwrap_or(trimmed)),
    };
    let end = digits
        .char_indices()
        .find(|(_, c)| !c.is_ascii_digit())
        .map_or(digits.len(), |(index, _)| index);
    let number = &digits[..end];
    if number.is_empty() {
        return None;
    }
    Some(number.parse::<i64>().unwrap_or(i64::MAX) * sign)
}

/// Colon-separated fields; empty or missing fields take their default
fn fields<const N: usize>(value: &str, defaults: [&str; N]) -> [String; N] {
    let mut parts = value.split(':');
    defaults.map(|fallback| {
        parts
            .next()
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .unwrap_or(fallback)
            .to_string()
    })
}

struct Importer<'c> {
    catalogs: &'c Catalogs,
    warnings: Vec<ImportWarning>,
}

impl Importer<'_> {
    fn warn(&mut self, code: WarningCode, message: String, node_id: Option<&str>) {
        tracing::warn!(code = %code, "{message}");
        self.warnings.push(ImportWarning {
            code,
            message,
            node_id: node_id.map(str::to_string),
        });
    }

    fn check_enum(&mut self, table: &StaticCatalog<EnumOption>, label: &str, value: &str, node_id: &str) {
        if !table.contains(value) {
            self.warn(
                WarningCode::UnknownEnumValue,
                format!("{label} value \"{value}\" is not in the catalog. Preserved as raw string."),
                Some(node_id),
            );
        }
    }

    fn parse_split(&mut self, element: Node<'_, '_>) -> SplitNode {
        let name_element = child(element, "Name");
        let raw_name = text_of(name_element);
        let raw_value = raw_text_of(child(element, "Value"));
        let mut node = SplitNode::new(
            SplitPayload::Manual,
            bool_of(child(element, "IsSubCondition"), false),
        );
        node.only_split_once = bool_of(child(element, "OnlySplitOnce"), true);

        let resolved = if raw_name.is_empty() {
            self.warn(
                WarningCode::InvalidXmlShape,
                "Split without a Name element; treated as UnknownSplit.".to_string(),
                Some(&node.id),
            );
            "UnknownSplit".to_string()
        } else {
            raw_name
        };
        let normalized = self
            .catalogs
            .description_to_id(&resolved)
            .unwrap_or(resolved.as_str())
            .to_string();
        if normalized != resolved {
            self.warn(
                WarningCode::LegacyPreserved,
                format!("Mapped legacy split description \"{resolved}\" to \"{normalized}\"."),
                Some(&node.id),
            );
        }

        node.payload = self.parse_payload(&normalized, &resolved, raw_value, &node);
        node.conditions = child(element, "Conditions")
            .map(|conditions| {
                children(conditions, "Split")
                    .map(|condition| self.parse_split(condition))
                    .collect()
            })
            .unwrap_or_default();
        node
    }

    fn parse_payload(&mut self, name: &str, resolved: &str, raw_value: String, node: &SplitNode) -> SplitPayload {
        let catalogs = self.catalogs;
        match name {
            "None" => SplitPayload::Manual,
            "Inventory" => {
                let [item_id, pick_up, is_count, count] =
                    fields(&raw_value, ["Quartz", "True", "False", "1"]);
                self.check_enum(&catalogs.inventory, "Inventory", &item_id, &node.id);
                let count = leading_int(&count).filter(|&n| n != 0).map_or(MIN_INVENTORY_COUNT, |n| {
                    let clamped = n.clamp(i64::from(MIN_INVENTORY_COUNT), i64::from(MAX_INVENTORY_COUNT));
                    i32::try_from(clamped).unwrap_or(MIN_INVENTORY_COUNT)
                });
                SplitPayload::Inventory {
                    item_id,
                    pick_up: node.is_sub_condition || pick_up.eq_ignore_ascii_case("true"),
                    is_count: is_count.eq_ignore_ascii_case("true"),
                    count,
                }
            }
            "Blueprint" => {
                let blueprint_id = non_empty_or(&raw_value, "Titanium");
                self.check_enum(&catalogs.blueprint, "Blueprint", &blueprint_id, &node.id);
                SplitPayload::Blueprint { blueprint_id }
            }
            "Encyclopedia" => {
                let encyclopedia_id = non_empty_or(&raw_value, "CuteFish");
                self.check_enum(&catalogs.encyclopedia, "Encyclopedia", &encyclopedia_id, &node.id);
                SplitPayload::Encyclopedia { encyclopedia_id }
            }
            "Biome" => {
                let [from_biome_id, to_biome_id] = fields(&raw_value, ["Any", "SafeShallows"]);
                SplitPayload::Biome {
                    from_biome_id,
                    to_biome_id,
                }
            }
            "Craft" => SplitPayload::Craft {
                craftable_id: non_empty_or(&raw_value, "FiberMesh"),
            },
            prefab if catalogs.is_known_split(prefab) => SplitPayload::Prefab {
                prefab_id: prefab.to_string(),
            },
            _ => {
                self.warn(
                    WarningCode::UnknownSplitName,
                    format!("Unknown split \"{resolved}\" preserved as legacy-raw."),
                    Some(&node.id),
                );
                SplitPayload::LegacyRaw {
                    raw_name: resolved.to_string(),
                    raw_value,
                }
            }
        }
    }

    fn apply_segments(&mut self, splits: &mut [SplitNode], segments: &[Node<'_, '_>]) {
        for (split, segment) in splits.iter_mut().zip(segments) {
            let name = text_of(child(*segment, "Name"));
            if !name.is_empty() && name != node_label(split) {
                split.display_name_override = name;
            }

            let icon = text_of(child(*segment, "Icon"));
            if icon.is_empty() {
                continue;
            }
            if let Some(repaired) = repair_icon_payload(&icon) {
                self.warn(
                    WarningCode::LegacyPreserved,
                    "Recovered PNG icon embedded in a re-serialized document.".to_string(),
                    Some(&split.id),
                );
                split.icon_data = repaired;
            } else {
                split.icon_data = icon;
            }
        }
    }

    /// Folds a trailing `GantrySplit`, `RocketSplit` pair into one rocket
    /// split when the document has one segment fewer than splits
    fn collapse_launch_pair(&mut self, mut splits: Vec<SplitNode>, segment_count: usize) -> Vec<SplitNode> {
        if splits.len() < 2 || segment_count + 1 != splits.len() {
            return splits;
        }
        let is_prefab = |node: &SplitNode, id: &str| {
            matches!(&node.payload, SplitPayload::Prefab { prefab_id } if prefab_id == id)
        };
        let tail = splits.len() - 2;
        if !is_prefab(&splits[tail], GANTRY_SPLIT) || !is_prefab(&splits[tail + 1], ROCKET_SPLIT) {
            return splits;
        }

        let Some(mut rocket) = splits.pop() else {
            return splits;
        };
        let Some(gantry) = splits.pop() else {
            return splits;
        };
        if rocket.display_name_override.is_empty() {
            rocket.display_name_override = gantry.display_name_override;
        }
        if rocket.icon_data.is_empty() {
            rocket.icon_data = gantry.icon_data;
        }
        self.warn(
            WarningCode::LegacyPreserved,
            "Collapsed legacy GantrySplit + RocketSplit tail pair into a single RocketSplit to match segment count."
                .to_string(),
            Some(&rocket.id),
        );
        splits.push(rocket);
        splits
    }

    fn parse_variables(&mut self, run: Node<'_, '_>) -> IndexMap<String, String> {
        let mut variables = IndexMap::new();
        let Some(list) = child(run, "Metadata").and_then(|metadata| child(metadata, "Variables")) else {
            return variables;
        };
        for variable in children(list, "Variable") {
            let name = variable.attribute("name").map(str::trim).unwrap_or_default();
            if name.is_empty() {
                self.warn(
                    WarningCode::InvalidXmlShape,
                    "Skipped a metadata Variable without a name.".to_string(),
                    None,
                );
                continue;
            }
            variables.insert(name.to_string(), raw_text_of(Some(variable)));
        }
        variables
    }
}

fn non_empty_or(value: &str, fallback: &str) -> String {
    let value = value.trim();
    let chosen = if value.is_empty() { fallback } else { value };
    chosen.to_string()
}

/// Parses a LiveSplit splits document.
///
/// The returned config is not yet sanitized.
///
/// # Errors
///
/// Returns `ImportError::Xml` for malformed XML and `ImportError::Schema`
/// when the `Run` root or its `AutoSplitterSettings` is missing.
pub fn read_document(xml: &str, catalogs: &Catalogs) -> Result<ImportResult, ImportError> {
    let content = xml.trim_start_matches('\u{feff}');
    let document = Document::parse(content).map_err(|e| ImportError::Xml(e.to_string()))?;
    let run = document.root_element();
    if !run.has_tag_name("Run") {
        return Err(SchemaError::missing("Run").into());
    }
    let auto_splitter = child(run, "AutoSplitterSettings")
        .ok_or_else(|| SchemaError::missing("Run.AutoSplitterSettings"))?;
    let settings_node = child(auto_splitter, "Settings").unwrap_or(auto_splitter);

    let mut importer = Importer {
        catalogs,
        warnings: Vec::new(),
    };

    let mut splits: Vec<SplitNode> = child(settings_node, "Splits")
        .map(|list| {
            children(list, "Split")
                .map(|element| importer.parse_split(element))
                .collect()
        })
        .unwrap_or_default();

    let segments: Vec<Node<'_, '_>> = child(run, "Segments")
        .map(|list| children(list, "Segment").collect())
        .unwrap_or_default();
    importer.apply_segments(&mut splits, &segments);
    let splits = importer.collapse_launch_pair(splits, segments.len());
    if !segments.is_empty() && segments.len() != splits.len() {
        importer.warn(
            WarningCode::InvalidXmlShape,
            format!(
                "Document has {} segments but {} top-level splits.",
                segments.len(),
                splits.len()
            ),
            None,
        );
    }

    let mut global_settings = GlobalSettings::default();
    for key in GlobalSettingKey::ALL {
        let fallback = global_settings.get(key);
        global_settings = global_settings.with_raw(key, bool_of(child(settings_node, key.as_str()), fallback));
    }

    let or_default = |text: String, fallback: &str| {
        if text.is_empty() { fallback.to_string() } else { text }
    };
    let metadata = RunMetadata {
        game_name: or_default(text_of(child(run, "GameName")), DEFAULT_GAME_NAME),
        category_name: or_default(text_of(child(run, "CategoryName")), IMPORTED_CATEGORY_NAME),
        variables: importer.parse_variables(run),
        offset: or_default(text_of(child(run, "Offset")), DEFAULT_OFFSET),
    };

    Ok(ImportResult {
        config: RunConfig {
            config_version: CURRENT_CONFIG_VERSION,
            metadata,
            global_settings,
            splits,
        },
        warnings: importer.warnings,
    })
}
