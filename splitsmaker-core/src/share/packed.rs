//! Positional array encoding used by `v2` share tokens.
//!
//! ```text
//! ["ssm", version, [game, category, offset, [[key, value], ...]], bits, icons, splits]
//! split = [id, code, override | null, icon index | -1, once, sub, payload, conditions]
//! ```

use indexmap::{IndexMap, IndexSet};
use serde_json::{Value, json};

use crate::error::{MigrationError, ShareError};
use crate::models::{
    CURRENT_CONFIG_VERSION, GlobalSettings, RunConfig, RunMetadata, SplitKind, SplitNode,
    SplitPayload,
};

/// First element of every packed payload
pub const SHARE_MARKER: &str = "ssm";

const fn kind_code(kind: SplitKind) -> &'static str {
    match kind {
        SplitKind::Prefab => "p",
        SplitKind::Manual => "m",
        SplitKind::Inventory => "i",
        SplitKind::Blueprint => "b",
        SplitKind::Encyclopedia => "e",
        SplitKind::Biome => "z",
        SplitKind::Craft => "c",
        SplitKind::LegacyRaw => "l",
    }
}

fn kind_from_code(code: &str) -> Option<SplitKind> {
    SplitKind::ALL.into_iter().find(|&kind| kind_code(kind) == code)
}

fn invalid(reason: impl Into<String>) -> ShareError {
    ShareError::InvalidPayload(reason.into())
}

/// Packs a config into its positional form
#[must_use]
pub fn pack(config: &RunConfig) -> Value {
    let mut icons = IndexSet::new();
    let splits = pack_splits(&config.splits, &mut icons);
    let icons: Vec<String> = icons.into_iter().collect();
    let variables: Vec<Value> = config
        .metadata
        .variables
        .iter()
        .map(|(key, value)| json!([key, value]))
        .collect();

    json!([
        SHARE_MARKER,
        config.config_version,
        [
            config.metadata.game_name,
            config.metadata.category_name,
            config.metadata.offset,
            variables
        ],
        config.global_settings.to_bits(),
        icons,
        splits
    ])
}

fn pack_splits(nodes: &[SplitNode], icons: &mut IndexSet<String>) -> Vec<Value> {
    nodes.iter().map(|node| pack_split(node, icons)).collect()
}

fn pack_split(node: &SplitNode, icons: &mut IndexSet<String>) -> Value {
    let display_name = if node.display_name_override.is_empty() {
        Value::Null
    } else {
        Value::from(node.display_name_override.as_str())
    };
    let icon_index = if node.icon_data.is_empty() {
        Value::from(-1)
    } else {
        Value::from(icons.insert_full(node.icon_data.clone()).0)
    };

    json!([
        node.id,
        kind_code(node.kind()),
        display_name,
        icon_index,
        u8::from(node.only_split_once),
        u8::from(node.is_sub_condition),
        pack_payload(&node.payload),
        pack_splits(&node.conditions, icons)
    ])
}

fn pack_payload(payload: &SplitPayload) -> Value {
    match payload {
        SplitPayload::Prefab { prefab_id } => json!([prefab_id]),
        SplitPayload::Manual => json!([]),
        SplitPayload::Inventory {
            item_id,
            pick_up,
            is_count,
            count,
        } => json!([item_id, pick_up, is_count, count]),
        SplitPayload::Blueprint { blueprint_id } => json!([blueprint_id]),
        SplitPayload::Encyclopedia { encyclopedia_id } => json!([encyclopedia_id]),
        SplitPayload::Biome {
            from_biome_id,
            to_biome_id,
        } => json!([from_biome_id, to_biome_id]),
        SplitPayload::Craft { craftable_id } => json!([craftable_id]),
        SplitPayload::LegacyRaw {
            raw_name,
            raw_value,
        } => json!([raw_name, raw_value]),
    }
}

/// Positional reader over one packed array
struct Fields<'a> {
    what: &'static str,
    items: &'a [Value],
}

impl<'a> Fields<'a> {
    fn of(value: &'a Value, what: &'static str) -> Result<Self, ShareError> {
        value
            .as_array()
            .map(|items| Self { what, items })
            .ok_or_else(|| invalid(format!("{what} is not an array")))
    }

    fn at(&self, index: usize) -> Result<&'a Value, ShareError> {
        self.items
            .get(index)
            .ok_or_else(|| invalid(format!("{} is missing field {index}", self.what)))
    }

    fn string(&self, index: usize) -> Result<String, ShareError> {
        self.at(index)?
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| invalid(format!("{} field {index} is not a string", self.what)))
    }

    fn boolean(&self, index: usize) -> Result<bool, ShareError> {
        match self.at(index)? {
            Value::Bool(flag) => Ok(*flag),
            Value::Number(number) if number.as_u64() == Some(0) => Ok(false),
            Value::Number(number) if number.as_u64() == Some(1) => Ok(true),
            _ => Err(invalid(format!("{} field {index} is not a flag", self.what))),
        }
    }

    fn integer(&self, index: usize) -> Result<i64, ShareError> {
        self.at(index)?
            .as_i64()
            .ok_or_else(|| invalid(format!("{} field {index} is not an integer", self.what)))
    }

    fn nested(&self, index: usize, what: &'static str) -> Result<Fields<'a>, ShareError> {
        Fields::of(self.at(index)?, what)
    }
}

/// Rebuilds a config from its positional form.
///
/// The result is unvalidated; callers run it through the schema check.
///
/// # Errors
///
/// Returns `ShareError::InvalidPayload` when the shape is wrong and
/// `ShareError::Migration` when the packed version is not current.
pub fn unpack(value: &Value) -> Result<RunConfig, ShareError> {
    let root = Fields::of(value, "share payload")?;
    if root.string(0)? != SHARE_MARKER {
        return Err(invalid("share payload marker mismatch"));
    }

    let version = root.integer(1)?;
    if version != i64::from(CURRENT_CONFIG_VERSION) {
        return Err(MigrationError::UnsupportedVersion {
            found: version.to_string(),
            expected: CURRENT_CONFIG_VERSION,
        }
        .into());
    }

    let metadata = root.nested(2, "metadata")?;
    let variables: IndexMap<String, String> = metadata
        .nested(3, "variables")?
        .items
        .iter()
        .map(|pair| {
            let pair = Fields::of(pair, "variable")?;
            Ok((pair.string(0)?, pair.string(1)?))
        })
        .collect::<Result<_, ShareError>>()?;

    let bits = u8::try_from(root.integer(3)?)
        .map_err(|_| invalid("settings bitmask out of range"))?;

    let icons = root
        .nested(4, "icon table")?
        .items
        .iter()
        .map(|icon| {
            icon.as_str()
                .map(str::to_string)
                .ok_or_else(|| invalid("icon table entry is not a string"))
        })
        .collect::<Result<Vec<_>, _>>()?;

    let splits = unpack_splits(root.at(5)?, &icons)?;

    Ok(RunConfig {
        config_version: CURRENT_CONFIG_VERSION,
        metadata: RunMetadata {
            game_name: metadata.string(0)?,
            category_name: metadata.string(1)?,
            offset: metadata.string(2)?,
            variables,
        },
        global_settings: GlobalSettings::from_bits(bits),
        splits,
    })
}

fn unpack_splits(value: &Value, icons: &[String]) -> Result<Vec<SplitNode>, ShareError> {
    Fields::of(value, "split list")?
        .items
        .iter()
        .map(|split| unpack_split(split, icons))
        .collect()
}

fn unpack_split(value: &Value, icons: &[String]) -> Result<SplitNode, ShareError> {
    let fields = Fields::of(value, "split")?;
    let code = fields.string(1)?;
    let kind = kind_from_code(&code).ok_or_else(|| invalid(format!("unknown kind code `{code}`")))?;

    let display_name_override = match fields.at(2)? {
        Value::Null => String::new(),
        Value::String(name) => name.clone(),
        _ => return Err(invalid("display name is neither null nor a string")),
    };
    let icon_data = match fields.integer(3)? {
        -1 => String::new(),
        index => usize::try_from(index)
            .ok()
            .and_then(|index| icons.get(index))
            .cloned()
            .ok_or_else(|| invalid(format!("icon index {index} out of range")))?,
    };

    let payload = unpack_payload(kind, &fields.nested(6, "payload")?)?;
    let mut node = SplitNode::with_id(fields.string(0)?, payload, fields.boolean(5)?);
    node.display_name_override = display_name_override;
    node.icon_data = icon_data;
    node.only_split_once = fields.boolean(4)?;
    node.conditions = unpack_splits(fields.at(7)?, icons)?;
    Ok(node)
}

fn unpack_payload(kind: SplitKind, fields: &Fields<'_>) -> Result<SplitPayload, ShareError> {
    Ok(match kind {
        SplitKind::Prefab => SplitPayload::Prefab {
            prefab_id: fields.string(0)?,
        },
        SplitKind::Manual => SplitPayload::Manual,
        SplitKind::Inventory => SplitPayload::Inventory {
            item_id: fields.string(0)?,
            pick_up: fields.boolean(1)?,
            is_count: fields.boolean(2)?,
            count: i32::try_from(fields.integer(3)?)
                .map_err(|_| invalid("inventory count out of range"))?,
        },
        SplitKind::Blueprint => SplitPayload::Blueprint {
            blueprint_id: fields.string(0)?,
        },
        SplitKind::Encyclopedia => SplitPayload::Encyclopedia {
            encyclopedia_id: fields.string(0)?,
        },
        SplitKind::Biome => SplitPayload::Biome {
            from_biome_id: fields.string(0)?,
            to_biome_id: fields.string(1)?,
        },
        SplitKind::Craft => SplitPayload::Craft {
            craftable_id: fields.string(0)?,
        },
        SplitKind::LegacyRaw => SplitPayload::LegacyRaw {
            raw_name: fields.string(0)?,
            raw_value: fields.string(1)?,
        },
    })
}
