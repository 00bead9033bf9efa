//! Schema validation of untrusted values and sanitization of run configs.
//!
//! Validation walks a `serde_json::Value` and fails with the first
//! offending path. Sanitization never fails; it normalizes a structurally
//! valid config so every codec sees the same invariants.

use indexmap::IndexMap;
use serde_json::{Map, Value};

use crate::error::SchemaError;
use crate::models::{
    CURRENT_CONFIG_VERSION, DEFAULT_CATEGORY_NAME, DEFAULT_GAME_NAME, DEFAULT_OFFSET,
    GlobalSettingKey, GlobalSettings, MAX_INVENTORY_COUNT, MIN_INVENTORY_COUNT, RunConfig,
    RunMetadata, SplitKind, SplitNode, SplitPayload,
};
use crate::tracing::span_names;

type Object = Map<String, Value>;

fn child(path: &str, key: &str) -> String {
    if path.is_empty() {
        key.to_string()
    } else {
        format!("{path}.{key}")
    }
}

fn as_object<'a>(value: &'a Value, path: &str) -> Result<&'a Object, SchemaError> {
    value
        .as_object()
        .ok_or_else(|| SchemaError::expected(display_path(path), "an object"))
}

fn display_path(path: &str) -> String {
    if path.is_empty() {
        "$".to_string()
    } else {
        path.to_string()
    }
}

/// Returns the field, treating `null` as absent
fn field<'a>(object: &'a Object, key: &str) -> Option<&'a Value> {
    object.get(key).filter(|value| !value.is_null())
}

fn required<'a>(object: &'a Object, path: &str, key: &str) -> Result<&'a Value, SchemaError> {
    field(object, key).ok_or_else(|| SchemaError::missing(child(path, key)))
}

fn string(object: &Object, path: &str, key: &str) -> Result<String, SchemaError> {
    required(object, path, key)?
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| SchemaError::expected(child(path, key), "a string"))
}

fn non_empty_string(object: &Object, path: &str, key: &str) -> Result<String, SchemaError> {
    let value = string(object, path, key)?;
    if value.is_empty() {
        return Err(SchemaError::new(child(path, key), "must not be empty"));
    }
    Ok(value)
}

fn optional_string(object: &Object, path: &str, key: &str) -> Result<Option<String>, SchemaError> {
    field(object, key)
        .map(|value| {
            value
                .as_str()
                .map(str::to_string)
                .ok_or_else(|| SchemaError::expected(child(path, key), "a string"))
        })
        .transpose()
}

fn boolean(object: &Object, path: &str, key: &str) -> Result<bool, SchemaError> {
    required(object, path, key)?
        .as_bool()
        .ok_or_else(|| SchemaError::expected(child(path, key), "a boolean"))
}

fn integer(value: &Value) -> Option<i64> {
    value.as_i64().or_else(|| {
        value
            .as_f64()
            .filter(|float| float.fract().abs() < f64::EPSILON && float.abs() < 9.0e15)
            .map(|float| float as i64)
    })
}

/// Validates an untrusted value into a [`RunConfig`].
///
/// Missing `globalSettings` keys and missing `metadata.variables` take their
/// defaults; every other field is required. Unknown `kind` values fail.
///
/// # Errors
///
/// Returns a `SchemaError` naming the first missing, mistyped or
/// out-of-range field.
pub fn validate_value(value: &Value) -> Result<RunConfig, SchemaError> {
    let root = as_object(value, "")?;

    let version = integer(required(root, "", "configVersion")?);
    if version != Some(i64::from(CURRENT_CONFIG_VERSION)) {
        return Err(SchemaError::new(
            "configVersion",
            format!("expected {CURRENT_CONFIG_VERSION}"),
        ));
    }

    let metadata = validate_metadata(required(root, "", "metadata")?, "metadata")?;
    let global_settings = match field(root, "globalSettings") {
        Some(settings) => validate_settings(settings, "globalSettings")?,
        None => GlobalSettings::default(),
    };
    let splits = validate_split_list(required(root, "", "splits")?, "splits", false)?;

    Ok(RunConfig {
        config_version: CURRENT_CONFIG_VERSION,
        metadata,
        global_settings,
        splits,
    })
}

fn validate_metadata(value: &Value, path: &str) -> Result<RunMetadata, SchemaError> {
    let object = as_object(value, path)?;
    let variables = match field(object, "variables") {
        None => RunMetadata::default_variables(),
        Some(raw) => {
            let variables_path = child(path, "variables");
            let entries = as_object(raw, &variables_path)?;
            let mut variables = IndexMap::with_capacity(entries.len());
            for (key, entry) in entries {
                let text = entry.as_str().ok_or_else(|| {
                    SchemaError::expected(child(&variables_path, key), "a string")
                })?;
                variables.insert(key.clone(), text.to_string());
            }
            variables
        }
    };

    Ok(RunMetadata {
        game_name: optional_string(object, path, "gameName")?.unwrap_or_default(),
        category_name: string(object, path, "categoryName")?,
        variables,
        offset: string(object, path, "offset")?,
    })
}

fn validate_settings(value: &Value, path: &str) -> Result<GlobalSettings, SchemaError> {
    let object = as_object(value, path)?;
    let mut settings = GlobalSettings::default();
    for key in GlobalSettingKey::ALL {
        if field(object, key.as_str()).is_some() {
            let flag = boolean(object, path, key.as_str())?;
            settings = settings.with_raw(key, flag);
        }
    }
    Ok(settings)
}

fn validate_split_list(value: &Value, path: &str, nested: bool) -> Result<Vec<SplitNode>, SchemaError> {
    let items = value
        .as_array()
        .ok_or_else(|| SchemaError::expected(path, "an array"))?;
    items
        .iter()
        .enumerate()
        .map(|(index, item)| validate_split(item, &format!("{path}[{index}]"), nested))
        .collect()
}

fn validate_split(value: &Value, path: &str, nested: bool) -> Result<SplitNode, SchemaError> {
    let object = as_object(value, path)?;
    let kind_text = string(object, path, "kind")?;
    let kind: SplitKind = kind_text
        .parse()
        .map_err(|reason: String| SchemaError::new(child(path, "kind"), reason))?;

    let id = non_empty_string(object, path, "id")?;
    let payload = match kind {
        SplitKind::Prefab => SplitPayload::Prefab {
            prefab_id: non_empty_string(object, path, "prefabId")?,
        },
        SplitKind::Manual => SplitPayload::Manual,
        SplitKind::Inventory => SplitPayload::Inventory {
            item_id: non_empty_string(object, path, "itemId")?,
            pick_up: boolean(object, path, "pickUp")?,
            is_count: boolean(object, path, "isCount")?,
            count: validate_count(required(object, path, "count")?, &child(path, "count"))?,
        },
        SplitKind::Blueprint => SplitPayload::Blueprint {
            blueprint_id: non_empty_string(object, path, "blueprintId")?,
        },
        SplitKind::Encyclopedia => SplitPayload::Encyclopedia {
            encyclopedia_id: non_empty_string(object, path, "encyclopediaId")?,
        },
        SplitKind::Biome => SplitPayload::Biome {
            from_biome_id: non_empty_string(object, path, "fromBiomeId")?,
            to_biome_id: non_empty_string(object, path, "toBiomeId")?,
        },
        SplitKind::Craft => SplitPayload::Craft {
            craftable_id: non_empty_string(object, path, "craftableId")?,
        },
        SplitKind::LegacyRaw => SplitPayload::LegacyRaw {
            raw_name: non_empty_string(object, path, "rawName")?,
            raw_value: string(object, path, "rawValue")?,
        },
    };

    let conditions = match field(object, "conditions") {
        Some(children) => validate_split_list(children, &child(path, "conditions"), true)?,
        None => Vec::new(),
    };
    tracing::trace!(path, nested, kind = %kind, "Validated split");

    Ok(SplitNode {
        id,
        payload,
        display_name_override: optional_string(object, path, "displayNameOverride")?
            .unwrap_or_default(),
        icon_data: optional_string(object, path, "iconData")?.unwrap_or_default(),
        only_split_once: boolean(object, path, "onlySplitOnce")?,
        is_sub_condition: boolean(object, path, "isSubCondition")?,
        conditions,
    })
}

fn validate_count(value: &Value, path: &str) -> Result<i32, SchemaError> {
    integer(value)
        .filter(|count| (i64::from(MIN_INVENTORY_COUNT)..=i64::from(MAX_INVENTORY_COUNT)).contains(count))
        .and_then(|count| i32::try_from(count).ok())
        .ok_or_else(|| {
            SchemaError::expected(
                path,
                &format!("an integer between {MIN_INVENTORY_COUNT} and {MAX_INVENTORY_COUNT}"),
            )
        })
}

/// Normalizes a structurally valid config.
///
/// Clamps inventory counts, defaults blank metadata, resolves exclusive
/// settings and forces the current version. Idempotent.
#[must_use]
pub fn sanitize_config(config: RunConfig) -> RunConfig {
    RunConfig {
        config_version: CURRENT_CONFIG_VERSION,
        metadata: sanitize_metadata(config.metadata),
        global_settings: config.global_settings.normalized(),
        splits: config.splits.into_iter().map(sanitize_split).collect(),
    }
}

fn sanitize_metadata(metadata: RunMetadata) -> RunMetadata {
    let or_default = |text: &str, fallback: &str| {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            fallback.to_string()
        } else {
            trimmed.to_string()
        }
    };
    let game_name = if metadata.game_name.trim().is_empty() {
        DEFAULT_GAME_NAME.to_string()
    } else {
        metadata.game_name
    };

    RunMetadata {
        game_name,
        category_name: or_default(&metadata.category_name, DEFAULT_CATEGORY_NAME),
        offset: or_default(&metadata.offset, DEFAULT_OFFSET),
        variables: metadata.variables,
    }
}

fn sanitize_split(mut node: SplitNode) -> SplitNode {
    if let SplitPayload::Inventory { count, .. } = &mut node.payload {
        *count = clamp_count(*count);
    }
    node.conditions = node.conditions.into_iter().map(sanitize_split).collect();
    node
}

/// Clamps an inventory count into the accepted range
#[must_use]
pub const fn clamp_count(count: i32) -> i32 {
    if count < MIN_INVENTORY_COUNT {
        MIN_INVENTORY_COUNT
    } else if count > MAX_INVENTORY_COUNT {
        MAX_INVENTORY_COUNT
    } else {
        count
    }
}

/// Validates then sanitizes an untrusted value.
///
/// # Errors
///
/// Returns the `SchemaError` raised by [`validate_value`].
pub fn parse_run_config(value: &Value) -> Result<RunConfig, SchemaError> {
    let _span = crate::trace_operation_debug!(span_names::CONFIG_VALIDATE).entered();
    let config = validate_value(value)?;
    Ok(sanitize_config(config))
}

/// Re-checks a typed config against the schema and sanitizes it.
///
/// Typed configs cannot be mistyped, but ids can be empty and counts out of
/// range after direct edits.
///
/// # Errors
///
/// Returns a `SchemaError` for the first violating field.
pub fn check_config(config: &RunConfig) -> Result<RunConfig, SchemaError> {
    let value = serde_json::to_value(config).map_err(|e| SchemaError::new("$", e.to_string()))?;
    parse_run_config(&value)
}
