//! Read-only lookup tables for split definitions and payload enums.
//!
//! The tables are generated data; the core only reads them through the
//! [`Lookup`] capability so codecs can be exercised against small fake
//! catalogs in tests.

use std::collections::HashMap;
use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::CatalogError;
use crate::models::SplitKind;

static CAMEL_BOUNDARY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"([a-z0-9])([A-Z])").expect("CAMEL_BOUNDARY is a valid regex pattern")
});

static ACRONYM_BOUNDARY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"([A-Z]+)([A-Z][a-z])").expect("ACRONYM_BOUNDARY is a valid regex pattern")
});

const BIOME_ACRONYMS: [&str; 6] = ["ALZ", "ILZ", "PCF", "QEP", "PDA", "O2"];

/// File names of the generated tables inside a catalog directory
pub const SPLIT_DEFINITIONS_FILE: &str = "split-definitions.json";
/// Inventory item table file name
pub const INVENTORY_FILE: &str = "enum-inventory.json";
/// Unlockable blueprint table file name
pub const UNLOCKABLE_FILE: &str = "enum-unlockable.json";
/// Encyclopedia table file name
pub const ENCYCLOPEDIA_FILE: &str = "enum-ency.json";
/// Biome table file name
pub const BIOME_FILE: &str = "enum-biome.json";
/// Craftable table file name
pub const CRAFTABLE_FILE: &str = "enum-craftable.json";

/// How the autosplitter interprets a split definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SplitDataKind {
    /// `None`: manual split
    TypedNone,
    /// `Inventory`
    TypedInventory,
    /// `Blueprint`
    TypedBlueprint,
    /// `Encyclopedia`
    TypedEncyclopedia,
    /// `Biome`
    TypedBiome,
    /// `Craft`
    TypedCraft,
    /// Fixed built-in trigger
    Prefab,
}

impl SplitDataKind {
    /// Classifies a definition id; the typed keywords are fixed, everything
    /// else is a prefab
    #[must_use]
    pub fn from_keyword(id: &str) -> Self {
        match id {
            "None" => Self::TypedNone,
            "Inventory" => Self::TypedInventory,
            "Blueprint" => Self::TypedBlueprint,
            "Encyclopedia" => Self::TypedEncyclopedia,
            "Biome" => Self::TypedBiome,
            "Craft" => Self::TypedCraft,
            _ => Self::Prefab,
        }
    }

    /// Returns the node kind this definition produces
    #[must_use]
    pub const fn split_kind(self) -> SplitKind {
        match self {
            Self::TypedNone => SplitKind::Manual,
            Self::TypedInventory => SplitKind::Inventory,
            Self::TypedBlueprint => SplitKind::Blueprint,
            Self::TypedEncyclopedia => SplitKind::Encyclopedia,
            Self::TypedBiome => SplitKind::Biome,
            Self::TypedCraft => SplitKind::Craft,
            Self::Prefab => SplitKind::Prefab,
        }
    }
}

/// One entry of the split definition table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SplitDefinition {
    /// Canonical id written to XML `Name`
    pub id: String,
    /// Human-readable description; older exports wrote this instead of the id
    pub description: String,
    /// Tooltip text
    pub tooltip: String,
    /// Classification
    pub kind: SplitDataKind,
}

impl SplitDefinition {
    fn new(id: &str, description: &str, tooltip: &str) -> Self {
        Self {
            id: id.to_string(),
            description: description.to_string(),
            tooltip: tooltip.to_string(),
            kind: SplitDataKind::from_keyword(id),
        }
    }
}

/// One entry of a flat id/label enum table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnumOption {
    /// Id written into split payloads
    pub id: String,
    /// Label shown to users
    pub label: String,
}

impl EnumOption {
    /// Creates an option
    #[must_use]
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
        }
    }
}

/// Entries addressable by a string id
pub trait Identified {
    /// Returns the lookup key
    fn id(&self) -> &str;
}

impl Identified for SplitDefinition {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Identified for EnumOption {
    fn id(&self) -> &str {
        &self.id
    }
}

/// Read-only lookup capability over a catalog table
pub trait Lookup<T> {
    /// Returns the entry with `id`
    fn by_id(&self, id: &str) -> Option<&T>;

    /// Returns every entry in table order
    fn all(&self) -> &[T];

    /// Returns true if an entry with `id` exists
    fn contains(&self, id: &str) -> bool {
        self.by_id(id).is_some()
    }
}

/// In-memory catalog table indexed by id.
///
/// When ids repeat, the first entry wins lookups; `all` still returns every
/// entry.
#[derive(Debug, Clone, Default)]
pub struct StaticCatalog<T> {
    entries: Vec<T>,
    index: HashMap<String, usize>,
}

impl<T: Identified> StaticCatalog<T> {
    /// Builds the table and its index
    #[must_use]
    pub fn new(entries: Vec<T>) -> Self {
        let mut index = HashMap::with_capacity(entries.len());
        for (position, entry) in entries.iter().enumerate() {
            index.entry(entry.id().to_string()).or_insert(position);
        }
        Self { entries, index }
    }

    /// Returns the number of entries
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the table is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<T: Identified> Lookup<T> for StaticCatalog<T> {
    fn by_id(&self, id: &str) -> Option<&T> {
        self.index.get(id).and_then(|&position| self.entries.get(position))
    }

    fn all(&self) -> &[T] {
        &self.entries
    }
}

/// Raw JSON text of every generated table
#[derive(Debug, Clone, Copy)]
pub struct CatalogTables<'a> {
    /// `split-definitions.json`
    pub split_definitions: &'a str,
    /// `enum-inventory.json`
    pub inventory: &'a str,
    /// `enum-unlockable.json`
    pub unlockable: &'a str,
    /// `enum-ency.json`
    pub encyclopedia: &'a str,
    /// `enum-biome.json`
    pub biome: &'a str,
    /// `enum-craftable.json`
    pub craftable: &'a str,
}

/// Every table the codecs consult, bundled.
#[derive(Debug, Clone)]
pub struct Catalogs {
    /// Split definitions
    pub splits: StaticCatalog<SplitDefinition>,
    /// Inventory items
    pub inventory: StaticCatalog<EnumOption>,
    /// Unlockable blueprints
    pub blueprint: StaticCatalog<EnumOption>,
    /// Databank entries
    pub encyclopedia: StaticCatalog<EnumOption>,
    /// Biomes, labels humanized
    pub biome: StaticCatalog<EnumOption>,
    /// Craftable items
    pub craftable: StaticCatalog<EnumOption>,
    descriptions: HashMap<String, String>,
}

impl Default for Catalogs {
    fn default() -> Self {
        Self::builtin()
    }
}

impl Catalogs {
    /// Bundles the given tables; biome labels are replaced with humanized ids
    #[must_use]
    pub fn new(
        splits: Vec<SplitDefinition>,
        inventory: Vec<EnumOption>,
        blueprint: Vec<EnumOption>,
        encyclopedia: Vec<EnumOption>,
        biome: Vec<EnumOption>,
        craftable: Vec<EnumOption>,
    ) -> Self {
        let mut descriptions = HashMap::with_capacity(splits.len());
        for definition in &splits {
            descriptions
                .entry(definition.description.to_lowercase())
                .or_insert_with(|| definition.id.clone());
        }
        let biome = biome
            .into_iter()
            .map(|option| EnumOption {
                label: humanize_biome_id(&option.id),
                id: option.id,
            })
            .collect();

        Self {
            splits: StaticCatalog::new(splits),
            inventory: StaticCatalog::new(inventory),
            blueprint: StaticCatalog::new(blueprint),
            encyclopedia: StaticCatalog::new(encyclopedia),
            biome: StaticCatalog::new(biome),
            craftable: StaticCatalog::new(craftable),
            descriptions,
        }
    }

    /// Minimal catalogs usable without generated data.
    ///
    /// Holds the typed keyword definitions, the rocket launch prefabs and the
    /// ids fresh nodes default to.
    #[must_use]
    pub fn builtin() -> Self {
        let splits = vec![
            SplitDefinition::new("None", "None", "Manual split without an autosplit trigger"),
            SplitDefinition::new("Inventory", "Inventory", "Split when an item is picked up or dropped"),
            SplitDefinition::new("Blueprint", "Blueprint", "Split when a blueprint is unlocked"),
            SplitDefinition::new(
                "Encyclopedia",
                "Encyclopedia",
                "Split when a databank entry is discovered",
            ),
            SplitDefinition::new("Biome", "Biome", "Split when moving from one biome to another"),
            SplitDefinition::new("Craft", "Craft", "Split when an item is crafted"),
            SplitDefinition::new(
                "GantrySplit",
                "Rocket Gantry",
                "Split when entering the rocket gantry",
            ),
            SplitDefinition::new("RocketSplit", "Rocket Launch", "Split when the rocket launches"),
        ];
        Self::new(
            splits,
            vec![EnumOption::new("Quartz", "Quartz")],
            vec![EnumOption::new("Titanium", "Titanium")],
            vec![EnumOption::new("CuteFish", "Cuddlefish")],
            vec![
                EnumOption::new("Any", "Any"),
                EnumOption::new("SafeShallows", "SafeShallows"),
            ],
            vec![EnumOption::new("FiberMesh", "Fiber Mesh")],
        )
    }

    /// Parses the generated JSON tables
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Parse` naming the first table that does not
    /// match the expected shape or holds an empty id.
    pub fn from_json(tables: &CatalogTables<'_>) -> Result<Self, CatalogError> {
        let splits: Vec<SplitDefinition> = parse_table("split-definitions", tables.split_definitions)?;
        if let Some(bad) = splits.iter().find(|d| d.description.is_empty()) {
            return Err(CatalogError::Parse {
                name: "split-definitions".to_string(),
                reason: format!("definition {} has an empty description", bad.id),
            });
        }
        Ok(Self::new(
            splits,
            parse_table("inventory", tables.inventory)?,
            parse_table("unlockable", tables.unlockable)?,
            parse_table("encyclopedia", tables.encyclopedia)?,
            parse_table("biome", tables.biome)?,
            parse_table("craftable", tables.craftable)?,
        ))
    }

    /// Loads the generated tables from `dir`
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Read` if a table file is missing or unreadable,
    /// or `CatalogError::Parse` if one is malformed.
    pub fn load_dir(dir: &Path) -> Result<Self, CatalogError> {
        let read = |name: &str| {
            let path = dir.join(name);
            std::fs::read_to_string(&path).map_err(|e| CatalogError::Read {
                path,
                reason: e.to_string(),
            })
        };
        let split_definitions = read(SPLIT_DEFINITIONS_FILE)?;
        let inventory = read(INVENTORY_FILE)?;
        let unlockable = read(UNLOCKABLE_FILE)?;
        let encyclopedia = read(ENCYCLOPEDIA_FILE)?;
        let biome = read(BIOME_FILE)?;
        let craftable = read(CRAFTABLE_FILE)?;

        let catalogs = Self::from_json(&CatalogTables {
            split_definitions: &split_definitions,
            inventory: &inventory,
            unlockable: &unlockable,
            encyclopedia: &encyclopedia,
            biome: &biome,
            craftable: &craftable,
        })?;
        tracing::debug!(
            dir = %dir.display(),
            splits = catalogs.splits.len(),
            "Loaded catalogs"
        );
        Ok(catalogs)
    }

    /// Maps a legacy description to its canonical id, ignoring case
    #[must_use]
    pub fn description_to_id(&self, description: &str) -> Option<&str> {
        self.descriptions
            .get(&description.to_lowercase())
            .map(String::as_str)
    }

    /// Returns true if `id` names any split definition
    #[must_use]
    pub fn is_known_split(&self, id: &str) -> bool {
        self.splits.contains(id)
    }

    /// Returns the label for `id` in `table`, or the id itself on a miss
    #[must_use]
    pub fn label_for<'a>(table: &'a StaticCatalog<EnumOption>, id: &'a str) -> &'a str {
        table.by_id(id).map_or(id, |option| option.label.as_str())
    }

    /// Returns the tooltip of a split definition, if known
    #[must_use]
    pub fn tooltip_for(&self, id: &str) -> Option<&str> {
        self.splits.by_id(id).map(|definition| definition.tooltip.as_str())
    }
}

fn parse_table<T>(name: &str, text: &str) -> Result<Vec<T>, CatalogError>
where
    T: DeserializeOwned + Identified,
{
    let entries: Vec<T> = serde_json::from_str(text).map_err(|e| CatalogError::Parse {
        name: name.to_string(),
        reason: e.to_string(),
    })?;
    if entries.iter().any(|entry| entry.id().is_empty()) {
        return Err(CatalogError::Parse {
            name: name.to_string(),
            reason: "entry with empty id".to_string(),
        });
    }
    Ok(entries)
}

/// Turns a biome id such as `LostRiver_GhostTree` into `Lost River Ghost Tree`.
#[must_use]
pub fn humanize_biome_id(id: &str) -> String {
    if id == "Any" {
        return id.to_string();
    }
    let spaced = id.replace('_', " ");
    let spaced = CAMEL_BOUNDARY.replace_all(&spaced, "$1 $2");
    let spaced = ACRONYM_BOUNDARY.replace_all(&spaced, "$1 $2");
    let spaced = spaced.trim();
    if spaced.is_empty() {
        return id.to_string();
    }

    spaced
        .split_whitespace()
        .map(|token| {
            let upper = token.to_uppercase();
            if BIOME_ACRONYMS.contains(&upper.as_str()) {
                return upper;
            }
            if token.chars().all(|c| c.is_ascii_digit()) {
                return token.to_string();
            }
            let mut chars = token.chars();
            chars.next().map_or_else(String::new, |first| {
                first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect()
            })
        })
        .collect::<Vec<_>>()
        .join(" ")
}
