//! Split node model.
//!
//! A split is a tagged union: the common fields live on [`SplitNode`] and the
//! kind-specific payload lives in [`SplitPayload`], which serializes with a
//! `kind` discriminator next to the common fields.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Smallest inventory count accepted by the autosplitter.
pub const MIN_INVENTORY_COUNT: i32 = 1;

/// Largest inventory count accepted by the autosplitter.
pub const MAX_INVENTORY_COUNT: i32 = 48;

/// Discriminator of a split node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SplitKind {
    /// Built-in catalog trigger
    Prefab,
    /// Timer marker without an automatic trigger
    Manual,
    /// Item picked up or dropped
    Inventory,
    /// Blueprint unlocked
    Blueprint,
    /// Databank entry discovered
    Encyclopedia,
    /// Biome transition
    Biome,
    /// Item crafted
    Craft,
    /// Unrecognized legacy split kept verbatim
    LegacyRaw,
}

impl SplitKind {
    /// All kinds in declaration order
    pub const ALL: [Self; 8] = [
        Self::Prefab,
        Self::Manual,
        Self::Inventory,
        Self::Blueprint,
        Self::Encyclopedia,
        Self::Biome,
        Self::Craft,
        Self::LegacyRaw,
    ];

    /// Returns the serialized discriminator
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Prefab => "prefab",
            Self::Manual => "manual",
            Self::Inventory => "inventory",
            Self::Blueprint => "blueprint",
            Self::Encyclopedia => "encyclopedia",
            Self::Biome => "biome",
            Self::Craft => "craft",
            Self::LegacyRaw => "legacy-raw",
        }
    }

    /// Returns true if nodes of this kind may carry conditions
    #[must_use]
    pub const fn supports_conditions(self) -> bool {
        matches!(
            self,
            Self::Prefab | Self::Inventory | Self::Blueprint | Self::Encyclopedia | Self::Biome
        )
    }

    /// Returns true if nodes of this kind may be nested as a condition
    #[must_use]
    pub const fn allowed_as_condition(self) -> bool {
        matches!(
            self,
            Self::Inventory | Self::Blueprint | Self::Encyclopedia | Self::Biome
        )
    }

    /// Returns the human-readable group label used by editors
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Prefab => "Prefabricated Splits",
            Self::Manual => "Manual (No Autosplits)",
            Self::Inventory => "Inventory Splits",
            Self::Blueprint => "Blueprint Splits",
            Self::Encyclopedia => "Databank Entry Splits",
            Self::Biome => "Biome Change Splits",
            Self::Craft => "Crafting Splits",
            Self::LegacyRaw => "Legacy Raw Split",
        }
    }
}

impl fmt::Display for SplitKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SplitKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| format!("unknown split kind: {s}"))
    }
}

/// Kind-specific payload of a split node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    tag = "kind",
    rename_all = "kebab-case",
    rename_all_fields = "camelCase"
)]
pub enum SplitPayload {
    /// Built-in catalog trigger
    Prefab {
        /// Key into the split definition catalog
        prefab_id: String,
    },
    /// Timer marker without an automatic trigger
    Manual,
    /// Item picked up or dropped
    Inventory {
        /// Key into the inventory catalog
        item_id: String,
        /// Pick up (true) or drop (false); forced true for sub-conditions
        pick_up: bool,
        /// Exact count (true) or at-least (false)
        is_count: bool,
        /// Item count, 1..=48
        count: i32,
    },
    /// Blueprint unlocked
    Blueprint {
        /// Key into the unlockable catalog
        blueprint_id: String,
    },
    /// Databank entry discovered
    Encyclopedia {
        /// Key into the encyclopedia catalog
        encyclopedia_id: String,
    },
    /// Biome transition
    Biome {
        /// Biome left
        from_biome_id: String,
        /// Biome entered
        to_biome_id: String,
    },
    /// Item crafted
    Craft {
        /// Key into the craftable catalog
        craftable_id: String,
    },
    /// Unrecognized legacy split kept verbatim
    LegacyRaw {
        /// Original XML `Name` text
        raw_name: String,
        /// Original XML `Value` text
        raw_value: String,
    },
}

impl SplitPayload {
    /// Returns the discriminator of this payload
    #[must_use]
    pub const fn kind(&self) -> SplitKind {
        match self {
            Self::Prefab { .. } => SplitKind::Prefab,
            Self::Manual => SplitKind::Manual,
            Self::Inventory { .. } => SplitKind::Inventory,
            Self::Blueprint { .. } => SplitKind::Blueprint,
            Self::Encyclopedia { .. } => SplitKind::Encyclopedia,
            Self::Biome { .. } => SplitKind::Biome,
            Self::Craft { .. } => SplitKind::Craft,
            Self::LegacyRaw { .. } => SplitKind::LegacyRaw,
        }
    }

    /// Returns the default payload a freshly created node of `kind` carries
    #[must_use]
    pub fn default_for(kind: SplitKind) -> Self {
        match kind {
            SplitKind::Prefab => Self::Prefab {
                prefab_id: "RocketSplit".to_string(),
            },
            SplitKind::Manual => Self::Manual,
            SplitKind::Inventory => Self::Inventory {
                item_id: "Quartz".to_string(),
                pick_up: true,
                is_count: false,
                count: MIN_INVENTORY_COUNT,
            },
            SplitKind::Blueprint => Self::Blueprint {
                blueprint_id: "Titanium".to_string(),
            },
            SplitKind::Encyclopedia => Self::Encyclopedia {
                encyclopedia_id: "CuteFish".to_string(),
            },
            SplitKind::Biome => Self::Biome {
                from_biome_id: "Any".to_string(),
                to_biome_id: "SafeShallows".to_string(),
            },
            SplitKind::Craft => Self::Craft {
                craftable_id: "FiberMesh".to_string(),
            },
            SplitKind::LegacyRaw => Self::LegacyRaw {
                raw_name: "UnknownSplit".to_string(),
                raw_value: "Unknown".to_string(),
            },
        }
    }
}

/// One trigger in the split tree.
///
/// `conditions` are owned by their parent and must all hold before the
/// parent fires. Order is meaningful.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SplitNode {
    /// Opaque id, unique within one tree
    pub id: String,
    /// Kind and kind-specific fields
    #[serde(flatten)]
    pub payload: SplitPayload,
    /// Label override; empty means derive from kind and payload
    #[serde(default)]
    pub display_name_override: String,
    /// Embedded icon payload (usually base64 image data); empty means none
    #[serde(default)]
    pub icon_data: String,
    /// Whether the trigger fires at most once per run
    pub only_split_once: bool,
    /// True when nested under a parent as a condition
    pub is_sub_condition: bool,
    /// Conditions that must hold before this trigger fires
    #[serde(default)]
    pub conditions: Vec<SplitNode>,
}

impl SplitNode {
    /// Creates a node with the given id and payload and default common fields
    #[must_use]
    pub fn with_id(id: impl Into<String>, payload: SplitPayload, is_sub_condition: bool) -> Self {
        Self {
            id: id.into(),
            payload,
            display_name_override: String::new(),
            icon_data: String::new(),
            only_split_once: true,
            is_sub_condition,
            conditions: Vec::new(),
        }
    }

    /// Creates a node with a freshly generated id
    #[must_use]
    pub fn new(payload: SplitPayload, is_sub_condition: bool) -> Self {
        Self::with_id(new_split_id(), payload, is_sub_condition)
    }

    /// Returns the discriminator of this node
    #[must_use]
    pub const fn kind(&self) -> SplitKind {
        self.payload.kind()
    }

    /// Returns true if this node carries an icon payload
    #[must_use]
    pub fn has_icon(&self) -> bool {
        !self.icon_data.is_empty()
    }
}

/// Generates a fresh split id.
#[must_use]
pub fn new_split_id() -> String {
    format!("split-{}", Uuid::new_v4().simple())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_round_trips_through_str() {
        for kind in SplitKind::ALL {
            assert_eq!(kind.as_str().parse::<SplitKind>(), Ok(kind));
        }
        assert!("teleport".parse::<SplitKind>().is_err());
    }

    #[test]
    fn condition_support_matches_kind_table() {
        let supported: Vec<_> = SplitKind::ALL
            .into_iter()
            .filter(|kind| kind.supports_conditions())
            .collect();
        assert_eq!(
            supported,
            vec![
                SplitKind::Prefab,
                SplitKind::Inventory,
                SplitKind::Blueprint,
                SplitKind::Encyclopedia,
                SplitKind::Biome,
            ]
        );
        assert!(!SplitKind::Prefab.allowed_as_condition());
        assert!(SplitKind::Biome.allowed_as_condition());
    }

    #[test]
    fn node_serializes_kind_next_to_common_fields() {
        let node = SplitNode::with_id(
            "s1",
            SplitPayload::Inventory {
                item_id: "Quartz".to_string(),
                pick_up: true,
                is_count: false,
                count: 1,
            },
            false,
        );
        let value = serde_json::to_value(&node).unwrap();
        assert_eq!(value["kind"], "inventory");
        assert_eq!(value["itemId"], "Quartz");
        assert_eq!(value["pickUp"], true);
        assert_eq!(value["onlySplitOnce"], true);
        assert_eq!(value["conditions"], serde_json::json!([]));

        let back: SplitNode = serde_json::from_value(value).unwrap();
        assert_eq!(back, node);
    }

    #[test]
    fn legacy_raw_uses_kebab_case_tag() {
        let node = SplitNode::with_id("x", SplitPayload::default_for(SplitKind::LegacyRaw), true);
        let value = serde_json::to_value(&node).unwrap();
        assert_eq!(value["kind"], "legacy-raw");
        assert_eq!(value["rawName"], "UnknownSplit");
    }

    #[test]
    fn fresh_ids_are_unique() {
        assert_ne!(new_split_id(), new_split_id());
    }
}
