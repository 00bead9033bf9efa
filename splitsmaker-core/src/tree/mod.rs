//! Recursive operations over the split forest.
//!
//! Top-level splits have no common parent, so every operation takes the
//! whole forest. Operations return a new forest and leave the input
//! untouched; callers replace their config value wholesale.

use crate::models::{SplitKind, SplitNode, SplitPayload};

/// Kinds a condition may have
pub const CONDITION_KINDS: [SplitKind; 4] = [
    SplitKind::Inventory,
    SplitKind::Blueprint,
    SplitKind::Encyclopedia,
    SplitKind::Biome,
];

/// Items addressable by id within one sibling list
pub trait HasId {
    /// Returns the id
    fn id(&self) -> &str;
}

impl HasId for SplitNode {
    fn id(&self) -> &str {
        &self.id
    }
}

/// A located node and the id of its immediate parent
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SplitRef<'a> {
    /// The matched node
    pub node: &'a SplitNode,
    /// Parent id, `None` at top level
    pub parent_id: Option<&'a str>,
}

/// Depth-first pre-order search; the first match wins.
#[must_use]
pub fn find_by_id<'a>(forest: &'a [SplitNode], id: &str) -> Option<SplitRef<'a>> {
    find_in(forest, id, None)
}

fn find_in<'a>(
    nodes: &'a [SplitNode],
    id: &str,
    parent_id: Option<&'a str>,
) -> Option<SplitRef<'a>> {
    for node in nodes {
        if node.id == id {
            return Some(SplitRef { node, parent_id });
        }
        if let Some(found) = find_in(&node.conditions, id, Some(&node.id)) {
            return Some(found);
        }
    }
    None
}

/// Returns a forest where the node matching `id` is replaced by
/// `updater(node)`.
///
/// Only the first pre-order match is updated; an absent id leaves the
/// forest unchanged.
#[must_use]
pub fn update_by_id<F>(forest: &[SplitNode], id: &str, updater: F) -> Vec<SplitNode>
where
    F: FnOnce(SplitNode) -> SplitNode,
{
    let mut next = forest.to_vec();
    let mut updater = Some(updater);
    update_in(&mut next, id, &mut updater);
    next
}

fn update_in<F>(nodes: &mut [SplitNode], id: &str, updater: &mut Option<F>) -> bool
where
    F: FnOnce(SplitNode) -> SplitNode,
{
    for slot in nodes.iter_mut() {
        if slot.id == id {
            if let Some(apply) = updater.take() {
                let current = std::mem::replace(
                    slot,
                    SplitNode::with_id(String::new(), SplitPayload::Manual, false),
                );
                *slot = apply(current);
            }
            return true;
        }
        if update_in(&mut slot.conditions, id, updater) {
            return true;
        }
    }
    false
}

/// Returns a forest without the first node matching `id`, wherever it is
/// nested; sibling order is preserved.
#[must_use]
pub fn remove_by_id(forest: &[SplitNode], id: &str) -> Vec<SplitNode> {
    let mut next = forest.to_vec();
    remove_in(&mut next, id);
    next
}

fn remove_in(nodes: &mut Vec<SplitNode>, id: &str) -> bool {
    for position in 0..nodes.len() {
        if nodes[position].id == id {
            nodes.remove(position);
            return true;
        }
        if remove_in(&mut nodes[position].conditions, id) {
            return true;
        }
    }
    false
}

/// Appends `condition` to the conditions of `parent_id`.
///
/// The parent's kind is not checked here; see [`can_add_condition`].
#[must_use]
pub fn add_condition(forest: &[SplitNode], parent_id: &str, condition: SplitNode) -> Vec<SplitNode> {
    update_by_id(forest, parent_id, |mut parent| {
        parent.conditions.push(condition);
        parent
    })
}

/// Moves `active_id` to the index currently held by `over_id`.
///
/// Returns the list unchanged if either id is absent or they are equal.
#[must_use]
pub fn reorder_within_list<T>(list: &[T], active_id: &str, over_id: &str) -> Vec<T>
where
    T: HasId + Clone,
{
    let old_index = list.iter().position(|item| item.id() == active_id);
    let new_index = list.iter().position(|item| item.id() == over_id);
    let mut next = list.to_vec();
    if let (Some(from), Some(to)) = (old_index, new_index)
        && from != to
    {
        let item = next.remove(from);
        next.insert(to, item);
    }
    next
}

/// Reorders the top-level forest
#[must_use]
pub fn reorder_top_level(forest: &[SplitNode], active_id: &str, over_id: &str) -> Vec<SplitNode> {
    reorder_within_list(forest, active_id, over_id)
}

/// Reorders the conditions of `parent_id`
#[must_use]
pub fn reorder_conditions(
    forest: &[SplitNode],
    parent_id: &str,
    active_id: &str,
    over_id: &str,
) -> Vec<SplitNode> {
    update_by_id(forest, parent_id, |mut parent| {
        parent.conditions = reorder_within_list(&parent.conditions, active_id, over_id);
        parent
    })
}

/// Returns true if a node of `kind` may carry conditions
#[must_use]
pub const fn can_add_condition(kind: SplitKind) -> bool {
    kind.supports_conditions()
}

/// Creates a node of `kind` with default payload and a fresh id
#[must_use]
pub fn create_split_node(kind: SplitKind, is_sub_condition: bool) -> SplitNode {
    SplitNode::new(SplitPayload::default_for(kind), is_sub_condition)
}

/// Returns the label shown for `node`: its override, or one derived from
/// kind and payload.
#[must_use]
pub fn node_label(node: &SplitNode) -> String {
    if !node.display_name_override.is_empty() {
        return node.display_name_override.clone();
    }
    match &node.payload {
        SplitPayload::Prefab { prefab_id } => prefab_id.clone(),
        SplitPayload::Manual => "Manual Split".to_string(),
        SplitPayload::Inventory {
            item_id,
            pick_up,
            is_count,
            count,
        } => {
            if node.is_sub_condition {
                if *is_count {
                    format!("Have {count} {item_id}")
                } else {
                    format!("Have {item_id}")
                }
            } else if *pick_up {
                format!("Pickup {item_id}")
            } else {
                format!("Drop {item_id}")
            }
        }
        SplitPayload::Blueprint { blueprint_id } => {
            if node.is_sub_condition {
                format!("{blueprint_id} already unlocked")
            } else {
                format!("{blueprint_id} unlock")
            }
        }
        SplitPayload::Encyclopedia { encyclopedia_id } => {
            if node.is_sub_condition {
                format!("{encyclopedia_id} already discovered")
            } else {
                format!("{encyclopedia_id} databank entry")
            }
        }
        SplitPayload::Biome {
            from_biome_id,
            to_biome_id,
        } => format!("{from_biome_id} -> {to_biome_id}"),
        SplitPayload::Craft { craftable_id } => format!("Craft {craftable_id}"),
        SplitPayload::LegacyRaw { raw_name, .. } => format!("Legacy: {raw_name}"),
    }
}

/// Counts every nested condition in the forest
#[must_use]
pub fn count_conditions(forest: &[SplitNode]) -> usize {
    forest
        .iter()
        .map(|node| node.conditions.len() + count_conditions(&node.conditions))
        .sum()
}

/// Visits every node in pre-order
pub fn walk<'a, F>(forest: &'a [SplitNode], visit: &mut F)
where
    F: FnMut(&'a SplitNode),
{
    for node in forest {
        visit(node);
        walk(&node.conditions, visit);
    }
}
