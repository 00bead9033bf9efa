//! Property tests for split tree operations

use proptest::prelude::*;
use splitsmaker_core::models::{SplitNode, SplitPayload};
use splitsmaker_core::tree::{
    add_condition, can_add_condition, count_conditions, create_split_node, find_by_id,
    remove_by_id, reorder_within_list,
};

use super::{arb_condition, arb_kind, arb_split};

fn manual(id: &str) -> SplitNode {
    SplitNode::with_id(id, SplitPayload::Manual, false)
}

fn ids(nodes: &[SplitNode]) -> Vec<String> {
    nodes.iter().map(|node| node.id.clone()).collect()
}

#[test]
fn reorder_moves_last_to_front() {
    let list = vec![manual("A"), manual("B"), manual("C")];
    assert_eq!(ids(&reorder_within_list(&list, "C", "A")), ["C", "A", "B"]);
}

proptest! {
    #[test]
    fn reorder_is_a_permutation(len in 1usize..12, from in 0usize..12, to in 0usize..12) {
        let from = from % len;
        let to = to % len;
        let list: Vec<SplitNode> = (0..len).map(|i| manual(&format!("n{i}"))).collect();
        let moved_id = list[from].id.clone();
        let over_id = list[to].id.clone();

        let reordered = reorder_within_list(&list, &moved_id, &over_id);

        prop_assert_eq!(reordered.len(), len);
        prop_assert_eq!(&reordered[to].id, &moved_id);
        let mut before = ids(&list);
        let mut after = ids(&reordered);
        before.sort();
        after.sort();
        prop_assert_eq!(before, after);
    }

    #[test]
    fn unknown_ids_leave_list_unchanged(len in 0usize..8) {
        let list: Vec<SplitNode> = (0..len).map(|i| manual(&format!("n{i}"))).collect();
        prop_assert_eq!(reorder_within_list(&list, "missing", "n0"), list.clone());
        prop_assert_eq!(remove_by_id(&list, "missing"), list);
    }

    #[test]
    fn added_condition_is_found_under_parent(
        forest in prop::collection::vec(arb_split(), 1..5),
        condition in arb_condition(),
        pick in 0usize..5,
    ) {
        let parent_id = forest[pick % forest.len()].id.clone();
        let condition_id = condition.id.clone();
        let before = count_conditions(&forest);

        let next = add_condition(&forest, &parent_id, condition);
        let found = find_by_id(&next, &condition_id).expect("condition present");
        prop_assert_eq!(found.parent_id, Some(parent_id.as_str()));
        prop_assert_eq!(count_conditions(&next), before + 1);

        let removed = remove_by_id(&next, &condition_id);
        prop_assert_eq!(removed, forest);
    }

    #[test]
    fn created_nodes_match_their_kind(kind in arb_kind(), is_sub in any::<bool>()) {
        let node = create_split_node(kind, is_sub);
        prop_assert_eq!(node.kind(), kind);
        prop_assert_eq!(node.is_sub_condition, is_sub);
        prop_assert!(node.conditions.is_empty());
        prop_assert!(!node.id.is_empty());
        prop_assert_eq!(can_add_condition(kind), kind.supports_conditions());
    }
}
