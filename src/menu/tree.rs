//! Pure operations over the two-level menu tree.
//!
//! Every function here works on plain `NavigationNode` slices so the editor, the
//! cache and the tests share one implementation of lookup, reordering and
//! structural validation. Nothing in this module talks to the backend.

use crate::error::ApiError;
use crate::menu::node::{NavigationNode, NodeLevel};
use std::collections::HashSet;

/// Depth-first lookup across main items and their direct sub items.
pub fn find_by_id<'a>(tree: &'a [NavigationNode], id: &str) -> Option<&'a NavigationNode> {
    for main in tree {
        if main.id == id {
            return Some(main);
        }
        if let Some(sub) = main.sub_items.iter().find(|sub| sub.id == id) {
            return Some(sub);
        }
    }
    None
}

pub(crate) fn find_by_id_mut<'a>(
    tree: &'a mut [NavigationNode],
    id: &str,
) -> Option<&'a mut NavigationNode> {
    for main in tree.iter_mut() {
        if main.id == id {
            return Some(main);
        }
        if let Some(sub) = main.sub_items.iter_mut().find(|sub| sub.id == id) {
            return Some(sub);
        }
    }
    None
}

/// Level of the node with `id`, or `None` if it is not in the tree.
pub fn locate(tree: &[NavigationNode], id: &str) -> Option<NodeLevel> {
    for main in tree {
        if main.id == id {
            return Some(NodeLevel::Main);
        }
        if main.sub_items.iter().any(|sub| sub.id == id) {
            return Some(NodeLevel::Sub {
                parent_id: main.id.clone(),
            });
        }
    }
    None
}

/// Move `moving_id` into the slot currently held by `target_id`.
///
/// Both ids must be root items, or sub items of the same parent. Any other
/// combination returns the tree unchanged.
pub fn reorder(tree: &[NavigationNode], moving_id: &str, target_id: &str) -> Vec<NavigationNode> {
    let mut next = tree.to_vec();
    reorder_in_place(&mut next, moving_id, target_id);
    next
}

/// In-place variant of [`reorder`]. Returns whether the tree changed.
pub fn reorder_in_place(tree: &mut Vec<NavigationNode>, moving_id: &str, target_id: &str) -> bool {
    if moving_id == target_id {
        return false;
    }

    let moving_is_root = tree.iter().any(|n| n.id == moving_id);
    let target_is_root = tree.iter().any(|n| n.id == target_id);
    if moving_is_root && target_is_root {
        return move_within(tree, moving_id, target_id);
    }
    if moving_is_root || target_is_root {
        return false;
    }

    for main in tree.iter_mut() {
        let has_moving = main.sub_items.iter().any(|s| s.id == moving_id);
        let has_target = main.sub_items.iter().any(|s| s.id == target_id);
        if has_moving && has_target {
            return move_within(&mut main.sub_items, moving_id, target_id);
        }
        if has_moving || has_target {
            return false;
        }
    }
    false
}

fn move_within(siblings: &mut Vec<NavigationNode>, moving_id: &str, target_id: &str) -> bool {
    siblings.sort_by_key(|n| n.order);
    let from = siblings.iter().position(|n| n.id == moving_id);
    let to = siblings.iter().position(|n| n.id == target_id);
    let (Some(from), Some(to)) = (from, to) else {
        return false;
    };

    let node = siblings.remove(from);
    siblings.insert(to, node);
    renumber(siblings);
    true
}

fn renumber(siblings: &mut [NavigationNode]) {
    for (index, node) in siblings.iter_mut().enumerate() {
        node.order = index as u32 + 1;
    }
}

/// Change the display name of one node. Nothing else is touched.
pub fn rename(tree: &mut [NavigationNode], id: &str, name: &str) -> Result<(), ApiError> {
    let node = find_by_id_mut(tree, id).ok_or_else(|| ApiError::NodeNotFound(id.to_string()))?;
    node.name = name.to_string();
    Ok(())
}

/// Sort every sibling list by `order` and renumber it 1..N.
pub fn normalize_orders(tree: &mut [NavigationNode]) {
    tree.sort_by_key(|n| n.order);
    renumber(tree);
    for main in tree.iter_mut() {
        main.sub_items.sort_by_key(|n| n.order);
        renumber(&mut main.sub_items);
    }
}

/// True if every sibling list carries orders exactly 1..N.
pub fn has_contiguous_orders(tree: &[NavigationNode]) -> bool {
    fn contiguous(siblings: &[NavigationNode]) -> bool {
        let mut orders: Vec<u32> = siblings.iter().map(|n| n.order).collect();
        orders.sort_unstable();
        orders
            .iter()
            .enumerate()
            .all(|(index, order)| *order == index as u32 + 1)
    }

    contiguous(tree) && tree.iter().all(|main| contiguous(&main.sub_items))
}

/// Check structural invariants: non-empty unique ids, at most two levels.
pub fn validate_tree(tree: &[NavigationNode]) -> Result<(), ApiError> {
    let mut seen = HashSet::new();
    for main in tree {
        check_id(&main.id, &mut seen)?;
        for sub in &main.sub_items {
            check_id(&sub.id, &mut seen)?;
            if !sub.sub_items.is_empty() {
                return Err(ApiError::InvalidMenu(format!(
                    "Node '{}' under '{}' has its own sub items; only two levels are supported",
                    sub.id, main.id
                )));
            }
        }
    }
    Ok(())
}

fn check_id<'a>(id: &'a str, seen: &mut HashSet<&'a str>) -> Result<(), ApiError> {
    if id.trim().is_empty() {
        return Err(ApiError::InvalidMenu("Node id cannot be empty".to_string()));
    }
    if !seen.insert(id) {
        return Err(ApiError::InvalidMenu(format!("Duplicate node id '{}'", id)));
    }
    Ok(())
}
