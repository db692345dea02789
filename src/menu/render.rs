//! Navigation Renderer: the sidebar view of the menu for one viewer.

use crate::menu::node::NavigationNode;
use crate::permission::PermissionStore;

/// Nodes the viewer may see, in display order.
///
/// A hidden main item hides its sub items with it.
pub fn visible_menu(tree: &[NavigationNode], permissions: &PermissionStore) -> Vec<NavigationNode> {
    let granted = |capability: &str| permissions.has(capability);
    let mut visible: Vec<NavigationNode> = tree
        .iter()
        .filter(|main| main.is_visible_with(granted))
        .map(|main| {
            let mut main = main.clone();
            main.sub_items.retain(|sub| sub.is_visible_with(granted));
            main.sub_items.sort_by_key(|sub| sub.order);
            main
        })
        .collect();
    visible.sort_by_key(|main| main.order);
    visible
}
