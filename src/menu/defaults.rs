//! Built-in navigation structure used until an installation saves its own.

use crate::menu::node::NavigationNode;

/// Default menu tree (first run, or when the backend has nothing stored).
pub fn default_structure() -> Vec<NavigationNode> {
    vec![
        NavigationNode::new("dashboard", "Dashboard", "/dashboard", 1),
        NavigationNode::new("tender", "Tenders", "/tenders", 2)
            .with_permission("tender")
            .with_sub_items(vec![
                NavigationNode::new("tender-list", "All Tenders", "/tenders", 1),
                NavigationNode::new("tender-create", "New Tender", "/tenders/new", 2),
                NavigationNode::new(
                    "tender-allocation",
                    "Task Allocation",
                    "/tenders/allocation",
                    3,
                )
                .with_permission("task_allocation"),
            ]),
        NavigationNode::new("documents", "Documents", "/folders", 3)
            .with_permission("folders")
            .with_sub_items(vec![NavigationNode::new(
                "folder-list",
                "Folders",
                "/folders",
                1,
            )]),
        NavigationNode::new("finance", "Finance", "/finance", 4)
            .with_permission("finance")
            .with_sub_items(vec![
                NavigationNode::new("finance-requests", "Finance Requests", "/finance/requests", 1),
                NavigationNode::new("finance-mis", "Finance MIS", "/finance/mis", 2)
                    .with_permission("mis"),
            ]),
        NavigationNode::new("users", "Users", "/users", 5)
            .with_permission("users")
            .with_sub_items(vec![
                NavigationNode::new("user-list", "User List", "/users", 1),
                NavigationNode::new("user-permissions", "Permissions", "/users/permissions", 2),
            ]),
        NavigationNode::new("mis", "MIS", "/mis", 6).with_permission("mis"),
        NavigationNode::new("settings", "Settings", "/settings", 7)
            .with_permission("settings")
            .with_sub_items(vec![NavigationNode::new(
                "menu-editor",
                "Menu Editor",
                "/settings/menu",
                1,
            )]),
    ]
}
