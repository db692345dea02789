//! Navigation node: one entry of the two-level menu tree.

use crate::types::{Capability, NodeId};
use serde::{Deserialize, Serialize};

/// NavigationNode: a main menu item or one of its sub items
///
/// Serialized with camelCase field names so the JSON matches the backend's
/// stored menu structure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NavigationNode {
    pub id: NodeId,
    pub name: String,
    pub path: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required_permission: Option<Capability>,
    pub order: u32,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sub_items: Vec<NavigationNode>,
}

impl NavigationNode {
    /// Create a node with no permission gate and no sub items.
    pub fn new(
        id: impl Into<NodeId>,
        name: impl Into<String>,
        path: impl Into<String>,
        order: u32,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            path: path.into(),
            required_permission: None,
            order,
            sub_items: Vec::new(),
        }
    }

    pub fn with_permission(mut self, capability: impl Into<Capability>) -> Self {
        self.required_permission = Some(capability.into());
        self
    }

    pub fn with_sub_items(mut self, sub_items: Vec<NavigationNode>) -> Self {
        self.sub_items = sub_items;
        self
    }

    /// Whether a viewer holding `granted` may see this node.
    pub fn is_visible_with<F>(&self, granted: F) -> bool
    where
        F: Fn(&str) -> bool,
    {
        match &self.required_permission {
            Some(capability) => granted(capability),
            None => true,
        }
    }
}

/// Level of a node inside the tree
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum NodeLevel {
    Main,
    Sub { parent_id: NodeId },
}
