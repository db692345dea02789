//! Registry of known capability tags.
//!
//! Capabilities stay open strings so deployments can add their own, but every tag
//! referenced by a menu node or route must be registered here first.

use crate::error::ApiError;
use crate::menu::node::NavigationNode;
use std::collections::BTreeSet;

/// Capability tags every installation understands.
pub const BUILTIN_CAPABILITIES: &[&str] = &[
    "tender",
    "task_allocation",
    "folders",
    "finance",
    "mis",
    "users",
    "settings",
];

#[derive(Debug, Clone)]
pub struct CapabilityRegistry {
    known: BTreeSet<String>,
}

impl CapabilityRegistry {
    pub fn builtin() -> Self {
        Self {
            known: BUILTIN_CAPABILITIES.iter().map(|c| c.to_string()).collect(),
        }
    }

    /// Add deployment-specific tags on top of the built-in set.
    pub fn with_extra<I, S>(mut self, extra: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for tag in extra {
            let tag = tag.into();
            let trimmed = tag.trim();
            if !trimmed.is_empty() {
                self.known.insert(trimmed.to_string());
            }
        }
        self
    }

    pub fn contains(&self, capability: &str) -> bool {
        self.known.contains(capability)
    }

    pub fn validate(&self, capability: &str) -> Result<(), ApiError> {
        if self.contains(capability) {
            Ok(())
        } else {
            Err(ApiError::UnknownCapability(capability.to_string()))
        }
    }

    /// Check every `required_permission` in the tree against the registry.
    pub fn validate_tree(&self, tree: &[NavigationNode]) -> Result<(), ApiError> {
        for main in tree {
            if let Some(capability) = &main.required_permission {
                self.validate(capability)?;
            }
            for sub in &main.sub_items {
                if let Some(capability) = &sub.required_permission {
                    self.validate(capability)?;
                }
            }
        }
        Ok(())
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.known.iter().map(String::as_str)
    }
}

impl Default for CapabilityRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}
