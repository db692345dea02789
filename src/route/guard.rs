//! Route Guard
//!
//! Gates one route's view behind an optional capability. The guard never
//! navigates: a denied check yields the Unauthorized outcome for the same path.

use crate::permission::PermissionStore;
use crate::types::Capability;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Result of a guard check
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RouteDecision {
    Render,
    Unauthorized,
}

/// What the router shows for a guarded path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Guarded<V> {
    Rendered(V),
    /// Fixed unauthorized view; `path` is the URL the viewer asked for.
    Unauthorized { path: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteGuard {
    pub path: String,
    pub module: Option<Capability>,
}

impl RouteGuard {
    /// Guard that renders for any authenticated session.
    pub fn open(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            module: None,
        }
    }

    pub fn requiring(path: impl Into<String>, module: impl Into<Capability>) -> Self {
        Self {
            path: path.into(),
            module: Some(module.into()),
        }
    }

    pub fn check(&self, permissions: &PermissionStore) -> RouteDecision {
        match &self.module {
            None => RouteDecision::Render,
            Some(module) if permissions.has(module) => RouteDecision::Render,
            Some(module) => {
                debug!(path = %self.path, module = %module, "Route denied");
                RouteDecision::Unauthorized
            }
        }
    }

    /// Build the view only when the check passes.
    pub fn render<V, F>(&self, permissions: &PermissionStore, view: F) -> Guarded<V>
    where
        F: FnOnce() -> V,
    {
        match self.check(permissions) {
            RouteDecision::Render => Guarded::Rendered(view()),
            RouteDecision::Unauthorized => Guarded::Unauthorized {
                path: self.path.clone(),
            },
        }
    }
}
