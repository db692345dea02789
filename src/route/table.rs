//! Application route table.

use crate::error::ApiError;
use crate::permission::{CapabilityRegistry, PermissionStore};
use crate::route::guard::{RouteDecision, RouteGuard};
use serde::Serialize;

/// Outcome of visiting a path
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", content = "path", rename_all = "snake_case")]
pub enum RouteVisit {
    Rendered(String),
    Unauthorized(String),
    NotFound(String),
}

#[derive(Debug, Clone)]
pub struct RouteTable {
    routes: Vec<RouteGuard>,
}

impl RouteTable {
    pub fn new(routes: Vec<RouteGuard>) -> Self {
        Self { routes }
    }

    /// Screens shipped with the tender application.
    pub fn builtin() -> Self {
        Self::new(vec![
            RouteGuard::open("/dashboard"),
            RouteGuard::requiring("/tenders", "tender"),
            RouteGuard::requiring("/tenders/new", "tender"),
            RouteGuard::requiring("/tenders/allocation", "task_allocation"),
            RouteGuard::requiring("/folders", "folders"),
            RouteGuard::requiring("/finance", "finance"),
            RouteGuard::requiring("/finance/requests", "finance"),
            RouteGuard::requiring("/finance/mis", "mis"),
            RouteGuard::requiring("/mis", "mis"),
            RouteGuard::requiring("/users", "users"),
            RouteGuard::requiring("/users/permissions", "users"),
            RouteGuard::requiring("/settings", "settings"),
            RouteGuard::requiring("/settings/menu", "settings"),
        ])
    }

    /// Exact match after dropping a trailing slash.
    pub fn resolve(&self, path: &str) -> Option<&RouteGuard> {
        let wanted = normalize_path(path);
        self.routes.iter().find(|guard| guard.path == wanted)
    }

    pub fn visit(&self, path: &str, permissions: &PermissionStore) -> RouteVisit {
        match self.resolve(path) {
            None => RouteVisit::NotFound(path.to_string()),
            Some(guard) => match guard.check(permissions) {
                RouteDecision::Render => RouteVisit::Rendered(path.to_string()),
                RouteDecision::Unauthorized => RouteVisit::Unauthorized(path.to_string()),
            },
        }
    }

    pub fn routes(&self) -> &[RouteGuard] {
        &self.routes
    }

    pub fn validate(&self, registry: &CapabilityRegistry) -> Result<(), ApiError> {
        for guard in &self.routes {
            if let Some(module) = &guard.module {
                registry.validate(module)?;
            }
        }
        Ok(())
    }
}

impl Default for RouteTable {
    fn default() -> Self {
        Self::builtin()
    }
}

fn normalize_path(path: &str) -> &str {
    if path.len() > 1 {
        path.trim_end_matches('/')
    } else {
        path
    }
}
