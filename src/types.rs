//! Core types shared across the navigation subsystem.

use serde::{Deserialize, Serialize};
use std::fmt;

/// NodeId: stable identifier of a menu node, unique across the whole tree
pub type NodeId = String;

/// Capability: permission tag gating a feature area (e.g. "tender", "mis")
pub type Capability = String;

/// Identity attributed to backend writes for audit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActingUser(String);

impl ActingUser {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ActingUser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
