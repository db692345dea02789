//! Permissions
//!
//! Capability tags for the current session, the registry of valid tags, and the
//! sources they are loaded from.

pub mod registry;
pub mod source;
pub mod store;

pub use registry::{CapabilityRegistry, BUILTIN_CAPABILITIES};
pub use source::{HttpPermissionSource, PermissionSource, StaticPermissionSource};
pub use store::{LoadStatus, PermissionStore};
