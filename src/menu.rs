//! Menu
//!
//! Two-level navigation tree: model, default structure, pure tree operations,
//! the editing session, the owned cache and the permission-filtered view.

pub mod cache;
pub mod defaults;
pub mod editor;
pub mod node;
pub mod render;
pub mod tree;

pub use cache::{LoadedMenu, MenuCache, MenuOrigin};
pub use defaults::default_structure;
pub use editor::{EditTarget, EditingSession, EditorState, ReorderOutcome, SaveOutcome};
pub use node::{NavigationNode, NodeLevel};
pub use render::visible_menu;
pub use tree::{find_by_id, reorder};
