//! Menu Editor
//!
//! Rename/reorder editing over a working copy of the menu tree. Changes stay
//! local until an explicit [`EditingSession::save`]; [`EditingSession::reset`]
//! restores the last saved tree without touching the backend.
//!
//! The session is a two-state machine:
//!
//! - `Viewing`: no rename in progress. Reorders, save and reset happen here.
//! - `Editing`: exactly one node's name is held in a transient buffer until it
//!   is committed or cancelled.
//!
//! Dropping the session discards unsaved changes.

use crate::error::ApiError;
use crate::menu::cache::{MenuCache, MenuOrigin};
use crate::menu::node::{NavigationNode, NodeLevel};
use crate::menu::tree::{find_by_id, locate, rename, reorder_in_place};
use crate::types::{ActingUser, NodeId};
use tracing::{debug, error, info};
use unicode_normalization::UnicodeNormalization;

/// Node currently being renamed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditTarget {
    pub node_id: NodeId,
    pub level: NodeLevel,
    pub buffer: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorState {
    Viewing,
    Editing(EditTarget),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReorderOutcome {
    Moved,
    Unchanged,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    /// Nothing to save; the backend was not called.
    NoChanges,
    /// Persisted; carries the cache generation after invalidation.
    Saved { generation: u64 },
}

#[derive(Debug, Clone)]
pub struct EditingSession {
    working_tree: Vec<NavigationNode>,
    saved_tree: Vec<NavigationNode>,
    has_changes: bool,
    state: EditorState,
    origin: MenuOrigin,
}

impl EditingSession {
    /// Start a session from the cache's current tree.
    pub async fn open(cache: &MenuCache) -> Self {
        let loaded = cache.current().await;
        debug!(
            installation = cache.installation(),
            origin = ?loaded.origin,
            generation = loaded.generation,
            "Menu editing session opened"
        );
        Self::from_tree(loaded.tree, loaded.origin)
    }

    pub fn from_tree(tree: Vec<NavigationNode>, origin: MenuOrigin) -> Self {
        Self {
            working_tree: tree.clone(),
            saved_tree: tree,
            has_changes: false,
            state: EditorState::Viewing,
            origin,
        }
    }

    pub fn working_tree(&self) -> &[NavigationNode] {
        &self.working_tree
    }

    pub fn saved_tree(&self) -> &[NavigationNode] {
        &self.saved_tree
    }

    pub fn has_changes(&self) -> bool {
        self.has_changes
    }

    pub fn state(&self) -> &EditorState {
        &self.state
    }

    pub fn origin(&self) -> MenuOrigin {
        self.origin
    }

    pub fn is_editing(&self) -> bool {
        matches!(self.state, EditorState::Editing(_))
    }

    /// Enter rename mode for `node_id`, seeding the buffer with its current name.
    ///
    /// An edit already in progress is abandoned.
    pub fn begin_edit(&mut self, node_id: &str) -> Result<(), ApiError> {
        let node = find_by_id(&self.working_tree, node_id)
            .ok_or_else(|| ApiError::NodeNotFound(node_id.to_string()))?;
        let level = locate(&self.working_tree, node_id)
            .ok_or_else(|| ApiError::NodeNotFound(node_id.to_string()))?;

        if let EditorState::Editing(previous) = &self.state {
            debug!(previous = %previous.node_id, next = node_id, "Abandoning unfinished rename");
        }
        self.state = EditorState::Editing(EditTarget {
            node_id: node_id.to_string(),
            level,
            buffer: node.name.clone(),
        });
        Ok(())
    }

    pub fn update_buffer(&mut self, text: impl Into<String>) -> Result<(), ApiError> {
        match &mut self.state {
            EditorState::Editing(target) => {
                target.buffer = text.into();
                Ok(())
            }
            EditorState::Viewing => Err(ApiError::NotEditing(
                "No rename in progress".to_string(),
            )),
        }
    }

    /// Write the buffer into the working tree and return to viewing.
    ///
    /// Blank names are rejected and the session stays in rename mode.
    pub fn commit_edit(&mut self) -> Result<(), ApiError> {
        let EditorState::Editing(target) = &self.state else {
            return Err(ApiError::NotEditing("No rename in progress".to_string()));
        };

        let name = normalize_name(&target.buffer);
        if name.is_empty() {
            return Err(ApiError::InvalidName(format!(
                "Name for '{}' cannot be empty",
                target.node_id
            )));
        }

        let node_id = target.node_id.clone();
        rename(&mut self.working_tree, &node_id, &name)?;
        self.has_changes = true;
        self.state = EditorState::Viewing;
        debug!(node_id = %node_id, name = %name, "Menu node renamed");
        Ok(())
    }

    pub fn cancel_edit(&mut self) {
        self.state = EditorState::Viewing;
    }

    /// Move `active_id` into the slot held by `over_id` among its siblings.
    ///
    /// Ids that are not siblings, or a reorder during a rename, leave the tree as is.
    pub fn reorder(&mut self, active_id: &str, over_id: &str) -> ReorderOutcome {
        if self.is_editing() {
            debug!(active_id, over_id, "Reorder ignored while renaming");
            return ReorderOutcome::Unchanged;
        }
        if reorder_in_place(&mut self.working_tree, active_id, over_id) {
            self.has_changes = true;
            ReorderOutcome::Moved
        } else {
            debug!(active_id, over_id, "Reorder targets are not siblings");
            ReorderOutcome::Unchanged
        }
    }

    /// Persist the working tree through the cache.
    ///
    /// A failed save leaves the working tree and the change flag untouched so the
    /// caller can retry. A rename still in progress is not part of the saved tree.
    pub async fn save(
        &mut self,
        cache: &MenuCache,
        actor: &ActingUser,
    ) -> Result<SaveOutcome, ApiError> {
        if !self.has_changes {
            return Ok(SaveOutcome::NoChanges);
        }

        match cache.persist(&self.working_tree, actor).await {
            Ok(generation) => {
                self.saved_tree = self.working_tree.clone();
                self.has_changes = false;
                self.origin = MenuOrigin::Persisted;
                info!(
                    installation = cache.installation(),
                    actor = %actor,
                    generation,
                    "Menu changes saved"
                );
                Ok(SaveOutcome::Saved { generation })
            }
            Err(e) => {
                error!(
                    installation = cache.installation(),
                    actor = %actor,
                    error = %e,
                    "Menu save failed"
                );
                Err(e)
            }
        }
    }

    /// Discard unsaved changes and any rename in progress.
    pub fn reset(&mut self) {
        self.working_tree = self.saved_tree.clone();
        self.has_changes = false;
        self.state = EditorState::Viewing;
    }
}

fn normalize_name(raw: &str) -> String {
    raw.trim().nfc().collect()
}
