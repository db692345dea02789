//! Permission Store
//!
//! Session-wide cache of the viewer's capability tags. Loaded once from a
//! [`PermissionSource`], then answers [`PermissionStore::has`] synchronously.
//! Every check is fail-closed: until a load succeeds, nothing is granted.

use crate::permission::source::PermissionSource;
use crate::types::Capability;
use parking_lot::RwLock;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Load status of the store
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadStatus {
    Unloaded,
    Loading,
    Loaded,
    Failed,
}

enum LoadState {
    Unloaded,
    Loading,
    Loaded(HashSet<Capability>),
    Failed,
}

impl LoadState {
    fn status(&self) -> LoadStatus {
        match self {
            LoadState::Unloaded => LoadStatus::Unloaded,
            LoadState::Loading => LoadStatus::Loading,
            LoadState::Loaded(_) => LoadStatus::Loaded,
            LoadState::Failed => LoadStatus::Failed,
        }
    }
}

pub struct PermissionStore {
    source: Arc<dyn PermissionSource>,
    inner: RwLock<Inner>,
}

struct Inner {
    state: LoadState,
    /// Bumped by every `load` and `clear`; only the newest load may settle.
    epoch: u64,
}

/// Puts the store back to `Unloaded` if a load future is dropped before it settles.
struct PendingLoad<'a> {
    store: &'a PermissionStore,
    epoch: u64,
    settled: bool,
}

impl Drop for PendingLoad<'_> {
    fn drop(&mut self) {
        if self.settled {
            return;
        }
        let mut inner = self.store.inner.write();
        if inner.epoch == self.epoch && matches!(inner.state, LoadState::Loading) {
            debug!(epoch = self.epoch, "Permission load abandoned");
            inner.state = LoadState::Unloaded;
        }
    }
}

impl PermissionStore {
    pub fn new(source: Arc<dyn PermissionSource>) -> Self {
        Self {
            source,
            inner: RwLock::new(Inner {
                state: LoadState::Unloaded,
                epoch: 0,
            }),
        }
    }

    /// Fetch the permission set for the session.
    ///
    /// A store that already loaded successfully is left untouched. A failed or
    /// cancelled fetch leaves the store empty; calling `load` again retries. A
    /// fetch that completes after a newer `load` or a `clear` is discarded.
    pub async fn load(&self) -> LoadStatus {
        let epoch = {
            let mut inner = self.inner.write();
            if let LoadState::Loaded(_) = inner.state {
                return LoadStatus::Loaded;
            }
            inner.epoch += 1;
            inner.state = LoadState::Loading;
            inner.epoch
        };
        let mut pending = PendingLoad {
            store: self,
            epoch,
            settled: false,
        };

        let result = self.source.fetch_permissions().await;
        pending.settled = true;

        let mut inner = self.inner.write();
        if inner.epoch != epoch {
            debug!(epoch, current = inner.epoch, "Discarding stale permission load");
            return inner.state.status();
        }
        match result {
            Ok(granted) => {
                let granted: HashSet<Capability> = granted.into_iter().collect();
                info!(granted = granted.len(), "Permission set loaded");
                inner.state = LoadState::Loaded(granted);
            }
            Err(e) => {
                warn!(error = %e, "Permission load failed, denying all capabilities");
                inner.state = LoadState::Failed;
            }
        }
        inner.state.status()
    }

    /// True iff the store loaded and `capability` was granted.
    pub fn has(&self, capability: &str) -> bool {
        match &self.inner.read().state {
            LoadState::Loaded(granted) => granted.contains(capability),
            _ => {
                debug!(capability, "Permission check before load completed, denying");
                false
            }
        }
    }

    pub fn status(&self) -> LoadStatus {
        self.inner.read().state.status()
    }

    /// Sorted snapshot of the granted tags; empty unless loaded.
    pub fn granted(&self) -> Vec<Capability> {
        match &self.inner.read().state {
            LoadState::Loaded(granted) => {
                let mut tags: Vec<Capability> = granted.iter().cloned().collect();
                tags.sort();
                tags
            }
            _ => Vec::new(),
        }
    }

    /// Forget the loaded set (session end).
    pub fn clear(&self) {
        let mut inner = self.inner.write();
        inner.epoch += 1;
        inner.state = LoadState::Unloaded;
    }
}
