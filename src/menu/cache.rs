//! Menu Cache
//!
//! Single owned source of truth for an installation's menu tree. Readers ask the
//! cache instead of holding their own copy; a successful save drops the cached
//! tree and bumps a generation counter that subscribers watch for staleness.

use crate::error::ApiError;
use crate::gateway::MenuGateway;
use crate::menu::defaults::default_structure;
use crate::menu::node::NavigationNode;
use crate::menu::tree::{normalize_orders, validate_tree};
use crate::permission::CapabilityRegistry;
use crate::types::ActingUser;
use parking_lot::RwLock;
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{error, info, warn};

/// Where a loaded tree came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuOrigin {
    /// Saved structure from the backend.
    Persisted,
    /// Nothing saved yet; built-in default.
    Default,
    /// Backend fetch failed or returned an unusable structure; built-in default.
    DefaultAfterError,
}

#[derive(Debug, Clone)]
pub struct LoadedMenu {
    pub tree: Vec<NavigationNode>,
    pub origin: MenuOrigin,
    pub generation: u64,
}

pub struct MenuCache {
    gateway: Arc<dyn MenuGateway>,
    installation: String,
    registry: CapabilityRegistry,
    cached: RwLock<Option<(Vec<NavigationNode>, MenuOrigin)>>,
    generation: watch::Sender<u64>,
}

impl MenuCache {
    pub fn new(gateway: Arc<dyn MenuGateway>, installation: impl Into<String>) -> Self {
        let (generation, _) = watch::channel(0);
        Self {
            gateway,
            installation: installation.into(),
            registry: CapabilityRegistry::builtin(),
            cached: RwLock::new(None),
            generation,
        }
    }

    pub fn with_registry(mut self, registry: CapabilityRegistry) -> Self {
        self.registry = registry;
        self
    }

    pub fn installation(&self) -> &str {
        &self.installation
    }

    pub fn generation(&self) -> u64 {
        *self.generation.borrow()
    }

    /// Receiver notified each time the cached tree becomes stale.
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.generation.subscribe()
    }

    /// Cached tree, fetching from the backend when nothing is cached.
    pub async fn current(&self) -> LoadedMenu {
        let generation = self.generation();
        if let Some((tree, origin)) = self.cached.read().clone() {
            return LoadedMenu {
                tree,
                origin,
                generation,
            };
        }

        let (tree, origin) = self.fetch_or_default().await;
        if origin != MenuOrigin::DefaultAfterError {
            // A save may have landed while the fetch was in flight.
            if self.generation() == generation {
                *self.cached.write() = Some((tree.clone(), origin));
            }
        }
        LoadedMenu {
            tree,
            origin,
            generation,
        }
    }

    async fn fetch_or_default(&self) -> (Vec<NavigationNode>, MenuOrigin) {
        match self.gateway.fetch().await {
            Ok(Some(mut tree)) => {
                if let Err(e) = validate_tree(&tree) {
                    error!(
                        installation = %self.installation,
                        error = %e,
                        "Saved menu structure is invalid, using default"
                    );
                    return (default_structure(), MenuOrigin::DefaultAfterError);
                }
                if let Err(e) = self.registry.validate_tree(&tree) {
                    warn!(
                        installation = %self.installation,
                        error = %e,
                        "Saved menu references an unregistered capability"
                    );
                }
                normalize_orders(&mut tree);
                (tree, MenuOrigin::Persisted)
            }
            Ok(None) => {
                info!(installation = %self.installation, "No saved menu structure, using default");
                (default_structure(), MenuOrigin::Default)
            }
            Err(e) => {
                warn!(
                    installation = %self.installation,
                    error = %e,
                    "Menu fetch failed, using default"
                );
                (default_structure(), MenuOrigin::DefaultAfterError)
            }
        }
    }

    /// Store `tree` wholesale and invalidate. Returns the new generation.
    pub async fn persist(
        &self,
        tree: &[NavigationNode],
        actor: &ActingUser,
    ) -> Result<u64, ApiError> {
        validate_tree(tree)?;
        self.gateway.store(tree, actor).await?;
        Ok(self.invalidate())
    }

    /// Drop the cached tree and signal subscribers. Returns the new generation.
    pub fn invalidate(&self) -> u64 {
        *self.cached.write() = None;
        self.generation.send_modify(|g| *g += 1);
        self.generation()
    }
}
