use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use tendernav::config::AppConfig;
use tendernav::error::ApiError;
use tendernav::gateway::{MenuGateway, SledMenuGateway};
use tendernav::menu::NavigationNode;
use tendernav::types::ActingUser;

/// Local-backend config rooted in `store`, granting `permissions`.
pub fn local_config(store: &Path, permissions: &[&str]) -> AppConfig {
    let mut config = AppConfig::default();
    config.installation.id = "hq".to_string();
    config.storage.path = Some(store.to_path_buf());
    config.session.user = "alice".to_string();
    config.session.permissions = permissions.iter().map(|p| p.to_string()).collect();
    config
}

/// Sled gateway wrapper that counts calls and can be switched to fail writes.
pub struct CountingGateway {
    inner: SledMenuGateway,
    pub fetches: AtomicUsize,
    pub stores: AtomicUsize,
    pub fail_stores: AtomicUsize,
}

impl CountingGateway {
    pub fn open(path: &Path) -> Arc<Self> {
        Arc::new(Self {
            inner: SledMenuGateway::open(path, "hq").unwrap(),
            fetches: AtomicUsize::new(0),
            stores: AtomicUsize::new(0),
            fail_stores: AtomicUsize::new(0),
        })
    }

    /// Fail the next `n` writes with a retryable error.
    pub fn fail_next_stores(&self, n: usize) {
        self.fail_stores.store(n, Ordering::SeqCst);
    }

    pub fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }

    pub fn store_count(&self) -> usize {
        self.stores.load(Ordering::SeqCst)
    }

    pub fn saved(&self) -> Option<Vec<NavigationNode>> {
        self.inner.record().unwrap().map(|record| record.tree)
    }
}

#[async_trait]
impl MenuGateway for CountingGateway {
    async fn fetch(&self) -> Result<Option<Vec<NavigationNode>>, ApiError> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        self.inner.fetch().await
    }

    async fn store(&self, tree: &[NavigationNode], actor: &ActingUser) -> Result<(), ApiError> {
        self.stores.fetch_add(1, Ordering::SeqCst);
        let pending = self.fail_stores.load(Ordering::SeqCst);
        if pending > 0 {
            self.fail_stores.store(pending - 1, Ordering::SeqCst);
            return Err(ApiError::BackendStatus {
                status: 503,
                body: "maintenance".to_string(),
            });
        }
        self.inner.store(tree, actor).await
    }
}

pub fn ids(tree: &[NavigationNode]) -> Vec<&str> {
    let mut nodes: Vec<&NavigationNode> = tree.iter().collect();
    nodes.sort_by_key(|n| n.order);
    nodes.into_iter().map(|n| n.id.as_str()).collect()
}
