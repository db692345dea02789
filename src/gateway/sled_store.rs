//! Sled-backed menu store for installations that keep their backend of record
//! on the local machine.

use crate::error::{ApiError, StorageError};
use crate::gateway::contract::MenuGateway;
use crate::menu::node::NavigationNode;
use crate::types::ActingUser;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

/// One saved structure plus its audit fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuRecord {
    pub installation: String,
    pub tree: Vec<NavigationNode>,
    pub updated_by: ActingUser,
    pub updated_at: DateTime<Utc>,
    pub fingerprint: String,
}

/// blake3 digest of the tree's JSON encoding, hex encoded.
pub fn fingerprint(tree: &[NavigationNode]) -> Result<String, StorageError> {
    let bytes = serde_json::to_vec(tree)?;
    Ok(hex::encode(blake3::hash(&bytes).as_bytes()))
}

pub struct SledMenuGateway {
    tree: sled::Tree,
    installation: String,
}

impl SledMenuGateway {
    const TREE_NAME: &'static str = "menu_structures";

    pub fn open(path: &Path, installation: impl Into<String>) -> Result<Self, ApiError> {
        std::fs::create_dir_all(path).map_err(StorageError::IoError)?;
        let db = sled::open(path).map_err(StorageError::Database)?;
        Self::from_db(&db, installation)
    }

    pub fn from_db(db: &sled::Db, installation: impl Into<String>) -> Result<Self, ApiError> {
        let tree = db.open_tree(Self::TREE_NAME).map_err(StorageError::Database)?;
        Ok(Self {
            tree,
            installation: installation.into(),
        })
    }

    /// Full record for the installation, including audit fields.
    pub fn record(&self) -> Result<Option<MenuRecord>, ApiError> {
        let Some(bytes) = self
            .tree
            .get(self.installation.as_bytes())
            .map_err(StorageError::Database)?
        else {
            return Ok(None);
        };
        let record: MenuRecord =
            serde_json::from_slice(&bytes).map_err(StorageError::Serialization)?;
        Ok(Some(record))
    }
}

#[async_trait]
impl MenuGateway for SledMenuGateway {
    /// A stored empty tree reads as nothing saved, matching the REST backend.
    async fn fetch(&self) -> Result<Option<Vec<NavigationNode>>, ApiError> {
        Ok(self
            .record()?
            .map(|record| record.tree)
            .filter(|tree| !tree.is_empty()))
    }

    async fn store(&self, tree: &[NavigationNode], actor: &ActingUser) -> Result<(), ApiError> {
        let record = MenuRecord {
            installation: self.installation.clone(),
            tree: tree.to_vec(),
            updated_by: actor.clone(),
            updated_at: Utc::now(),
            fingerprint: fingerprint(tree)?,
        };
        let bytes = serde_json::to_vec(&record).map_err(StorageError::Serialization)?;
        self.tree
            .insert(self.installation.as_bytes(), bytes)
            .map_err(StorageError::Database)?;
        self.tree.flush().map_err(StorageError::Database)?;

        info!(
            installation = %self.installation,
            actor = %actor,
            fingerprint = %record.fingerprint,
            "Menu structure stored"
        );
        Ok(())
    }
}
