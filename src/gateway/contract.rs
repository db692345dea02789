use crate::error::ApiError;
use crate::menu::node::NavigationNode;
use crate::types::ActingUser;
use async_trait::async_trait;

/// Port to the menu backend of record for one installation.
#[async_trait]
pub trait MenuGateway: Send + Sync {
    /// Saved structure, or `None` if the installation never saved one.
    async fn fetch(&self) -> Result<Option<Vec<NavigationNode>>, ApiError>;

    /// Replace the saved structure wholesale, attributed to `actor`.
    async fn store(&self, tree: &[NavigationNode], actor: &ActingUser) -> Result<(), ApiError>;
}
