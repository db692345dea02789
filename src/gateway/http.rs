//! HTTP adapter for the remote menu backend.

use crate::error::ApiError;
use crate::gateway::contract::MenuGateway;
use crate::menu::node::NavigationNode;
use crate::types::ActingUser;
use async_trait::async_trait;
use reqwest::StatusCode;
use std::time::Duration;
use tracing::debug;

/// Header carrying the acting user on writes.
pub const ACTING_USER_HEADER: &str = "X-Acting-User";

pub struct HttpMenuGateway {
    client: reqwest::Client,
    base_url: String,
    installation: String,
    token: Option<String>,
}

impl HttpMenuGateway {
    pub fn new(
        base_url: impl Into<String>,
        installation: impl Into<String>,
        token: Option<String>,
        timeout: Duration,
    ) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            installation: installation.into(),
            token,
        })
    }

    fn menu_url(&self) -> String {
        format!("{}/installations/{}/menu", self.base_url, self.installation)
    }

    fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }
}

#[async_trait]
impl MenuGateway for HttpMenuGateway {
    async fn fetch(&self) -> Result<Option<Vec<NavigationNode>>, ApiError> {
        let url = self.menu_url();
        let response = self.authorize(self.client.get(&url)).send().await?;
        let status = response.status();
        debug!(url = %url, status = status.as_u16(), "Fetched menu structure");

        if status == StatusCode::NO_CONTENT || status == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::BackendStatus {
                status: status.as_u16(),
                body,
            });
        }

        let body = response.text().await?;
        if body.trim().is_empty() {
            return Ok(None);
        }
        let tree: Option<Vec<NavigationNode>> = serde_json::from_str(&body)
            .map_err(|e| ApiError::InvalidMenu(format!("Malformed menu structure: {}", e)))?;
        Ok(tree.filter(|t| !t.is_empty()))
    }

    async fn store(&self, tree: &[NavigationNode], actor: &ActingUser) -> Result<(), ApiError> {
        let url = self.menu_url();
        let response = self
            .authorize(self.client.post(&url))
            .header(ACTING_USER_HEADER, actor.as_str())
            .json(tree)
            .send()
            .await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::BackendStatus {
                status: status.as_u16(),
                body,
            });
        }
        Ok(())
    }
}
