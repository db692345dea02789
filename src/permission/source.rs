//! Permission sources: where the current session's capability tags come from.

use crate::error::ApiError;
use crate::types::Capability;
use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;

/// Port to the auth/session collaborator.
#[async_trait]
pub trait PermissionSource: Send + Sync {
    /// Return the tags granted to the current session's user.
    async fn fetch_permissions(&self) -> Result<Vec<Capability>, ApiError>;
}

/// Fixed grants, typically from configuration.
#[derive(Debug, Clone, Default)]
pub struct StaticPermissionSource {
    granted: Vec<Capability>,
}

impl StaticPermissionSource {
    pub fn new<I, S>(granted: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<Capability>,
    {
        Self {
            granted: granted.into_iter().map(Into::into).collect(),
        }
    }
}

#[async_trait]
impl PermissionSource for StaticPermissionSource {
    async fn fetch_permissions(&self) -> Result<Vec<Capability>, ApiError> {
        Ok(self.granted.clone())
    }
}

/// Either a bare array or an object wrapping it.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum PermissionsBody {
    List(Vec<Capability>),
    Wrapped { permissions: Vec<Capability> },
}

/// `GET {base_url}/permissions` with the session's bearer token.
pub struct HttpPermissionSource {
    client: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl HttpPermissionSource {
    pub fn new(
        base_url: impl Into<String>,
        token: Option<String>,
        timeout: Duration,
    ) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token,
        })
    }

    fn url(&self) -> String {
        format!("{}/permissions", self.base_url)
    }
}

#[async_trait]
impl PermissionSource for HttpPermissionSource {
    async fn fetch_permissions(&self) -> Result<Vec<Capability>, ApiError> {
        let mut request = self.client.get(self.url());
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request
            .send()
            .await
            .map_err(|e| ApiError::PermissionLoad(e.to_string()))?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::BackendStatus {
                status: status.as_u16(),
                body,
            });
        }

        let body: PermissionsBody = response
            .json()
            .await
            .map_err(|e| ApiError::PermissionLoad(format!("Malformed permission list: {}", e)))?;
        Ok(match body {
            PermissionsBody::List(list) => list,
            PermissionsBody::Wrapped { permissions } => permissions,
        })
    }
}
