//! Catalog API client
//!
//! Provides a typed HTTP client for the remote test-management catalog.
//! Handles basic-auth headers, project scoping, status mapping and JSON
//! decoding. No request is retried: every failure goes straight back to
//! the caller.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use specsync_catalog::client::CatalogClient;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let client = CatalogClient::new("https://catalog.example.com/api/v1", "PRJ", "ci-bot", "secret");
//! let page = client.list_folders(None, 1).await?;
//! println!("{} folders on page 1", page.folders.len());
//! # Ok(())
//! # }
//! ```

use reqwest::{Client, Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use specsync_core::config::CatalogConfig;
use specsync_core::domain::SyncError;
use tracing::debug;

use crate::CatalogError;

/// HTTP client for catalog API calls
///
/// Every request path is resolved against `{base_url}/projects/{project}`
/// and carries basic-auth credentials.
pub struct CatalogClient {
    /// The underlying HTTP client
    client: Client,
    /// Base URL of the API, without the project suffix
    base_url: String,
    /// Project every request is scoped to
    project: String,
    username: String,
    password: String,
}

impl CatalogClient {
    /// Creates a new CatalogClient
    ///
    /// # Arguments
    /// * `base_url` - API base URL (e.g. `https://catalog.example.com/api/v1`)
    /// * `project` - Project identifier
    /// * `username` - Basic-auth user name
    /// * `password` - Basic-auth password or API token
    pub fn new(
        base_url: impl Into<String>,
        project: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        let base_url: String = base_url.into();
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            project: project.into(),
            username: username.into(),
            password: password.into(),
        }
    }

    /// Creates a client from the catalog section of the configuration
    ///
    /// Fails with [`SyncError::Configuration`] when no password can be resolved.
    pub fn from_config(config: &CatalogConfig) -> Result<Self, SyncError> {
        let password = config.resolve_password()?;
        Ok(Self::new(
            &config.base_url,
            &config.project,
            &config.username,
            password,
        ))
    }

    /// Creates an authenticated request builder for the given method and path
    ///
    /// # Arguments
    /// * `method` - HTTP method
    /// * `path` - Path relative to the project (e.g. "/folders")
    pub fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}/projects/{}{}", self.base_url, self.project, path);
        self.client
            .request(method, &url)
            .basic_auth(&self.username, Some(&self.password))
    }

    /// Sends a request and maps non-success statuses to [`CatalogError`]
    pub(crate) async fn execute(&self, request: RequestBuilder) -> Result<Response, CatalogError> {
        let response = request.send().await?;
        let status = response.status();
        debug!(status = status.as_u16(), url = %response.url(), "Catalog response");

        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        Err(CatalogError::from_status(status, body))
    }

    /// Sends a request and decodes the JSON body
    pub(crate) async fn execute_json<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
    ) -> Result<T, CatalogError> {
        let response = self.execute(request).await?;
        let bytes = response.bytes().await?;
        serde_json::from_slice(&bytes).map_err(|e| CatalogError::InvalidResponse(e.to_string()))
    }
}
