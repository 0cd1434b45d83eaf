//! HttpTestCatalog - ITestCatalog implementation for the catalog HTTP API
//!
//! Wraps the [`CatalogClient`] and delegates to the folder and test case
//! endpoints to fulfil the [`ITestCatalog`] port contract. Typed
//! [`CatalogError`](crate::CatalogError)s are converted to `anyhow::Error`
//! with request context at this boundary.

use anyhow::{Context, Result};
use tracing::debug;

use specsync_core::domain::{
    FolderId, NewFolder, RemoteFolder, RemoteTestCase, TestCaseId, TestCasePayload,
};
use specsync_core::ports::{FolderPage, ITestCatalog};

use crate::client::CatalogClient;

/// Catalog implementation that talks to the remote HTTP API
pub struct HttpTestCatalog {
    client: CatalogClient,
}

impl HttpTestCatalog {
    /// Creates a new `HttpTestCatalog` wrapping the given [`CatalogClient`]
    pub fn new(client: CatalogClient) -> Self {
        Self { client }
    }
}

#[async_trait::async_trait]
impl ITestCatalog for HttpTestCatalog {
    async fn list_folders_page(&self, parent: Option<&FolderId>, page: u32) -> Result<FolderPage> {
        debug!(parent = ?parent.map(|p| p.get()), page, "HttpTestCatalog::list_folders_page");
        self.client
            .list_folders(parent, page)
            .await
            .with_context(|| format!("GET folders page {page} failed"))
    }

    async fn create_folder(&self, folder: &NewFolder) -> Result<Option<RemoteFolder>> {
        self.client
            .create_folder(folder)
            .await
            .with_context(|| format!("POST folder '{}' failed", folder.name))
    }

    async fn list_test_cases(&self, folder: &FolderId) -> Result<Vec<RemoteTestCase>> {
        self.client
            .list_test_cases(folder)
            .await
            .with_context(|| format!("GET test cases of folder {folder} failed"))
    }

    async fn create_test_case(
        &self,
        folder: &FolderId,
        payload: &TestCasePayload,
    ) -> Result<Option<RemoteTestCase>> {
        self.client
            .create_test_case(folder, payload)
            .await
            .with_context(|| format!("POST test case '{}' failed", payload.title))
    }

    async fn update_test_case(&self, id: &TestCaseId, payload: &TestCasePayload) -> Result<()> {
        self.client
            .update_test_case(id, payload)
            .await
            .with_context(|| format!("PATCH test case {id} failed"))
    }

    async fn delete_test_case(&self, id: &TestCaseId) -> Result<()> {
        self.client
            .delete_test_case(id)
            .await
            .with_context(|| format!("DELETE test case {id} failed"))
    }
}
