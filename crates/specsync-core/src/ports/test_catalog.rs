//! Test catalog port (driven/secondary port)
//!
//! This module defines the interface for talking to the remote
//! test-management catalog. The HTTP implementation lives in
//! `specsync-catalog`; use cases only see this trait.
//!
//! ## Design Notes
//!
//! - Uses `anyhow::Result` because errors at port boundaries are adapter-specific
//!   (authentication, network, malformed response) and are passed through as-is.
//! - Folder listing is exposed page by page; the folder resolver owns pagination.
//! - Create calls return `Option`: `None` means the server answered successfully
//!   but the response did not contain the created entity.

use crate::domain::{
    FolderId, NewFolder, RemoteFolder, RemoteTestCase, TestCaseId, TestCasePayload,
};

/// One page of a folder listing
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FolderPage {
    /// Folders on this page (empty when the server sent none)
    pub folders: Vec<RemoteFolder>,
    /// Next page number, `None` on the last page
    pub next_page: Option<u32>,
}

/// Port trait for remote catalog operations
#[async_trait::async_trait]
pub trait ITestCatalog: Send + Sync {
    /// Lists one page of folders under `parent` (catalog root when `None`)
    ///
    /// # Arguments
    /// * `parent` - Parent folder, or `None` for top-level folders
    /// * `page` - 1-based page number
    async fn list_folders_page(
        &self,
        parent: Option<&FolderId>,
        page: u32,
    ) -> anyhow::Result<FolderPage>;

    /// Creates a folder
    async fn create_folder(&self, folder: &NewFolder) -> anyhow::Result<Option<RemoteFolder>>;

    /// Lists every test case in `folder` (single, unpaginated call)
    async fn list_test_cases(&self, folder: &FolderId) -> anyhow::Result<Vec<RemoteTestCase>>;

    /// Creates a test case inside `folder`
    async fn create_test_case(
        &self,
        folder: &FolderId,
        payload: &TestCasePayload,
    ) -> anyhow::Result<Option<RemoteTestCase>>;

    /// Patches an existing test case
    async fn update_test_case(
        &self,
        id: &TestCaseId,
        payload: &TestCasePayload,
    ) -> anyhow::Result<()>;

    /// Deletes a test case
    async fn delete_test_case(&self, id: &TestCaseId) -> anyhow::Result<()>;
}
