//! Folder endpoints
//!
//! - `GET /folders?p={page}` lists top-level folders
//! - `GET /folders/{parent}/sub-folders?p={page}` lists children of a folder
//! - `POST /folders` creates a folder
//!
//! Listing responses carry `folders` and `info.next`; either may be absent.

use reqwest::Method;
use serde::{Deserialize, Serialize};
use specsync_core::domain::{FolderId, NewFolder, RemoteFolder};
use specsync_core::ports::FolderPage;
use tracing::debug;

use crate::client::CatalogClient;
use crate::CatalogError;

// ============================================================================
// Wire types
// ============================================================================

/// Folder object as the API returns it
#[derive(Debug, Deserialize)]
pub(crate) struct FolderDto {
    id: u64,
    name: String,
    #[serde(default)]
    parent_id: Option<u64>,
}

impl FolderDto {
    /// Sub-folder listings may leave `parent_id` out; the queried parent fills it
    fn into_remote(self, listed_under: Option<&FolderId>) -> RemoteFolder {
        RemoteFolder {
            id: FolderId::new(self.id),
            name: self.name,
            parent_id: self
                .parent_id
                .map(FolderId::new)
                .or_else(|| listed_under.copied()),
        }
    }
}

/// Pagination block of a listing response
#[derive(Debug, Default, Deserialize)]
struct PageInfo {
    #[serde(default)]
    next: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct FolderListResponse {
    #[serde(default)]
    folders: Option<Vec<FolderDto>>,
    #[serde(default)]
    info: Option<PageInfo>,
}

#[derive(Debug, Serialize)]
struct CreateFolderRequest<'a> {
    folder: &'a NewFolder,
}

#[derive(Debug, Deserialize)]
struct FolderResponse {
    #[serde(default)]
    folder: Option<FolderDto>,
}

// ============================================================================
// Endpoints
// ============================================================================

impl CatalogClient {
    /// Fetches one page of folders under `parent`
    ///
    /// # Arguments
    /// * `parent` - Parent folder, or `None` for top-level folders
    /// * `page` - 1-based page number
    pub async fn list_folders(
        &self,
        parent: Option<&FolderId>,
        page: u32,
    ) -> Result<FolderPage, CatalogError> {
        let path = match parent {
            Some(id) => format!("/folders/{id}/sub-folders"),
            None => "/folders".to_string(),
        };
        debug!(path = %path, page, "Listing folders");

        let response: FolderListResponse = self
            .execute_json(self.request(Method::GET, &path).query(&[("p", page)]))
            .await?;

        let folders = response
            .folders
            .unwrap_or_default()
            .into_iter()
            .map(|f| f.into_remote(parent))
            .collect();

        Ok(FolderPage {
            folders,
            next_page: response.info.and_then(|i| i.next),
        })
    }

    /// Creates a folder
    ///
    /// Returns `Ok(None)` when the server answered successfully without a
    /// folder object in the body.
    pub async fn create_folder(
        &self,
        folder: &NewFolder,
    ) -> Result<Option<RemoteFolder>, CatalogError> {
        debug!(name = %folder.name, parent = ?folder.parent_id, "Creating folder");

        let response: FolderResponse = self
            .execute_json(
                self.request(Method::POST, "/folders")
                    .json(&CreateFolderRequest { folder }),
            )
            .await?;

        Ok(response
            .folder
            .map(|f| f.into_remote(folder.parent_id.as_ref())))
    }
}
