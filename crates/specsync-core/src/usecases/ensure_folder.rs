//! Folder resolution use case
//!
//! Finds a folder by exact name under a parent, creating it when absent.
//! The catalog does not enforce unique names per parent, so the resolver
//! must read the complete listing before deciding to create.
//!
//! ## Eventual consistency
//!
//! A folder created and immediately listed may not show up yet. After every
//! successful creation the resolver sleeps for the configured settling delay
//! before returning, and the sync engine never issues overlapping calls.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, error, info, warn};

use super::catalog_failure;
use crate::domain::{FolderId, NewFolder, RemoteFolder, SyncError};
use crate::ports::ITestCatalog;

/// Page numbers are 1-based
const FIRST_PAGE: u32 = 1;

/// Result of [`FolderResolver::ensure_folder`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedFolder {
    /// Identifier of the found or created folder
    pub id: FolderId,
    /// Whether the folder had to be created
    pub created: bool,
}

/// Use case for find-or-create of remote folders
pub struct FolderResolver {
    catalog: Arc<dyn ITestCatalog + Send + Sync>,
    creation_delay: Duration,
}

impl FolderResolver {
    /// Creates a new FolderResolver
    ///
    /// # Arguments
    ///
    /// * `catalog` - Remote catalog port
    /// * `creation_delay` - Settling delay applied after each folder creation
    pub fn new(catalog: Arc<dyn ITestCatalog + Send + Sync>, creation_delay: Duration) -> Self {
        Self {
            catalog,
            creation_delay,
        }
    }

    /// Returns the folder named `name` under `parent`, creating it if absent
    ///
    /// The name match is exact and case-sensitive.
    ///
    /// # Errors
    ///
    /// - [`SyncError::Catalog`] when listing or creation fails at the transport level
    /// - [`SyncError::FolderCreation`] when the create response lacks the folder
    pub async fn ensure_folder(
        &self,
        name: &str,
        parent: Option<&FolderId>,
    ) -> Result<ResolvedFolder, SyncError> {
        let folders = self.list_all_folders(parent).await?;

        if let Some(existing) = folders
            .iter()
            .find(|f| f.name == name && f.parent_id.as_ref() == parent)
        {
            debug!(folder = %name, id = %existing.id, "Reusing existing folder");
            return Ok(ResolvedFolder {
                id: existing.id,
                created: false,
            });
        }

        let request = NewFolder::new(name, parent.copied());
        let created = self
            .catalog
            .create_folder(&request)
            .await
            .map_err(|e| catalog_failure(e, format!("Failed to create folder '{name}'")))?;

        let Some(folder) = created else {
            error!(folder = %name, "Create folder response did not contain a folder");
            return Err(SyncError::FolderCreation {
                name: name.to_string(),
            });
        };

        info!(
            folder = %name,
            id = %folder.id,
            parent = ?parent.map(|p| p.get()),
            "Created folder"
        );

        if !self.creation_delay.is_zero() {
            debug!(
                delay_ms = self.creation_delay.as_millis() as u64,
                "Waiting for folder to become visible"
            );
            tokio::time::sleep(self.creation_delay).await;
        }

        Ok(ResolvedFolder {
            id: folder.id,
            created: true,
        })
    }

    /// Fetches every folder under `parent`, following the page cursor
    ///
    /// An empty page ends pagination without error, as does a missing
    /// next-page number.
    pub async fn list_all_folders(
        &self,
        parent: Option<&FolderId>,
    ) -> Result<Vec<RemoteFolder>, SyncError> {
        let mut folders = Vec::new();
        let mut page = FIRST_PAGE;

        loop {
            let listing = self
                .catalog
                .list_folders_page(parent, page)
                .await
                .map_err(|e| {
                    catalog_failure(
                        e,
                        format!(
                            "Failed to list folders under {} (page {page})",
                            describe_parent(parent)
                        ),
                    )
                })?;

            if listing.folders.is_empty() {
                debug!(page, "Empty folder page, stopping pagination");
                break;
            }

            debug!(
                page,
                count = listing.folders.len(),
                has_next = listing.next_page.is_some(),
                "Received folder page"
            );
            folders.extend(listing.folders);

            match listing.next_page {
                Some(next) if next > page => page = next,
                Some(next) => {
                    warn!(page, next, "Folder page cursor did not advance, stopping pagination");
                    break;
                }
                None => break,
            }
        }

        Ok(folders)
    }
}

fn describe_parent(parent: Option<&FolderId>) -> String {
    match parent {
        Some(id) => format!("folder {id}"),
        None => "catalog root".to_string(),
    }
}
