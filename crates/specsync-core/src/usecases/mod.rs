//! Use cases (application services)
//!
//! This module contains the reconciliation use cases that orchestrate the
//! remote catalog through the [`ITestCatalog`](crate::ports::ITestCatalog) port:
//!
//! - [`FolderResolver`] - Find-or-create a folder, owning pagination and the settling delay
//! - [`TestCaseResolver`] - Find a test case by title in a folder, or create it
//! - [`ExistingEntityPolicy`] - Skip, update or delete-and-recreate an existing test case

pub mod ensure_folder;
pub mod existing_policy;
pub mod resolve_test_case;


pub use ensure_folder::{FolderResolver, ResolvedFolder};
pub use existing_policy::{ExistingEntityPolicy, TestCaseOutcome};
pub use resolve_test_case::TestCaseResolver;

use tracing::error;

use crate::domain::SyncError;

/// Adds context to a failed catalog call, logs it and wraps it for the caller
pub(crate) fn catalog_failure(err: anyhow::Error, context: String) -> SyncError {
    let err = err.context(context);
    error!(error = %format!("{err:#}"), "Catalog call failed");
    SyncError::Catalog(err)
}
