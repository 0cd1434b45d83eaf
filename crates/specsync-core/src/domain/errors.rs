//! Domain error types
//!
//! This module defines the error types raised by the reconciliation core:
//! identifier validation failures and the failures of a synchronization run.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur when constructing validated domain values
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Remote identifier could not be parsed
    #[error("Invalid remote ID: {0}")]
    InvalidRemoteId(String),
}

/// Errors that abort a synchronization run
///
/// Every remote failure is surfaced to the caller; nothing in the core
/// retries. The only downgraded case (template mismatch on update) is
/// reported as an outcome, not as an error.
#[derive(Debug, Error)]
pub enum SyncError {
    /// The create-folder response did not contain the created folder
    #[error("folder creation failed for '{name}': response did not contain a folder")]
    FolderCreation { name: String },

    /// The create-test-case response did not contain the created test case
    #[error("test case creation failed for '{title}': response did not contain a test case")]
    TestCaseCreation { title: String },

    /// A test case was deleted but could not be recreated
    #[error("test case '{title}' (was {deleted_id}) was deleted but recreation failed")]
    TestCaseRecreation { title: String, deleted_id: String },

    /// Invalid configuration value
    #[error("configuration error: {0}")]
    Configuration(String),

    /// Pass-through failure from the remote catalog (auth, network, malformed response)
    #[error("catalog error: {0:#}")]
    Catalog(#[from] anyhow::Error),

    /// A specification document could not be parsed
    #[error("failed to parse {path}: {reason}")]
    Parse { path: PathBuf, reason: String },

    /// Local filesystem failure while walking the document tree
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
