//! SpecSync Catalog - remote test catalog API client
//!
//! Provides an async client for the test-management catalog:
//! - Basic-auth requests scoped to one project
//! - Paginated folder listing and folder creation
//! - Test case listing, creation, update and deletion
//!
//! ## Modules
//!
//! - [`client`] - HTTP client, request construction and status mapping
//! - [`folders`] - Folder endpoints
//! - [`test_cases`] - Test case endpoints
//! - [`provider`] - [`ITestCatalog`](specsync_core::ports::ITestCatalog) implementation

pub mod client;
pub mod folders;
pub mod provider;
pub mod test_cases;

use reqwest::StatusCode;
use thiserror::Error;

pub use client::CatalogClient;
pub use provider::HttpTestCatalog;

/// Errors that can occur when communicating with the catalog API
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Credentials were rejected
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// The user lacks permission on the project
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// The project, folder or test case does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// A server-side error occurred (5xx)
    #[error("Server error ({status}): {message}")]
    ServerError { status: u16, message: String },

    /// Any other non-success status
    #[error("Unexpected status {status}: {message}")]
    UnexpectedStatus { status: u16, message: String },

    /// A network-level error occurred
    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    /// The response body could not be decoded
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

impl CatalogError {
    /// Maps a non-success HTTP status and its body to an error
    pub fn from_status(status: StatusCode, body: String) -> Self {
        match status {
            StatusCode::UNAUTHORIZED => CatalogError::Unauthorized(body),
            StatusCode::FORBIDDEN => CatalogError::Forbidden(body),
            StatusCode::NOT_FOUND => CatalogError::NotFound(body),
            s if s.is_server_error() => CatalogError::ServerError {
                status: s.as_u16(),
                message: body,
            },
            s => CatalogError::UnexpectedStatus {
                status: s.as_u16(),
                message: body,
            },
        }
    }
}
