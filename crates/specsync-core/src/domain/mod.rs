//! Domain entities and payload rendering
//!
//! This module contains the core domain types for SpecSync:
//! - Newtypes for remote identifiers
//! - Parsed documents, scenarios and steps
//! - Remote catalog entities (folders, test cases)
//! - The payload builder that renders scenarios for the catalog
//! - Domain-specific error types

pub mod catalog;
pub mod document;
pub mod errors;
pub mod newtypes;
pub mod payload;

// Re-export commonly used types
pub use catalog::{NewFolder, RemoteFolder, RemoteTestCase, TemplateTag};
pub use document::{Document, Scenario, Step, StepKind};
pub use errors::{DomainError, SyncError};
pub use newtypes::{FolderId, TestCaseId};
pub use payload::{PayloadBody, PayloadBuilder, StepEntry, TestCasePayload};
