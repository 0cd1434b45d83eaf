//! Port definitions (hexagonal architecture interfaces)
//!
//! This module defines the port traits that form the boundaries of the
//! hexagonal architecture. Ports are interfaces that the use cases depend
//! on, but whose implementations live in adapter crates.
//!
//! ## Ports Overview
//!
//! - [`ITestCatalog`] - Remote test-management catalog (folders, test cases)
//! - [`IDocumentParser`] - Turns a local specification file into a [`Document`]
//!
//! [`Document`]: crate::domain::Document

pub mod document_parser;
pub mod test_catalog;

pub use document_parser::IDocumentParser;
pub use test_catalog::{FolderPage, ITestCatalog};
