//! Document parser port (driven/secondary port)
//!
//! Parsing a specification file into a feature/scenario/step tree is the
//! job of an existing parser. The sync engine only consumes the fully
//! parsed feature document.

use std::path::Path;

use crate::domain::Document;

/// Port trait for parsing local specification files
pub trait IDocumentParser: Send + Sync {
    /// Parses the file at `path`
    ///
    /// # Returns
    /// `Ok(None)` when the file yields no feature document (e.g. it only
    /// contains comments), otherwise the parsed document.
    fn parse(&self, path: &Path) -> anyhow::Result<Option<Document>>;
}
