//! SpecSync Sync - feature tree synchronization engine
//!
//! Provides:
//! - Depth-first walk of a local tree of feature files
//! - Optional mirroring of local directories as remote folders
//! - Gherkin parsing of feature files into domain documents
//!
//! ## Modules
//!
//! - [`engine`] - Tree walker driving the folder and test case use cases
//! - [`parser`] - Gherkin adapter for the document parser port

pub mod engine;
pub mod parser;

pub use engine::{SyncEngine, SyncReport};
pub use parser::GherkinParser;
