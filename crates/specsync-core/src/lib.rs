//! SpecSync Core - Domain logic and reconciliation rules
//!
//! This crate contains the hexagonal architecture core with:
//! - **Domain entities** - `Document`, `Scenario`, `Step`, `RemoteFolder`, `RemoteTestCase`
//! - **Payload builder** - converts a scenario into a remote test-case payload
//! - **Use cases** - `FolderResolver`, `TestCaseResolver`, `ExistingEntityPolicy`
//! - **Port definitions** - Traits for adapters: `ITestCatalog`, `IDocumentParser`
//!
//! # Architecture
//!
//! The domain module contains pure data and payload rendering with no I/O.
//! Ports define trait interfaces that adapter crates implement.
//! Use cases orchestrate the remote catalog through port interfaces.

pub mod config;
pub mod domain;
pub mod ports;
pub mod usecases;
