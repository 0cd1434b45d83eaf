//! Integration tests for specsync-sync
//!
//! Runs the sync engine over temporary feature trees against a wiremock
//! catalog and verifies exactly which remote calls each run issues.

mod common;

mod test_engine;
