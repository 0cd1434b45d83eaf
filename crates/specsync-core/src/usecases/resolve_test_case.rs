//! Test case resolution use case
//!
//! Looks up a scenario's test case by exact title inside its folder and
//! either creates it or hands the existing one to the
//! [`ExistingEntityPolicy`].

use std::sync::Arc;

use tracing::{debug, error, info};

use super::catalog_failure;
use super::existing_policy::{ExistingEntityPolicy, TestCaseOutcome};
use crate::config::SyncConfig;
use crate::domain::{FolderId, PayloadBuilder, SyncError};
use crate::ports::ITestCatalog;

/// Use case for find-or-create of remote test cases
pub struct TestCaseResolver {
    catalog: Arc<dyn ITestCatalog + Send + Sync>,
    policy: ExistingEntityPolicy,
}

impl TestCaseResolver {
    /// Creates a new TestCaseResolver
    ///
    /// # Arguments
    ///
    /// * `catalog` - Remote catalog port
    /// * `policy` - Policy applied when the test case already exists
    pub fn new(catalog: Arc<dyn ITestCatalog + Send + Sync>, policy: ExistingEntityPolicy) -> Self {
        Self { catalog, policy }
    }

    /// Creates a resolver whose policy follows the sync configuration
    pub fn from_config(catalog: Arc<dyn ITestCatalog + Send + Sync>, sync: &SyncConfig) -> Self {
        let policy = ExistingEntityPolicy::new(
            catalog.clone(),
            sync.existing_test_case_option,
            sync.test_case_template,
        );
        Self::new(catalog, policy)
    }

    /// Ensures the scenario named `scenario_name` has a test case in `folder`
    ///
    /// # Errors
    ///
    /// - [`SyncError::Catalog`] when a remote call fails
    /// - [`SyncError::TestCaseCreation`] when the create response lacks the test case
    /// - Any error raised by the existing-entity policy
    pub async fn resolve(
        &self,
        folder: &FolderId,
        scenario_name: &str,
        builder: &PayloadBuilder,
    ) -> Result<TestCaseOutcome, SyncError> {
        let test_cases = self
            .catalog
            .list_test_cases(folder)
            .await
            .map_err(|e| catalog_failure(e, format!("Failed to list test cases in folder {folder}")))?;

        debug!(folder = %folder, count = test_cases.len(), "Listed test cases");

        if let Some(existing) = test_cases.iter().find(|t| t.title == scenario_name) {
            debug!(test_case = %scenario_name, id = %existing.id, "Found existing test case");
            return self
                .policy
                .handle_existing(existing, scenario_name, builder)
                .await;
        }

        let payload = builder.for_folder(*folder);
        let created = self
            .catalog
            .create_test_case(folder, &payload)
            .await
            .map_err(|e| catalog_failure(e, format!("Failed to create test case '{scenario_name}'")))?;

        let Some(created) = created else {
            error!(
                test_case = %scenario_name,
                folder = %folder,
                "Create test case response did not contain a test case"
            );
            return Err(SyncError::TestCaseCreation {
                title: scenario_name.to_string(),
            });
        };

        info!(
            test_case = %scenario_name,
            id = %created.id,
            folder = %folder,
            "Created test case"
        );
        Ok(TestCaseOutcome::Created(created.id))
    }
}
