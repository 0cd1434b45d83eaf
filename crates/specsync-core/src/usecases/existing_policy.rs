//! Existing test case policy
//!
//! Decides what happens to a test case whose title already exists in the
//! destination folder: skip it, patch it, or delete and recreate it.

use std::sync::Arc;

use tracing::{debug, error, info, warn};

use super::catalog_failure;
use crate::config::{ExistingTestCaseOption, TestCaseTemplate};
use crate::domain::{PayloadBuilder, RemoteTestCase, SyncError, TemplateTag, TestCaseId};
use crate::ports::ITestCatalog;

/// What happened to a single scenario's test case
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TestCaseOutcome {
    /// No test case existed; a new one was created
    Created(TestCaseId),
    /// A test case existed and was left untouched
    Skipped(TestCaseId),
    /// A test case existed and was patched in place
    Updated(TestCaseId),
    /// A test case existed, was deleted, and was created again
    Recreated {
        deleted: TestCaseId,
        created: TestCaseId,
    },
    /// Update was requested but the existing test case uses another template
    TemplateMismatch {
        id: TestCaseId,
        found: TemplateTag,
        expected: TemplateTag,
    },
}

/// Policy applied to test cases found by title
pub struct ExistingEntityPolicy {
    catalog: Arc<dyn ITestCatalog + Send + Sync>,
    option: ExistingTestCaseOption,
    template: TestCaseTemplate,
}

impl ExistingEntityPolicy {
    /// Creates a new policy
    ///
    /// # Arguments
    ///
    /// * `catalog` - Remote catalog port
    /// * `option` - Configured behaviour for existing test cases
    /// * `template` - Configured test case template (drives the update check)
    pub fn new(
        catalog: Arc<dyn ITestCatalog + Send + Sync>,
        option: ExistingTestCaseOption,
        template: TestCaseTemplate,
    ) -> Self {
        Self {
            catalog,
            option,
            template,
        }
    }

    /// Applies the configured policy to `existing`
    ///
    /// - `skip`: no remote call
    /// - `update`: one PATCH, or none (with a warning) when the template differs
    /// - `delete`: one DELETE followed by one POST into the same folder
    ///
    /// Delete and recreate are not transactional. A failed recreation leaves
    /// the test case deleted and is reported as
    /// [`SyncError::TestCaseRecreation`].
    pub async fn handle_existing(
        &self,
        existing: &RemoteTestCase,
        scenario_name: &str,
        builder: &PayloadBuilder,
    ) -> Result<TestCaseOutcome, SyncError> {
        match self.option {
            ExistingTestCaseOption::Skip => {
                debug!(
                    test_case = %scenario_name,
                    id = %existing.id,
                    "Test case exists, skipping"
                );
                Ok(TestCaseOutcome::Skipped(existing.id.clone()))
            }
            ExistingTestCaseOption::Update => self.update(existing, scenario_name, builder).await,
            ExistingTestCaseOption::Delete => self.recreate(existing, scenario_name, builder).await,
        }
    }

    async fn update(
        &self,
        existing: &RemoteTestCase,
        scenario_name: &str,
        builder: &PayloadBuilder,
    ) -> Result<TestCaseOutcome, SyncError> {
        let expected = self.template.tag();
        if existing.template != expected {
            warn!(
                test_case = %scenario_name,
                id = %existing.id,
                found = %existing.template,
                expected = %expected,
                "Existing test case uses a different template, not updating"
            );
            return Ok(TestCaseOutcome::TemplateMismatch {
                id: existing.id.clone(),
                found: existing.template,
                expected,
            });
        }

        let payload = builder.for_update();
        self.catalog
            .update_test_case(&existing.id, &payload)
            .await
            .map_err(|e| {
                catalog_failure(
                    e,
                    format!("Failed to update test case '{scenario_name}' ({})", existing.id),
                )
            })?;

        info!(test_case = %scenario_name, id = %existing.id, "Updated test case");
        Ok(TestCaseOutcome::Updated(existing.id.clone()))
    }

    async fn recreate(
        &self,
        existing: &RemoteTestCase,
        scenario_name: &str,
        builder: &PayloadBuilder,
    ) -> Result<TestCaseOutcome, SyncError> {
        self.catalog
            .delete_test_case(&existing.id)
            .await
            .map_err(|e| {
                catalog_failure(
                    e,
                    format!("Failed to delete test case '{scenario_name}' ({})", existing.id),
                )
            })?;

        info!(test_case = %scenario_name, id = %existing.id, "Deleted test case");

        let payload = builder.for_folder(existing.folder_id);
        let created = self
            .catalog
            .create_test_case(&existing.folder_id, &payload)
            .await
            .map_err(|e| {
                catalog_failure(
                    e,
                    format!(
                        "Test case '{scenario_name}' ({}) was deleted but recreating it failed",
                        existing.id
                    ),
                )
            })?;

        let Some(created) = created else {
            error!(
                test_case = %scenario_name,
                deleted_id = %existing.id,
                "Recreate response did not contain a test case; the test case is now missing"
            );
            return Err(SyncError::TestCaseRecreation {
                title: scenario_name.to_string(),
                deleted_id: existing.id.to_string(),
            });
        };

        info!(
            test_case = %scenario_name,
            deleted = %existing.id,
            created = %created.id,
            "Recreated test case"
        );
        Ok(TestCaseOutcome::Recreated {
            deleted: existing.id.clone(),
            created: created.id,
        })
    }
}
