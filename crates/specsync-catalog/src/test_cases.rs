//! Test case endpoints
//!
//! - `GET /test-cases?folder_id={f}` lists a folder's test cases (unpaginated)
//! - `POST /folders/{f}/test-cases` creates a test case
//! - `PATCH /test-cases/{id}` updates a test case
//! - `DELETE /test-cases/{id}` deletes a test case
//!
//! Create and update bodies wrap the payload as `{"test_case": {...}}`.

use reqwest::Method;
use serde::{Deserialize, Serialize};
use specsync_core::domain::{FolderId, RemoteTestCase, TemplateTag, TestCaseId, TestCasePayload};
use tracing::debug;

use crate::client::CatalogClient;
use crate::CatalogError;

// ============================================================================
// Wire types
// ============================================================================

/// Test case object as the API returns it
///
/// `identifier` may be a number or a key such as `"TC-16"`. A missing or
/// null `template` reads as [`TemplateTag::Other`].
#[derive(Debug, Deserialize)]
struct TestCaseDto {
    identifier: TestCaseId,
    title: String,
    #[serde(default)]
    template: Option<TemplateTag>,
    #[serde(default)]
    folder_id: Option<u64>,
}

impl TestCaseDto {
    fn into_remote(self, folder: &FolderId) -> RemoteTestCase {
        RemoteTestCase {
            id: self.identifier,
            title: self.title,
            template: self.template.unwrap_or(TemplateTag::Other),
            folder_id: self.folder_id.map(FolderId::new).unwrap_or(*folder),
        }
    }
}

#[derive(Debug, Deserialize)]
struct TestCaseListResponse {
    #[serde(default)]
    test_cases: Vec<TestCaseDto>,
}

#[derive(Debug, Serialize)]
struct TestCaseRequest<'a> {
    test_case: &'a TestCasePayload,
}

#[derive(Debug, Deserialize)]
struct TestCaseResponse {
    #[serde(default)]
    test_case: Option<TestCaseDto>,
}

// ============================================================================
// Endpoints
// ============================================================================

impl CatalogClient {
    /// Lists every test case in `folder`
    pub async fn list_test_cases(
        &self,
        folder: &FolderId,
    ) -> Result<Vec<RemoteTestCase>, CatalogError> {
        debug!(folder = %folder, "Listing test cases");

        let response: TestCaseListResponse = self
            .execute_json(
                self.request(Method::GET, "/test-cases")
                    .query(&[("folder_id", folder.get())]),
            )
            .await?;

        Ok(response
            .test_cases
            .into_iter()
            .map(|t| t.into_remote(folder))
            .collect())
    }

    /// Creates a test case inside `folder`
    ///
    /// Returns `Ok(None)` when the response body lacks the created test case.
    pub async fn create_test_case(
        &self,
        folder: &FolderId,
        payload: &TestCasePayload,
    ) -> Result<Option<RemoteTestCase>, CatalogError> {
        let path = format!("/folders/{folder}/test-cases");
        debug!(folder = %folder, title = %payload.title, "Creating test case");

        let response: TestCaseResponse = self
            .execute_json(
                self.request(Method::POST, &path)
                    .json(&TestCaseRequest { test_case: payload }),
            )
            .await?;

        Ok(response.test_case.map(|t| t.into_remote(folder)))
    }

    /// Patches an existing test case; the response body is ignored
    pub async fn update_test_case(
        &self,
        id: &TestCaseId,
        payload: &TestCasePayload,
    ) -> Result<(), CatalogError> {
        let path = format!("/test-cases/{id}");
        debug!(id = %id, title = %payload.title, "Updating test case");

        self.execute(
            self.request(Method::PATCH, &path)
                .json(&TestCaseRequest { test_case: payload }),
        )
        .await?;
        Ok(())
    }

    /// Deletes a test case
    pub async fn delete_test_case(&self, id: &TestCaseId) -> Result<(), CatalogError> {
        let path = format!("/test-cases/{id}");
        debug!(id = %id, "Deleting test case");

        self.execute(self.request(Method::DELETE, &path)).await?;
        Ok(())
    }
}
