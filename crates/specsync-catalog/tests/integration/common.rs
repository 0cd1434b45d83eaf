//! Shared test helpers for catalog API integration tests
//!
//! Each helper mounts the necessary mock endpoints on a wiremock server.
//! Clients built here point at the mock server with fixed credentials.

use std::sync::Arc;

use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use specsync_catalog::{CatalogClient, HttpTestCatalog};

pub const PROJECT: &str = "PRJ";

/// `Basic` header for `ci-bot:secret`
pub const AUTH_HEADER: &str = "Basic Y2ktYm90OnNlY3JldA==";

/// Starts a mock server and returns a client pointing at it
pub async fn setup_catalog_mock() -> (MockServer, CatalogClient) {
    let server = MockServer::start().await;
    let client = CatalogClient::new(server.uri(), PROJECT, "ci-bot", "secret");
    (server, client)
}

/// Starts a mock server and returns the port adapter pointing at it
pub async fn setup_catalog_adapter() -> (MockServer, Arc<HttpTestCatalog>) {
    let (server, client) = setup_catalog_mock().await;
    (server, Arc::new(HttpTestCatalog::new(client)))
}

/// Project-scoped path
pub fn project_path(suffix: &str) -> String {
    format!("/projects/{PROJECT}{suffix}")
}

/// Mounts one page of the top-level folder listing
pub async fn mount_root_folder_page(
    server: &MockServer,
    page: u32,
    folders: serde_json::Value,
    next: Option<u32>,
) {
    Mock::given(method("GET"))
        .and(path(project_path("/folders")))
        .and(query_param("p", page.to_string()))
        .and(header("authorization", AUTH_HEADER))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "folders": folders,
            "info": { "next": next }
        })))
        .expect(1)
        .mount(server)
        .await;
}

/// Mounts a folder creation endpoint answering with the given folder
pub async fn mount_create_folder(server: &MockServer, id: u64, name: &str, parent: Option<u64>) {
    Mock::given(method("POST"))
        .and(path(project_path("/folders")))
        .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({
            "folder": { "id": id, "name": name, "parent_id": parent }
        })))
        .expect(1)
        .mount(server)
        .await;
}

/// Mounts the test case listing of one folder
pub async fn mount_test_case_list(server: &MockServer, folder: u64, test_cases: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path(project_path("/test-cases")))
        .and(query_param("folder_id", folder.to_string()))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "test_cases": test_cases
        })))
        .mount(server)
        .await;
}
