//! Shared helpers for sync engine integration tests

use std::path::{Path, PathBuf};
use std::sync::Arc;

use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use specsync_catalog::{CatalogClient, HttpTestCatalog};
use specsync_core::config::{ConfigBuilder, SyncConfig};
use specsync_sync::{GherkinParser, SyncEngine};

pub const PROJECT: &str = "PRJ";

pub const LOGIN_FEATURE: &str = "\
Feature: Login

  Scenario: Login — success
    Given a registered user
    When they sign in with a valid password
    Then the dashboard is shown

  Scenario: Login — failure
    Given a registered user
    When they sign in with a wrong password
    Then an error is shown
";

/// Project-scoped path
pub fn project_path(suffix: &str) -> String {
    format!("/projects/{PROJECT}{suffix}")
}

/// Sync policy with no settling delay, so tests run instantly
pub fn sync_config() -> ConfigBuilder {
    ConfigBuilder::new().sync_folder_creation_delay_ms(0)
}

/// Builds an engine wired to the mock server
pub fn engine(server: &MockServer, config: SyncConfig) -> SyncEngine {
    let client = CatalogClient::new(server.uri(), PROJECT, "ci-bot", "secret");
    SyncEngine::new(
        Arc::new(HttpTestCatalog::new(client)),
        Arc::new(GherkinParser::new()),
        config,
    )
}

/// Writes `content` to `root/relative`, creating parent directories
pub fn write_file(root: &Path, relative: &str, content: &str) -> PathBuf {
    let path = root.join(relative);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(&path, content).unwrap();
    path
}

/// Mounts a single-page folder listing (root when `parent` is `None`)
pub async fn mount_folder_listing(
    server: &MockServer,
    parent: Option<u64>,
    folders: serde_json::Value,
) {
    let listing_path = match parent {
        Some(id) => project_path(&format!("/folders/{id}/sub-folders")),
        None => project_path("/folders"),
    };
    Mock::given(method("GET"))
        .and(path(listing_path))
        .and(query_param("p", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "folders": folders,
            "info": { "next": null }
        })))
        .mount(server)
        .await;
}

/// Mounts a folder creation expected exactly `times` times
pub async fn mount_folder_creation(
    server: &MockServer,
    name: &str,
    parent: Option<u64>,
    id: u64,
    times: u64,
) {
    Mock::given(method("POST"))
        .and(path(project_path("/folders")))
        .and(body_json(serde_json::json!({
            "folder": {
                "name": name,
                "description": format!("Synchronized from {name}"),
                "parent_id": parent
            }
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({
            "folder": { "id": id, "name": name, "parent_id": parent }
        })))
        .expect(times)
        .mount(server)
        .await;
}

/// Mounts the test case listing of `folder`, expected exactly `times` times
pub async fn mount_test_case_listing(
    server: &MockServer,
    folder: u64,
    test_cases: serde_json::Value,
    times: u64,
) {
    Mock::given(method("GET"))
        .and(path(project_path("/test-cases")))
        .and(query_param("folder_id", folder.to_string()))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "test_cases": test_cases
        })))
        .expect(times)
        .mount(server)
        .await;
}

/// Mounts test case creation in `folder`, expected exactly `times` times
pub async fn mount_test_case_creation(server: &MockServer, folder: u64, times: u64) {
    Mock::given(method("POST"))
        .and(path(project_path(&format!("/folders/{folder}/test-cases"))))
        .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({
            "test_case": {
                "identifier": 500,
                "title": "created",
                "template": "bdd",
                "folder_id": folder
            }
        })))
        .expect(times)
        .mount(server)
        .await;
}
