//! End-to-end tests for the sync engine
//!
//! Each test builds a temporary feature tree, mounts the catalog endpoints
//! the run is expected to hit (with call counts), and checks the report.

use wiremock::matchers::{any, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use specsync_core::config::{ExistingTestCaseOption, TestCaseTemplate};
use specsync_core::domain::SyncError;

use crate::common::{self, project_path, LOGIN_FEATURE};

#[tokio::test]
async fn test_flat_document_creates_one_folder_and_two_test_cases() {
    let server = MockServer::start().await;
    let tree = tempfile::tempdir().unwrap();
    common::write_file(tree.path(), "login.feature", LOGIN_FEATURE);

    common::mount_folder_listing(&server, None, serde_json::json!([])).await;
    common::mount_folder_creation(&server, "login", None, 10, 1).await;
    common::mount_test_case_listing(&server, 10, serde_json::json!([]), 2).await;
    common::mount_test_case_creation(&server, 10, 2).await;

    let config = common::sync_config()
        .sync_existing_test_case_option(ExistingTestCaseOption::Skip)
        .sync_test_case_template(TestCaseTemplate::Bdd)
        .sync_preserve_directory_structure(false)
        .build();
    let report = common::engine(&server, config.sync)
        .sync(tree.path())
        .await
        .expect("sync failed");

    assert_eq!(report.documents, 1);
    assert_eq!(report.folders_created, 1);
    assert_eq!(report.test_cases_created, 2);
    assert_eq!(report.test_cases_skipped, 0);
}

#[tokio::test]
async fn test_second_run_creates_nothing() {
    let server = MockServer::start().await;
    let tree = tempfile::tempdir().unwrap();
    common::write_file(tree.path(), "login.feature", LOGIN_FEATURE);

    common::mount_folder_listing(
        &server,
        None,
        serde_json::json!([{"id": 10, "name": "login", "parent_id": null}]),
    )
    .await;
    common::mount_test_case_listing(
        &server,
        10,
        serde_json::json!([
            {"identifier": 100, "title": "Login — success", "template": "bdd", "folder_id": 10},
            {"identifier": 101, "title": "Login — failure", "template": "bdd", "folder_id": 10}
        ]),
        2,
    )
    .await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&server)
        .await;

    let config = common::sync_config().build();
    let report = common::engine(&server, config.sync)
        .sync(tree.path())
        .await
        .expect("sync failed");

    assert_eq!(report.folders_created, 0);
    assert_eq!(report.folders_reused, 1);
    assert_eq!(report.test_cases_skipped, 2);
    assert_eq!(report.test_cases_created, 0);
}

#[tokio::test]
async fn test_preserved_structure_nests_document_folder() {
    let server = MockServer::start().await;
    let tree = tempfile::tempdir().unwrap();
    common::write_file(tree.path(), "auth/login.feature", LOGIN_FEATURE);

    common::mount_folder_listing(&server, None, serde_json::json!([])).await;
    common::mount_folder_creation(&server, "auth", None, 20, 1).await;
    common::mount_folder_listing(&server, Some(20), serde_json::json!([])).await;
    common::mount_folder_creation(&server, "login", Some(20), 21, 1).await;
    common::mount_test_case_listing(&server, 21, serde_json::json!([]), 2).await;
    common::mount_test_case_creation(&server, 21, 2).await;

    let config = common::sync_config()
        .sync_preserve_directory_structure(true)
        .build();
    let report = common::engine(&server, config.sync)
        .sync(tree.path())
        .await
        .expect("sync failed");

    assert_eq!(report.folders_created, 2);
    assert_eq!(report.test_cases_created, 2);
}

#[tokio::test]
async fn test_flat_mode_does_not_mirror_directories() {
    let server = MockServer::start().await;
    let tree = tempfile::tempdir().unwrap();
    common::write_file(tree.path(), "auth/login.feature", LOGIN_FEATURE);

    common::mount_folder_listing(&server, None, serde_json::json!([])).await;
    common::mount_folder_creation(&server, "auth", None, 20, 0).await;
    common::mount_folder_creation(&server, "login", None, 10, 1).await;
    common::mount_test_case_listing(&server, 10, serde_json::json!([]), 2).await;
    common::mount_test_case_creation(&server, 10, 2).await;

    let config = common::sync_config()
        .sync_preserve_directory_structure(false)
        .build();
    let report = common::engine(&server, config.sync)
        .sync(tree.path())
        .await
        .expect("sync failed");

    assert_eq!(report.folders_created, 1);
}

#[tokio::test]
async fn test_root_folder_becomes_initial_parent() {
    let server = MockServer::start().await;
    let tree = tempfile::tempdir().unwrap();
    common::write_file(tree.path(), "login.feature", LOGIN_FEATURE);

    common::mount_folder_listing(
        &server,
        None,
        serde_json::json!([{"id": 5, "name": "BDD", "parent_id": null}]),
    )
    .await;
    common::mount_folder_listing(&server, Some(5), serde_json::json!([])).await;
    common::mount_folder_creation(&server, "login", Some(5), 6, 1).await;
    common::mount_test_case_listing(&server, 6, serde_json::json!([]), 2).await;
    common::mount_test_case_creation(&server, 6, 2).await;

    let config = common::sync_config().sync_root_folder("BDD").build();
    let report = common::engine(&server, config.sync)
        .sync(tree.path())
        .await
        .expect("sync failed");

    assert_eq!(report.folders_reused, 1);
    assert_eq!(report.folders_created, 1);
}

#[tokio::test]
async fn test_single_file_root_is_synchronized() {
    let server = MockServer::start().await;
    let tree = tempfile::tempdir().unwrap();
    let file = common::write_file(tree.path(), "login.feature", LOGIN_FEATURE);

    common::mount_folder_listing(&server, None, serde_json::json!([])).await;
    common::mount_folder_creation(&server, "login", None, 10, 1).await;
    common::mount_test_case_listing(&server, 10, serde_json::json!([]), 2).await;
    common::mount_test_case_creation(&server, 10, 2).await;

    let config = common::sync_config().build();
    let report = common::engine(&server, config.sync)
        .sync(&file)
        .await
        .expect("sync failed");

    assert_eq!(report.documents, 1);
}

#[tokio::test]
async fn test_other_files_are_ignored() {
    let server = MockServer::start().await;
    let tree = tempfile::tempdir().unwrap();
    common::write_file(tree.path(), "README.md", "# Features\n");
    common::write_file(tree.path(), "docs/notes.txt", "Feature: not really\n");

    Mock::given(any())
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(&server)
        .await;

    let config = common::sync_config().build();
    let report = common::engine(&server, config.sync)
        .sync(tree.path())
        .await
        .expect("sync failed");

    assert_eq!(report.documents, 0);
    assert_eq!(report.test_cases_total(), 0);
}

#[tokio::test]
async fn test_update_policy_patches_existing_test_case() {
    let server = MockServer::start().await;
    let tree = tempfile::tempdir().unwrap();
    common::write_file(
        tree.path(),
        "search.feature",
        "Feature: Search\n\n  Scenario: Empty query\n    Given the search page\n",
    );

    common::mount_folder_listing(
        &server,
        None,
        serde_json::json!([{"id": 30, "name": "search", "parent_id": null}]),
    )
    .await;
    common::mount_test_case_listing(
        &server,
        30,
        serde_json::json!([
            {"identifier": 300, "title": "Empty query", "template": "bdd", "folder_id": 30}
        ]),
        1,
    )
    .await;
    Mock::given(method("PATCH"))
        .and(path(project_path("/test-cases/300")))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let config = common::sync_config()
        .sync_existing_test_case_option(ExistingTestCaseOption::Update)
        .sync_test_case_template(TestCaseTemplate::Bdd)
        .build();
    let report = common::engine(&server, config.sync)
        .sync(tree.path())
        .await
        .expect("sync failed");

    assert_eq!(report.test_cases_updated, 1);
}

#[tokio::test]
async fn test_remote_failure_aborts_run() {
    let server = MockServer::start().await;
    let tree = tempfile::tempdir().unwrap();
    common::write_file(tree.path(), "login.feature", LOGIN_FEATURE);

    common::mount_folder_listing(&server, None, serde_json::json!([])).await;
    common::mount_folder_creation(&server, "login", None, 10, 1).await;
    common::mount_test_case_listing(&server, 10, serde_json::json!([]), 1).await;
    Mock::given(method("POST"))
        .and(path(project_path("/folders/10/test-cases")))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .expect(1)
        .mount(&server)
        .await;

    let config = common::sync_config().build();
    let err = common::engine(&server, config.sync)
        .sync(tree.path())
        .await
        .unwrap_err();

    assert!(matches!(err, SyncError::Catalog(_)));
    assert!(err.to_string().contains("500"));
}

#[tokio::test]
async fn test_parse_error_aborts_before_remote_calls() {
    let server = MockServer::start().await;
    let tree = tempfile::tempdir().unwrap();
    common::write_file(tree.path(), "broken.feature", "this is not gherkin\n");

    Mock::given(any())
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(&server)
        .await;

    let config = common::sync_config().build();
    let err = common::engine(&server, config.sync)
        .sync(tree.path())
        .await
        .unwrap_err();

    assert!(matches!(err, SyncError::Parse { .. }));
}

#[tokio::test]
async fn test_missing_root_is_io_error() {
    let server = MockServer::start().await;
    let tree = tempfile::tempdir().unwrap();

    let config = common::sync_config().build();
    let err = common::engine(&server, config.sync)
        .sync(&tree.path().join("absent"))
        .await
        .unwrap_err();

    assert!(matches!(err, SyncError::Io(_)));
}
