//! Integration tests for the folder endpoints
//!
//! Covers listing (root and sub-folders), creation, status mapping and the
//! folder resolver running against the HTTP adapter.

use std::time::Duration;

use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, ResponseTemplate};

use specsync_catalog::CatalogError;
use specsync_core::domain::{FolderId, NewFolder};
use specsync_core::usecases::FolderResolver;

use crate::common::{self, project_path};

#[tokio::test]
async fn test_list_root_folders_returns_page_and_cursor() {
    let (server, client) = common::setup_catalog_mock().await;
    common::mount_root_folder_page(
        &server,
        1,
        serde_json::json!([
            {"id": 1, "name": "login", "parent_id": null},
            {"id": 2, "name": "checkout", "parent_id": null}
        ]),
        Some(2),
    )
    .await;

    let page = client.list_folders(None, 1).await.expect("list_folders failed");

    assert_eq!(page.folders.len(), 2);
    assert_eq!(page.folders[0].name, "login");
    assert_eq!(page.folders[0].parent_id, None);
    assert_eq!(page.next_page, Some(2));
}

#[tokio::test]
async fn test_list_sub_folders_uses_parent_path() {
    let (server, client) = common::setup_catalog_mock().await;
    Mock::given(method("GET"))
        .and(path(project_path("/folders/7/sub-folders")))
        .and(query_param("p", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "folders": [{"id": 8, "name": "checkout"}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let parent = FolderId::new(7);
    let page = client
        .list_folders(Some(&parent), 1)
        .await
        .expect("list_folders failed");

    assert_eq!(page.folders.len(), 1);
    assert_eq!(page.folders[0].parent_id, Some(parent));
    assert_eq!(page.next_page, None);
}

#[tokio::test]
async fn test_create_folder_sends_wrapped_body() {
    let (server, client) = common::setup_catalog_mock().await;
    Mock::given(method("POST"))
        .and(path(project_path("/folders")))
        .and(body_json(serde_json::json!({
            "folder": {
                "name": "login",
                "description": "Synchronized from login",
                "parent_id": null
            }
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({
            "folder": {"id": 42, "name": "login", "parent_id": null}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let created = client
        .create_folder(&NewFolder::new("login", None))
        .await
        .expect("create_folder failed")
        .expect("response should contain the folder");

    assert_eq!(created.id, FolderId::new(42));
    assert_eq!(created.name, "login");
}

#[tokio::test]
async fn test_create_folder_without_folder_in_response() {
    let (server, client) = common::setup_catalog_mock().await;
    Mock::given(method("POST"))
        .and(path(project_path("/folders")))
        .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({})))
        .mount(&server)
        .await;

    let created = client
        .create_folder(&NewFolder::new("login", None))
        .await
        .expect("create_folder failed");

    assert!(created.is_none());
}

#[tokio::test]
async fn test_unauthorized_is_mapped() {
    let (server, client) = common::setup_catalog_mock().await;
    Mock::given(method("GET"))
        .and(path(project_path("/folders")))
        .respond_with(ResponseTemplate::new(401).set_body_string("invalid credentials"))
        .mount(&server)
        .await;

    let err = client.list_folders(None, 1).await.unwrap_err();
    assert!(matches!(err, CatalogError::Unauthorized(ref body) if body == "invalid credentials"));
}

#[tokio::test]
async fn test_server_error_is_mapped_without_retry() {
    let (server, client) = common::setup_catalog_mock().await;
    Mock::given(method("GET"))
        .and(path(project_path("/folders")))
        .respond_with(ResponseTemplate::new(503))
        .expect(1)
        .mount(&server)
        .await;

    let err = client.list_folders(None, 1).await.unwrap_err();
    assert!(matches!(err, CatalogError::ServerError { status: 503, .. }));
}

#[tokio::test]
async fn test_malformed_body_is_invalid_response() {
    let (server, client) = common::setup_catalog_mock().await;
    Mock::given(method("GET"))
        .and(path(project_path("/folders")))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
        .mount(&server)
        .await;

    let err = client.list_folders(None, 1).await.unwrap_err();
    assert!(matches!(err, CatalogError::InvalidResponse(_)));
}

#[tokio::test]
async fn test_resolver_aggregates_pages_over_http() {
    let (server, catalog) = common::setup_catalog_adapter().await;
    common::mount_root_folder_page(
        &server,
        1,
        serde_json::json!([{"id": 1, "name": "alpha", "parent_id": null}]),
        Some(2),
    )
    .await;
    common::mount_root_folder_page(
        &server,
        2,
        serde_json::json!([{"id": 2, "name": "login", "parent_id": null}]),
        None,
    )
    .await;

    let resolver = FolderResolver::new(catalog, Duration::ZERO);
    let resolved = resolver
        .ensure_folder("login", None)
        .await
        .expect("ensure_folder failed");

    assert_eq!(resolved.id, FolderId::new(2));
    assert!(!resolved.created);
}

#[tokio::test]
async fn test_resolver_creates_after_empty_page() {
    let (server, catalog) = common::setup_catalog_adapter().await;
    common::mount_root_folder_page(&server, 1, serde_json::json!([]), Some(2)).await;
    common::mount_create_folder(&server, 77, "login", None).await;

    let resolver = FolderResolver::new(catalog, Duration::ZERO);
    let resolved = resolver
        .ensure_folder("login", None)
        .await
        .expect("ensure_folder failed");

    assert_eq!(resolved.id, FolderId::new(77));
    assert!(resolved.created);
}
