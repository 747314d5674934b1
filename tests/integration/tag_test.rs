//! Integration tests for the tag endpoints.

mod helpers;

use axum::http::StatusCode;
use serde_json::json;

#[tokio::test]
async fn test_tag_crud() {
    let app = helpers::TestApp::new().await;

    let created = app
        .request(
            "POST",
            "/api/admin/tags",
            Some(json!({ "name": "Rust & Go", "color": "#ff0000" })),
        )
        .await;
    assert_eq!(created.status, StatusCode::CREATED);
    assert_eq!(created.data()["slug"], "rust-and-go");
    let id = created.id();

    let updated = app
        .request(
            "PUT",
            &format!("/api/admin/tags/{id}"),
            Some(json!({ "name": "Rust" })),
        )
        .await;
    assert_eq!(updated.status, StatusCode::OK);
    assert_eq!(updated.data()["slug"], "rust");

    let deleted = app
        .request("DELETE", &format!("/api/admin/tags/{id}"), None)
        .await;
    assert_eq!(deleted.status, StatusCode::OK);

    let gone = app
        .request("GET", &format!("/api/admin/tags/{id}"), None)
        .await;
    assert_eq!(gone.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_duplicate_names_get_suffixes() {
    let app = helpers::TestApp::new().await;

    for expected in ["news", "news-1", "news-2"] {
        let response = app
            .request("POST", "/api/admin/tags", Some(json!({ "name": "News" })))
            .await;
        assert_eq!(response.data()["slug"], expected);
    }
}

#[tokio::test]
async fn test_list_filters_by_status() {
    let app = helpers::TestApp::new().await;
    app.request(
        "POST",
        "/api/admin/tags",
        Some(json!({ "name": "Live", "is_active": true })),
    )
    .await;
    app.request(
        "POST",
        "/api/admin/tags",
        Some(json!({ "name": "Hidden", "is_active": false })),
    )
    .await;

    let response = app
        .request("GET", "/api/admin/tags?status=inactive", None)
        .await;

    assert_eq!(response.status, StatusCode::OK);
    let items = response.data()["items"].as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["name"], "Hidden");
}

#[tokio::test]
async fn test_bulk_delete_requires_ids() {
    let app = helpers::TestApp::new().await;

    let response = app
        .request(
            "POST",
            "/api/admin/tags/bulk-delete",
            Some(json!({ "ids": [] })),
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_update_order_rejects_unknown_tag() {
    let app = helpers::TestApp::new().await;

    let response = app
        .request(
            "POST",
            "/api/admin/tags/update-order",
            Some(json!({ "items": [{ "id": uuid::Uuid::new_v4(), "order": 1 }] })),
        )
        .await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
}
