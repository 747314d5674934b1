//! Integration tests for the category tree endpoints.

mod helpers;

use axum::http::StatusCode;
use serde_json::json;

#[tokio::test]
async fn test_requests_without_actor_are_rejected() {
    let app = helpers::TestApp::new().await;

    let response = app.anonymous("GET", "/api/admin/categories").await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.body["error"], "UNAUTHORIZED");
}

#[tokio::test]
async fn test_health_is_public() {
    let app = helpers::TestApp::new().await;

    let response = app.anonymous("GET", "/api/health").await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.data()["status"], "ok");
    assert_eq!(response.data()["database"], "memory");
}

#[tokio::test]
async fn test_create_assigns_unique_slugs() {
    let app = helpers::TestApp::new().await;

    let first = app
        .request("POST", "/api/admin/categories", Some(json!({ "name": "Phones" })))
        .await;
    let second = app
        .request("POST", "/api/admin/categories", Some(json!({ "name": "Phones" })))
        .await;

    assert_eq!(first.status, StatusCode::CREATED);
    assert_eq!(first.data()["slug"], "phones");
    assert_eq!(second.data()["slug"], "phones-1");
}

#[tokio::test]
async fn test_explicit_slug_conflict() {
    let app = helpers::TestApp::new().await;
    app.create_category("Phones", None).await;

    let response = app
        .request(
            "POST",
            "/api/admin/categories",
            Some(json!({ "name": "Mobiles", "slug": "phones" })),
        )
        .await;

    assert_eq!(response.status, StatusCode::CONFLICT);
    assert_eq!(
        response.body["message"],
        "The slug 'phones' has already been taken."
    );
}

#[tokio::test]
async fn test_detail_has_path_and_breadcrumbs() {
    let app = helpers::TestApp::new().await;
    let electronics = app.create_category("Electronics", None).await;
    let phones = app.create_category("Phones", Some(electronics)).await;

    let response = app
        .request("GET", &format!("/api/admin/categories/{phones}"), None)
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.data()["path"], "Electronics > Phones");
    assert_eq!(response.data()["level"], 1);
    let crumbs = response.data()["breadcrumbs"].as_array().unwrap();
    assert_eq!(crumbs.len(), 2);
    assert_eq!(crumbs[0]["name"], "Electronics");
}

#[tokio::test]
async fn test_move_under_descendant_is_rejected() {
    let app = helpers::TestApp::new().await;
    let a = app.create_category("A", None).await;
    let b = app.create_category("B", Some(a)).await;

    let response = app
        .request(
            "PUT",
            &format!("/api/admin/categories/{a}/move"),
            Some(json!({ "parent_id": b })),
        )
        .await;

    assert_eq!(response.status, StatusCode::CONFLICT);
    assert_eq!(
        response.body["message"],
        "Cannot set a child category as parent."
    );

    let own = app
        .request(
            "PUT",
            &format!("/api/admin/categories/{a}/move"),
            Some(json!({ "parent_id": a })),
        )
        .await;
    assert_eq!(own.status, StatusCode::CONFLICT);
    assert_eq!(own.body["message"], "A category cannot be its own parent.");
}

#[tokio::test]
async fn test_delete_with_children_is_rejected() {
    let app = helpers::TestApp::new().await;
    let parent = app.create_category("Parent", None).await;
    let child = app.create_category("Child", Some(parent)).await;

    let blocked = app
        .request("DELETE", &format!("/api/admin/categories/{parent}"), None)
        .await;
    assert_eq!(blocked.status, StatusCode::CONFLICT);

    let leaf = app
        .request("DELETE", &format!("/api/admin/categories/{child}"), None)
        .await;
    assert_eq!(leaf.status, StatusCode::OK);

    let now_empty = app
        .request("DELETE", &format!("/api/admin/categories/{parent}"), None)
        .await;
    assert_eq!(now_empty.status, StatusCode::OK);

    let gone = app
        .request("GET", &format!("/api/admin/categories/{parent}"), None)
        .await;
    assert_eq!(gone.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_bulk_delete_is_all_or_nothing() {
    let app = helpers::TestApp::new().await;
    let parent = app.create_category("Parent", None).await;
    app.create_category("Child", Some(parent)).await;
    let lone = app.create_category("Lone", None).await;

    let response = app
        .request(
            "POST",
            "/api/admin/categories/bulk-delete",
            Some(json!({ "ids": [lone, parent] })),
        )
        .await;
    assert_eq!(response.status, StatusCode::CONFLICT);

    let still_there = app
        .request("GET", &format!("/api/admin/categories/{lone}"), None)
        .await;
    assert_eq!(still_there.status, StatusCode::OK);

    let ok = app
        .request(
            "POST",
            "/api/admin/categories/bulk-delete",
            Some(json!({ "ids": [lone] })),
        )
        .await;
    assert_eq!(ok.status, StatusCode::OK);
    assert_eq!(ok.data()["count"], 1);
}

#[tokio::test]
async fn test_list_filters_roots_and_reports_paths() {
    let app = helpers::TestApp::new().await;
    let electronics = app.create_category("Electronics", None).await;
    app.create_category("Phones", Some(electronics)).await;
    app.create_category("Books", None).await;

    let roots = app
        .request("GET", "/api/admin/categories?parent=root&order_by=name", None)
        .await;
    assert_eq!(roots.status, StatusCode::OK);
    let items = roots.data()["items"].as_array().unwrap();
    assert_eq!(items.len(), 2);
    assert_eq!(items[0]["name"], "Books");
    assert_eq!(items[1]["children_count"], 1);

    let search = app
        .request("GET", "/api/admin/categories?search=phon", None)
        .await;
    let items = search.data()["items"].as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["path"], "Electronics > Phones");
}

#[tokio::test]
async fn test_parent_options_exclude_subtree() {
    let app = helpers::TestApp::new().await;
    let a = app.create_category("A", None).await;
    app.create_category("B", Some(a)).await;
    app.create_category("C", None).await;

    let response = app
        .request("GET", &format!("/api/admin/categories/options?exclude={a}"), None)
        .await;

    assert_eq!(response.status, StatusCode::OK);
    let names: Vec<&str> = response.data().as_array().unwrap()
        .iter()
        .filter_map(|o| o["name"].as_str())
        .collect();
    assert_eq!(names, vec!["C"]);
}

#[tokio::test]
async fn test_validation_errors() {
    let app = helpers::TestApp::new().await;

    let empty = app
        .request("POST", "/api/admin/categories", Some(json!({ "name": "" })))
        .await;
    assert_eq!(empty.status, StatusCode::BAD_REQUEST);
    assert_eq!(empty.body["error"], "VALIDATION_ERROR");

    let negative = app
        .request(
            "POST",
            "/api/admin/categories",
            Some(json!({ "name": "X", "sort_order": -1 })),
        )
        .await;
    assert_eq!(negative.status, StatusCode::BAD_REQUEST);

    let missing_parent = app
        .request(
            "POST",
            "/api/admin/categories",
            Some(json!({ "name": "X", "parent_id": uuid::Uuid::new_v4() })),
        )
        .await;
    assert_eq!(missing_parent.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_update_order() {
    let app = helpers::TestApp::new().await;
    let a = app.create_category("A", None).await;
    let b = app.create_category("B", None).await;

    let response = app
        .request(
            "POST",
            "/api/admin/categories/update-order",
            Some(json!({ "items": [{ "id": a, "order": 5 }, { "id": b, "order": 1 }] })),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);

    let detail = app
        .request("GET", &format!("/api/admin/categories/{a}"), None)
        .await;
    assert_eq!(detail.data()["sort_order"], 5);
}

#[tokio::test]
async fn test_update_order_rejects_empty_and_unknown_ids() {
    let app = helpers::TestApp::new().await;
    let a = app.create_category("A", None).await;

    let empty = app
        .request(
            "POST",
            "/api/admin/categories/update-order",
            Some(json!({ "items": [] })),
        )
        .await;
    assert_eq!(empty.status, StatusCode::BAD_REQUEST);

    let unknown = app
        .request(
            "POST",
            "/api/admin/categories/update-order",
            Some(json!({ "items": [{ "id": a, "order": 3 }, { "id": uuid::Uuid::new_v4(), "order": 3 }] })),
        )
        .await;
    assert_eq!(unknown.status, StatusCode::NOT_FOUND);

    let detail = app
        .request("GET", &format!("/api/admin/categories/{a}"), None)
        .await;
    assert_eq!(detail.data()["sort_order"], 0);
}

#[tokio::test]
async fn test_huge_page_number_returns_empty_page() {
    let app = helpers::TestApp::new().await;
    app.create_category("Only", None).await;

    let response = app
        .request(
            "GET",
            &format!("/api/admin/categories?page={}", u64::MAX),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(response.data()["items"].as_array().unwrap().is_empty());
    assert_eq!(response.data()["total_items"], 1);
}
