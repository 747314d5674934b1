//! Integration tests for media folders and the media library.

mod helpers;

use axum::http::StatusCode;
use serde_json::json;

#[tokio::test]
async fn test_upload_image_generates_thumbnail() {
    let app = helpers::TestApp::new().await;

    let response = app
        .upload("photo.png", "image/png", &helpers::png_bytes(40, 20), None)
        .await;

    assert_eq!(response.status, StatusCode::CREATED, "{:?}", response.body);
    let data = response.data();
    assert_eq!(data["mime_type"], "image/png");
    assert_eq!(data["name"], "photo");
    assert_eq!(data["owner_id"], app.actor.to_string());
    assert!(data["thumb_url"].as_str().is_some());

    let storage_path = data["storage_path"].as_str().unwrap();
    assert!(app.payload_exists(storage_path));
    assert_eq!(
        data["url"].as_str().unwrap(),
        format!("/storage/{storage_path}")
    );
}

#[tokio::test]
async fn test_upload_limits() {
    let app = helpers::TestApp::new().await;

    let too_big = vec![b'a'; 70 * 1024];
    let response = app.upload("big.txt", "text/plain", &too_big, None).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(
        response.body["message"],
        "The file may not be greater than 64 kilobytes."
    );

    let missing_folder = app
        .upload("a.txt", "text/plain", b"hello", Some(uuid::Uuid::new_v4()))
        .await;
    assert_eq!(missing_folder.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_download_sets_headers() {
    let app = helpers::TestApp::new().await;
    let uploaded = app
        .upload("notes.txt", "text/plain", b"hello world", None)
        .await;
    let id = uploaded.id();

    let response = app
        .request("GET", &format!("/api/admin/media/{id}/download"), None)
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.bytes, b"hello world");
    let disposition = response.headers["content-disposition"].to_str().unwrap();
    assert_eq!(disposition, "attachment; filename=\"notes.txt\"");
}

#[tokio::test]
async fn test_folder_paths_follow_rename() {
    let app = helpers::TestApp::new().await;
    let images = app.create_folder("Images", None).await;
    let year = app.create_folder("2024", Some(images)).await;
    app.create_folder("January", Some(year)).await;

    let renamed = app
        .request(
            "PUT",
            &format!("/api/admin/media/folders/{images}"),
            Some(json!({ "name": "Media" })),
        )
        .await;
    assert_eq!(renamed.status, StatusCode::OK);
    assert_eq!(renamed.data()["path"], "Media");

    let below = app
        .request(
            "GET",
            &format!("/api/admin/media/folders/{images}/descendants"),
            None,
        )
        .await;
    let mut paths: Vec<&str> = below.data().as_array().unwrap()
        .iter()
        .filter_map(|f| f["path"].as_str())
        .collect();
    paths.sort();
    assert_eq!(paths, vec!["Media/2024", "Media/2024/January"]);
}

#[tokio::test]
async fn test_folder_guards() {
    let app = helpers::TestApp::new().await;
    let parent = app.create_folder("Parent", None).await;
    let child = app.create_folder("Child", Some(parent)).await;
    app.create_folder("Other", None).await;

    let into_child = app
        .request(
            "PUT",
            &format!("/api/admin/media/folders/{parent}/move"),
            Some(json!({ "parent_id": child })),
        )
        .await;
    assert_eq!(into_child.status, StatusCode::CONFLICT);
    assert_eq!(
        into_child.body["message"],
        "Cannot move a folder into one of its subfolders."
    );

    let duplicate = app
        .request(
            "POST",
            "/api/admin/media/folders",
            Some(json!({ "name": "Other" })),
        )
        .await;
    assert_eq!(duplicate.status, StatusCode::CONFLICT);
    assert_eq!(
        duplicate.body["message"],
        "A folder with this name already exists in this location."
    );
}

#[tokio::test]
async fn test_folder_delete_cascades_to_media_and_payloads() {
    let app = helpers::TestApp::new().await;
    let root = app.create_folder("Campaign", None).await;
    let sub = app.create_folder("Banners", Some(root)).await;

    let top = app
        .upload("cover.png", "image/png", &helpers::png_bytes(8, 8), Some(root))
        .await;
    let nested = app
        .upload("banner.txt", "text/plain", b"banner", Some(sub))
        .await;
    let top_id = top.id();
    let nested_path = nested.data()["storage_path"].as_str().unwrap().to_string();
    assert!(app.payload_exists(&nested_path));

    let response = app
        .request("DELETE", &format!("/api/admin/media/folders/{root}"), None)
        .await;

    assert_eq!(response.status, StatusCode::OK, "{:?}", response.body);
    assert_eq!(response.data()["folders_deleted"], 2);
    assert_eq!(response.data()["media_deleted"], 2);
    assert_eq!(response.data()["cleanup_failures"], 0);

    assert!(!app.payload_exists(&nested_path));
    assert!(!app.payload_exists(&top_id.to_string()));

    let gone = app
        .request("GET", &format!("/api/admin/media/{top_id}/download"), None)
        .await;
    assert_eq!(gone.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_folder_delete_with_missing_payload_and_empty_subfolder() {
    let app = helpers::TestApp::new().await;
    let folder = app.create_folder("Archive", None).await;
    let empty = app.create_folder("Empty", Some(folder)).await;

    let kept = app
        .upload("one.txt", "text/plain", b"one", Some(folder))
        .await;
    let lost = app
        .upload("two.txt", "text/plain", b"two", Some(folder))
        .await;
    let kept_path = kept.data()["storage_path"].as_str().unwrap().to_string();
    let lost_path = lost.data()["storage_path"].as_str().unwrap().to_string();
    std::fs::remove_file(app.media_dir.path().join(&lost_path)).unwrap();

    let response = app
        .request("DELETE", &format!("/api/admin/media/folders/{folder}"), None)
        .await;

    assert_eq!(response.status, StatusCode::OK, "{:?}", response.body);
    assert_eq!(response.data()["folders_deleted"], 2);
    assert_eq!(response.data()["media_deleted"], 2);
    assert!(!app.payload_exists(&kept_path));

    let tree = app.request("GET", "/api/admin/media/folders", None).await;
    assert!(!tree.body.to_string().contains(&empty.to_string()));
}

#[tokio::test]
async fn test_browse_lists_folders_and_filters_media() {
    let app = helpers::TestApp::new().await;
    let folder = app.create_folder("Docs", None).await;
    app.upload("logo.png", "image/png", &helpers::png_bytes(4, 4), None)
        .await;
    app.upload("readme.txt", "text/plain", b"read me", None).await;
    app.upload("inside.txt", "text/plain", b"inside", Some(folder))
        .await;

    let all = app.request("GET", "/api/admin/media", None).await;
    assert_eq!(all.status, StatusCode::OK);
    let items = all.data()["items"]["items"].as_array().unwrap();
    assert_eq!(items.len(), 3);
    assert_eq!(
        items.iter().filter(|e| e["type"] == "folder").count(),
        1
    );

    let images = app
        .request("GET", "/api/admin/media?type=image", None)
        .await;
    let items = images.data()["items"]["items"].as_array().unwrap();
    let files: Vec<&serde_json::Value> = items.iter().filter(|e| e["type"] == "file").collect();
    assert_eq!(files.len(), 1);
    assert_eq!(files[0]["name"], "logo");

    let in_folder = app
        .request("GET", &format!("/api/admin/media?folder={folder}"), None)
        .await;
    assert_eq!(in_folder.data()["current_folder"]["name"], "Docs");
    assert_eq!(in_folder.data()["items"]["items"].as_array().unwrap().len(), 1);

    let picker = app.request("GET", "/api/admin/media/picker", None).await;
    let files = picker.data()["items"].as_array().unwrap()
        .iter()
        .filter(|e| e["type"] == "file")
        .count();
    assert_eq!(files, 1);
}

#[tokio::test]
async fn test_move_and_delete_media() {
    let app = helpers::TestApp::new().await;
    let folder = app.create_folder("Archive", None).await;
    let uploaded = app.upload("old.txt", "text/plain", b"old", None).await;
    let id = uploaded.id();
    let storage_path = uploaded.data()["storage_path"].as_str().unwrap().to_string();

    let moved = app
        .request(
            "POST",
            &format!("/api/admin/media/{id}/move"),
            Some(json!({ "folder_id": folder })),
        )
        .await;
    assert_eq!(moved.status, StatusCode::OK);
    assert_eq!(moved.data()["folder_id"], folder.to_string());

    let deleted = app
        .request("DELETE", &format!("/api/admin/media/{id}"), None)
        .await;
    assert_eq!(deleted.status, StatusCode::OK);
    assert!(!app.payload_exists(&storage_path));
}
