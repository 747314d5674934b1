//! Shared test helpers for integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt;
use uuid::Uuid;

use contenthub_core::config::AppConfig;
use contenthub_core::traits::storage::MediaStorage;
use contenthub_database::Stores;
use contenthub_database::memory::MemoryDatabase;
use contenthub_storage::LocalMediaStorage;

/// Multipart boundary used by [`TestApp::upload`].
const BOUNDARY: &str = "contenthub-test-boundary";

/// Test application context
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// Payload storage root
    pub media_dir: TempDir,
    /// Shared in-memory tables
    pub db: MemoryDatabase,
    /// Actor sent on every authenticated request
    pub actor: Uuid,
}

/// Parsed response from the test app
#[derive(Debug)]
pub struct TestResponse {
    /// HTTP status
    pub status: StatusCode,
    /// JSON body, or `Value::Null` for non-JSON bodies
    pub body: Value,
    /// Raw body bytes
    pub bytes: Vec<u8>,
    /// Response headers
    pub headers: axum::http::HeaderMap,
}

impl TestResponse {
    /// The `data` member of a success envelope.
    pub fn data(&self) -> &Value {
        &self.body["data"]
    }

    /// The `data.id` member parsed as a UUID.
    pub fn id(&self) -> Uuid {
        self.data()["id"]
            .as_str()
            .and_then(|s| Uuid::parse_str(s).ok())
            .expect("response has no data.id")
    }
}

impl TestApp {
    /// Create a new test application over in-memory stores and a temp media root.
    pub async fn new() -> Self {
        let media_dir = TempDir::new().expect("Failed to create temp dir");

        let mut config = AppConfig::default();
        config.storage.media_root = media_dir.path().to_string_lossy().to_string();
        config.storage.max_upload_size_bytes = 64 * 1024;

        let db = MemoryDatabase::new();
        let stores = Stores::memory(db.clone());
        let storage: Arc<dyn MediaStorage> = Arc::new(
            LocalMediaStorage::new(media_dir.path())
                .await
                .expect("Failed to init storage"),
        );

        let state = contenthub_api::AppState::new(config, stores, storage);
        let router = contenthub_api::build_app(state);

        Self {
            router,
            media_dir,
            db,
            actor: Uuid::new_v4(),
        }
    }

    /// Make a JSON request as the test actor.
    pub async fn request(&self, method: &str, path: &str, body: Option<Value>) -> TestResponse {
        self.send(method, path, body, true).await
    }

    /// Make a JSON request without the actor header.
    pub async fn anonymous(&self, method: &str, path: &str) -> TestResponse {
        self.send(method, path, None, false).await
    }

    async fn send(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        with_actor: bool,
    ) -> TestResponse {
        let body_str = body
            .map(|b| serde_json::to_string(&b).expect("Failed to serialize body"))
            .unwrap_or_default();

        let mut req = Request::builder()
            .method(method)
            .uri(path)
            .header("Content-Type", "application/json");
        if with_actor {
            req = req.header("X-Actor-Id", self.actor.to_string());
        }

        let req = req
            .body(Body::from(body_str))
            .expect("Failed to build request");
        self.dispatch(req).await
    }

    /// Upload a file through the multipart endpoint.
    pub async fn upload(
        &self,
        file_name: &str,
        content_type: &str,
        data: &[u8],
        folder_id: Option<Uuid>,
    ) -> TestResponse {
        let mut body = Vec::new();
        if let Some(folder_id) = folder_id {
            body.extend_from_slice(
                format!(
                    "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"folder_id\"\r\n\r\n{folder_id}\r\n"
                )
                .as_bytes(),
            );
        }
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"{file_name}\"\r\nContent-Type: {content_type}\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(data);
        body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());

        let req = Request::builder()
            .method("POST")
            .uri("/api/admin/media")
            .header(
                "Content-Type",
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .header("X-Actor-Id", self.actor.to_string())
            .body(Body::from(body))
            .expect("Failed to build request");
        self.dispatch(req).await
    }

    async fn dispatch(&self, req: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let headers = response.headers().clone();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("Failed to read body")
            .to_vec();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);

        TestResponse {
            status,
            body,
            bytes,
            headers,
        }
    }

    /// Create a category and return its ID.
    pub async fn create_category(&self, name: &str, parent_id: Option<Uuid>) -> Uuid {
        let response = self
            .request(
                "POST",
                "/api/admin/categories",
                Some(serde_json::json!({ "name": name, "parent_id": parent_id })),
            )
            .await;
        assert_eq!(response.status, StatusCode::CREATED, "{:?}", response.body);
        response.id()
    }

    /// Create a media folder and return its ID.
    pub async fn create_folder(&self, name: &str, parent_id: Option<Uuid>) -> Uuid {
        let response = self
            .request(
                "POST",
                "/api/admin/media/folders",
                Some(serde_json::json!({ "name": name, "parent_id": parent_id })),
            )
            .await;
        assert_eq!(response.status, StatusCode::CREATED, "{:?}", response.body);
        response.id()
    }

    /// Whether a payload exists under the media root.
    pub fn payload_exists(&self, relative: &str) -> bool {
        self.media_dir.path().join(relative).exists()
    }
}

/// A small valid PNG.
pub fn png_bytes(width: u32, height: u32) -> Vec<u8> {
    let img = image::RgbImage::from_pixel(width, height, image::Rgb([200, 40, 40]));
    let mut out = std::io::Cursor::new(Vec::new());
    img.write_to(&mut out, image::ImageFormat::Png)
        .expect("Failed to encode png");
    out.into_inner()
}
