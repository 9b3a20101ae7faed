//! Shared test helpers for integration tests.

#![allow(dead_code)]

use std::path::PathBuf;

use axum::Router;
use axum::body::Body;
use http::{Request, StatusCode};
use serde_json::Value;
use tower::ServiceExt;
use uuid::Uuid;

use edudash_api::{AppState, build_app};
use edudash_auth::jwt::JwtEncoder;
use edudash_core::config::AppConfig;
use edudash_database::{MemoryStore, Stores};
use edudash_entity::user::UserRole;

/// Test application context backed by the in-memory store.
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// Application config
    pub config: AppConfig,
    /// Upload directory used by the document service
    pub upload_dir: PathBuf,
    encoder: JwtEncoder,
}

/// Simplified test response
pub struct TestResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Response body as JSON (`Null` when empty)
    pub body: Value,
}

impl TestApp {
    /// Create a new test application with an empty library.
    pub fn new() -> Self {
        let upload_dir = std::env::temp_dir().join(format!("edudash-test-{}", Uuid::new_v4()));
        std::fs::create_dir_all(&upload_dir).expect("Failed to create upload dir");

        let mut config = AppConfig::default();
        config.database.provider = "memory".to_string();
        config.auth.jwt_secret = "integration-test-secret".to_string();
        config.storage.upload_dir = upload_dir.to_string_lossy().into_owned();

        let state = AppState::new(config.clone(), Stores::in_memory(MemoryStore::new()));
        let router = build_app(state, &config.server.cors);
        let encoder = JwtEncoder::new(&config.auth);

        Self {
            router,
            config,
            upload_dir,
            encoder,
        }
    }

    /// A token for a freshly generated user with the given role.
    pub fn token_for(&self, role: UserRole) -> String {
        let (token, _) = self
            .encoder
            .generate_token(Uuid::new_v4(), role, "Test User")
            .expect("Failed to sign token");
        token
    }

    /// An administrator token.
    pub fn admin_token(&self) -> String {
        self.token_for(UserRole::Admin)
    }

    /// A teacher token.
    pub fn teacher_token(&self) -> String {
        self.token_for(UserRole::Teacher)
    }

    /// Make a JSON request to the app.
    pub async fn request(
        &self,
        method: &str,
        uri: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> TestResponse {
        let body = match body {
            Some(value) => Body::from(serde_json::to_vec(&value).expect("Failed to encode body")),
            None => Body::empty(),
        };
        self.send(method, uri, body, token).await
    }

    /// Make a request with a raw, possibly malformed, JSON body.
    pub async fn request_raw(
        &self,
        method: &str,
        uri: &str,
        body: &str,
        token: Option<&str>,
    ) -> TestResponse {
        self.send(method, uri, Body::from(body.to_string()), token)
            .await
    }

    async fn send(&self, method: &str, uri: &str, body: Body, token: Option<&str>) -> TestResponse {
        let mut builder = Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json");
        if let Some(token) = token {
            builder = builder.header("authorization", format!("Bearer {token}"));
        }
        let request = builder.body(body).expect("Failed to build request");

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Router call failed");

        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("Failed to read body");
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };

        TestResponse { status, body }
    }

    /// Create a folder as admin and return its id.
    pub async fn create_folder(&self, name: &str, parent_id: Option<&str>) -> String {
        let response = self
            .request(
                "POST",
                "/api/admin/folders",
                Some(serde_json::json!({ "name": name, "parentId": parent_id })),
                Some(&self.admin_token()),
            )
            .await;
        assert_eq!(response.status, StatusCode::CREATED, "{}", response.body);
        id_of(&response.body)
    }

    /// Create a training document as admin and return its id.
    pub async fn create_document(&self, title: &str, folder_id: Option<&str>) -> String {
        let response = self
            .request(
                "POST",
                "/api/admin/training",
                Some(serde_json::json!({
                    "title": title,
                    "fileUrl": format!("/uploads/{}.pdf", Uuid::new_v4()),
                    "fileSize": 2048,
                    "folderId": folder_id,
                })),
                Some(&self.admin_token()),
            )
            .await;
        assert_eq!(response.status, StatusCode::CREATED, "{}", response.body);
        id_of(&response.body)
    }

    /// The folder tree as seen by an admin.
    pub async fn folder_tree(&self) -> Value {
        let response = self
            .request("GET", "/api/folders", None, Some(&self.admin_token()))
            .await;
        assert_eq!(response.status, StatusCode::OK);
        response.body
    }
}

impl Drop for TestApp {
    fn drop(&mut self) {
        let _ = std::fs::remove_dir_all(&self.upload_dir);
    }
}

/// The `id` field of a JSON object.
pub fn id_of(value: &Value) -> String {
    value["id"]
        .as_str()
        .expect("Response has no id")
        .to_string()
}

/// The `name` of every node in a tree level.
pub fn names(nodes: &Value) -> Vec<String> {
    nodes
        .as_array()
        .expect("Expected an array")
        .iter()
        .map(|n| n["name"].as_str().unwrap_or_default().to_string())
        .collect()
}

/// The `title` of every document attached to a tree node.
pub fn titles(node: &Value) -> Vec<String> {
    node["documents"]
        .as_array()
        .expect("Expected a document array")
        .iter()
        .map(|d| d["title"].as_str().unwrap_or_default().to_string())
        .collect()
}
