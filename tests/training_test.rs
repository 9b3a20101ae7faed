//! Integration tests for training documents.

mod helpers;

use http::StatusCode;
use serde_json::json;

use helpers::{TestApp, titles};

async fn training_tree(app: &TestApp) -> serde_json::Value {
    let response = app
        .request("GET", "/api/training", None, Some(&app.teacher_token()))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    response.body
}

#[tokio::test]
async fn test_create_training_defaults() {
    let app = TestApp::new();
    let folder = app.create_folder("Onboarding", None).await;

    let response = app
        .request(
            "POST",
            "/api/admin/training",
            Some(json!({
                "title": "Classroom Safety",
                "fileUrl": "/uploads/safety.pdf",
                "fileSize": 1024,
                "folderId": folder,
                "requirements": "None",
            })),
            Some(&app.admin_token()),
        )
        .await;

    assert_eq!(response.status, StatusCode::CREATED);
    assert_eq!(response.body["type"], "TRAINING");
    assert_eq!(response.body["skillLevel"], 1);
    assert_eq!(response.body["ord"], 0);
    assert_eq!(response.body["folderId"], folder.as_str());

    let tree = training_tree(&app).await;
    assert_eq!(titles(&tree[0]), vec!["Classroom Safety"]);
}

#[tokio::test]
async fn test_create_training_validation() {
    let app = TestApp::new();
    let token = app.admin_token();

    let long_requirements = app
        .request(
            "POST",
            "/api/admin/training",
            Some(json!({
                "title": "Advanced",
                "fileUrl": "/uploads/advanced.pdf",
                "fileSize": 10,
                "requirements": "x".repeat(41),
            })),
            Some(&token),
        )
        .await;
    let bad_skill = app
        .request(
            "POST",
            "/api/admin/training",
            Some(json!({
                "title": "Expert",
                "fileUrl": "/uploads/expert.pdf",
                "fileSize": 10,
                "skillLevel": 6,
            })),
            Some(&token),
        )
        .await;
    let missing_folder = app
        .request(
            "POST",
            "/api/admin/training",
            Some(json!({
                "title": "Lost",
                "fileUrl": "/uploads/lost.pdf",
                "fileSize": 10,
                "folderId": uuid::Uuid::new_v4(),
            })),
            Some(&token),
        )
        .await;

    assert_eq!(long_requirements.status, StatusCode::BAD_REQUEST);
    assert_eq!(bad_skill.status, StatusCode::BAD_REQUEST);
    assert_eq!(missing_folder.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_malformed_json() {
    let app = TestApp::new();

    let response = app
        .request_raw(
            "POST",
            "/api/admin/training/reorder",
            "{\"folderId\": ",
            Some(&app.admin_token()),
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_size_read_from_upload_dir() {
    let app = TestApp::new();
    std::fs::write(app.upload_dir.join("rubric.pdf"), vec![0u8; 512]).unwrap();

    let response = app
        .request(
            "POST",
            "/api/admin/training",
            Some(json!({ "title": "Rubric", "fileUrl": "/uploads/rubric.pdf" })),
            Some(&app.admin_token()),
        )
        .await;

    assert_eq!(response.status, StatusCode::CREATED);
    assert_eq!(response.body["fileSize"], 512);
}

#[tokio::test]
async fn test_step_document_without_folder() {
    let app = TestApp::new();
    let id = app.create_document("Loose", None).await;

    let response = app
        .request(
            "POST",
            "/api/admin/training/reorder-single",
            Some(json!({ "documentId": id, "direction": "down" })),
            Some(&app.admin_token()),
        )
        .await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_step_document_bootstrap_then_swap() {
    let app = TestApp::new();
    let token = app.admin_token();
    let folder = app.create_folder("Literacy", None).await;
    let first = app.create_document("First", Some(&folder)).await;
    app.create_document("Second", Some(&folder)).await;

    for _ in 0..2 {
        let response = app
            .request(
                "POST",
                "/api/admin/training/reorder-single",
                Some(json!({ "documentId": first, "direction": "up" })),
                Some(&token),
            )
            .await;
        assert_eq!(response.status, StatusCode::OK);
    }

    let tree = training_tree(&app).await;
    assert_eq!(titles(&tree[0]), vec!["First", "Second"]);
}

#[tokio::test]
async fn test_bulk_reorder_documents() {
    let app = TestApp::new();
    let folder = app.create_folder("Science", None).await;
    let a = app.create_document("Atoms", Some(&folder)).await;
    let b = app.create_document("Biology", Some(&folder)).await;
    let c = app.create_document("Chemistry", Some(&folder)).await;

    let response = app
        .request(
            "POST",
            "/api/admin/training/reorder",
            Some(json!({ "folderId": folder, "documentIds": [b, c, a] })),
            Some(&app.admin_token()),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    let tree = training_tree(&app).await;
    assert_eq!(titles(&tree[0]), vec!["Biology", "Chemistry", "Atoms"]);
}

#[tokio::test]
async fn test_bulk_reorder_duplicate_ids() {
    let app = TestApp::new();
    let folder = app.create_folder("Science", None).await;
    let a = app.create_document("Atoms", Some(&folder)).await;

    let response = app
        .request(
            "POST",
            "/api/admin/training/reorder",
            Some(json!({ "folderId": folder, "documentIds": [a, a] })),
            Some(&app.admin_token()),
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_move_document_appends() {
    let app = TestApp::new();
    let token = app.admin_token();
    let source = app.create_folder("Source", None).await;
    let target = app.create_folder("Target", None).await;
    app.create_document("Existing", Some(&target)).await;
    let moving = app.create_document("Moving", Some(&source)).await;

    let response = app
        .request(
            "POST",
            "/api/admin/training/move",
            Some(json!({ "documentId": moving, "targetFolderId": target })),
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);

    let tree = training_tree(&app).await;
    assert!(titles(&tree[0]).is_empty());
    assert_eq!(titles(&tree[1]), vec!["Existing", "Moving"]);
    assert_eq!(tree[1]["documents"][1]["ord"], 1);

    let missing = app
        .request(
            "POST",
            "/api/admin/training/move",
            Some(json!({ "documentId": moving, "targetFolderId": uuid::Uuid::new_v4() })),
            Some(&token),
        )
        .await;
    assert_eq!(missing.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_document() {
    let app = TestApp::new();
    let token = app.admin_token();
    std::fs::write(app.upload_dir.join("handout.pdf"), b"%PDF-1.7").unwrap();
    let created = app
        .request(
            "POST",
            "/api/admin/training",
            Some(json!({ "title": "Handout", "fileUrl": "/uploads/handout.pdf" })),
            Some(&token),
        )
        .await;
    let id = helpers::id_of(&created.body);

    let response = app
        .request("DELETE", &format!("/api/admin/documents/{id}"), None, Some(&token))
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["success"], true);
    assert!(!app.upload_dir.join("handout.pdf").exists());
    let listed = app
        .request("GET", "/api/admin/training", None, Some(&token))
        .await;
    assert!(listed.body.as_array().unwrap().is_empty());
}
