//! Admin training document handlers.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;

use edudash_core::error::AppError;
use edudash_entity::document::Document;

use crate::dto::request::{
    CreateTrainingDocumentRequest, MoveDocumentRequest, ReorderDocumentsRequest,
    StepDocumentRequest,
};
use crate::dto::response::SuccessResponse;
use crate::extractors::{AuthUser, ValidatedJson};
use crate::state::AppState;

/// GET /api/admin/training
pub async fn list_training(
    State(state): State<AppState>,
    _auth: AuthUser,
) -> Result<Json<Vec<Document>>, AppError> {
    let documents = state.document_service.list_training().await?;
    Ok(Json(documents))
}

/// POST /api/admin/training
pub async fn create_training(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(req): ValidatedJson<CreateTrainingDocumentRequest>,
) -> Result<(StatusCode, Json<Document>), AppError> {
    let document = state
        .document_service
        .create_training(&auth, req.into())
        .await?;
    Ok((StatusCode::CREATED, Json(document)))
}

/// POST /api/admin/training/reorder-single
pub async fn step_document(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(req): ValidatedJson<StepDocumentRequest>,
) -> Result<Json<SuccessResponse>, AppError> {
    state
        .reorder_service
        .step_document(&auth, req.document_id, req.direction)
        .await?;
    Ok(Json(SuccessResponse::ok()))
}

/// POST /api/admin/training/reorder
pub async fn reorder_documents(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(req): ValidatedJson<ReorderDocumentsRequest>,
) -> Result<Json<SuccessResponse>, AppError> {
    state
        .reorder_service
        .reorder_documents(&auth, req.folder_id, &req.document_ids)
        .await?;
    Ok(Json(SuccessResponse::ok()))
}

/// POST /api/admin/training/move
pub async fn move_document(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(req): ValidatedJson<MoveDocumentRequest>,
) -> Result<Json<SuccessResponse>, AppError> {
    state
        .reorder_service
        .move_document(&auth, req.document_id, req.target_folder_id)
        .await?;
    Ok(Json(SuccessResponse::ok()))
}
