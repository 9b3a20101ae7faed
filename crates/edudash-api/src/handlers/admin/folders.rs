//! Admin folder management handlers.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;

use edudash_core::error::AppError;
use edudash_entity::folder::Folder;

use crate::dto::request::{
    CreateFolderRequest, MoveFolderRequest, ReorderFoldersRequest, StepFolderRequest,
    UpdateFolderRequest, parse_id, parse_parent_ref,
};
use crate::dto::response::SuccessResponse;
use crate::extractors::{AuthUser, ValidatedJson};
use crate::state::AppState;

/// POST /api/admin/folders
pub async fn create_folder(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(req): ValidatedJson<CreateFolderRequest>,
) -> Result<(StatusCode, Json<Folder>), AppError> {
    let folder = state
        .folder_service
        .create_folder(
            &auth,
            &req.name,
            req.description.as_deref(),
            req.parent_id,
        )
        .await?;
    Ok((StatusCode::CREATED, Json(folder)))
}

/// PATCH /api/admin/folders/{id}
pub async fn update_folder(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
    ValidatedJson(req): ValidatedJson<UpdateFolderRequest>,
) -> Result<Json<Folder>, AppError> {
    let folder = state
        .folder_service
        .update_folder(&auth, parse_id(&id)?, &req.name, req.description.as_deref())
        .await?;
    Ok(Json(folder))
}

/// DELETE /api/admin/folders/{id}
pub async fn delete_folder(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> Result<Json<SuccessResponse>, AppError> {
    state
        .folder_service
        .delete_folder(&auth, parse_id(&id)?)
        .await?;
    Ok(Json(SuccessResponse::ok()))
}

/// POST /api/admin/folders/reorder-single
pub async fn step_folder(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(req): ValidatedJson<StepFolderRequest>,
) -> Result<Json<SuccessResponse>, AppError> {
    state
        .reorder_service
        .step_folder(&auth, req.folder_id, req.direction)
        .await?;
    Ok(Json(SuccessResponse::ok()))
}

/// POST /api/admin/folders/reorder
pub async fn reorder_folders(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(req): ValidatedJson<ReorderFoldersRequest>,
) -> Result<Json<SuccessResponse>, AppError> {
    let parent_id = parse_parent_ref(req.parent_id.as_deref())?;
    state
        .reorder_service
        .reorder_folders(&auth, parent_id, &req.folder_ids)
        .await?;
    Ok(Json(SuccessResponse::ok()))
}

/// POST /api/admin/folders/move
pub async fn move_folder(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(req): ValidatedJson<MoveFolderRequest>,
) -> Result<Json<SuccessResponse>, AppError> {
    let new_parent_id = parse_parent_ref(req.new_parent_id.as_deref())?;
    state
        .reorder_service
        .move_folder(&auth, req.folder_id, new_parent_id)
        .await?;
    Ok(Json(SuccessResponse::ok()))
}
