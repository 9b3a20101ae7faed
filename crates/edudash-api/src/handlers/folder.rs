//! Folder tree handler.

use axum::Json;
use axum::extract::State;

use edudash_core::error::AppError;
use edudash_entity::folder::FolderNode;

use crate::extractors::AuthUser;
use crate::state::AppState;

/// GET /api/folders
///
/// Root folders with nested sub-folders and documents of every type.
pub async fn folder_tree(
    State(state): State<AppState>,
    _auth: AuthUser,
) -> Result<Json<Vec<FolderNode>>, AppError> {
    let tree = state.tree_service.folder_tree().await?;
    Ok(Json(tree))
}
