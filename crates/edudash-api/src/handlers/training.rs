//! Training library handler.

use axum::Json;
use axum::extract::State;

use edudash_core::error::AppError;
use edudash_entity::folder::FolderNode;

use crate::extractors::AuthUser;
use crate::state::AppState;

/// GET /api/training
///
/// Same shape as the folder tree, with only training documents attached.
pub async fn training_tree(
    State(state): State<AppState>,
    _auth: AuthUser,
) -> Result<Json<Vec<FolderNode>>, AppError> {
    let tree = state.tree_service.training_tree().await?;
    Ok(Json(tree))
}
