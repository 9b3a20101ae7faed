//! Admin document deletion.

use axum::Json;
use axum::extract::{Path, State};

use edudash_core::error::AppError;

use crate::dto::request::parse_id;
use crate::dto::response::SuccessResponse;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// DELETE /api/admin/documents/{id}
///
/// Removes the record, then the stored file on a best-effort basis.
pub async fn delete_document(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> Result<Json<SuccessResponse>, AppError> {
    state
        .document_service
        .delete_document(&auth, parse_id(&id)?)
        .await?;
    Ok(Json(SuccessResponse::ok()))
}
