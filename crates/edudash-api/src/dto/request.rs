//! Request DTOs with validation.

use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use edudash_core::error::AppError;
use edudash_entity::document::MAX_REQUIREMENTS_CHARS;
use edudash_service::document::NewTrainingDocument;
use edudash_service::reorder::Direction;

/// `MAX_REQUIREMENTS_CHARS` as the `u64` the `validator` length rule expects.
const MAX_REQUIREMENTS_CHARS_U64: u64 = MAX_REQUIREMENTS_CHARS as u64;

/// Literal accepted in place of a parent folder ID for the top level.
pub const ROOT_SENTINEL: &str = "root";

/// Parse an ID taken from the URL path.
pub fn parse_id(value: &str) -> Result<Uuid, AppError> {
    value
        .parse::<Uuid>()
        .map_err(|_| AppError::validation(format!("Invalid id: '{value}'")))
}

/// Resolve a parent reference: null or `"root"` is the top level, anything
/// else must be a UUID.
pub fn parse_parent_ref(value: Option<&str>) -> Result<Option<Uuid>, AppError> {
    match value {
        None | Some(ROOT_SENTINEL) => Ok(None),
        Some(id) => parse_id(id).map(Some),
    }
}

/// Create folder request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateFolderRequest {
    /// Folder name.
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    /// Optional description.
    pub description: Option<String>,
    /// Parent folder (omitted or null for top level).
    pub parent_id: Option<Uuid>,
}

/// Edit folder request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateFolderRequest {
    /// New name.
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    /// New description; omitted or null clears it.
    pub description: Option<String>,
}

/// Single-step folder reorder.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct StepFolderRequest {
    /// Folder to move.
    pub folder_id: Uuid,
    /// `"up"` or `"down"`.
    pub direction: Direction,
}

/// Bulk folder reorder.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ReorderFoldersRequest {
    /// Parent folder ID, `"root"`, or null for the top level.
    pub parent_id: Option<String>,
    /// Folders in their new order.
    pub folder_ids: Vec<Uuid>,
}

/// Move folder request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct MoveFolderRequest {
    /// Folder to move.
    pub folder_id: Uuid,
    /// New parent ID, `"root"`, or null for the top level.
    pub new_parent_id: Option<String>,
}

/// Create training document request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateTrainingDocumentRequest {
    /// Display title.
    #[validate(length(min = 1, message = "Title is required"))]
    pub title: String,
    /// URL returned by the upload step.
    #[validate(length(min = 1, message = "fileUrl is required"))]
    pub file_url: String,
    /// File size in bytes.
    #[validate(range(min = 0))]
    pub file_size: Option<i64>,
    /// Containing folder.
    pub folder_id: Option<Uuid>,
    /// Skill level (1–5).
    #[validate(range(min = 1, max = 5, message = "Skill level must be between 1 and 5"))]
    pub skill_level: Option<i32>,
    /// Short prerequisite text.
    #[validate(length(
        max = MAX_REQUIREMENTS_CHARS_U64,
        message = "Requirements must be max 40 characters"
    ))]
    pub requirements: Option<String>,
}

impl From<CreateTrainingDocumentRequest> for NewTrainingDocument {
    fn from(req: CreateTrainingDocumentRequest) -> Self {
        Self {
            title: req.title,
            file_url: req.file_url,
            file_size: req.file_size,
            folder_id: req.folder_id,
            skill_level: req.skill_level,
            requirements: req.requirements,
        }
    }
}

/// Single-step document reorder.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct StepDocumentRequest {
    /// Document to move.
    pub document_id: Uuid,
    /// `"up"` or `"down"`.
    pub direction: Direction,
}

/// Bulk document reorder.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ReorderDocumentsRequest {
    /// Folder holding the documents.
    pub folder_id: Uuid,
    /// Documents in their new order.
    pub document_ids: Vec<Uuid>,
}

/// Move document request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct MoveDocumentRequest {
    /// Document to move.
    pub document_id: Uuid,
    /// Destination folder.
    pub target_folder_id: Uuid,
}
