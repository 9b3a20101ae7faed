//! Training document create, list, and delete.

use std::io;
use std::path::PathBuf;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use edudash_core::error::{AppError, ErrorKind};
use edudash_database::store::{DocumentStore, FolderStore};
use edudash_entity::document::{
    CreateDocument, Document, DocumentType, MAX_REQUIREMENTS_CHARS, SKILL_LEVEL_RANGE,
    file_name_from_url,
};

use crate::context::RequestContext;

/// Metadata for a training document whose file is already uploaded.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewTrainingDocument {
    /// Display title.
    pub title: String,
    /// URL returned by the upload step.
    pub file_url: String,
    /// File size in bytes; read from the stored file when absent.
    pub file_size: Option<i64>,
    /// Containing folder.
    pub folder_id: Option<Uuid>,
    /// Skill level (1–5, default 1).
    pub skill_level: Option<i32>,
    /// Short prerequisite text.
    pub requirements: Option<String>,
}

/// Manages training documents and their stored files.
#[derive(Debug, Clone)]
pub struct DocumentService {
    /// Document store.
    documents: Arc<dyn DocumentStore>,
    /// Folder store, for target validation.
    folders: Arc<dyn FolderStore>,
    /// Directory holding uploaded files.
    upload_dir: PathBuf,
}

impl DocumentService {
    /// Creates a new document service.
    pub fn new(
        documents: Arc<dyn DocumentStore>,
        folders: Arc<dyn FolderStore>,
        upload_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            documents,
            folders,
            upload_dir: upload_dir.into(),
        }
    }

    /// Gets a document by ID.
    pub async fn get_document(&self, document_id: Uuid) -> Result<Document, AppError> {
        self.documents
            .find_by_id(document_id)
            .await?
            .ok_or_else(|| AppError::not_found("Document not found"))
    }

    /// Records a new training document owned by the caller.
    pub async fn create_training(
        &self,
        ctx: &RequestContext,
        input: NewTrainingDocument,
    ) -> Result<Document, AppError> {
        let title = input.title.trim();
        if title.is_empty() {
            return Err(AppError::validation("Title is required"));
        }
        let file_url = input.file_url.trim();
        if file_url.is_empty() {
            return Err(AppError::validation("File URL is required"));
        }

        let file_size = match input.file_size {
            Some(size) if size < 0 => {
                return Err(AppError::validation("File size cannot be negative"));
            }
            Some(size) => size,
            None => self.stored_file_size(file_url).await?,
        };

        let skill_level = input.skill_level.unwrap_or(*SKILL_LEVEL_RANGE.start());
        if !SKILL_LEVEL_RANGE.contains(&skill_level) {
            return Err(AppError::validation(format!(
                "Skill level must be between {} and {}",
                SKILL_LEVEL_RANGE.start(),
                SKILL_LEVEL_RANGE.end()
            )));
        }

        let requirements = input
            .requirements
            .as_deref()
            .map(str::trim)
            .filter(|r| !r.is_empty());
        if let Some(text) = requirements {
            if text.chars().count() > MAX_REQUIREMENTS_CHARS {
                return Err(AppError::validation(format!(
                    "Requirements must be at most {MAX_REQUIREMENTS_CHARS} characters"
                )));
            }
        }

        if let Some(folder_id) = input.folder_id {
            self.folders
                .find_by_id(folder_id)
                .await?
                .ok_or_else(|| AppError::not_found("Folder not found"))?;
        }

        let document = self
            .documents
            .create(&CreateDocument {
                title: title.to_string(),
                file_url: file_url.to_string(),
                file_size,
                doc_type: DocumentType::Training,
                skill_level,
                requirements: requirements.map(str::to_string),
                folder_id: input.folder_id,
                user_id: ctx.user_id,
            })
            .await?;

        info!(
            user_id = %ctx.user_id,
            document_id = %document.id,
            folder_id = ?document.folder_id,
            "Training document created"
        );

        Ok(document)
    }

    /// All training documents, most recently updated first.
    pub async fn list_training(&self) -> Result<Vec<Document>, AppError> {
        self.documents.find_by_type(DocumentType::Training).await
    }

    /// Deletes a document record, then removes its stored file.
    ///
    /// File removal failures are logged and otherwise ignored.
    pub async fn delete_document(
        &self,
        ctx: &RequestContext,
        document_id: Uuid,
    ) -> Result<(), AppError> {
        let document = self.get_document(document_id).await?;

        if !self.documents.delete(document_id).await? {
            return Err(AppError::not_found("Document not found"));
        }

        info!(
            user_id = %ctx.user_id,
            document_id = %document_id,
            "Document deleted"
        );

        self.remove_stored_file(&document).await;
        Ok(())
    }

    /// Size of an already uploaded file, read from the upload directory.
    async fn stored_file_size(&self, file_url: &str) -> Result<i64, AppError> {
        let file_name = file_name_from_url(file_url)
            .ok_or_else(|| AppError::validation("File URL has no file name"))?;
        let path = self.upload_dir.join(file_name);
        let metadata = tokio::fs::metadata(&path).await.map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => AppError::not_found("Uploaded file not found"),
            _ => AppError::with_source(
                ErrorKind::Storage,
                format!("Cannot read uploaded file {}", path.display()),
                e,
            ),
        })?;
        if !metadata.is_file() {
            return Err(AppError::storage(format!(
                "Upload path is not a file: {}",
                path.display()
            )));
        }
        Ok(i64::try_from(metadata.len()).unwrap_or(i64::MAX))
    }

    async fn remove_stored_file(&self, document: &Document) {
        let Some(file_name) = document.file_name() else {
            warn!(
                document_id = %document.id,
                file_url = %document.file_url,
                "Document URL has no file name; nothing removed"
            );
            return;
        };

        let path = self.upload_dir.join(file_name);
        if let Err(e) = tokio::fs::remove_file(&path).await {
            warn!(
                document_id = %document.id,
                path = %path.display(),
                error = %e,
                "Failed to remove stored file"
            );
        }
    }
}
