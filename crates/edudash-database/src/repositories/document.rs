//! Document repository implementation.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use edudash_core::error::AppError;
use edudash_core::result::AppResult;
use edudash_entity::document::{CreateDocument, Document, DocumentType};
use edudash_entity::ordering::OrdUpdate;

use super::database_error;
use crate::store::DocumentStore;

const FOLDER_FK: &str = "documents_folder_id_fkey";

/// Repository for document records.
#[derive(Debug, Clone)]
pub struct DocumentRepository {
    pool: PgPool,
}

impl DocumentRepository {
    /// Create a new document repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn map_folder_fk(context: &'static str) -> impl FnOnce(sqlx::Error) -> AppError {
    move |e| match e {
        sqlx::Error::Database(ref db_err) if db_err.constraint() == Some(FOLDER_FK) => {
            AppError::not_found("Folder not found")
        }
        _ => database_error(context)(e),
    }
}

#[async_trait]
impl DocumentStore for DocumentRepository {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Document>> {
        sqlx::query_as::<_, Document>("SELECT * FROM documents WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(database_error("Failed to find document"))
    }

    async fn find_in_folder(&self, folder_id: Uuid) -> AppResult<Vec<Document>> {
        sqlx::query_as::<_, Document>(
            "SELECT * FROM documents WHERE folder_id = $1 \
             ORDER BY ord ASC, created_at ASC, id ASC",
        )
        .bind(folder_id)
        .fetch_all(&self.pool)
        .await
        .map_err(database_error("Failed to list folder documents"))
    }

    async fn find_in_folders(
        &self,
        folder_ids: &[Uuid],
        doc_type: Option<DocumentType>,
    ) -> AppResult<Vec<Document>> {
        if folder_ids.is_empty() {
            return Ok(Vec::new());
        }
        sqlx::query_as::<_, Document>(
            "SELECT * FROM documents \
             WHERE folder_id = ANY($1) AND ($2::document_type IS NULL OR doc_type = $2) \
             ORDER BY ord ASC, created_at ASC, id ASC",
        )
        .bind(folder_ids)
        .bind(doc_type)
        .fetch_all(&self.pool)
        .await
        .map_err(database_error("Failed to list documents"))
    }

    async fn find_by_type(&self, doc_type: DocumentType) -> AppResult<Vec<Document>> {
        sqlx::query_as::<_, Document>(
            "SELECT * FROM documents WHERE doc_type = $1 ORDER BY updated_at DESC, id ASC",
        )
        .bind(doc_type)
        .fetch_all(&self.pool)
        .await
        .map_err(database_error("Failed to list documents by type"))
    }

    async fn max_ord(&self, folder_id: Uuid) -> AppResult<Option<i32>> {
        sqlx::query_scalar::<_, Option<i32>>("SELECT MAX(ord) FROM documents WHERE folder_id = $1")
            .bind(folder_id)
            .fetch_one(&self.pool)
            .await
            .map_err(database_error("Failed to read max document order"))
    }

    async fn create(&self, data: &CreateDocument) -> AppResult<Document> {
        sqlx::query_as::<_, Document>(
            "INSERT INTO documents \
             (title, file_url, file_size, doc_type, skill_level, requirements, folder_id, ord, user_id) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, 0, $8) RETURNING *",
        )
        .bind(&data.title)
        .bind(&data.file_url)
        .bind(data.file_size)
        .bind(data.doc_type)
        .bind(data.skill_level)
        .bind(&data.requirements)
        .bind(data.folder_id)
        .bind(data.user_id)
        .fetch_one(&self.pool)
        .await
        .map_err(map_folder_fk("Failed to create document"))
    }

    async fn set_ords(&self, updates: &[OrdUpdate]) -> AppResult<()> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(database_error("Failed to begin transaction"))?;

        for update in updates {
            let result =
                sqlx::query("UPDATE documents SET ord = $2, updated_at = NOW() WHERE id = $1")
                    .bind(update.id)
                    .bind(update.ord)
                    .execute(&mut *tx)
                    .await
                    .map_err(database_error("Failed to update document order"))?;
            if result.rows_affected() == 0 {
                return Err(AppError::not_found(format!(
                    "Document {} not found",
                    update.id
                )));
            }
        }

        tx.commit()
            .await
            .map_err(database_error("Failed to commit document order"))
    }

    async fn reassign(&self, folder_id: Uuid, ordered_ids: &[Uuid]) -> AppResult<()> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(database_error("Failed to begin transaction"))?;

        for (position, id) in ordered_ids.iter().enumerate() {
            let result = sqlx::query(
                "UPDATE documents SET folder_id = $2, ord = $3, updated_at = NOW() WHERE id = $1",
            )
            .bind(id)
            .bind(folder_id)
            .bind(position as i32)
            .execute(&mut *tx)
            .await
            .map_err(map_folder_fk("Failed to reorder documents"))?;
            if result.rows_affected() == 0 {
                return Err(AppError::not_found(format!("Document {id} not found")));
            }
        }

        tx.commit()
            .await
            .map_err(database_error("Failed to commit document reorder"))
    }

    async fn move_to(&self, id: Uuid, folder_id: Uuid, ord: i32) -> AppResult<()> {
        let result = sqlx::query(
            "UPDATE documents SET folder_id = $2, ord = $3, updated_at = NOW() WHERE id = $1",
        )
        .bind(id)
        .bind(folder_id)
        .bind(ord)
        .execute(&self.pool)
        .await
        .map_err(map_folder_fk("Failed to move document"))?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(format!("Document {id} not found")));
        }
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM documents WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(database_error("Failed to delete document"))?;
        Ok(result.rows_affected() > 0)
    }
}
