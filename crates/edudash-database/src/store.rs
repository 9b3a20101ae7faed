//! Store traits for folders and documents.
//!
//! Two implementations are provided:
//! - PostgreSQL ([`crate::repositories`]), relying on transactions and
//!   `ON DELETE CASCADE`
//! - In-memory ([`crate::memory`]), using a single `tokio::sync::RwLock`
//!
//! Every multi-row mutation is atomic: either all rows change or none do.
//! Sibling lists are always returned in canonical order
//! (`ord`, then `created_at`, then `id`).

use async_trait::async_trait;
use uuid::Uuid;

use edudash_core::error::AppError;
use edudash_core::result::AppResult;
use edudash_entity::document::{CreateDocument, Document, DocumentType};
use edudash_entity::folder::{CreateFolder, Folder};
use edudash_entity::ordering::OrdUpdate;

/// Persistence of the folder tree.
#[async_trait]
pub trait FolderStore: Send + Sync + std::fmt::Debug + 'static {
    /// Find a folder by ID.
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Folder>>;

    /// All folders sharing `parent_id` (`None` = root level), in sibling order.
    async fn find_siblings(&self, parent_id: Option<Uuid>) -> AppResult<Vec<Folder>>;

    /// Direct children of any of `parent_ids`, each parent's children in sibling order.
    async fn find_children_of(&self, parent_ids: &[Uuid]) -> AppResult<Vec<Folder>>;

    /// Highest `ord` under `parent_id`, or `None` when there are no siblings.
    async fn max_ord(&self, parent_id: Option<Uuid>) -> AppResult<Option<i32>>;

    /// Insert a new folder with `ord = 0`. Fails with NotFound if the parent is missing.
    async fn create(&self, data: &CreateFolder) -> AppResult<Folder>;

    /// Change name and description.
    async fn update_details(
        &self,
        id: Uuid,
        name: &str,
        description: Option<&str>,
    ) -> AppResult<Folder>;

    /// Apply all order-key updates in one transaction. Any missing id aborts the batch.
    async fn set_ords(&self, updates: &[OrdUpdate]) -> AppResult<()>;

    /// Place `ordered_ids` under `parent_id` with `ord` equal to list position.
    /// Any missing id aborts the batch. Fails with Validation when `parent_id`
    /// lies inside the subtree of any listed folder; the check and the write
    /// are one atomic step.
    async fn reassign(&self, parent_id: Option<Uuid>, ordered_ids: &[Uuid]) -> AppResult<()>;

    /// Reparent a folder, optionally replacing its `ord`. Fails with
    /// Validation when `parent_id` is the folder itself or one of its
    /// descendants, checked atomically with the write.
    async fn move_to(&self, id: Uuid, parent_id: Option<Uuid>, ord: Option<i32>) -> AppResult<()>;

    /// Delete a folder with all descendant folders and documents.
    async fn delete(&self, id: Uuid) -> AppResult<bool>;

    /// Check that the backend is reachable.
    async fn health_check(&self) -> AppResult<bool>;
}

/// Persistence of documents.
#[async_trait]
pub trait DocumentStore: Send + Sync + std::fmt::Debug + 'static {
    /// Find a document by ID.
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Document>>;

    /// All documents in a folder, in sibling order.
    async fn find_in_folder(&self, folder_id: Uuid) -> AppResult<Vec<Document>>;

    /// Documents in any of `folder_ids`, optionally restricted to one type.
    async fn find_in_folders(
        &self,
        folder_ids: &[Uuid],
        doc_type: Option<DocumentType>,
    ) -> AppResult<Vec<Document>>;

    /// All documents of a type, most recently updated first.
    async fn find_by_type(&self, doc_type: DocumentType) -> AppResult<Vec<Document>>;

    /// Highest `ord` in a folder, or `None` when it holds no documents.
    async fn max_ord(&self, folder_id: Uuid) -> AppResult<Option<i32>>;

    /// Insert a new document with `ord = 0`. Fails with NotFound if the folder is missing.
    async fn create(&self, data: &CreateDocument) -> AppResult<Document>;

    /// Apply all order-key updates in one transaction. Any missing id aborts the batch.
    async fn set_ords(&self, updates: &[OrdUpdate]) -> AppResult<()>;

    /// Place `ordered_ids` in `folder_id` with `ord` equal to list position.
    /// Any missing id aborts the batch.
    async fn reassign(&self, folder_id: Uuid, ordered_ids: &[Uuid]) -> AppResult<()>;

    /// Move a document into a folder with the given `ord`.
    async fn move_to(&self, id: Uuid, folder_id: Uuid, ord: i32) -> AppResult<()>;

    /// Delete a document record.
    async fn delete(&self, id: Uuid) -> AppResult<bool>;
}

/// Error for a reparent that would make a folder its own ancestor.
pub(crate) fn descendant_move_error() -> AppError {
    AppError::validation("Cannot move a folder into its own descendant")
}
