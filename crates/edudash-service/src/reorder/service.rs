//! Step, bulk reorder, and move operations.

use std::collections::HashSet;
use std::sync::Arc;

use tracing::{info, instrument};
use uuid::Uuid;

use edudash_core::error::AppError;
use edudash_database::store::{DocumentStore, FolderStore};

use super::step::{Direction, StepPlan, ord_after, plan_step};
use crate::context::RequestContext;

/// Reorders and reparents folders and documents.
///
/// Every mutation is a single atomic store call; callers re-read the tree
/// afterwards.
#[derive(Debug, Clone)]
pub struct ReorderService {
    /// Folder store.
    folders: Arc<dyn FolderStore>,
    /// Document store.
    documents: Arc<dyn DocumentStore>,
}

impl ReorderService {
    /// Creates a new reorder service.
    pub fn new(folders: Arc<dyn FolderStore>, documents: Arc<dyn DocumentStore>) -> Self {
        Self { folders, documents }
    }

    /// Move a folder one position up or down among its siblings.
    #[instrument(skip(self, ctx), fields(user_id = %ctx.user_id))]
    pub async fn step_folder(
        &self,
        ctx: &RequestContext,
        folder_id: Uuid,
        direction: Direction,
    ) -> Result<(), AppError> {
        let folder = self
            .folders
            .find_by_id(folder_id)
            .await?
            .ok_or_else(|| AppError::not_found("Folder not found"))?;

        let siblings = self.folders.find_siblings(folder.parent_id).await?;
        let plan = plan_step(&siblings, folder_id, direction)?;
        self.folders.set_ords(&plan.updates()).await?;

        log_plan("folder", folder_id, &plan);
        Ok(())
    }

    /// Place `folder_ids` under `parent_id` in the given order.
    #[instrument(skip(self, ctx, folder_ids), fields(user_id = %ctx.user_id, count = folder_ids.len()))]
    pub async fn reorder_folders(
        &self,
        ctx: &RequestContext,
        parent_id: Option<Uuid>,
        folder_ids: &[Uuid],
    ) -> Result<(), AppError> {
        ensure_distinct(folder_ids)?;
        if folder_ids.is_empty() {
            return Ok(());
        }

        if let Some(parent_id) = parent_id {
            self.folders
                .find_by_id(parent_id)
                .await?
                .ok_or_else(|| AppError::not_found("Parent folder not found"))?;
        }

        self.folders.reassign(parent_id, folder_ids).await?;

        info!(parent_id = ?parent_id, "Folders reordered");
        Ok(())
    }

    /// Reparent a folder (`None` moves it to the top level).
    ///
    /// A folder that changes parent is appended after its new siblings; a
    /// move to the current parent keeps its `ord`.
    #[instrument(skip(self, ctx), fields(user_id = %ctx.user_id))]
    pub async fn move_folder(
        &self,
        ctx: &RequestContext,
        folder_id: Uuid,
        new_parent_id: Option<Uuid>,
    ) -> Result<(), AppError> {
        let folder = self
            .folders
            .find_by_id(folder_id)
            .await?
            .ok_or_else(|| AppError::not_found("Folder not found"))?;

        if let Some(target) = new_parent_id {
            self.folders
                .find_by_id(target)
                .await?
                .ok_or_else(|| AppError::not_found("Target folder not found"))?;
        }

        let ord = if folder.parent_id == new_parent_id {
            None
        } else {
            Some(next_ord(self.folders.max_ord(new_parent_id).await?)?)
        };
        self.folders.move_to(folder_id, new_parent_id, ord).await?;

        info!(
            from = ?folder.parent_id,
            to = ?new_parent_id,
            ord = ?ord,
            "Folder moved"
        );
        Ok(())
    }

    /// Move a document one position up or down within its folder.
    #[instrument(skip(self, ctx), fields(user_id = %ctx.user_id))]
    pub async fn step_document(
        &self,
        ctx: &RequestContext,
        document_id: Uuid,
        direction: Direction,
    ) -> Result<(), AppError> {
        let document = self
            .documents
            .find_by_id(document_id)
            .await?
            .ok_or_else(|| AppError::not_found("Document not found"))?;
        let folder_id = document
            .folder_id
            .ok_or_else(|| AppError::not_found("Document has no folder"))?;

        let siblings = self.documents.find_in_folder(folder_id).await?;
        let plan = plan_step(&siblings, document_id, direction)?;
        self.documents.set_ords(&plan.updates()).await?;

        log_plan("document", document_id, &plan);
        Ok(())
    }

    /// Place `document_ids` in `folder_id` in the given order.
    #[instrument(skip(self, ctx, document_ids), fields(user_id = %ctx.user_id, count = document_ids.len()))]
    pub async fn reorder_documents(
        &self,
        ctx: &RequestContext,
        folder_id: Uuid,
        document_ids: &[Uuid],
    ) -> Result<(), AppError> {
        ensure_distinct(document_ids)?;
        if document_ids.is_empty() {
            return Ok(());
        }

        self.folders
            .find_by_id(folder_id)
            .await?
            .ok_or_else(|| AppError::not_found("Folder not found"))?;

        self.documents.reassign(folder_id, document_ids).await?;

        info!("Documents reordered");
        Ok(())
    }

    /// Move a document to the end of another folder.
    #[instrument(skip(self, ctx), fields(user_id = %ctx.user_id))]
    pub async fn move_document(
        &self,
        ctx: &RequestContext,
        document_id: Uuid,
        target_folder_id: Uuid,
    ) -> Result<(), AppError> {
        self.documents
            .find_by_id(document_id)
            .await?
            .ok_or_else(|| AppError::not_found("Document not found"))?;
        self.folders
            .find_by_id(target_folder_id)
            .await?
            .ok_or_else(|| AppError::not_found("Target folder not found"))?;

        let ord = next_ord(self.documents.max_ord(target_folder_id).await?)?;
        self.documents
            .move_to(document_id, target_folder_id, ord)
            .await?;

        info!(ord, "Document moved");
        Ok(())
    }
}

/// Position after the current maximum, or 0 for an empty list.
fn next_ord(max: Option<i32>) -> Result<i32, AppError> {
    max.map_or(Ok(0), ord_after)
}

fn ensure_distinct(ids: &[Uuid]) -> Result<(), AppError> {
    let mut seen = HashSet::with_capacity(ids.len());
    match ids.iter().find(|id| !seen.insert(**id)) {
        Some(dup) => Err(AppError::validation(format!(
            "Duplicate id in order list: {dup}"
        ))),
        None => Ok(()),
    }
}

fn log_plan(entity: &'static str, id: Uuid, plan: &StepPlan) {
    match plan {
        StepPlan::Bootstrap(update) => {
            info!(entity, %id, ord = update.ord, "Positioned at end of siblings")
        }
        StepPlan::Swap(_, other) => {
            info!(entity, %id, neighbour = %other.id, "Swapped with neighbour")
        }
        StepPlan::Renumber(updates) => {
            info!(entity, %id, renumbered = updates.len(), "Renumbered tied siblings")
        }
        StepPlan::Unchanged => info!(entity, %id, "Already at boundary"),
    }
}
