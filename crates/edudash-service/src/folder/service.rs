//! Folder create, edit, and delete.

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use edudash_core::error::AppError;
use edudash_database::store::FolderStore;
use edudash_entity::folder::{CreateFolder, Folder};

use crate::context::RequestContext;

/// Manages folder CRUD operations.
#[derive(Debug, Clone)]
pub struct FolderService {
    /// Folder store.
    folders: Arc<dyn FolderStore>,
}

impl FolderService {
    /// Creates a new folder service.
    pub fn new(folders: Arc<dyn FolderStore>) -> Self {
        Self { folders }
    }

    /// Gets a folder by ID.
    pub async fn get_folder(&self, folder_id: Uuid) -> Result<Folder, AppError> {
        self.folders
            .find_by_id(folder_id)
            .await?
            .ok_or_else(|| AppError::not_found("Folder not found"))
    }

    /// Creates a new folder at the start of its sibling list (`ord = 0`).
    pub async fn create_folder(
        &self,
        ctx: &RequestContext,
        name: &str,
        description: Option<&str>,
        parent_id: Option<Uuid>,
    ) -> Result<Folder, AppError> {
        let name = normalize_name(name)?;

        if let Some(parent_id) = parent_id {
            self.folders
                .find_by_id(parent_id)
                .await?
                .ok_or_else(|| AppError::not_found("Parent folder not found"))?;
        }

        let folder = self
            .folders
            .create(&CreateFolder {
                name,
                description: normalize_description(description),
                parent_id,
            })
            .await?;

        info!(
            user_id = %ctx.user_id,
            folder_id = %folder.id,
            parent_id = ?folder.parent_id,
            name = %folder.name,
            "Folder created"
        );

        Ok(folder)
    }

    /// Updates the name and description of a folder.
    pub async fn update_folder(
        &self,
        ctx: &RequestContext,
        folder_id: Uuid,
        name: &str,
        description: Option<&str>,
    ) -> Result<Folder, AppError> {
        let name = normalize_name(name)?;
        self.get_folder(folder_id).await?;

        let folder = self
            .folders
            .update_details(
                folder_id,
                &name,
                normalize_description(description).as_deref(),
            )
            .await?;

        info!(
            user_id = %ctx.user_id,
            folder_id = %folder_id,
            name = %folder.name,
            "Folder updated"
        );

        Ok(folder)
    }

    /// Deletes a folder with all of its sub-folders and documents.
    pub async fn delete_folder(
        &self,
        ctx: &RequestContext,
        folder_id: Uuid,
    ) -> Result<(), AppError> {
        let folder = self.get_folder(folder_id).await?;

        if !self.folders.delete(folder_id).await? {
            return Err(AppError::not_found("Folder not found"));
        }

        info!(
            user_id = %ctx.user_id,
            folder_id = %folder_id,
            name = %folder.name,
            "Folder deleted"
        );

        Ok(())
    }
}

fn normalize_name(name: &str) -> Result<String, AppError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(AppError::validation("Folder name cannot be empty"));
    }
    Ok(name.to_string())
}

fn normalize_description(description: Option<&str>) -> Option<String> {
    description
        .map(str::trim)
        .filter(|d| !d.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use edudash_core::error::ErrorKind;
    use edudash_database::MemoryStore;
    use edudash_entity::user::UserRole;

    fn service() -> FolderService {
        FolderService::new(Arc::new(MemoryStore::new()))
    }

    fn admin() -> RequestContext {
        RequestContext::new(Uuid::new_v4(), UserRole::Admin, "Ada")
    }

    #[tokio::test]
    async fn test_create_trims_and_starts_unpositioned() {
        let svc = service();
        let folder = svc
            .create_folder(&admin(), "  Safeguarding  ", Some("  "), None)
            .await
            .unwrap();

        assert_eq!(folder.name, "Safeguarding");
        assert_eq!(folder.description, None);
        assert_eq!(folder.ord, 0);
        assert!(folder.is_root());
    }

    #[tokio::test]
    async fn test_create_rejects_blank_name() {
        let err = service()
            .create_folder(&admin(), "   ", None, None)
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
    }

    #[tokio::test]
    async fn test_create_under_missing_parent() {
        let err = service()
            .create_folder(&admin(), "Child", None, Some(Uuid::new_v4()))
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn test_update_changes_details() {
        let svc = service();
        let ctx = admin();
        let folder = svc.create_folder(&ctx, "Draft", None, None).await.unwrap();

        let updated = svc
            .update_folder(&ctx, folder.id, "Behaviour", Some("Policies and scripts"))
            .await
            .unwrap();

        assert_eq!(updated.name, "Behaviour");
        assert_eq!(updated.description.as_deref(), Some("Policies and scripts"));
    }

    #[tokio::test]
    async fn test_delete_missing_folder() {
        let err = service()
            .delete_folder(&admin(), Uuid::new_v4())
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotFound);
    }
}
