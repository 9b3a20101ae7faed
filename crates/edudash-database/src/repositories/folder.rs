//! Folder repository implementation.

use async_trait::async_trait;
use sqlx::{PgConnection, PgPool, Postgres, Transaction};
use uuid::Uuid;

use edudash_core::error::AppError;
use edudash_core::result::AppResult;
use edudash_entity::folder::{CreateFolder, Folder};
use edudash_entity::ordering::OrdUpdate;

use super::database_error;
use crate::store::{FolderStore, descendant_move_error};

const SIBLING_ORDER: &str = "ORDER BY ord ASC, created_at ASC, id ASC";
const PARENT_FK: &str = "folders_parent_id_fkey";

/// Advisory lock key held across the ancestry check and write of every reparent.
const REPARENT_LOCK: i64 = 0x6564_7564_6173_6801;

/// Walks up from `$1` (inclusive) and reports whether any of `$2` is met.
/// `UNION` drops repeated rows, so the walk ends on cyclic data.
const ANCESTRY_MEETS: &str = "\
    WITH RECURSIVE ancestors (id, parent_id) AS ( \
        SELECT id, parent_id FROM folders WHERE id = $1 \
        UNION \
        SELECT f.id, f.parent_id FROM folders f JOIN ancestors a ON f.id = a.parent_id \
    ) \
    SELECT EXISTS (SELECT 1 FROM ancestors WHERE id = ANY($2))";

/// Repository for folder CRUD and sibling-order queries.
#[derive(Debug, Clone)]
pub struct FolderRepository {
    pool: PgPool,
}

impl FolderRepository {
    /// Create a new folder repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Open a transaction holding the tree-wide reparent lock until commit.
    async fn begin_reparent(&self) -> AppResult<Transaction<'static, Postgres>> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(database_error("Failed to begin transaction"))?;
        sqlx::query("SELECT pg_advisory_xact_lock($1)")
            .bind(REPARENT_LOCK)
            .execute(&mut *tx)
            .await
            .map_err(database_error("Failed to acquire reparent lock"))?;
        Ok(tx)
    }
}

/// Reject a reparent whose target lies inside the subtree of a moving folder.
async fn ensure_acyclic(
    conn: &mut PgConnection,
    parent_id: Option<Uuid>,
    moving: &[Uuid],
) -> AppResult<()> {
    let Some(target) = parent_id else {
        return Ok(());
    };
    let meets = sqlx::query_scalar::<_, bool>(ANCESTRY_MEETS)
        .bind(target)
        .bind(moving)
        .fetch_one(conn)
        .await
        .map_err(database_error("Failed to check folder ancestry"))?;
    if meets {
        return Err(descendant_move_error());
    }
    Ok(())
}

fn map_parent_fk(
    missing: &'static str,
    context: &'static str,
) -> impl FnOnce(sqlx::Error) -> AppError {
    move |e| match e {
        sqlx::Error::Database(ref db_err) if db_err.constraint() == Some(PARENT_FK) => {
            AppError::not_found(missing)
        }
        _ => database_error(context)(e),
    }
}

#[async_trait]
impl FolderStore for FolderRepository {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Folder>> {
        sqlx::query_as::<_, Folder>("SELECT * FROM folders WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(database_error("Failed to find folder"))
    }

    async fn find_siblings(&self, parent_id: Option<Uuid>) -> AppResult<Vec<Folder>> {
        sqlx::query_as::<_, Folder>(&format!(
            "SELECT * FROM folders WHERE parent_id IS NOT DISTINCT FROM $1 {SIBLING_ORDER}"
        ))
        .bind(parent_id)
        .fetch_all(&self.pool)
        .await
        .map_err(database_error("Failed to list sibling folders"))
    }

    async fn find_children_of(&self, parent_ids: &[Uuid]) -> AppResult<Vec<Folder>> {
        if parent_ids.is_empty() {
            return Ok(Vec::new());
        }
        sqlx::query_as::<_, Folder>(&format!(
            "SELECT * FROM folders WHERE parent_id = ANY($1) {SIBLING_ORDER}"
        ))
        .bind(parent_ids)
        .fetch_all(&self.pool)
        .await
        .map_err(database_error("Failed to list child folders"))
    }

    async fn max_ord(&self, parent_id: Option<Uuid>) -> AppResult<Option<i32>> {
        sqlx::query_scalar::<_, Option<i32>>(
            "SELECT MAX(ord) FROM folders WHERE parent_id IS NOT DISTINCT FROM $1",
        )
        .bind(parent_id)
        .fetch_one(&self.pool)
        .await
        .map_err(database_error("Failed to read max folder order"))
    }

    async fn create(&self, data: &CreateFolder) -> AppResult<Folder> {
        sqlx::query_as::<_, Folder>(
            "INSERT INTO folders (name, description, parent_id, ord) \
             VALUES ($1, $2, $3, 0) RETURNING *",
        )
        .bind(&data.name)
        .bind(&data.description)
        .bind(data.parent_id)
        .fetch_one(&self.pool)
        .await
        .map_err(map_parent_fk("Parent folder not found", "Failed to create folder"))
    }

    async fn update_details(
        &self,
        id: Uuid,
        name: &str,
        description: Option<&str>,
    ) -> AppResult<Folder> {
        sqlx::query_as::<_, Folder>(
            "UPDATE folders SET name = $2, description = $3, updated_at = NOW() \
             WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(name)
        .bind(description)
        .fetch_optional(&self.pool)
        .await
        .map_err(database_error("Failed to update folder"))?
        .ok_or_else(|| AppError::not_found(format!("Folder {id} not found")))
    }

    async fn set_ords(&self, updates: &[OrdUpdate]) -> AppResult<()> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(database_error("Failed to begin transaction"))?;

        for update in updates {
            let result =
                sqlx::query("UPDATE folders SET ord = $2, updated_at = NOW() WHERE id = $1")
                    .bind(update.id)
                    .bind(update.ord)
                    .execute(&mut *tx)
                    .await
                    .map_err(database_error("Failed to update folder order"))?;
            if result.rows_affected() == 0 {
                return Err(AppError::not_found(format!("Folder {} not found", update.id)));
            }
        }

        tx.commit()
            .await
            .map_err(database_error("Failed to commit folder order"))
    }

    async fn reassign(&self, parent_id: Option<Uuid>, ordered_ids: &[Uuid]) -> AppResult<()> {
        let mut tx = self.begin_reparent().await?;
        ensure_acyclic(&mut *tx, parent_id, ordered_ids).await?;

        for (position, id) in ordered_ids.iter().enumerate() {
            let result = sqlx::query(
                "UPDATE folders SET parent_id = $2, ord = $3, updated_at = NOW() WHERE id = $1",
            )
            .bind(id)
            .bind(parent_id)
            .bind(position as i32)
            .execute(&mut *tx)
            .await
            .map_err(map_parent_fk("Parent folder not found", "Failed to reorder folders"))?;
            if result.rows_affected() == 0 {
                return Err(AppError::not_found(format!("Folder {id} not found")));
            }
        }

        tx.commit()
            .await
            .map_err(database_error("Failed to commit folder reorder"))
    }

    async fn move_to(&self, id: Uuid, parent_id: Option<Uuid>, ord: Option<i32>) -> AppResult<()> {
        let mut tx = self.begin_reparent().await?;
        ensure_acyclic(&mut *tx, parent_id, &[id]).await?;

        let result = sqlx::query(
            "UPDATE folders SET parent_id = $2, ord = COALESCE($3, ord), updated_at = NOW() \
             WHERE id = $1",
        )
        .bind(id)
        .bind(parent_id)
        .bind(ord)
        .execute(&mut *tx)
        .await
        .map_err(map_parent_fk("Target folder not found", "Failed to move folder"))?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(format!("Folder {id} not found")));
        }
        tx.commit()
            .await
            .map_err(database_error("Failed to commit folder move"))
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM folders WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(database_error("Failed to delete folder"))?;
        Ok(result.rows_affected() > 0)
    }

    async fn health_check(&self) -> AppResult<bool> {
        sqlx::query_scalar::<_, i32>("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map(|_| true)
            .map_err(database_error("Database health check failed"))
    }
}
