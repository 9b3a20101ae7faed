//! Folder entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::ordering::Ordered;

/// A folder in the training library hierarchy.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Folder {
    /// Unique folder identifier.
    pub id: Uuid,
    /// Folder name.
    pub name: String,
    /// Optional free-text description.
    pub description: Option<String>,
    /// Parent folder ID (null for root folders).
    pub parent_id: Option<Uuid>,
    /// Sort key among siblings; 0 means "not yet positioned".
    pub ord: i32,
    /// When the folder was created.
    pub created_at: DateTime<Utc>,
    /// When the folder was last updated.
    pub updated_at: DateTime<Utc>,
}

impl Folder {
    /// Check if this is a root folder (no parent).
    pub fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }
}

impl Ordered for Folder {
    fn id(&self) -> Uuid {
        self.id
    }

    fn ord(&self) -> i32 {
        self.ord
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

/// Data required to create a new folder.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateFolder {
    /// Folder name.
    pub name: String,
    /// Optional description.
    pub description: Option<String>,
    /// Parent folder (None for root).
    pub parent_id: Option<Uuid>,
}
