//! Document entity model.

use std::ops::RangeInclusive;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::kind::DocumentType;
use crate::ordering::Ordered;

/// Longest allowed `requirements` text, in characters.
pub const MAX_REQUIREMENTS_CHARS: usize = 40;

/// Accepted skill levels.
pub const SKILL_LEVEL_RANGE: RangeInclusive<i32> = 1..=5;

/// Last path segment of an upload URL, rejecting empty and relative segments.
pub fn file_name_from_url(file_url: &str) -> Option<&str> {
    file_url
        .rsplit('/')
        .next()
        .filter(|name| !name.is_empty() && *name != "." && *name != "..")
}

/// A stored file record with metadata.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    /// Unique document identifier.
    pub id: Uuid,
    /// Display title.
    pub title: String,
    /// Public URL of the stored file.
    pub file_url: String,
    /// File size in bytes.
    pub file_size: i64,
    /// What the document is used for.
    #[serde(rename = "type")]
    pub doc_type: DocumentType,
    /// Skill level from 1 to 5.
    pub skill_level: i32,
    /// Short prerequisite text.
    pub requirements: Option<String>,
    /// The containing folder, if any.
    pub folder_id: Option<Uuid>,
    /// Sort key among documents of the same folder; 0 means "not yet positioned".
    pub ord: i32,
    /// The user who uploaded the document.
    pub user_id: Uuid,
    /// When the document was created.
    pub created_at: DateTime<Utc>,
    /// When the document was last updated.
    pub updated_at: DateTime<Utc>,
}

impl Document {
    /// Last path segment of the file URL, used to locate the stored file.
    pub fn file_name(&self) -> Option<&str> {
        file_name_from_url(&self.file_url)
    }
}

impl Ordered for Document {
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

/// Data required to create a new document record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateDocument {
    /// Display title.
    pub title: String,
    /// Public URL of the stored file.
    pub file_url: String,
    /// File size in bytes.
    pub file_size: i64,
    /// Document type.
    pub doc_type: DocumentType,
    /// Skill level (1–5).
    pub skill_level: i32,
    /// Short prerequisite text.
    pub requirements: Option<String>,
    /// Containing folder.
    pub folder_id: Option<Uuid>,
    /// Uploading user.
    pub user_id: Uuid,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn document(file_url: &str) -> Document {
        let now = Utc::now();
        Document {
            id: Uuid::new_v4(),
            title: "Classroom Management Guide".to_string(),
            file_url: file_url.to_string(),
            file_size: 2048,
            doc_type: DocumentType::Training,
            skill_level: 1,
            requirements: None,
            folder_id: None,
            ord: 0,
            user_id: Uuid::new_v4(),
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_file_name() {
        assert_eq!(
            document("/uploads/3f2a.pdf").file_name(),
            Some("3f2a.pdf")
        );
        assert_eq!(document("/uploads/").file_name(), None);
        assert_eq!(document("/uploads/..").file_name(), None);
    }

    #[test]
    fn test_serializes_type_field() {
        let json = serde_json::to_value(document("/uploads/a.pdf")).unwrap();
        assert_eq!(json["type"], "TRAINING");
        assert_eq!(json["fileUrl"], "/uploads/a.pdf");
        assert!(json.get("docType").is_none());
    }
}
