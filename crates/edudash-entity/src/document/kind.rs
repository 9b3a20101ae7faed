//! Document type enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// What a stored document is used for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "document_type", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DocumentType {
    /// Training material published by administrators.
    Training,
    /// A teacher's own upload.
    Personal,
    /// A file an administrator shared with teachers.
    SharedAdmin,
}

impl DocumentType {
    /// Return the type as its wire string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Training => "TRAINING",
            Self::Personal => "PERSONAL",
            Self::SharedAdmin => "SHARED_ADMIN",
        }
    }
}

impl fmt::Display for DocumentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for DocumentType {
    type Err = edudash_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "TRAINING" => Ok(Self::Training),
            "PERSONAL" => Ok(Self::Personal),
            "SHARED_ADMIN" => Ok(Self::SharedAdmin),
            _ => Err(edudash_core::AppError::validation(format!(
                "Invalid document type: '{s}'. Expected one of: TRAINING, PERSONAL, SHARED_ADMIN"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_str() {
        assert_eq!(
            "training".parse::<DocumentType>().unwrap(),
            DocumentType::Training
        );
        assert_eq!(
            "SHARED_ADMIN".parse::<DocumentType>().unwrap(),
            DocumentType::SharedAdmin
        );
        assert!("video".parse::<DocumentType>().is_err());
    }

    #[test]
    fn test_serializes_screaming_case() {
        let json = serde_json::to_string(&DocumentType::SharedAdmin).unwrap();
        assert_eq!(json, "\"SHARED_ADMIN\"");
    }
}
