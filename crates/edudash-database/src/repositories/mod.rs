//! PostgreSQL implementations of the store traits.

pub mod document;
pub mod folder;

pub use document::DocumentRepository;
pub use folder::FolderRepository;

use edudash_core::error::{AppError, ErrorKind};

/// SQLSTATE `serialization_failure`.
const SERIALIZATION_FAILURE: &str = "40001";
/// SQLSTATE `deadlock_detected`.
const DEADLOCK_DETECTED: &str = "40P01";

/// Whether a SQLSTATE marks a transaction that lost a race and can be retried.
pub(crate) fn is_concurrency_conflict(code: Option<&str>) -> bool {
    matches!(code, Some(SERIALIZATION_FAILURE | DEADLOCK_DETECTED))
}

/// Wrap a sqlx error as a database error with context.
///
/// Serialization failures and deadlocks become `Conflict` so the caller
/// sees a retryable 409 rather than a 500.
pub(crate) fn database_error(context: &'static str) -> impl FnOnce(sqlx::Error) -> AppError {
    move |e| {
        let code = match &e {
            sqlx::Error::Database(db_err) => db_err.code().map(|c| c.into_owned()),
            _ => None,
        };
        if is_concurrency_conflict(code.as_deref()) {
            AppError::with_source(
                ErrorKind::Conflict,
                format!("{context}: concurrent update, retry the request"),
                e,
            )
        } else {
            AppError::with_source(ErrorKind::Database, context, e)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retryable_sqlstates_are_conflicts() {
        assert!(is_concurrency_conflict(Some("40001")));
        assert!(is_concurrency_conflict(Some("40P01")));
        assert!(!is_concurrency_conflict(Some("23503")));
        assert!(!is_concurrency_conflict(None));
    }

    #[test]
    fn test_non_database_errors_stay_database_kind() {
        let err = database_error("Failed to list folders")(sqlx::Error::RowNotFound);
        assert_eq!(err.kind, ErrorKind::Database);
        assert_eq!(err.message, "Failed to list folders");
    }
}
