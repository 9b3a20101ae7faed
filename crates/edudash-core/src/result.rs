//! Convenience result type alias for EduDash.

use crate::error::AppError;

/// A specialized `Result` type for EduDash operations.
pub type AppResult<T> = Result<T, AppError>;
