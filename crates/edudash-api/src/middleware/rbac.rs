//! Role guards for admin routes.

use axum::extract::Request;
use axum::middleware::Next;
use axum::response::Response;

use edudash_core::error::AppError;

use crate::extractors::AuthUser;

/// Checks that the authenticated user has the Admin role.
pub fn require_admin(auth: &AuthUser) -> Result<(), AppError> {
    if !auth.is_admin() {
        return Err(AppError::forbidden("Admin access required"));
    }
    Ok(())
}

/// Route layer rejecting anonymous callers (401) and non-admins (403).
pub async fn admin_only(
    auth: AuthUser,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    require_admin(&auth)?;
    Ok(next.run(request).await)
}
