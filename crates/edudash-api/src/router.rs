//! Route definitions for the EduDash HTTP API.
//!
//! All routes are mounted under `/api`. Everything below `/api/admin`
//! passes through the admin guard.

use axum::{
    Router, middleware as axum_middleware,
    routing::{delete, get, patch, post},
};

use crate::handlers;
use crate::middleware::rbac::admin_only;
use crate::state::AppState;

/// Build the router with all routes, threading `AppState` through every handler.
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .merge(health_routes())
        .merge(library_routes())
        .nest("/admin", admin_routes(state.clone()));

    Router::new().nest("/api", api_routes).with_state(state)
}

/// Unauthenticated liveness check.
fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(handlers::health::health))
}

/// Read-only trees for any signed-in user.
fn library_routes() -> Router<AppState> {
    Router::new()
        .route("/folders", get(handlers::folder::folder_tree))
        .route("/training", get(handlers::training::training_tree))
}

/// Folder and training document management.
fn admin_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/folders", post(handlers::admin::folders::create_folder))
        .route(
            "/folders/{id}",
            patch(handlers::admin::folders::update_folder)
                .delete(handlers::admin::folders::delete_folder),
        )
        .route(
            "/folders/reorder-single",
            post(handlers::admin::folders::step_folder),
        )
        .route("/folders/reorder", post(handlers::admin::folders::reorder_folders))
        .route("/folders/move", post(handlers::admin::folders::move_folder))
        .route(
            "/training",
            get(handlers::admin::training::list_training)
                .post(handlers::admin::training::create_training),
        )
        .route(
            "/training/reorder-single",
            post(handlers::admin::training::step_document),
        )
        .route(
            "/training/reorder",
            post(handlers::admin::training::reorder_documents),
        )
        .route("/training/move", post(handlers::admin::training::move_document))
        .route(
            "/documents/{id}",
            delete(handlers::admin::documents::delete_document),
        )
        .route_layer(axum_middleware::from_fn_with_state(state, admin_only))
}
