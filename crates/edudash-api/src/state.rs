//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use edudash_auth::jwt::JwtDecoder;
use edudash_core::config::AppConfig;
use edudash_database::Stores;
use edudash_service::{DocumentService, FolderService, ReorderService, TreeService};

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration
    pub config: Arc<AppConfig>,
    /// Folder and document stores
    pub stores: Stores,
    /// Bearer token validator
    pub jwt_decoder: Arc<JwtDecoder>,
    /// Folder create / edit / delete
    pub folder_service: Arc<FolderService>,
    /// Training document create / list / delete
    pub document_service: Arc<DocumentService>,
    /// Step, bulk reorder, and move
    pub reorder_service: Arc<ReorderService>,
    /// Nested folder tree queries
    pub tree_service: Arc<TreeService>,
}

impl AppState {
    /// Wire every service onto the given stores.
    pub fn new(config: AppConfig, stores: Stores) -> Self {
        let folder_service = Arc::new(FolderService::new(Arc::clone(&stores.folders)));
        let document_service = Arc::new(DocumentService::new(
            Arc::clone(&stores.documents),
            Arc::clone(&stores.folders),
            &config.storage.upload_dir,
        ));
        let reorder_service = Arc::new(ReorderService::new(
            Arc::clone(&stores.folders),
            Arc::clone(&stores.documents),
        ));
        let tree_service = Arc::new(TreeService::new(
            Arc::clone(&stores.folders),
            Arc::clone(&stores.documents),
            config.tree.max_depth,
        ));
        let jwt_decoder = Arc::new(JwtDecoder::new(&config.auth));

        Self {
            config: Arc::new(config),
            stores,
            jwt_decoder,
            folder_service,
            document_service,
            reorder_service,
            tree_service,
        }
    }
}
