//! Store selection from configuration.
//!
//! The PostgreSQL backend opens its pool here and applies the training
//! library schema from `migrations/` before handing out repositories.

use std::sync::Arc;
use std::time::Duration;

use sqlx::migrate::Migrator;
use sqlx::postgres::{PgPool, PgPoolOptions};
use tracing::info;

use edudash_core::config::DatabaseConfig;
use edudash_core::error::{AppError, ErrorKind};
use edudash_core::result::AppResult;

use crate::memory::MemoryStore;
use crate::repositories::{DocumentRepository, FolderRepository};
use crate::store::{DocumentStore, FolderStore};

/// Folder and document schema, embedded at compile time.
static MIGRATOR: Migrator = sqlx::migrate!("../../migrations");

/// The folder and document stores chosen for this process.
#[derive(Debug, Clone)]
pub struct Stores {
    /// Folder persistence.
    pub folders: Arc<dyn FolderStore>,
    /// Document persistence.
    pub documents: Arc<dyn DocumentStore>,
    /// The PostgreSQL pool, when that backend is in use.
    pub pool: Option<PgPool>,
}

impl Stores {
    /// Build the stores named by `config.provider`.
    pub async fn connect(config: &DatabaseConfig) -> AppResult<Self> {
        match config.provider.as_str() {
            "postgres" => {
                let pool = open_pool(config).await?;
                if config.run_migrations {
                    apply_migrations(&pool).await?;
                }
                Ok(Self {
                    folders: Arc::new(FolderRepository::new(pool.clone())),
                    documents: Arc::new(DocumentRepository::new(pool.clone())),
                    pool: Some(pool),
                })
            }
            "memory" => {
                info!("Initializing in-memory stores");
                Ok(Self::in_memory(MemoryStore::new()))
            }
            other => Err(AppError::configuration(format!(
                "Unknown database provider: '{other}'. Supported: postgres, memory"
            ))),
        }
    }

    /// Wrap an existing in-memory store (for testing).
    pub fn in_memory(store: MemoryStore) -> Self {
        Self {
            folders: Arc::new(store.clone()),
            documents: Arc::new(store),
            pool: None,
        }
    }

    /// Close the underlying pool, if any.
    pub async fn close(&self) {
        if let Some(pool) = &self.pool {
            pool.close().await;
            info!("Folder store pool closed");
        }
    }
}

async fn open_pool(config: &DatabaseConfig) -> AppResult<PgPool> {
    info!(
        url = %redact_credentials(&config.url),
        max_connections = config.max_connections,
        min_connections = config.min_connections,
        "Opening folder store pool"
    );

    PgPoolOptions::new()
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .acquire_timeout(Duration::from_secs(config.connect_timeout_seconds))
        .idle_timeout(Duration::from_secs(config.idle_timeout_seconds))
        .connect(&config.url)
        .await
        .map_err(|e| {
            AppError::with_source(
                ErrorKind::Database,
                format!("Failed to connect to folder store: {e}"),
                e,
            )
        })
}

async fn apply_migrations(pool: &PgPool) -> AppResult<()> {
    MIGRATOR.run(pool).await.map_err(|e| {
        AppError::with_source(
            ErrorKind::Database,
            format!("Failed to apply folder schema: {e}"),
            e,
        )
    })?;

    let latest = MIGRATOR.iter().map(|m| m.version).max();
    info!(
        migrations = MIGRATOR.iter().count(),
        latest = ?latest,
        "Folder and document schema up to date"
    );
    Ok(())
}

/// The URL with any password replaced by `****`.
fn redact_credentials(url: &str) -> String {
    let redacted = url.split_once("://").and_then(|(scheme, rest)| {
        let (userinfo, host) = rest.rsplit_once('@')?;
        let (user, _) = userinfo.split_once(':')?;
        Some(format!("{scheme}://{user}:****@{host}"))
    });
    redacted.unwrap_or_else(|| url.to_string())
}
