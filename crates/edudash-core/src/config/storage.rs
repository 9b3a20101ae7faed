//! Uploaded file storage configuration.

use serde::{Deserialize, Serialize};

/// Where uploaded document files live on disk.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Directory holding uploaded files; document URLs resolve by file name.
    #[serde(default = "default_upload_dir")]
    pub upload_dir: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            upload_dir: default_upload_dir(),
        }
    }
}

fn default_upload_dir() -> String {
    "/var/www/uploads".to_string()
}
