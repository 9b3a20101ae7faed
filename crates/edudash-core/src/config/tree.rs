//! Folder tree query configuration.

use serde::{Deserialize, Serialize};

/// Limits applied when assembling the nested folder tree.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TreeConfig {
    /// Number of folder levels returned, counting the root level as 1.
    /// Deeper folders are omitted from the response.
    #[serde(default = "default_max_depth")]
    pub max_depth: usize,
}

impl Default for TreeConfig {
    fn default() -> Self {
        Self {
            max_depth: default_max_depth(),
        }
    }
}

fn default_max_depth() -> usize {
    4
}
