//! Response DTOs.

use serde::{Deserialize, Serialize};

/// Acknowledgement returned by mutations with no payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuccessResponse {
    /// Always `true`; failures use the error body instead.
    pub success: bool,
}

impl SuccessResponse {
    /// The standard acknowledgement.
    pub fn ok() -> Self {
        Self { success: true }
    }
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// `"ok"` or `"degraded"`.
    pub status: String,
    /// Server version.
    pub version: String,
}
