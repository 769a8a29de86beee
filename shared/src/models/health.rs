//! Health probe model

use serde::{Deserialize, Serialize};

/// Body of `GET health`, `health/ready` and `health/live`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    /// Any extra fields the probe reports (uptime, database state, ...)
    #[serde(flatten)]
    pub details: serde_json::Map<String, serde_json::Value>,
}

impl HealthStatus {
    pub fn is_ok(&self) -> bool {
        matches!(
            self.status.to_ascii_lowercase().as_str(),
            "ok" | "healthy" | "ready" | "alive" | "up"
        )
    }
}
