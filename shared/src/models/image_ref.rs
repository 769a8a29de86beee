//! Image host upload result

use serde::{Deserialize, Serialize};

/// Result of an avatar upload to the external image host
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageUpload {
    pub success: bool,
    pub url: String,
    #[serde(default)]
    pub delete_url: Option<String>,
}
