//! Client-related types
//!
//! Session DTOs persisted by the client between runs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// User information attached to a session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserInfo {
    pub id: String,
    pub username: String,
    #[serde(default)]
    pub role: String,
}

/// Persisted session: auth token plus the user it belongs to
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionRecord {
    pub token: String,
    pub user: UserInfo,
    pub logged_in_at: DateTime<Utc>,
}

impl SessionRecord {
    pub fn new(token: impl Into<String>, user: UserInfo) -> Self {
        Self {
            token: token.into(),
            user,
            logged_in_at: Utc::now(),
        }
    }
}
