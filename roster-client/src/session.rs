// roster-client/src/session.rs
// Session - auth token and current user, optionally persisted as JSON

use shared::client::{SessionRecord, UserInfo};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use crate::ClientResult;

/// JSON file holding one [`SessionRecord`]
#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn save(&self, record: &SessionRecord) -> ClientResult<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(record)?;
        fs::write(&self.path, json)?;
        Ok(())
    }

    /// Load the stored record; a missing or unreadable file means no session.
    pub fn load(&self) -> Option<SessionRecord> {
        if !self.path.exists() {
            return None;
        }
        let json = fs::read_to_string(&self.path).ok()?;
        match serde_json::from_str(&json) {
            Ok(record) => Some(record),
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "Ignoring corrupt session file");
                None
            }
        }
    }

    pub fn delete(&self) -> ClientResult<()> {
        if self.path.exists() {
            fs::remove_file(&self.path)?;
        }
        Ok(())
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// The single accessor for session state.
///
/// Absent until [`Session::login`], cleared by [`Session::logout`]. When
/// backed by a [`SessionStore`] the record survives restarts.
#[derive(Debug, Default)]
pub struct Session {
    store: Option<SessionStore>,
    current: RwLock<Option<SessionRecord>>,
}

impl Session {
    /// Memory-only session
    pub fn in_memory() -> Self {
        Self::default()
    }

    /// Session backed by `store`, restoring any record already saved there
    pub fn persistent(store: SessionStore) -> Self {
        let restored = store.load();
        if let Some(record) = &restored {
            tracing::debug!(user = %record.user.username, "Restored session");
        }
        Self {
            store: Some(store),
            current: RwLock::new(restored),
        }
    }

    pub fn login(&self, token: impl Into<String>, user: UserInfo) -> ClientResult<()> {
        let record = SessionRecord::new(token, user);
        if let Some(store) = &self.store {
            store.save(&record)?;
        }
        tracing::info!(user = %record.user.username, "Logged in");
        *self.current.write().unwrap_or_else(|e| e.into_inner()) = Some(record);
        Ok(())
    }

    pub fn logout(&self) -> ClientResult<()> {
        let previous = self.current.write().unwrap_or_else(|e| e.into_inner()).take();
        if let Some(store) = &self.store {
            store.delete()?;
        }
        if let Some(record) = previous {
            tracing::info!(user = %record.user.username, "Logged out");
        }
        Ok(())
    }

    pub fn current_user(&self) -> Option<UserInfo> {
        self.read().as_ref().map(|r| r.user.clone())
    }

    pub fn token(&self) -> Option<String> {
        self.read().as_ref().map(|r| r.token.clone())
    }

    pub fn record(&self) -> Option<SessionRecord> {
        self.read().clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.read().is_some()
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, Option<SessionRecord>> {
        self.current.read().unwrap_or_else(|e| e.into_inner())
    }
}
