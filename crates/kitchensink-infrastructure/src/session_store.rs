//! Shared login session.
//!
//! The one piece of state every screen reads: written at login success,
//! cleared at logout or when the server answers 401, read-only
//! everywhere else. Optionally backed by a file so the CLI keeps the
//! session across invocations (the original client's localStorage).

use kitchensink_core::error::{KitchensinkError, Result};
use kitchensink_core::session::AuthSession;
use std::path::PathBuf;
use std::sync::{Arc, RwLock};

/// Thread-safe holder for the cached session.
///
/// Cloning is cheap; clones share the same slot. `clear` is idempotent
/// and reports whether a session was actually present, so a burst of
/// 401s tears the session down (and logs) exactly once.
#[derive(Debug, Clone, Default)]
pub struct SessionStore {
    session: Arc<RwLock<Option<AuthSession>>>,
    file: Option<PathBuf>,
}

impl SessionStore {
    /// An in-memory store with no session.
    pub fn new() -> Self {
        Self::default()
    }

    /// A store backed by `path`: loads any persisted session now and
    /// writes through on every set/clear.
    pub fn with_file(path: PathBuf) -> Self {
        let session = match std::fs::read_to_string(&path) {
            Ok(raw) => match serde_json::from_str::<AuthSession>(&raw) {
                Ok(session) => Some(session),
                Err(e) => {
                    tracing::warn!("Ignoring unreadable session file {:?}: {}", path, e);
                    None
                }
            },
            Err(_) => None,
        };
        Self {
            session: Arc::new(RwLock::new(session)),
            file: Some(path),
        }
    }

    /// Snapshot of the current session, if logged in.
    pub fn get(&self) -> Option<AuthSession> {
        self.session.read().unwrap().clone()
    }

    pub fn is_logged_in(&self) -> bool {
        self.session.read().unwrap().is_some()
    }

    /// The logged-in session, or an Unauthorized error.
    pub fn require(&self) -> Result<AuthSession> {
        self.get().ok_or(KitchensinkError::Unauthorized)
    }

    /// Stores a fresh session (login success).
    pub fn set(&self, session: AuthSession) {
        if let Some(path) = &self.file {
            self.persist(path, &session);
        }
        *self.session.write().unwrap() = Some(session);
    }

    /// Drops the session. Returns true only for the call that actually
    /// removed one.
    pub fn clear(&self) -> bool {
        let was_present = self.session.write().unwrap().take().is_some();
        if was_present && let Some(path) = &self.file {
            let _ = std::fs::remove_file(path);
        }
        was_present
    }

    fn persist(&self, path: &PathBuf, session: &AuthSession) {
        if let Some(parent) = path.parent() {
            let _ = std::fs::create_dir_all(parent);
        }
        match serde_json::to_string_pretty(session) {
            Ok(raw) => {
                if let Err(e) = std::fs::write(path, raw) {
                    tracing::warn!("Failed to persist session to {:?}: {}", path, e);
                }
            }
            Err(e) => tracing::warn!("Failed to serialize session: {}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kitchensink_core::profile::Role;

    fn sample() -> AuthSession {
        AuthSession {
            token: "t-1".into(),
            user_id: "u-1".into(),
            role: Role::User,
            email: "a@b.co".into(),
            name: "Asha".into(),
        }
    }

    #[test]
    fn test_set_get_clear() {
        let store = SessionStore::new();
        assert!(!store.is_logged_in());
        assert!(store.require().is_err());
        store.set(sample());
        assert_eq!(store.get().unwrap().user_id, "u-1");
        assert!(store.clear());
        assert!(!store.is_logged_in());
    }

    #[test]
    fn test_clear_is_idempotent() {
        let store = SessionStore::new();
        store.set(sample());
        assert!(store.clear());
        assert!(!store.clear());
    }

    #[test]
    fn test_clones_share_state() {
        let store = SessionStore::new();
        let other = store.clone();
        store.set(sample());
        assert!(other.is_logged_in());
        other.clear();
        assert!(!store.is_logged_in());
    }

    #[test]
    fn test_file_backed_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        {
            let store = SessionStore::with_file(path.clone());
            store.set(sample());
        }
        let reloaded = SessionStore::with_file(path.clone());
        assert_eq!(reloaded.get().unwrap().token, "t-1");
        reloaded.clear();
        assert!(!path.exists());
        let empty = SessionStore::with_file(path);
        assert!(!empty.is_logged_in());
    }

    #[test]
    fn test_corrupt_session_file_is_ignored() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        std::fs::write(&path, "not json").unwrap();
        let store = SessionStore::with_file(path);
        assert!(!store.is_logged_in());
    }
}
