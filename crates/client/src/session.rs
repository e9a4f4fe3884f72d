//! Session persistence
//!
//! The session is the only shared mutable state in the client: one record
//! holding the access/refresh token pair and the identity it belongs to.
//! A session is either fully present or fully absent; stores replace the
//! whole record on every write and read malformed data as absent.

use crate::types::{AuthResponse, TokenPair, User};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Mutex;
use tracing::warn;

/// A logged-in user's credential pair and identity
///
/// Serializes to the flat camelCase record the web storage scope holds:
/// `{accessToken, refreshToken, id, username, email, role}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub access_token: String,
    pub refresh_token: String,
    #[serde(flatten)]
    pub user: User,
}

impl Session {
    /// Session created by a successful login or registration
    #[must_use]
    pub fn from_auth(auth: &AuthResponse) -> Self {
        Self {
            access_token: auth.access_token.clone(),
            refresh_token: auth.refresh_token.clone(),
            user: auth.user(),
        }
    }

    /// Replace both tokens at once, keeping the identity fields
    #[must_use]
    pub fn with_tokens(&self, tokens: &TokenPair) -> Self {
        Self {
            access_token: tokens.access_token.clone(),
            refresh_token: tokens.refresh_token.clone(),
            user: self.user.clone(),
        }
    }
}

/// Storage for the current session
///
/// Reads are synchronous and infallible from the caller's point of view:
/// malformed persisted data loads as absent rather than surfacing an error.
/// Only login, refresh success, and logout write through this trait.
pub trait SessionStore: Send + Sync {
    /// Read the current session, if any
    fn load(&self) -> Option<Session>;

    /// Replace the stored session with a complete new value
    fn save(&self, session: &Session);

    /// Remove the stored session; idempotent
    fn clear(&self);
}

/// Observer for session teardowns the gateway performs on its own
pub trait SessionEvents: Send + Sync {
    /// Called exactly once each time an authenticated session ends without an
    /// explicit logout (refresh failure, missing refresh token, network
    /// loss). The usual reaction is navigating to the login screen.
    fn forced_logout(&self);
}

/// Observer that ignores all events
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopSessionEvents;

impl SessionEvents for NoopSessionEvents {
    fn forced_logout(&self) {}
}

/// In-memory store for tests and hosts that manage persistence themselves
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    inner: Mutex<Option<Session>>,
}

impl MemorySessionStore {
    /// Create an empty store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for MemorySessionStore {
    fn load(&self) -> Option<Session> {
        self.inner.lock().expect("session lock poisoned").clone()
    }

    fn save(&self, session: &Session) {
        *self.inner.lock().expect("session lock poisoned") = Some(session.clone());
    }

    fn clear(&self) {
        *self.inner.lock().expect("session lock poisoned") = None;
    }
}

/// File-backed store holding one JSON record, the native analogue of the
/// browser storage scope the web UI persists into
#[derive(Debug)]
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    /// Store backed by the given file; created on first save
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl SessionStore for FileSessionStore {
    fn load(&self) -> Option<Session> {
        let raw = std::fs::read_to_string(&self.path).ok()?;
        match serde_json::from_str(&raw) {
            Ok(session) => Some(session),
            Err(err) => {
                warn!(path = %self.path.display(), %err, "discarding malformed session record");
                None
            }
        }
    }

    fn save(&self, session: &Session) {
        let raw = match serde_json::to_string(session) {
            Ok(raw) => raw,
            Err(err) => {
                warn!(%err, "failed to serialize session");
                return;
            }
        };
        if let Err(err) = std::fs::write(&self.path, raw) {
            warn!(path = %self.path.display(), %err, "failed to persist session");
        }
    }

    fn clear(&self) {
        if let Err(err) = std::fs::remove_file(&self.path) {
            if err.kind() != std::io::ErrorKind::NotFound {
                warn!(path = %self.path.display(), %err, "failed to remove session record");
            }
        }
    }
}
