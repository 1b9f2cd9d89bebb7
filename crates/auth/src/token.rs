//! Bearer token slot.
//!
//! Exactly one token is active per client. The slot is reached through a
//! [`TokenRepository`] so each session (a desktop profile, a server-side
//! render, a test) owns its own storage instead of sharing ambient state.

use std::fmt;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use thiserror::Error;

use crate::claims::{self, UnverifiedClaims};

/// Fixed name of the persisted token slot.
pub const TOKEN_KEY: &str = "eventhub_token";

const BEARER_PREFIX: &str = "Bearer ";

#[derive(Debug, Error)]
pub enum TokenStoreError {
    #[error("token storage unavailable: {0}")]
    Unavailable(String),

    #[error("token storage io error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Storage backend for the single token slot.
///
/// `get` never fails: a missing value or an unusable backend both read as
/// `None`. Writes are last-write-wins.
pub trait TokenRepository: Send + Sync {
    fn get(&self) -> Option<String>;
    fn set(&self, token: &str) -> Result<(), TokenStoreError>;
    /// Clear the slot. Clearing an empty slot is not an error.
    fn clear(&self) -> Result<(), TokenStoreError>;
}

/// Strip a leading case-insensitive `Bearer ` prefix.
pub fn strip_bearer(token: &str) -> &str {
    match token.get(..BEARER_PREFIX.len()) {
        Some(head) if head.eq_ignore_ascii_case(BEARER_PREFIX) => &token[BEARER_PREFIX.len()..],
        _ => token,
    }
}

/// `Authorization` header value for a stored token; never double-prefixes.
pub fn authorization_value(token: &str) -> String {
    format!("{BEARER_PREFIX}{}", strip_bearer(token))
}

// ─────────────────────────────────────────────────────────────────────────────
// In-memory repository
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Default)]
pub struct InMemoryTokenRepository {
    slot: Mutex<Option<String>>,
}

impl InMemoryTokenRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            slot: Mutex::new(Some(token.into())),
        }
    }

    fn slot(&self) -> std::sync::MutexGuard<'_, Option<String>> {
        self.slot.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl TokenRepository for InMemoryTokenRepository {
    fn get(&self) -> Option<String> {
        self.slot().clone()
    }

    fn set(&self, token: &str) -> Result<(), TokenStoreError> {
        *self.slot() = Some(token.to_string());
        Ok(())
    }

    fn clear(&self) -> Result<(), TokenStoreError> {
        self.slot().take();
        Ok(())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// File-backed repository
// ─────────────────────────────────────────────────────────────────────────────

/// Persists the slot as a single file holding the raw token string.
#[derive(Debug, Clone)]
pub struct FileTokenRepository {
    path: PathBuf,
}

impl FileTokenRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `<local data dir>/eventhub/<TOKEN_KEY>`, if the platform has one.
    pub fn default_location() -> Option<PathBuf> {
        dirs::data_local_dir().map(|dir| dir.join("eventhub").join(TOKEN_KEY))
    }

    pub fn at_default_location() -> Result<Self, TokenStoreError> {
        Self::default_location()
            .map(Self::new)
            .ok_or_else(|| TokenStoreError::Unavailable("no local data directory".to_string()))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: io::Error) -> TokenStoreError {
        TokenStoreError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

impl TokenRepository for FileTokenRepository {
    fn get(&self) -> Option<String> {
        match std::fs::read_to_string(&self.path) {
            Ok(token) => Some(token),
            Err(err) if err.kind() == io::ErrorKind::NotFound => None,
            Err(err) => {
                tracing::warn!(path = %self.path.display(), "token slot unreadable: {err}");
                None
            }
        }
    }

    fn set(&self, token: &str) -> Result<(), TokenStoreError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| self.io_error(e))?;
        }
        std::fs::write(&self.path, token).map_err(|e| self.io_error(e))
    }

    fn clear(&self) -> Result<(), TokenStoreError> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(self.io_error(err)),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Store façade
// ─────────────────────────────────────────────────────────────────────────────

/// Cheaply cloneable handle to one session's token slot.
#[derive(Clone)]
pub struct TokenStore {
    repo: Arc<dyn TokenRepository>,
}

impl fmt::Debug for TokenStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenStore")
            .field("present", &self.exists())
            .finish()
    }
}

impl TokenStore {
    pub fn new(repo: Arc<dyn TokenRepository>) -> Self {
        Self { repo }
    }

    pub fn in_memory() -> Self {
        Self::new(Arc::new(InMemoryTokenRepository::new()))
    }

    /// Overwrite the slot. The token shape is not validated.
    pub fn set(&self, token: impl AsRef<str>) -> Result<(), TokenStoreError> {
        self.repo.set(token.as_ref())
    }

    /// The stored token, verbatim.
    pub fn get(&self) -> Option<String> {
        self.repo.get()
    }

    pub fn remove(&self) -> Result<(), TokenStoreError> {
        self.repo.clear()
    }

    pub fn exists(&self) -> bool {
        self.get().is_some()
    }

    /// `Bearer <token>` for the stored token, if any.
    pub fn authorization(&self) -> Option<String> {
        self.get().map(|token| authorization_value(&token))
    }

    /// Unverified claims of the stored token.
    pub fn claims(&self) -> Option<UnverifiedClaims> {
        self.get().and_then(|token| claims::decode(&token))
    }
}

impl Default for TokenStore {
    fn default() -> Self {
        Self::in_memory()
    }
}
