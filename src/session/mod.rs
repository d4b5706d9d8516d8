//! Session Holder
//!
//! Keeps the bearer token that proves the user is logged in.
//!
//! The token is the only state shared between views. It is persisted
//! through a [`TokenStore`] so it survives restarts, and cached in memory
//! so every request can read it cheaply.
//!
//! Invariant: the held token is either absent or a non-empty string.

mod store;

use std::sync::{Arc, RwLock};
use thiserror::Error;

pub use store::{FileTokenStore, MemoryTokenStore, TokenStore};

/// Errors from the session layer
#[derive(Error, Debug)]
pub enum SessionError {
    /// I/O operation on the token file failed
    #[error("Token storage error: {0}")]
    Io(#[from] std::io::Error),

    /// Lock acquisition failed
    #[error("Lock error: {0}")]
    Lock(String),
}

/// Shared handle to the current session token
///
/// Cloning is cheap; all clones see the same token.
#[derive(Clone)]
pub struct Session {
    store: Arc<dyn TokenStore>,
    current: Arc<RwLock<Option<String>>>,
}

impl Session {
    /// Open a session backed by `store`, loading any persisted token
    pub fn new(store: Arc<dyn TokenStore>) -> Result<Self, SessionError> {
        let initial = store.load()?.and_then(normalize);
        if initial.is_some() {
            tracing::debug!("Restored persisted session token");
        }

        Ok(Self {
            store,
            current: Arc::new(RwLock::new(initial)),
        })
    }

    /// Session that is never written to disk
    pub fn in_memory() -> Self {
        Self {
            store: Arc::new(MemoryTokenStore::default()),
            current: Arc::new(RwLock::new(None)),
        }
    }

    /// Current token, if logged in
    pub fn token(&self) -> Option<String> {
        match self.current.read() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.token().is_some()
    }

    /// Store a new token. An empty token clears the session.
    pub fn set(&self, token: &str) -> Result<(), SessionError> {
        let Some(token) = normalize(token.to_string()) else {
            return self.clear();
        };

        self.store.save(&token)?;
        *self
            .current
            .write()
            .map_err(|e| SessionError::Lock(e.to_string()))? = Some(token);

        tracing::info!("Session token stored");
        Ok(())
    }

    /// Forget the token (logout)
    pub fn clear(&self) -> Result<(), SessionError> {
        self.store.remove()?;
        *self
            .current
            .write()
            .map_err(|e| SessionError::Lock(e.to_string()))? = None;

        tracing::info!("Session cleared");
        Ok(())
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("authenticated", &self.is_authenticated())
            .finish()
    }
}

/// Blank tokens mean "no session"; anything else is kept byte for byte
fn normalize(token: String) -> Option<String> {
    if token.trim().is_empty() {
        None
    } else {
        Some(token)
    }
}
