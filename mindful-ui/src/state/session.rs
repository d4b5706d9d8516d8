//! Session Token
//!
//! The bearer token shared by every page. It is mirrored to
//! `localStorage` so a reload keeps the user logged in.

use leptos::*;

use crate::api::ApiError;

const TOKEN_KEY: &str = "token";

/// Reactive handle on the session token
#[derive(Clone, Copy)]
pub struct Session {
    token: RwSignal<Option<String>>,
}

impl Session {
    /// Current token, tracked
    pub fn token(&self) -> Option<String> {
        self.token.get()
    }

    /// Current token without subscribing the caller
    pub fn token_untracked(&self) -> Option<String> {
        self.token.get_untracked()
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.with(Option::is_some)
    }

    /// Store a token. Blank tokens clear the session instead.
    pub fn set(&self, token: &str) {
        match normalize(Some(token.to_string())) {
            Some(token) => {
                write_storage(Some(&token));
                self.token.set(Some(token));
            }
            None => self.clear(),
        }
    }

    pub fn clear(&self) {
        write_storage(None);
        self.token.set(None);
    }

    /// Drop the token when the server refused it (401/403). Returns whether
    /// the session was cleared.
    pub fn forget_if_rejected(&self, error: &ApiError) -> bool {
        if !error.is_auth_failure() {
            return false;
        }
        web_sys::console::log_1(&"Server rejected the session token, logging out".into());
        self.clear();
        true
    }
}

/// Provide the session, seeded from storage, to the component tree
pub fn provide_session() -> Session {
    let session = Session {
        token: create_rw_signal(normalize(read_storage())),
    };
    provide_context(session);
    session
}

pub fn use_session() -> Session {
    expect_context::<Session>()
}

/// Blank tokens mean "no session"; anything else is kept as given
fn normalize(token: Option<String>) -> Option<String> {
    token.filter(|t| !t.trim().is_empty())
}

fn storage() -> Option<web_sys::Storage> {
    web_sys::window().and_then(|w| w.local_storage().ok().flatten())
}

fn read_storage() -> Option<String> {
    storage().and_then(|s| s.get_item(TOKEN_KEY).ok().flatten())
}

fn write_storage(token: Option<&str>) {
    let Some(storage) = storage() else {
        return;
    };

    let result = match token {
        Some(token) => storage.set_item(TOKEN_KEY, token),
        None => storage.remove_item(TOKEN_KEY),
    };
    if result.is_err() {
        web_sys::console::warn_1(&"Could not persist session token".into());
    }
}
