//! Session state derived from client storage.
//!
//! SYSTEM CONTEXT
//! ==============
//! The navigation guard needs two facts per transition: whether a session
//! token is stored and whether the stored role marker names an admin. They are
//! read fresh on each navigation and never cached here.
//!
//! Login and logout flows own the writes (`persist_login`, `clear_session`);
//! the guard only ever reads.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use crate::config::GuardConfig;
use crate::util::storage::{KeyValueStore, StorageError};

/// Snapshot of client session flags at guard-invocation time.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SessionState {
    pub logged_in: bool,
    pub is_admin: bool,
}

/// Read-only source of the current session state.
pub trait SessionReader {
    /// Never fails; missing or unreadable values count as not set.
    fn read(&self) -> SessionState;
}

impl<R: SessionReader + ?Sized> SessionReader for &R {
    fn read(&self) -> SessionState {
        (**self).read()
    }
}

/// Reads the token and role marker from a `KeyValueStore`.
#[derive(Debug, Clone)]
pub struct StorageSessionReader<S> {
    store: S,
    token_key: String,
    role_key: String,
    admin_sentinel: String,
}

impl<S: KeyValueStore> StorageSessionReader<S> {
    pub fn new(store: S, config: &GuardConfig) -> Self {
        Self {
            store,
            token_key: config.token_key.clone(),
            role_key: config.role_key.clone(),
            admin_sentinel: config.admin_sentinel.clone(),
        }
    }

    fn lookup(&self, key: &str) -> Option<String> {
        match self.store.get_item(key) {
            Ok(value) => value,
            Err(err) => {
                log::warn!("session storage read of '{key}' failed, treating as unset: {err}");
                None
            }
        }
    }
}

impl<S: KeyValueStore> SessionReader for StorageSessionReader<S> {
    fn read(&self) -> SessionState {
        // An empty token is as good as none.
        let logged_in = self.lookup(&self.token_key).is_some_and(|token| !token.is_empty());
        let is_admin = self
            .lookup(&self.role_key)
            .is_some_and(|role| is_admin_marker(&role, &self.admin_sentinel));
        SessionState { logged_in, is_admin }
    }
}

/// Exact, case-sensitive comparison. No trimming.
pub fn is_admin_marker(role: &str, sentinel: &str) -> bool {
    role == sentinel
}

/// Store the session after a successful login. A `None` role clears any
/// marker left by a previous session.
///
/// The role is settled before the token is written, so a failed write never
/// leaves a fresh token next to a stale admin marker.
pub fn persist_login<S>(store: &S, config: &GuardConfig, token: &str, role: Option<&str>) -> Result<(), StorageError>
where
    S: KeyValueStore + ?Sized,
{
    match role {
        Some(role) => store.set_item(&config.role_key, role)?,
        None => store.remove_item(&config.role_key)?,
    }
    store.set_item(&config.token_key, token)
}

/// Remove the token and role marker on logout.
pub fn clear_session<S>(store: &S, config: &GuardConfig) -> Result<(), StorageError>
where
    S: KeyValueStore + ?Sized,
{
    store.remove_item(&config.token_key)?;
    store.remove_item(&config.role_key)
}
