//! Shared session state: the bearer token, the active locale and the cached
//! account. Reads are public; writes are crate-internal and happen only in the
//! clients' success handlers (plus logout), so there is a single writer per
//! event. The token is kept as a secret and must never be logged.

use crate::features::account::types::Account;
use secrecy::{ExposeSecret, SecretString};
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::debug;

/// Locale used until an account or explicit choice says otherwise.
pub const DEFAULT_LANGUAGE_KEY: &str = "en";

#[derive(Debug)]
struct Session {
    token: Option<SecretString>,
    locale: String,
    account: Option<Account>,
}

impl Default for Session {
    fn default() -> Self {
        Self {
            token: None,
            locale: DEFAULT_LANGUAGE_KEY.to_string(),
            account: None,
        }
    }
}

#[derive(Debug, Default)]
pub struct SessionStore {
    inner: RwLock<Session>,
}

impl SessionStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> RwLockReadGuard<'_, Session> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Session> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }

    #[must_use]
    pub fn token(&self) -> Option<SecretString> {
        self.read().token.clone()
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.read().token.is_some()
    }

    #[must_use]
    pub fn locale(&self) -> String {
        self.read().locale.clone()
    }

    #[must_use]
    pub fn account(&self) -> Option<Account> {
        self.read().account.clone()
    }

    /// True when the cached account carries the admin authority.
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.read().account.as_ref().is_some_and(Account::is_admin)
    }

    /// Header value for authenticated requests, if a token is present.
    pub(crate) fn bearer(&self) -> Option<String> {
        self.read()
            .token
            .as_ref()
            .map(|token| format!("Bearer {}", token.expose_secret()))
    }

    pub(crate) fn set_token(&self, token: SecretString) {
        debug!("session token updated");
        self.write().token = Some(token);
    }

    pub(crate) fn set_locale(&self, locale: &str) {
        if locale.trim().is_empty() {
            return;
        }
        debug!("active locale set to {}", locale);
        self.write().locale = locale.to_string();
    }

    pub(crate) fn set_account(&self, account: Account) {
        self.write().account = Some(account);
    }

    /// Drops the token and cached account, keeping the active locale.
    pub fn clear(&self) {
        let mut session = self.write();
        session.token = None;
        session.account = None;
        debug!("session cleared");
    }
}
