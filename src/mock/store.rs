//! In-memory user store backing the mock API. Everything lives for the life of
//! the process.

use crate::features::account::types::{Account, ROLE_ADMIN, ROLE_USER};
use base64ct::{Base64UrlUnpadded, Encoding};
use rand::{seq::SliceRandom, Rng};
use std::{
    collections::HashMap,
    sync::{Mutex, MutexGuard, PoisonError},
};
use tracing::debug;
use ulid::Ulid;
use uuid::Uuid;

/// Number of generated users besides `admin` and `user`.
pub const GENERATED_USERS: usize = 40;
/// Password of every generated user.
pub const GENERATED_PASSWORD: &str = "password";

const FIRST_NAMES: [&str; 12] = [
    "Alice", "Bruno", "Chloé", "David", "Emma", "Farid", "Gabriel", "Hana", "Inès", "Jules",
    "Karim", "Léa",
];
const LAST_NAMES: [&str; 10] = [
    "Martin", "Bernard", "Dubois", "Haddad", "Laurent", "Moreau", "Garcia", "Roux", "Fournier",
    "Mercier",
];
const LANG_KEYS: [&str; 3] = ["en", "fr", "ar"];

#[derive(Clone, Debug)]
struct StoredUser {
    account: Account,
    password: String,
    activation_key: Option<String>,
    reset_key: Option<String>,
}

#[derive(Debug)]
pub enum Conflict {
    Login,
    Email,
}

#[derive(Debug, Default)]
struct Users {
    users: Vec<StoredUser>,
    tokens: HashMap<String, String>,
}

#[derive(Debug, Default)]
pub struct UserStore {
    inner: Mutex<Users>,
}

impl UserStore {
    /// Empty store, used by tests that want full control.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// `admin`/`admin`, `user`/`user` and the generated users, all activated.
    #[must_use]
    pub fn seeded() -> Self {
        let store = Self::new();
        store.insert_activated("admin", "admin", &[ROLE_ADMIN, ROLE_USER], "en");
        store.insert_activated("user", "user", &[ROLE_USER], "en");

        let mut rng = rand::thread_rng();
        for index in 1..=GENERATED_USERS {
            let first = FIRST_NAMES.choose(&mut rng).copied().unwrap_or("Alex");
            let last = LAST_NAMES.choose(&mut rng).copied().unwrap_or("Doe");
            let lang = LANG_KEYS[rng.gen_range(0..LANG_KEYS.len())];
            let login = format!("{}.{}{index}", first.to_lowercase(), last.to_lowercase());
            let mut users = store.lock();
            users.users.push(StoredUser {
                account: Account {
                    id: Some(Uuid::new_v4().to_string()),
                    email: format!("{login}@example.com"),
                    login,
                    first_name: Some(first.to_string()),
                    last_name: Some(last.to_string()),
                    lang_key: lang.to_string(),
                    activated: true,
                    authorities: [ROLE_USER.to_string()].into_iter().collect(),
                },
                password: GENERATED_PASSWORD.to_string(),
                activation_key: None,
                reset_key: None,
            });
        }
        debug!("mock store seeded with {} users", store.len());
        store
    }

    fn lock(&self) -> MutexGuard<'_, Users> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().users.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn insert_activated(&self, login: &str, password: &str, authorities: &[&str], lang_key: &str) {
        self.lock().users.push(StoredUser {
            account: Account {
                id: Some(Uuid::new_v4().to_string()),
                login: login.to_string(),
                email: format!("{login}@localhost"),
                first_name: None,
                last_name: None,
                lang_key: lang_key.to_string(),
                activated: true,
                authorities: authorities.iter().map(ToString::to_string).collect(),
            },
            password: password.to_string(),
            activation_key: None,
            reset_key: None,
        });
    }

    /// Issues a token when the credentials match an activated account.
    #[must_use]
    pub fn authenticate(&self, login: &str, password: &str) -> Option<String> {
        let mut users = self.lock();
        let matches = users.users.iter().any(|user| {
            user.account.activated
                && user.account.login.eq_ignore_ascii_case(login)
                && user.password == password
        });
        if !matches {
            return None;
        }
        let token = Base64UrlUnpadded::encode_string(format!("{login}:{}", Ulid::new()).as_bytes());
        users.tokens.insert(token.clone(), login.to_lowercase());
        Some(token)
    }

    #[must_use]
    pub fn account_for_token(&self, token: &str) -> Option<Account> {
        let users = self.lock();
        let login = users.tokens.get(token)?;
        users
            .users
            .iter()
            .find(|user| user.account.login.eq_ignore_ascii_case(login))
            .map(|user| user.account.clone())
    }

    /// Creates a non-activated account and returns it with its activation key.
    ///
    /// # Errors
    /// Returns the conflicting attribute when the login or email is taken.
    pub fn register(
        &self,
        login: &str,
        email: &str,
        password: &str,
        lang_key: &str,
    ) -> Result<(Account, String), Conflict> {
        let mut users = self.lock();
        if users
            .users
            .iter()
            .any(|user| user.account.login.eq_ignore_ascii_case(login))
        {
            return Err(Conflict::Login);
        }
        if users
            .users
            .iter()
            .any(|user| user.account.email.eq_ignore_ascii_case(email))
        {
            return Err(Conflict::Email);
        }

        let key = Uuid::new_v4().simple().to_string();
        let account = Account {
            id: Some(Uuid::new_v4().to_string()),
            login: login.to_lowercase(),
            email: email.to_lowercase(),
            first_name: None,
            last_name: None,
            lang_key: lang_key.to_string(),
            activated: false,
            authorities: [ROLE_USER.to_string()].into_iter().collect(),
        };
        users.users.push(StoredUser {
            account: account.clone(),
            password: password.to_string(),
            activation_key: Some(key.clone()),
            reset_key: None,
        });
        Ok((account, key))
    }

    /// Activates the account holding this key. Keys are single-use.
    pub fn activate(&self, key: &str) -> bool {
        let mut users = self.lock();
        match users
            .users
            .iter_mut()
            .find(|user| user.activation_key.as_deref() == Some(key))
        {
            Some(user) => {
                user.activation_key = None;
                user.account.activated = true;
                true
            }
            None => false,
        }
    }

    /// Replaces the editable attributes of the token owner's account.
    #[must_use]
    pub fn update_account(&self, token: &str, update: &Account) -> Option<Account> {
        let mut users = self.lock();
        let login = users.tokens.get(token)?.clone();
        let user = users
            .users
            .iter_mut()
            .find(|user| user.account.login.eq_ignore_ascii_case(&login))?;
        user.account.first_name = update.first_name.clone();
        user.account.last_name = update.last_name.clone();
        user.account.email = update.email.clone();
        if !update.lang_key.is_empty() {
            user.account.lang_key = update.lang_key.clone();
        }
        Some(user.account.clone())
    }

    /// `None` for an unknown token, `Some(false)` for a wrong current password.
    #[must_use]
    pub fn change_password(&self, token: &str, current: &str, new: &str) -> Option<bool> {
        let mut users = self.lock();
        let login = users.tokens.get(token)?.clone();
        let user = users
            .users
            .iter_mut()
            .find(|user| user.account.login.eq_ignore_ascii_case(&login))?;
        if user.password != current {
            return Some(false);
        }
        user.password = new.to_string();
        Some(true)
    }

    /// Issues a reset key for an activated account with this email.
    #[must_use]
    pub fn request_reset(&self, email: &str) -> Option<String> {
        let mut users = self.lock();
        let user = users
            .users
            .iter_mut()
            .find(|user| user.account.activated && user.account.email.eq_ignore_ascii_case(email.trim()))?;
        let key = Uuid::new_v4().simple().to_string();
        user.reset_key = Some(key.clone());
        Some(key)
    }

    /// Sets the password of the account holding this reset key and burns it.
    pub fn finish_reset(&self, key: &str, new_password: &str) -> bool {
        let mut users = self.lock();
        match users
            .users
            .iter_mut()
            .find(|user| user.reset_key.as_deref() == Some(key))
        {
            Some(user) => {
                user.reset_key = None;
                user.password = new_password.to_string();
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeded_store_has_fixed_and_generated_users() {
        let store = UserStore::seeded();
        assert_eq!(store.len(), GENERATED_USERS + 2);
        assert!(store.authenticate("admin", "admin").is_some());
        assert!(store.authenticate("user", "admin").is_none());
    }

    #[test]
    fn tokens_resolve_to_accounts() {
        let store = UserStore::seeded();
        let token = store.authenticate("admin", "admin").unwrap_or_default();
        let account = store.account_for_token(&token);
        assert!(account.is_some_and(|account| account.is_admin()));
        assert!(store.account_for_token("forged").is_none());
    }

    #[test]
    fn registration_requires_activation() {
        let store = UserStore::new();
        let Ok((account, key)) = store.register("Jane", "jane@example.com", "secret", "fr") else {
            panic!("registration should succeed");
        };
        assert_eq!(account.login, "jane");
        assert!(!account.activated);
        assert!(store.authenticate("jane", "secret").is_none());
        assert!(matches!(
            store.register("jane", "other@example.com", "secret", "en"),
            Err(Conflict::Login)
        ));
        assert!(matches!(
            store.register("janet", "JANE@example.com", "secret", "en"),
            Err(Conflict::Email)
        ));

        assert!(store.activate(&key));
        assert!(!store.activate(&key));
        assert!(store.authenticate("jane", "secret").is_some());
    }

    #[test]
    fn reset_keys_are_single_use() {
        let store = UserStore::seeded();
        assert!(store.request_reset("nobody@example.com").is_none());
        let key = store.request_reset("user@localhost").unwrap_or_default();
        assert!(store.finish_reset(&key, "changed"));
        assert!(!store.finish_reset(&key, "again"));
        assert!(store.authenticate("user", "changed").is_some());
    }

    #[test]
    fn change_password_checks_current() {
        let store = UserStore::seeded();
        let token = store.authenticate("user", "user").unwrap_or_default();
        assert_eq!(store.change_password(&token, "wrong", "next"), Some(false));
        assert_eq!(store.change_password(&token, "user", "next"), Some(true));
        assert_eq!(store.change_password("forged", "next", "other"), None);
    }
}
