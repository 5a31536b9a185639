//! Client wrappers for the account endpoints. Each call issues exactly one
//! request; success handlers are the only place the session locale and cached
//! account are written.

use crate::{
    api::{ApiClient, AppError},
    features::account::types::{
        Account, ChangePasswordRequest, RegisterRequest, ResetPasswordFinishRequest,
    },
    session::DEFAULT_LANGUAGE_KEY,
};
use tracing::debug;
use url::form_urlencoded;

#[derive(Clone, Debug)]
pub struct AccountClient {
    api: ApiClient,
}

impl AccountClient {
    #[must_use]
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// Fetches the current account and switches the active locale to its `langKey`.
    pub async fn fetch_account(&self) -> Result<Account, AppError> {
        let account: Account = self.api.get_json("/account").await?;
        let session = self.api.session();
        session.set_locale(&account.lang_key);
        session.set_account(account.clone());
        Ok(account)
    }

    /// Registers a new account; an empty `lang_key` falls back to the default language.
    /// Must never log the request since it carries the password.
    pub async fn register(&self, request: &RegisterRequest) -> Result<Account, AppError> {
        let mut request = request.clone();
        if request.lang_key.trim().is_empty() {
            request.lang_key = DEFAULT_LANGUAGE_KEY.to_string();
        }
        debug!("registering account");
        self.api.post_json("/register", &request).await
    }

    /// Activates an account from the key sent by email.
    pub async fn activate(&self, key: &str) -> Result<(), AppError> {
        let query: String = form_urlencoded::Serializer::new(String::new())
            .append_pair("key", key)
            .finish();
        self.api.get_empty(&format!("/activate?{query}")).await
    }

    /// Saves account changes and switches the active locale to the saved `langKey`.
    pub async fn update_account(&self, account: &Account) -> Result<Account, AppError> {
        let updated: Account = self.api.post_json("/account", account).await?;
        let session = self.api.session();
        session.set_locale(&account.lang_key);
        session.set_account(updated.clone());
        Ok(updated)
    }

    /// Starts a password reset; the email is sent as a `text/plain` body.
    pub async fn reset_password_init(&self, email: &str) -> Result<(), AppError> {
        self.api
            .post_text_empty("/account/reset-password/init", email)
            .await
    }

    /// Completes a password reset with the emailed key.
    pub async fn reset_password_finish(
        &self,
        request: &ResetPasswordFinishRequest,
    ) -> Result<(), AppError> {
        self.api
            .post_json_empty("/account/reset-password/finish", request)
            .await
    }

    /// Changes the password of the signed-in account.
    pub async fn change_password(&self, request: &ChangePasswordRequest) -> Result<(), AppError> {
        self.api
            .post_json_empty("/account/change-password", request)
            .await
    }
}
