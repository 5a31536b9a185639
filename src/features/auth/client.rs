//! Client wrapper for the login endpoint. A successful login is the only
//! place the session token is written; logout clears it locally.

use crate::{
    api::{ApiClient, AppError},
    features::auth::types::{LoginRequest, LoginResponse},
};
use secrecy::SecretString;
use tracing::debug;

#[derive(Clone, Debug)]
pub struct AuthClient {
    api: ApiClient,
}

impl AuthClient {
    #[must_use]
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// Authenticates and stores the returned token in the session.
    /// On error the session is left untouched.
    pub async fn login(&self, request: &LoginRequest) -> Result<(), AppError> {
        let response: LoginResponse = self.api.post_json("/authenticate", request).await?;
        if response.id_token.trim().is_empty() {
            return Err(AppError::Parse(
                "Authentication response did not include a token.".to_string(),
            ));
        }
        self.api
            .session()
            .set_token(SecretString::from(response.id_token));
        debug!("login succeeded");
        Ok(())
    }

    /// Forgets the token and cached account. Tokens are stateless, so no request is sent.
    pub fn logout(&self) {
        self.api.session().clear();
    }
}
