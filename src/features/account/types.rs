//! Request and response types for account endpoints. Password-bearing payloads
//! deliberately skip `Debug` so they cannot end up in logs.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use utoipa::ToSchema;

/// Authority granting access to administration pages.
pub const ROLE_ADMIN: &str = "ROLE_ADMIN";
/// Authority held by every regular account.
pub const ROLE_USER: &str = "ROLE_USER";

/// Account of the signed-in user as returned by `GET /account`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub login: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(default)]
    pub lang_key: String,
    #[serde(default)]
    pub activated: bool,
    #[serde(default)]
    pub authorities: BTreeSet<String>,
}

impl Account {
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.authorities.contains(ROLE_ADMIN)
    }
}

#[derive(Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub login: String,
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub lang_key: String,
}

#[derive(Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ResetPasswordFinishRequest {
    pub key: String,
    pub new_password: String,
}

#[derive(Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordRequest {
    pub current_password: String,
    pub new_password: String,
}
