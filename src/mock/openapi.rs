use crate::{
    api::ErrorPayload,
    features::{
        account::types::{Account, ChangePasswordRequest, RegisterRequest, ResetPasswordFinishRequest},
        auth::types::{LoginRequest, LoginResponse},
    },
    mock::handlers::{account, authenticate, health},
};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health,
        authenticate::authenticate,
        account::get_account,
        account::save_account,
        account::register,
        account::activate,
        account::change_password,
        account::reset_password_init,
        account::reset_password_finish,
    ),
    components(schemas(
        Account,
        ChangePasswordRequest,
        ErrorPayload,
        LoginRequest,
        LoginResponse,
        RegisterRequest,
        ResetPasswordFinishRequest,
        health::Health,
    )),
    tags(
        (name = "account", description = "Account lifecycle: registration, activation, profile and passwords"),
        (name = "auth", description = "Token issuance"),
        (name = "health", description = "Liveness"),
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_lists_every_endpoint() {
        let doc = ApiDoc::openapi();
        for path in [
            "/health",
            "/authenticate",
            "/account",
            "/register",
            "/activate",
            "/account/change-password",
            "/account/reset-password/init",
            "/account/reset-password/finish",
        ] {
            assert!(doc.paths.paths.contains_key(path), "missing {path}");
        }
    }
}
