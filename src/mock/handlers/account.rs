use super::{bearer_token, problem};
use crate::{
    api::ErrorPayload,
    features::account::types::{
        Account, ChangePasswordRequest, RegisterRequest, ResetPasswordFinishRequest,
    },
    form::valid_email,
    mock::store::{Conflict, UserStore},
    session::DEFAULT_LANGUAGE_KEY,
};
use axum::{
    extract::{Extension, Query},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Json, Response},
};
use serde::Deserialize;
use std::sync::Arc;
use tracing::{debug, info, instrument};
use utoipa::IntoParams;

const PASSWORD_MIN_LENGTH: usize = 4;
const PASSWORD_MAX_LENGTH: usize = 100;

#[derive(Deserialize, Debug, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ActivateParams {
    key: Option<String>,
}

fn unauthorized() -> Response {
    problem(StatusCode::UNAUTHORIZED, "Unauthorized")
}

fn valid_password(password: &str) -> bool {
    (PASSWORD_MIN_LENGTH..=PASSWORD_MAX_LENGTH).contains(&password.chars().count())
}

#[utoipa::path(
    get,
    path= "/account",
    responses (
        (status = 200, description = "Account of the token owner", body = Account, content_type = "application/json"),
        (status = 401, description = "Missing or unknown token", body = ErrorPayload),
    ),
    tag= "account"
)]
#[instrument(skip(store, headers))]
pub async fn get_account(store: Extension<Arc<UserStore>>, headers: HeaderMap) -> Response {
    bearer_token(&headers)
        .and_then(|token| store.account_for_token(token))
        .map_or_else(unauthorized, |account| Json(account).into_response())
}

#[utoipa::path(
    post,
    path= "/account",
    request_body = Account,
    responses (
        (status = 200, description = "Account updated", body = Account, content_type = "application/json"),
        (status = 400, description = "Invalid email", body = ErrorPayload),
        (status = 401, description = "Missing or unknown token", body = ErrorPayload),
    ),
    tag= "account"
)]
#[instrument(skip(store, headers, payload))]
pub async fn save_account(
    store: Extension<Arc<UserStore>>,
    headers: HeaderMap,
    payload: Option<Json<Account>>,
) -> Response {
    let Some(token) = bearer_token(&headers) else {
        return unauthorized();
    };
    let Some(Json(update)) = payload else {
        return problem(StatusCode::BAD_REQUEST, "Missing payload");
    };
    if !valid_email(&update.email) {
        return problem(StatusCode::BAD_REQUEST, "Invalid email");
    }
    store
        .update_account(token, &update)
        .map_or_else(unauthorized, |account| Json(account).into_response())
}

#[utoipa::path(
    post,
    path= "/register",
    request_body = RegisterRequest,
    responses (
        (status = 201, description = "Account created, activation pending", body = Account, content_type = "application/json"),
        (status = 400, description = "Login or email already used, or invalid input", body = ErrorPayload),
    ),
    tag= "account"
)]
#[instrument(skip(store, payload))]
pub async fn register(
    store: Extension<Arc<UserStore>>,
    payload: Option<Json<RegisterRequest>>,
) -> Response {
    let Some(Json(request)) = payload else {
        return problem(StatusCode::BAD_REQUEST, "Missing payload");
    };
    if !valid_email(&request.email) {
        return problem(StatusCode::BAD_REQUEST, "Invalid email");
    }
    if !valid_password(&request.password) {
        return problem(StatusCode::BAD_REQUEST, "Incorrect password");
    }
    let lang_key = if request.lang_key.trim().is_empty() {
        DEFAULT_LANGUAGE_KEY
    } else {
        request.lang_key.as_str()
    };

    match store.register(&request.login, &request.email, &request.password, lang_key) {
        Ok((account, key)) => {
            info!("activation key for {}: {}", account.login, key);
            (StatusCode::CREATED, Json(account)).into_response()
        }
        Err(Conflict::Login) => (
            StatusCode::BAD_REQUEST,
            Json(
                ErrorPayload::new(400, "Login name already used!").with_error_key("userexists"),
            ),
        )
            .into_response(),
        Err(Conflict::Email) => (
            StatusCode::BAD_REQUEST,
            Json(ErrorPayload::new(400, "Email is already in use!").with_error_key("emailexists")),
        )
            .into_response(),
    }
}

#[utoipa::path(
    get,
    path= "/activate",
    params(ActivateParams),
    responses (
        (status = 200, description = "Account activated"),
        (status = 500, description = "No user was found for this activation key", body = ErrorPayload),
    ),
    tag= "account"
)]
#[instrument(skip_all)]
pub async fn activate(
    store: Extension<Arc<UserStore>>,
    Query(params): Query<ActivateParams>,
) -> Response {
    let key = params.key.unwrap_or_default();
    if store.activate(&key) {
        debug!("account activated");
        StatusCode::OK.into_response()
    } else {
        problem(
            StatusCode::INTERNAL_SERVER_ERROR,
            "No user was found for this activation key",
        )
    }
}

#[utoipa::path(
    post,
    path= "/account/change-password",
    request_body = ChangePasswordRequest,
    responses (
        (status = 200, description = "Password changed"),
        (status = 400, description = "Incorrect password", body = ErrorPayload),
        (status = 401, description = "Missing or unknown token", body = ErrorPayload),
    ),
    tag= "account"
)]
#[instrument(skip(store, headers, payload))]
pub async fn change_password(
    store: Extension<Arc<UserStore>>,
    headers: HeaderMap,
    payload: Option<Json<ChangePasswordRequest>>,
) -> Response {
    let Some(token) = bearer_token(&headers) else {
        return unauthorized();
    };
    let Some(Json(request)) = payload else {
        return problem(StatusCode::BAD_REQUEST, "Missing payload");
    };
    if !valid_password(&request.new_password) {
        return problem(StatusCode::BAD_REQUEST, "Incorrect password");
    }
    match store.change_password(token, &request.current_password, &request.new_password) {
        Some(true) => StatusCode::OK.into_response(),
        Some(false) => problem(StatusCode::BAD_REQUEST, "Incorrect password"),
        None => unauthorized(),
    }
}

#[utoipa::path(
    post,
    path= "/account/reset-password/init",
    request_body(content = String, content_type = "text/plain", description = "Account email"),
    responses (
        (status = 200, description = "Accepted whether or not the email is known"),
    ),
    tag= "account"
)]
#[instrument(skip(store, email))]
pub async fn reset_password_init(store: Extension<Arc<UserStore>>, email: String) -> StatusCode {
    match store.request_reset(&email) {
        Some(key) => info!("reset key for {}: {}", email.trim(), key),
        None => debug!("reset requested for an unknown email"),
    }
    StatusCode::OK
}

#[utoipa::path(
    post,
    path= "/account/reset-password/finish",
    request_body = ResetPasswordFinishRequest,
    responses (
        (status = 200, description = "Password reset"),
        (status = 400, description = "Unknown reset key or incorrect password", body = ErrorPayload),
    ),
    tag= "account"
)]
#[instrument(skip(store, payload))]
pub async fn reset_password_finish(
    store: Extension<Arc<UserStore>>,
    payload: Option<Json<ResetPasswordFinishRequest>>,
) -> Response {
    let Some(Json(request)) = payload else {
        return problem(StatusCode::BAD_REQUEST, "Missing payload");
    };
    if !valid_password(&request.new_password) {
        return problem(StatusCode::BAD_REQUEST, "Incorrect password");
    }
    if store.finish_reset(&request.key, &request.new_password) {
        StatusCode::OK.into_response()
    } else {
        problem(StatusCode::BAD_REQUEST, "No user was found for this reset key")
    }
}
