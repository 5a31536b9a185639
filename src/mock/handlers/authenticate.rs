use super::problem;
use crate::{
    api::ErrorPayload,
    features::auth::types::{LoginRequest, LoginResponse},
    mock::store::UserStore,
};
use axum::{
    extract::Extension,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use std::sync::Arc;
use tracing::{debug, instrument};

#[utoipa::path(
    post,
    path= "/authenticate",
    request_body = LoginRequest,
    responses (
        (status = 200, description = "Authenticated", body = LoginResponse, content_type = "application/json"),
        (status = 401, description = "Unknown login, wrong password or account not activated", body = ErrorPayload),
    ),
    tag= "auth"
)]
#[instrument(skip(store, payload))]
pub async fn authenticate(
    store: Extension<Arc<UserStore>>,
    payload: Option<Json<LoginRequest>>,
) -> Response {
    let Some(Json(request)) = payload else {
        return problem(StatusCode::BAD_REQUEST, "Missing payload");
    };

    match store.authenticate(&request.username, &request.password) {
        Some(id_token) => {
            debug!("issued token for {}", request.username);
            Json(LoginResponse { id_token }).into_response()
        }
        None => {
            debug!("rejected credentials for {}", request.username);
            problem(StatusCode::UNAUTHORIZED, "Bad credentials")
        }
    }
}
