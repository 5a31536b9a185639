use crate::GIT_COMMIT_HASH;
use axum::{
    http::{HeaderMap, HeaderValue},
    response::{IntoResponse, Json},
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(ToSchema, Serialize, Deserialize, Debug)]
pub struct Health {
    pub name: String,
    pub version: String,
    pub build: String,
}

#[utoipa::path(
    get,
    path= "/health",
    responses (
        (status = 200, description = "Mock API is up", body = Health, content_type = "application/json"),
    ),
    tag= "health"
)]
pub async fn health() -> impl IntoResponse {
    let body = Json(Health {
        name: env!("CARGO_PKG_NAME").to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        build: GIT_COMMIT_HASH.to_string(),
    });

    let short_hash = if GIT_COMMIT_HASH.len() > 7 {
        &GIT_COMMIT_HASH[0..7]
    } else {
        ""
    };

    let mut headers = HeaderMap::new();
    if let Ok(value) = HeaderValue::from_str(&format!(
        "{}:{}:{}",
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION"),
        short_hash
    )) {
        headers.insert("X-App", value);
    }

    (headers, body)
}
