use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Credentials posted to `/authenticate`. Never log this payload.
#[derive(Clone, Serialize, Deserialize, ToSchema)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Clone, Serialize, Deserialize, ToSchema)]
pub struct LoginResponse {
    pub id_token: String,
}
