//! HTTP helpers for the account API with consistent timeouts and error handling.
//! Feature clients use these helpers to avoid duplicating request setup. The only
//! credential they touch is the session bearer token, attached when present and
//! never logged.

mod errors;

pub use errors::{AppError, ErrorPayload};

use crate::{config::AppConfig, session::SessionStore, APP_USER_AGENT};
use reqwest::{
    header::{AUTHORIZATION, CONTENT_TYPE},
    Client, RequestBuilder, Response,
};
use serde::{de::DeserializeOwned, Serialize};
use std::sync::Arc;
use tracing::debug;

/// Maximum number of error body characters surfaced to the UI.
const MAX_ERROR_CHARS: usize = 200;

/// Shared HTTP layer: one `reqwest` client, the endpoint configuration and the
/// session whose token is attached to every request.
#[derive(Clone, Debug)]
pub struct ApiClient {
    http: Client,
    config: AppConfig,
    session: Arc<SessionStore>,
}

impl ApiClient {
    /// Builds the client with the configured timeout.
    ///
    /// # Errors
    /// Returns `AppError::Config` if the underlying HTTP client cannot be built.
    pub fn new(config: AppConfig, session: Arc<SessionStore>) -> Result<Self, AppError> {
        let http = Client::builder()
            .user_agent(APP_USER_AGENT)
            .timeout(config.request_timeout)
            .build()
            .map_err(|err| AppError::Config(format!("Failed to build HTTP client: {err}")))?;

        Ok(Self {
            http,
            config,
            session,
        })
    }

    #[must_use]
    pub fn session(&self) -> &Arc<SessionStore> {
        &self.session
    }

    #[must_use]
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Fetches JSON.
    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, AppError> {
        let response = self.send(self.http.get(self.config.url(path))).await?;
        handle_json_response(response).await
    }

    /// Issues a GET and expects no meaningful response body.
    pub async fn get_empty(&self, path: &str) -> Result<(), AppError> {
        let response = self.send(self.http.get(self.config.url(path))).await?;
        handle_empty_response(response).await
    }

    /// Posts JSON and parses a JSON response.
    pub async fn post_json<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, AppError> {
        let builder = self.json_request(path, body)?;
        let response = self.send(builder).await?;
        handle_json_response(response).await
    }

    /// Posts JSON and expects an empty response body.
    pub async fn post_json_empty<B: Serialize>(&self, path: &str, body: &B) -> Result<(), AppError> {
        let builder = self.json_request(path, body)?;
        let response = self.send(builder).await?;
        handle_empty_response(response).await
    }

    /// Posts a `text/plain` body and expects an empty response body.
    pub async fn post_text_empty(&self, path: &str, body: &str) -> Result<(), AppError> {
        let builder = self
            .http
            .post(self.config.url(path))
            .header(CONTENT_TYPE, "text/plain")
            .body(body.to_string());
        let response = self.send(builder).await?;
        handle_empty_response(response).await
    }

    fn json_request<B: Serialize>(&self, path: &str, body: &B) -> Result<RequestBuilder, AppError> {
        let payload = serde_json::to_vec(body)
            .map_err(|err| AppError::Serialization(format!("Failed to encode request: {err}")))?;

        Ok(self
            .http
            .post(self.config.url(path))
            .header(CONTENT_TYPE, "application/json")
            .body(payload))
    }

    /// Attaches the bearer token and sends the request.
    async fn send(&self, builder: RequestBuilder) -> Result<Response, AppError> {
        let builder = match self.session.bearer() {
            Some(bearer) => builder.header(AUTHORIZATION, bearer),
            None => builder,
        };

        let response = builder.send().await.map_err(map_request_error)?;
        debug!(
            "{} {}",
            response.status().as_u16(),
            response.url().path()
        );
        Ok(response)
    }
}

/// Maps transport errors into user-facing `AppError` variants with timeout detection.
fn map_request_error(err: reqwest::Error) -> AppError {
    if err.is_timeout() {
        AppError::Timeout("Request timed out. Please try again.".to_string())
    } else if err.is_builder() {
        AppError::Serialization(format!("Failed to build request: {err}"))
    } else {
        AppError::Network(format!("Unable to reach the server: {err}"))
    }
}

/// Parses JSON responses and surfaces HTTP errors with sanitized bodies.
async fn handle_json_response<T: DeserializeOwned>(response: Response) -> Result<T, AppError> {
    if response.status().is_success() {
        response
            .json::<T>()
            .await
            .map_err(|err| AppError::Parse(format!("Failed to decode response: {err}")))
    } else {
        Err(http_error(response).await)
    }
}

/// Handles empty responses and returns sanitized HTTP errors when needed.
async fn handle_empty_response(response: Response) -> Result<(), AppError> {
    if response.status().is_success() {
        Ok(())
    } else {
        Err(http_error(response).await)
    }
}

async fn http_error(response: Response) -> AppError {
    let status = response.status().as_u16();
    let body = response.text().await.unwrap_or_default();
    let payload = serde_json::from_str::<ErrorPayload>(&body).ok();

    AppError::Http {
        status,
        message: sanitize_body(&body),
        payload,
    }
}

/// Sanitizes HTTP error bodies for user-facing messages by trimming and truncating.
fn sanitize_body(body: &str) -> String {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        "Request failed.".to_string()
    } else {
        trimmed.chars().take(MAX_ERROR_CHARS).collect()
    }
}
