use serde::{Deserialize, Serialize};
use std::fmt;

/// Problem payload returned by the account API on rejected requests.
/// Only `title` is guaranteed; the rest depends on the failing endpoint.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ErrorPayload {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_key: Option<String>,
}

impl ErrorPayload {
    #[must_use]
    pub fn new(status: u16, title: &str) -> Self {
        Self {
            title: title.to_string(),
            status: Some(status),
            detail: None,
            error_key: None,
        }
    }

    #[must_use]
    pub fn with_error_key(mut self, key: &str) -> Self {
        self.error_key = Some(key.to_string());
        self
    }
}

#[derive(Clone, Debug)]
pub enum AppError {
    Config(String),
    Network(String),
    Timeout(String),
    Http {
        status: u16,
        message: String,
        payload: Option<ErrorPayload>,
    },
    Parse(String),
    Serialization(String),
}

impl AppError {
    /// Title surfaced in error toasts: the server payload title when present,
    /// otherwise the sanitized message.
    #[must_use]
    pub fn title(&self) -> String {
        match self {
            AppError::Http {
                payload: Some(payload),
                ..
            } => payload.title.clone(),
            AppError::Http { message, .. }
            | AppError::Config(message)
            | AppError::Network(message)
            | AppError::Timeout(message)
            | AppError::Parse(message)
            | AppError::Serialization(message) => message.clone(),
        }
    }

    /// Server-provided error key, e.g. `userexists` on registration.
    #[must_use]
    pub fn error_key(&self) -> Option<&str> {
        match self {
            AppError::Http {
                payload: Some(payload),
                ..
            } => payload.error_key.as_deref(),
            _ => None,
        }
    }

    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            AppError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Config(message) => write!(formatter, "Config error: {message}"),
            AppError::Network(message) => write!(formatter, "Network error: {message}"),
            AppError::Timeout(message) => write!(formatter, "Timeout: {message}"),
            AppError::Http {
                status, message, ..
            } => {
                write!(formatter, "Request failed ({status}): {message}")
            }
            AppError::Parse(message) => write!(formatter, "Response error: {message}"),
            AppError::Serialization(message) => {
                write!(formatter, "Request error: {message}")
            }
        }
    }
}

impl std::error::Error for AppError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn title_prefers_payload() {
        let err = AppError::Http {
            status: 400,
            message: r#"{"title":"Incorrect password"}"#.to_string(),
            payload: Some(ErrorPayload::new(400, "Incorrect password")),
        };
        assert_eq!(err.title(), "Incorrect password");
        assert_eq!(err.status(), Some(400));
    }

    #[test]
    fn title_falls_back_to_message() {
        let err = AppError::Network("Unable to reach the server".to_string());
        assert_eq!(err.title(), "Unable to reach the server");
        assert_eq!(err.error_key(), None);
        assert_eq!(err.status(), None);
    }

    #[test]
    fn payload_reads_camel_case_error_key() -> Result<(), serde_json::Error> {
        let payload: ErrorPayload =
            serde_json::from_str(r#"{"title":"Login name already used!","errorKey":"userexists"}"#)?;
        assert_eq!(payload.error_key.as_deref(), Some("userexists"));
        assert_eq!(payload.status, None);
        Ok(())
    }

    #[test]
    fn display_includes_status() {
        let err = AppError::Http {
            status: 401,
            message: "Bad credentials".to_string(),
            payload: None,
        };
        assert_eq!(err.to_string(), "Request failed (401): Bad credentials");
    }
}
