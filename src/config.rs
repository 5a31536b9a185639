//! Endpoint configuration with build-time defaults and an optional runtime
//! override. The runtime value is read from `ACCOUNT_UI_API_BASE_URL` so the
//! same binary can target the mock server or a real backend without rebuilding.
//! Configuration values are public; do not store secrets here.

use std::time::Duration;

/// Default request timeout applied to every API call.
pub const DEFAULT_TIMEOUT_MS: u64 = 10_000;

/// Environment variable overriding the API base URL at runtime.
pub const ENV_API_BASE_URL: &str = "ACCOUNT_UI_API_BASE_URL";

/// Client configuration derived from build-time environment variables.
#[derive(Clone, Debug)]
pub struct AppConfig {
    pub api_base_url: String,
    pub request_timeout: Duration,
}

impl AppConfig {
    /// Loads config from build-time environment variables and applies runtime overrides.
    #[must_use]
    pub fn load() -> Self {
        let api_base_url = option_env!("ACCOUNT_UI_API_BASE_URL").unwrap_or("http://localhost:8080");

        let mut config = Self {
            api_base_url: api_base_url.to_string(),
            request_timeout: Duration::from_millis(DEFAULT_TIMEOUT_MS),
        };

        apply_runtime_overrides(&mut config, runtime_config());

        config
    }

    /// Config pointing at an explicit base URL, used by tests and the CLI `--api-url` flag.
    #[must_use]
    pub fn with_base_url(base_url: &str) -> Self {
        Self {
            api_base_url: base_url.to_string(),
            request_timeout: Duration::from_millis(DEFAULT_TIMEOUT_MS),
        }
    }

    /// Builds a URL from the configured base URL and the provided path.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        build_url_with_base(&self.api_base_url, path)
    }
}

#[derive(Default)]
struct RuntimeConfig {
    api_base_url: Option<String>,
}

fn runtime_config() -> RuntimeConfig {
    RuntimeConfig {
        api_base_url: std::env::var(ENV_API_BASE_URL)
            .ok()
            .and_then(|value| normalize_runtime_value(&value)),
    }
}

fn apply_runtime_overrides(config: &mut AppConfig, runtime: RuntimeConfig) {
    if let Some(value) = runtime.api_base_url {
        config.api_base_url = value;
    }
}

fn normalize_runtime_value(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Builds a URL from an explicit base URL and the provided path.
fn build_url_with_base(base_url: &str, path: &str) -> String {
    let base = base_url.trim().trim_end_matches('/');
    let path = path.trim();

    if base.is_empty() {
        path.to_string()
    } else {
        format!("{}/{}", base, path.trim_start_matches('/'))
    }
}

#[cfg(test)]
mod tests {
    use super::{
        AppConfig, ENV_API_BASE_URL, RuntimeConfig, apply_runtime_overrides, build_url_with_base,
        normalize_runtime_value,
    };

    #[test]
    fn normalize_runtime_value_trims_and_rejects_empty() {
        assert_eq!(normalize_runtime_value(""), None);
        assert_eq!(normalize_runtime_value("   "), None);
        assert_eq!(
            normalize_runtime_value("  http://127.0.0.1:8080 "),
            Some("http://127.0.0.1:8080".to_string())
        );
    }

    #[test]
    fn apply_runtime_overrides_ignores_missing_values() {
        let mut config = AppConfig::with_base_url("https://api.default");
        apply_runtime_overrides(&mut config, RuntimeConfig::default());
        assert_eq!(config.api_base_url, "https://api.default");
    }

    #[test]
    fn load_prefers_runtime_environment() {
        temp_env::with_var(ENV_API_BASE_URL, Some("https://api.override/"), || {
            let config = AppConfig::load();
            assert_eq!(config.api_base_url, "https://api.override/");
            assert_eq!(config.url("/account"), "https://api.override/account");
        });
    }

    #[test]
    fn build_url_joins_slashes_once() {
        assert_eq!(
            build_url_with_base("http://localhost:8080/", "/account"),
            "http://localhost:8080/account"
        );
        assert_eq!(
            build_url_with_base("http://localhost:8080", "register"),
            "http://localhost:8080/register"
        );
        assert_eq!(build_url_with_base("  ", "/account"), "/account");
    }
}
