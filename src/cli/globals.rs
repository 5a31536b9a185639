use crate::config::AppConfig;

/// Arguments shared by every subcommand that talks to the account API.
#[derive(Debug, Clone)]
pub struct GlobalArgs {
    pub api_url: Option<String>,
}

impl GlobalArgs {
    #[must_use]
    pub fn new(api_url: Option<String>) -> Self {
        Self { api_url }
    }

    /// `--api-url` wins over the build-time and environment defaults.
    #[must_use]
    pub fn config(&self) -> AppConfig {
        match self.api_url.as_deref().map(str::trim) {
            Some(url) if !url.is_empty() => AppConfig::with_base_url(url),
            _ => AppConfig::load(),
        }
    }
}
