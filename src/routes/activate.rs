use super::{paths, query_param, AppContext};
use crate::{api::AppError, features::Mutation};
use tracing::{error, info};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ActivateView {
    Loading,
    Success { login_href: &'static str },
    Error { message: String, register_href: &'static str },
}

/// Activates the account whose key is in the activation link. Runs once,
/// when the page opens.
#[derive(Debug)]
pub struct ActivatePage {
    key: Option<String>,
    status: Mutation<()>,
}

impl ActivatePage {
    #[must_use]
    pub fn new(location: &str) -> Self {
        Self {
            key: query_param(location, "key").filter(|key| !key.is_empty()),
            status: Mutation::Idle,
        }
    }

    #[must_use]
    pub fn key(&self) -> Option<&str> {
        self.key.as_deref()
    }

    pub fn complete(&mut self, result: Result<(), AppError>) {
        match &result {
            Ok(()) => info!("account activated"),
            Err(err) => error!("activation failed: {}", err),
        }
        self.status.settle(result);
    }

    /// Without a key nothing is sent and the page reports the error.
    pub async fn run(&mut self, ctx: &AppContext) {
        if !matches!(self.status, Mutation::Idle) {
            return;
        }
        let Some(key) = self.key.clone() else {
            self.complete(Err(AppError::Config(
                "The activation link does not contain a key.".to_string(),
            )));
            return;
        };
        self.status = Mutation::Pending;
        let result = ctx.account_client().activate(&key).await;
        self.complete(result);
    }

    #[must_use]
    pub fn view(&self) -> ActivateView {
        match &self.status {
            Mutation::Idle | Mutation::Pending => ActivateView::Loading,
            Mutation::Success(()) => ActivateView::Success {
                login_href: paths::LOGIN,
            },
            Mutation::Error(err) => ActivateView::Error {
                message: err.title(),
                register_href: paths::REGISTER,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{api::ApiClient, config::AppConfig, session::SessionStore};
    use std::sync::Arc;

    #[tokio::test]
    async fn missing_key_fails_without_request() -> Result<(), AppError> {
        let api = ApiClient::new(
            AppConfig::with_base_url("http://127.0.0.1:9"),
            Arc::new(SessionStore::new()),
        )?;
        let ctx = AppContext::new(api);
        let mut page = ActivatePage::new("/account/activate?key=");
        assert_eq!(page.key(), None);

        page.run(&ctx).await;

        assert!(matches!(
            page.view(),
            ActivateView::Error { message, .. } if message.contains("does not contain a key")
        ));
        Ok(())
    }

    #[test]
    fn view_follows_status() {
        let mut page = ActivatePage::new("/account/activate?key=k1");
        assert_eq!(page.key(), Some("k1"));
        assert_eq!(page.view(), ActivateView::Loading);
        page.complete(Ok(()));
        assert_eq!(
            page.view(),
            ActivateView::Success {
                login_href: paths::LOGIN
            }
        );
    }
}
