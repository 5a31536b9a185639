use super::{begin, paths, AppContext, SubmitOutcome};
use crate::{
    api::AppError,
    components::fields::{FieldLabel, FormGroupView, InputField, InputType, InputView},
    features::{auth::types::LoginRequest, Mutation},
    form::{FieldConfig, FormState},
};
use tracing::{debug, error, warn};

const FORM_ID: &str = "login-form";

#[derive(Clone, Debug, PartialEq)]
pub struct LoginView {
    pub username: FormGroupView<InputView>,
    pub password: FormGroupView<InputView>,
    pub is_loading: bool,
    pub forgot_password_href: &'static str,
    pub register_href: &'static str,
}

#[derive(Debug)]
pub struct LoginPage {
    form: FormState,
    username: InputField,
    password: InputField,
    status: Mutation<()>,
}

impl Default for LoginPage {
    fn default() -> Self {
        Self::new()
    }
}

impl LoginPage {
    #[must_use]
    pub fn new() -> Self {
        let mut form = FormState::new(FORM_ID);
        let username = InputField::register(
            &mut form,
            FieldConfig::new("username").required("Username is required"),
            FieldLabel::new("Username"),
        );
        let password = InputField::register(
            &mut form,
            FieldConfig::new("password").required("Password is required"),
            FieldLabel::new("Password"),
        )
        .input_type(InputType::Password);

        Self {
            form,
            username,
            password,
            status: Mutation::Idle,
        }
    }

    pub fn set_username(&mut self, value: &str) {
        self.username.focus();
        self.username.change(&mut self.form, value);
        self.username.blur(&self.form);
    }

    pub fn set_password(&mut self, value: &str) {
        self.password.focus();
        self.password.change(&mut self.form, value);
        self.password.blur(&self.form);
    }

    /// # Errors
    /// `Blocked` when the form is invalid, `Busy` while a request is in flight.
    pub fn begin_submit(&mut self) -> Result<LoginRequest, SubmitOutcome> {
        begin(&mut self.form, &mut self.status)
    }

    /// Success goes home; failure keeps the page and the previous session.
    pub fn complete(&mut self, ctx: &mut AppContext, result: Result<(), AppError>) -> SubmitOutcome {
        let outcome = match &result {
            Ok(()) => {
                ctx.navigator.navigate(paths::HOME);
                SubmitOutcome::Succeeded
            }
            Err(err) => {
                error!("login failed: {}", err);
                ctx.toasts.error("Login failed", Some(err.title()));
                SubmitOutcome::Failed(err.clone())
            }
        };
        self.status.settle(result);
        outcome
    }

    /// Logs in, then loads the account so the session carries its locale.
    pub async fn submit(&mut self, ctx: &mut AppContext) -> SubmitOutcome {
        let request = match self.begin_submit() {
            Ok(request) => request,
            Err(outcome) => return outcome,
        };
        let result = ctx.auth_client().login(&request).await;
        if result.is_ok() {
            match ctx.account_client().fetch_account().await {
                Ok(account) => debug!("signed in as {}", account.login),
                Err(err) => warn!("account could not be loaded after login: {}", err),
            }
        }
        self.complete(ctx, result)
    }

    #[must_use]
    pub fn view(&self) -> LoginView {
        LoginView {
            username: self.username.view(&self.form),
            password: self.password.view(&self.form),
            is_loading: self.status.is_pending(),
            forgot_password_href: paths::RESET_REQUEST,
            register_href: paths::REGISTER,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{api::ApiClient, config::AppConfig, session::SessionStore};
    use std::sync::Arc;

    #[test]
    fn empty_form_is_blocked_with_required_messages() {
        let mut page = LoginPage::new();
        let Err(SubmitOutcome::Blocked(errors)) = page.begin_submit() else {
            panic!("empty login must block");
        };
        assert_eq!(errors.message_for("username"), Some("Username is required"));
        assert_eq!(errors.message_for("password"), Some("Password is required"));
        assert!(page.view().username.show_error);
    }

    #[test]
    fn rejected_credentials_toast_without_navigation() -> Result<(), AppError> {
        let api = ApiClient::new(
            AppConfig::with_base_url("http://127.0.0.1:9"),
            Arc::new(SessionStore::new()),
        )?;
        let mut ctx = AppContext::new(api);
        ctx.navigator.navigate(paths::LOGIN);
        let mut page = LoginPage::new();
        page.set_username("admin");
        page.set_password("wrong");
        let request = page.begin_submit().ok();
        assert_eq!(request.map(|r| r.username), Some("admin".to_string()));

        let outcome = page.complete(
            &mut ctx,
            Err(AppError::Http {
                status: 401,
                message: "Bad credentials".to_string(),
                payload: None,
            }),
        );

        assert!(matches!(outcome, SubmitOutcome::Failed(_)));
        assert_eq!(ctx.navigator.location(), paths::LOGIN);
        assert_eq!(ctx.toasts.last().map(|t| t.title.as_str()), Some("Login failed"));
        assert!(!ctx.session.is_authenticated());
        Ok(())
    }
}
