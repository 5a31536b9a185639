use super::{begin, password_rules, paths, AppContext, SubmitOutcome};
use crate::{
    api::AppError,
    components::fields::{FieldLabel, FormGroupView, HiddenField, InputField, InputType, InputView},
    features::{
        account::types::{Account, RegisterRequest},
        Mutation,
    },
    form::{FieldConfig, FormState, Rule, Validation},
};
use regex::Regex;
use serde_json::Value;
use tracing::{debug, error};

const FORM_ID: &str = "register-form";
const LOGIN_MAX_LENGTH: usize = 50;

#[derive(Clone, Debug, PartialEq)]
pub enum RegisterView {
    Form {
        login: FormGroupView<InputView>,
        email: FormGroupView<InputView>,
        password: FormGroupView<InputView>,
        lang_key: Option<FormGroupView<()>>,
        is_loading: bool,
        login_href: &'static str,
    },
    Success {
        title: String,
        description: String,
        login_href: &'static str,
    },
}

/// Sign-up form. The language key is carried as a hidden field seeded from the
/// active locale.
#[derive(Debug)]
pub struct RegisterPage {
    form: FormState,
    login: InputField,
    email: InputField,
    password: InputField,
    lang_key: HiddenField,
    status: Mutation<Account>,
    submitted_email: Option<String>,
}

impl RegisterPage {
    #[must_use]
    pub fn new(ctx: &AppContext) -> Self {
        let mut form = FormState::new(FORM_ID);
        let login = InputField::register(
            &mut form,
            FieldConfig::new("login")
                .required("Username is required")
                .validation(Validation::new(
                    Rule::MaxLength(LOGIN_MAX_LENGTH),
                    format!("Username is too long (max {LOGIN_MAX_LENGTH})"),
                ))
                .validation(Validation::new(
                    Rule::custom(|value, _| value.as_str().map_or(true, valid_login)),
                    "Username contains invalid characters",
                )),
            FieldLabel::new("Username"),
        );
        let email = InputField::register(
            &mut form,
            FieldConfig::new("email")
                .required("Email is required")
                .validation(Validation::new(Rule::IsEmail, "Email is invalid")),
            FieldLabel::new("Email"),
        )
        .input_type(InputType::Email);
        let password = InputField::register(
            &mut form,
            FieldConfig::new("password")
                .required("Password is required")
                .validations(password_rules()),
            FieldLabel::new("Password"),
        )
        .input_type(InputType::Password);
        let lang_key = HiddenField::register(
            &mut form,
            FieldConfig::new("langKey")
                .required("Language is required")
                .default_value(Value::String(ctx.session.locale())),
        );

        Self {
            form,
            login,
            email,
            password,
            lang_key,
            status: Mutation::Idle,
            submitted_email: None,
        }
    }

    pub fn set_login(&mut self, value: &str) {
        self.login.focus();
        self.login.change(&mut self.form, value);
        self.login.blur(&self.form);
    }

    pub fn set_email(&mut self, value: &str) {
        self.email.focus();
        self.email.change(&mut self.form, value);
        self.email.blur(&self.form);
    }

    pub fn set_password(&mut self, value: &str) {
        self.password.focus();
        self.password.change(&mut self.form, value);
        self.password.blur(&self.form);
    }

    /// Follows a language switch made while the page is open.
    pub fn set_lang_key(&mut self, value: &str) {
        self.lang_key
            .set(&mut self.form, Value::String(value.to_string()));
    }

    /// # Errors
    /// `Blocked` when the form is invalid, `Busy` while a request is in flight.
    pub fn begin_submit(&mut self) -> Result<RegisterRequest, SubmitOutcome> {
        let request: RegisterRequest = begin(&mut self.form, &mut self.status)?;
        self.submitted_email = Some(request.email.clone());
        Ok(request)
    }

    pub fn complete(
        &mut self,
        ctx: &mut AppContext,
        result: Result<Account, AppError>,
    ) -> SubmitOutcome {
        let outcome = match &result {
            Ok(account) => {
                debug!("account {} created", account.login);
                SubmitOutcome::Succeeded
            }
            Err(err) => {
                error!("registration failed: {}", err);
                ctx.toasts
                    .error("Account creation failed", Some(registration_error(err)));
                SubmitOutcome::Failed(err.clone())
            }
        };
        self.status.settle(result);
        outcome
    }

    pub async fn submit(&mut self, ctx: &mut AppContext) -> SubmitOutcome {
        let request = match self.begin_submit() {
            Ok(request) => request,
            Err(outcome) => return outcome,
        };
        let result = ctx.account_client().register(&request).await;
        self.complete(ctx, result)
    }

    #[must_use]
    pub fn view(&self) -> RegisterView {
        if self.status.is_success() {
            let email = self.submitted_email.clone().unwrap_or_default();
            return RegisterView::Success {
                title: "Account created".to_string(),
                description: format!(
                    "An activation link has been sent to {email}. Open it to activate the account."
                ),
                login_href: paths::LOGIN,
            };
        }
        RegisterView::Form {
            login: self.login.view(&self.form),
            email: self.email.view(&self.form),
            password: self.password.view(&self.form),
            lang_key: self.lang_key.view(&self.form),
            is_loading: self.status.is_pending(),
            login_href: paths::LOGIN,
        }
    }
}

/// Letters, digits and `_ . @ -` only.
fn valid_login(login: &str) -> bool {
    Regex::new(r"^[_.@A-Za-z0-9-]+$").map_or(false, |re| re.is_match(login))
}

fn registration_error(err: &AppError) -> String {
    match err.error_key() {
        Some("userexists") => "Username already used.".to_string(),
        Some("emailexists") => "Email is already used.".to_string(),
        _ => err.title(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{api::ApiClient, api::ErrorPayload, config::AppConfig, session::SessionStore};
    use std::sync::Arc;

    fn context() -> Result<AppContext, AppError> {
        let api = ApiClient::new(
            AppConfig::with_base_url("http://127.0.0.1:9"),
            Arc::new(SessionStore::new()),
        )?;
        Ok(AppContext::new(api))
    }

    fn filled(ctx: &AppContext) -> RegisterPage {
        let mut page = RegisterPage::new(ctx);
        page.set_login("new.user");
        page.set_email("new.user@example.com");
        page.set_password("secret");
        page
    }

    #[test]
    fn language_defaults_to_session_locale() -> Result<(), AppError> {
        let ctx = context()?;
        ctx.session.set_locale("fr");
        let mut page = filled(&ctx);
        let request = page.begin_submit().ok();
        assert_eq!(request.map(|r| r.lang_key), Some("fr".to_string()));
        Ok(())
    }

    #[test]
    fn invalid_login_is_blocked() -> Result<(), AppError> {
        let ctx = context()?;
        let mut page = filled(&ctx);
        page.set_login("bad name");
        let Err(SubmitOutcome::Blocked(errors)) = page.begin_submit() else {
            panic!("login with a space must block");
        };
        assert_eq!(
            errors.message_for("login"),
            Some("Username contains invalid characters")
        );
        Ok(())
    }

    #[test]
    fn conflicts_map_error_keys() -> Result<(), AppError> {
        let mut ctx = context()?;
        let mut page = filled(&ctx);
        let _ = page.begin_submit();
        let err = AppError::Http {
            status: 400,
            message: "Login name already used!".to_string(),
            payload: Some(ErrorPayload::new(400, "Login name already used!").with_error_key("userexists")),
        };
        let _ = page.complete(&mut ctx, Err(err));
        assert_eq!(
            ctx.toasts.last().and_then(|t| t.description.clone()).as_deref(),
            Some("Username already used.")
        );
        assert!(matches!(page.view(), RegisterView::Form { .. }));
        Ok(())
    }

    #[test]
    fn success_shows_activation_hint() -> Result<(), AppError> {
        let mut ctx = context()?;
        let mut page = filled(&ctx);
        let _ = page.begin_submit();
        let outcome = page.complete(
            &mut ctx,
            Ok(Account {
                login: "new.user".to_string(),
                ..Account::default()
            }),
        );
        assert!(outcome.is_success());
        let RegisterView::Success { description, .. } = page.view() else {
            panic!("expected success panel");
        };
        assert!(description.contains("new.user@example.com"));
        Ok(())
    }
}
