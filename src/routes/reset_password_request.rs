use super::{begin, paths, AppContext, SubmitOutcome};
use crate::{
    api::AppError,
    components::fields::{FieldLabel, FormGroupView, InputField, InputType, InputView},
    features::Mutation,
    form::{FieldConfig, FormState, Rule, Validation},
};
use serde::Deserialize;
use tracing::{debug, error};

const FORM_ID: &str = "reset-password-init-form";
const ERROR_TITLE: &str = "Reset password failed";

#[derive(Deserialize)]
struct ResetRequestValues {
    email: String,
}

#[derive(Clone, Debug, PartialEq)]
pub enum ResetPasswordRequestView {
    Form {
        email: FormGroupView<InputView>,
        is_loading: bool,
        cancel_href: &'static str,
    },
    /// Shown for good once the server accepted the request.
    Confirmation {
        title: String,
        description: String,
        email: String,
        login_href: &'static str,
    },
}

/// Asks for the account email and triggers the reset link.
#[derive(Debug)]
pub struct ResetPasswordRequestPage {
    form: FormState,
    email: InputField,
    status: Mutation<()>,
    submitted_email: Option<String>,
}

impl Default for ResetPasswordRequestPage {
    fn default() -> Self {
        Self::new()
    }
}

impl ResetPasswordRequestPage {
    #[must_use]
    pub fn new() -> Self {
        let mut form = FormState::new(FORM_ID);
        let email = InputField::register(
            &mut form,
            FieldConfig::new("email")
                .required("Email is required")
                .validation(Validation::new(Rule::IsEmail, "Email is invalid")),
            FieldLabel::new("Email").helper("Enter the email address used for your account"),
        )
        .input_type(InputType::Email);

        Self {
            form,
            email,
            status: Mutation::Idle,
            submitted_email: None,
        }
    }

    #[must_use]
    pub fn form(&self) -> &FormState {
        &self.form
    }

    /// Types into the email input and leaves it.
    pub fn set_email(&mut self, value: &str) {
        self.email.focus();
        self.email.change(&mut self.form, value);
        self.email.blur(&self.form);
    }

    #[must_use]
    pub fn is_submitting(&self) -> bool {
        self.status.is_pending()
    }

    /// Validates and captures the email to send.
    ///
    /// # Errors
    /// `Blocked` when the form is invalid, `Busy` while a request is in flight.
    pub fn begin_submit(&mut self) -> Result<String, SubmitOutcome> {
        if self.status.is_success() {
            return Err(SubmitOutcome::Busy);
        }
        let values: ResetRequestValues = begin(&mut self.form, &mut self.status)?;
        self.submitted_email = Some(values.email.clone());
        Ok(values.email)
    }

    pub fn complete(&mut self, ctx: &mut AppContext, result: Result<(), AppError>) -> SubmitOutcome {
        let outcome = match &result {
            Ok(()) => {
                debug!("password reset requested");
                SubmitOutcome::Succeeded
            }
            Err(err) => {
                error!("password reset request failed: {}", err);
                ctx.toasts.error(ERROR_TITLE, Some(err.title()));
                SubmitOutcome::Failed(err.clone())
            }
        };
        self.status.settle(result);
        outcome
    }

    pub async fn submit(&mut self, ctx: &mut AppContext) -> SubmitOutcome {
        let email = match self.begin_submit() {
            Ok(email) => email,
            Err(outcome) => return outcome,
        };
        let result = ctx.account_client().reset_password_init(&email).await;
        self.complete(ctx, result)
    }

    #[must_use]
    pub fn view(&self) -> ResetPasswordRequestView {
        match (&self.status, &self.submitted_email) {
            (Mutation::Success(()), Some(email)) => ResetPasswordRequestView::Confirmation {
                title: "Check your inbox".to_string(),
                description: format!(
                    "If an account exists for {email}, an email with a link to reset the password has been sent."
                ),
                email: email.clone(),
                login_href: paths::LOGIN,
            },
            _ => ResetPasswordRequestView::Form {
                email: self.email.view(&self.form),
                is_loading: self.status.is_pending(),
                cancel_href: paths::LOGIN,
            },
        }
    }
}
