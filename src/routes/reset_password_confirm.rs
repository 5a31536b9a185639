use super::{begin, password_rules, paths, query_param, AppContext, SubmitOutcome};
use crate::{
    api::AppError,
    components::fields::{FieldLabel, FormGroupView, InputField, InputType, InputView},
    features::{account::types::ResetPasswordFinishRequest, Mutation},
    form::{FieldConfig, FormState, Validation},
};
use serde::Deserialize;
use tracing::{debug, error};

/// Key sent when the page URL carries none. The server rejects it like any
/// unknown key.
pub const KEY_NOT_DEFINED: &str = "KEY_NOT_DEFINED";

const FORM_ID: &str = "reset-password-finish-form";

#[derive(Deserialize)]
struct NewPasswordValues {
    password: String,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ResetPasswordConfirmView {
    pub password: FormGroupView<InputView>,
    pub confirm_password: FormGroupView<InputView>,
    pub is_loading: bool,
}

/// Sets a new password using the key from the reset link.
#[derive(Debug)]
pub struct ResetPasswordConfirmPage {
    key: String,
    form: FormState,
    password: InputField,
    confirm_password: InputField,
    status: Mutation<()>,
}

impl ResetPasswordConfirmPage {
    /// Builds the page for the location the reset link opened.
    #[must_use]
    pub fn new(location: &str) -> Self {
        let key = query_param(location, "key").unwrap_or_else(|| KEY_NOT_DEFINED.to_string());

        let mut form = FormState::new(FORM_ID);
        let password = InputField::register(
            &mut form,
            FieldConfig::new("password")
                .required("New password is required")
                .validations(password_rules()),
            FieldLabel::new("New password"),
        )
        .input_type(InputType::Password);
        let confirm_password = InputField::register(
            &mut form,
            FieldConfig::new("confirmPassword")
                .required("Password confirmation is required")
                .validations(password_rules())
                .validation(Validation::equals_field("password", "Passwords do not match")),
            FieldLabel::new("Confirm new password"),
        )
        .input_type(InputType::Password);

        Self {
            key,
            form,
            password,
            confirm_password,
            status: Mutation::Idle,
        }
    }

    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    #[must_use]
    pub fn form(&self) -> &FormState {
        &self.form
    }

    pub fn set_password(&mut self, value: &str) {
        self.password.focus();
        self.password.change(&mut self.form, value);
        self.password.blur(&self.form);
    }

    pub fn set_confirm_password(&mut self, value: &str) {
        self.confirm_password.focus();
        self.confirm_password.change(&mut self.form, value);
        self.confirm_password.blur(&self.form);
    }

    /// Validates and builds the finish request.
    ///
    /// # Errors
    /// `Blocked` when the form is invalid, `Busy` while a request is in flight.
    pub fn begin_submit(&mut self) -> Result<ResetPasswordFinishRequest, SubmitOutcome> {
        let values: NewPasswordValues = begin(&mut self.form, &mut self.status)?;
        Ok(ResetPasswordFinishRequest {
            key: self.key.clone(),
            new_password: values.password,
        })
    }

    pub fn complete(&mut self, ctx: &mut AppContext, result: Result<(), AppError>) -> SubmitOutcome {
        let outcome = match &result {
            Ok(()) => {
                debug!("password reset completed");
                ctx.toasts.success(
                    "Your password has been reset",
                    Some("You can now sign in with your new password.".to_string()),
                );
                ctx.navigator.navigate(paths::LOGIN);
                SubmitOutcome::Succeeded
            }
            Err(err) => {
                error!("password reset failed: {}", err);
                ctx.toasts.error("Reset password failed", Some(err.title()));
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
        let result = ctx.account_client().reset_password_finish(&request).await;
        self.complete(ctx, result)
    }

    #[must_use]
    pub fn view(&self) -> ResetPasswordConfirmView {
        ResetPasswordConfirmView {
            password: self.password.view(&self.form),
            confirm_password: self.confirm_password.view(&self.form),
            is_loading: self.status.is_pending(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled(password: &str, confirm: &str) -> ResetPasswordConfirmPage {
        let mut page = ResetPasswordConfirmPage::new("/account/reset/finish?key=abc123");
        page.set_password(password);
        page.set_confirm_password(confirm);
        page
    }

    #[test]
    fn missing_key_falls_back_to_sentinel() {
        let mut page = ResetPasswordConfirmPage::new(paths::RESET_CONFIRM);
        page.set_password("abcd");
        page.set_confirm_password("abcd");
        let request = page.begin_submit().ok();
        assert_eq!(request.as_ref().map(|r| r.key.as_str()), Some(KEY_NOT_DEFINED));
        assert_eq!(request.map(|r| r.new_password), Some("abcd".to_string()));
    }

    #[test]
    fn lengths_within_bounds_are_submittable() {
        let longest = "x".repeat(50);
        for password in ["abcd", longest.as_str()] {
            let mut page = filled(password, password);
            assert!(page.begin_submit().is_ok(), "length {}", password.len());
        }
    }

    #[test]
    fn lengths_outside_bounds_are_blocked() {
        let mut page = filled("abc", "abc");
        let Err(SubmitOutcome::Blocked(errors)) = page.begin_submit() else {
            panic!("short password must block");
        };
        assert_eq!(errors.message_for("password"), Some("Password is too short (min 4)"));

        let long = "x".repeat(51);
        let mut page = filled(&long, &long);
        let Err(SubmitOutcome::Blocked(errors)) = page.begin_submit() else {
            panic!("long password must block");
        };
        assert_eq!(errors.message_for("password"), Some("Password is too long (max 50)"));
    }

    #[test]
    fn confirmation_tracks_password_changes() {
        let mut page = filled("abcd", "abce");
        let Err(SubmitOutcome::Blocked(errors)) = page.begin_submit() else {
            panic!("mismatch must block");
        };
        assert_eq!(errors.message_for("confirmPassword"), Some("Passwords do not match"));
        assert_eq!(
            page.view().confirm_password.error_message.as_deref(),
            Some("Passwords do not match")
        );

        page.set_password("abce");
        assert!(page.view().confirm_password.error_message.is_none());
        let request = page.begin_submit().ok();
        assert_eq!(request.map(|r| r.key), Some("abc123".to_string()));
    }
}
