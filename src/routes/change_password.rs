use super::{begin, password_rules, AppContext, SubmitOutcome};
use crate::{
    api::AppError,
    components::fields::{FieldLabel, FormGroupView, InputField, InputType, InputView},
    features::{account::types::ChangePasswordRequest, Mutation},
    form::{FieldConfig, FormState, Validation},
};
use serde::Deserialize;
use tracing::{debug, error};

const FORM_ID: &str = "change-password-form";

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ChangePasswordValues {
    current_password: String,
    new_password: String,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ChangePasswordView {
    pub current_password: FormGroupView<InputView>,
    pub new_password: FormGroupView<InputView>,
    pub confirm_new_password: FormGroupView<InputView>,
    pub is_loading: bool,
}

/// Password change for the signed-in user. The form is cleared after a
/// successful change.
#[derive(Debug)]
pub struct ChangePasswordPage {
    form: FormState,
    current_password: InputField,
    new_password: InputField,
    confirm_new_password: InputField,
    status: Mutation<()>,
}

impl Default for ChangePasswordPage {
    fn default() -> Self {
        Self::new()
    }
}

impl ChangePasswordPage {
    #[must_use]
    pub fn new() -> Self {
        let mut form = FormState::new(FORM_ID);
        let current_password = InputField::register(
            &mut form,
            FieldConfig::new("currentPassword").required("Current password is required"),
            FieldLabel::new("Current password"),
        )
        .input_type(InputType::Password);
        let new_password = InputField::register(
            &mut form,
            FieldConfig::new("newPassword")
                .required("New password is required")
                .validations(password_rules()),
            FieldLabel::new("New password"),
        )
        .input_type(InputType::Password);
        let confirm_new_password = InputField::register(
            &mut form,
            FieldConfig::new("confirmNewPassword")
                .required("Password confirmation is required")
                .validations(password_rules())
                .validation(Validation::equals_field("newPassword", "Passwords do not match")),
            FieldLabel::new("Confirm new password"),
        )
        .input_type(InputType::Password);

        Self {
            form,
            current_password,
            new_password,
            confirm_new_password,
            status: Mutation::Idle,
        }
    }

    pub fn set_current_password(&mut self, value: &str) {
        self.current_password.change(&mut self.form, value);
        self.current_password.blur(&self.form);
    }

    pub fn set_new_password(&mut self, value: &str) {
        self.new_password.change(&mut self.form, value);
        self.new_password.blur(&self.form);
    }

    pub fn set_confirm_new_password(&mut self, value: &str) {
        self.confirm_new_password.change(&mut self.form, value);
        self.confirm_new_password.blur(&self.form);
    }

    /// # Errors
    /// `Blocked` when the form is invalid, `Busy` while a request is in flight.
    pub fn begin_submit(&mut self) -> Result<ChangePasswordRequest, SubmitOutcome> {
        let values: ChangePasswordValues = begin(&mut self.form, &mut self.status)?;
        Ok(ChangePasswordRequest {
            current_password: values.current_password,
            new_password: values.new_password,
        })
    }

    pub fn complete(&mut self, ctx: &mut AppContext, result: Result<(), AppError>) -> SubmitOutcome {
        let outcome = match &result {
            Ok(()) => {
                debug!("password changed");
                ctx.toasts.success("Password updated", None);
                self.form.reset();
                SubmitOutcome::Succeeded
            }
            Err(err) => {
                error!("password change failed: {}", err);
                ctx.toasts.error("Password update failed", Some(err.title()));
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
        let result = ctx.account_client().change_password(&request).await;
        self.complete(ctx, result)
    }

    #[must_use]
    pub fn view(&self) -> ChangePasswordView {
        ChangePasswordView {
            current_password: self.current_password.view(&self.form),
            new_password: self.new_password.view(&self.form),
            confirm_new_password: self.confirm_new_password.view(&self.form),
            is_loading: self.status.is_pending(),
        }
    }
}
