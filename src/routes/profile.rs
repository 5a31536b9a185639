use super::{begin, language_options, AppContext, SubmitOutcome};
use crate::{
    api::AppError,
    components::fields::{
        FieldLabel, FormGroupView, InputField, InputType, InputView, SelectField, SelectView,
    },
    features::{account::types::Account, Mutation},
    form::{FieldConfig, FormState, Rule, Validation},
};
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, error};

const FORM_ID: &str = "account-form";

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ProfileValues {
    #[serde(default)]
    first_name: Option<String>,
    #[serde(default)]
    last_name: Option<String>,
    email: String,
    lang_key: String,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ProfileView {
    pub first_name: FormGroupView<InputView>,
    pub last_name: FormGroupView<InputView>,
    pub email: FormGroupView<InputView>,
    pub lang_key: FormGroupView<SelectView>,
    pub is_loading: bool,
}

/// Edits the signed-in account. Saving switches the active locale to the
/// chosen language.
#[derive(Debug)]
pub struct ProfilePage {
    account: Account,
    form: FormState,
    first_name: InputField,
    last_name: InputField,
    email: InputField,
    lang_key: SelectField,
    status: Mutation<Account>,
}

impl ProfilePage {
    #[must_use]
    pub fn new(account: Account) -> Self {
        let mut form = FormState::new(FORM_ID);
        let first_name = InputField::register(
            &mut form,
            FieldConfig::new("firstName").default_value(optional_text(account.first_name.as_deref())),
            FieldLabel::new("First name"),
        );
        let last_name = InputField::register(
            &mut form,
            FieldConfig::new("lastName").default_value(optional_text(account.last_name.as_deref())),
            FieldLabel::new("Last name"),
        );
        let email = InputField::register(
            &mut form,
            FieldConfig::new("email")
                .required("Email is required")
                .default_value(Value::String(account.email.clone()))
                .validation(Validation::new(Rule::IsEmail, "Email is invalid")),
            FieldLabel::new("Email"),
        )
        .input_type(InputType::Email);
        let lang_key = SelectField::register(
            &mut form,
            FieldConfig::new("langKey")
                .required("Language is required")
                .default_value(optional_text(Some(&account.lang_key))),
            FieldLabel::new("Language"),
            language_options(),
        );

        Self {
            account,
            form,
            first_name,
            last_name,
            email,
            lang_key,
            status: Mutation::Idle,
        }
    }

    pub fn set_first_name(&mut self, value: &str) {
        self.first_name.change(&mut self.form, value);
        self.first_name.blur(&self.form);
    }

    pub fn set_last_name(&mut self, value: &str) {
        self.last_name.change(&mut self.form, value);
        self.last_name.blur(&self.form);
    }

    pub fn set_email(&mut self, value: &str) {
        self.email.change(&mut self.form, value);
        self.email.blur(&self.form);
    }

    /// Picks a language by key; unknown keys clear the selection.
    pub fn set_lang_key(&mut self, key: &str) {
        let options = language_options();
        let option = options.iter().find(|option| option.value == key);
        self.lang_key.change(&mut self.form, option);
        self.lang_key.blur(&self.form);
    }

    /// # Errors
    /// `Blocked` when the form is invalid, `Busy` while a request is in flight.
    pub fn begin_submit(&mut self) -> Result<Account, SubmitOutcome> {
        let values: ProfileValues = begin(&mut self.form, &mut self.status)?;
        Ok(Account {
            first_name: values.first_name.filter(|name| !name.is_empty()),
            last_name: values.last_name.filter(|name| !name.is_empty()),
            email: values.email,
            lang_key: values.lang_key,
            ..self.account.clone()
        })
    }

    pub fn complete(
        &mut self,
        ctx: &mut AppContext,
        result: Result<Account, AppError>,
    ) -> SubmitOutcome {
        let outcome = match &result {
            Ok(account) => {
                debug!("account {} updated", account.login);
                self.account = account.clone();
                ctx.toasts.success("Account updated", None);
                SubmitOutcome::Succeeded
            }
            Err(err) => {
                error!("account update failed: {}", err);
                ctx.toasts.error("Account update failed", Some(err.title()));
                SubmitOutcome::Failed(err.clone())
            }
        };
        self.status.settle(result);
        outcome
    }

    pub async fn submit(&mut self, ctx: &mut AppContext) -> SubmitOutcome {
        let account = match self.begin_submit() {
            Ok(account) => account,
            Err(outcome) => return outcome,
        };
        let result = ctx.account_client().update_account(&account).await;
        self.complete(ctx, result)
    }

    #[must_use]
    pub fn view(&self) -> ProfileView {
        ProfileView {
            first_name: self.first_name.view(&self.form),
            last_name: self.last_name.view(&self.form),
            email: self.email.view(&self.form),
            lang_key: self.lang_key.view(&self.form),
            is_loading: self.status.is_pending(),
        }
    }
}

fn optional_text(value: Option<&str>) -> Value {
    match value {
        Some(text) if !text.is_empty() => Value::String(text.to_string()),
        _ => Value::Null,
    }
}
