//! Form-state engine. A `FormState` owns every field of one form instance:
//! values, pristine flags and validity. Validity is recomputed on each change
//! for the changed field and for every field whose rules declare it as a
//! dependency, so cross-field rules stay deterministic.

mod validation;

pub use validation::{is_empty, valid_email, FormValues, Rule, Validation};

use serde::de::DeserializeOwned;
use serde_json::Value;
use std::fmt;
use tracing::debug;

/// Declaration of a field: its name, initial value and rules.
#[derive(Clone, Debug)]
pub struct FieldConfig {
    pub name: String,
    pub default_value: Value,
    pub required: Option<String>,
    pub validations: Vec<Validation>,
}

impl FieldConfig {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            default_value: Value::Null,
            required: None,
            validations: Vec::new(),
        }
    }

    /// Marks the field required, with the message shown when it is empty.
    #[must_use]
    pub fn required(mut self, message: impl Into<String>) -> Self {
        self.required = Some(message.into());
        self
    }

    #[must_use]
    pub fn default_value(mut self, value: Value) -> Self {
        self.default_value = value;
        self
    }

    #[must_use]
    pub fn validation(mut self, validation: Validation) -> Self {
        self.validations.push(validation);
        self
    }

    #[must_use]
    pub fn validations<I>(mut self, validations: I) -> Self
    where
        I: IntoIterator<Item = Validation>,
    {
        self.validations.extend(validations);
        self
    }

    fn depends_on(&self, field: &str) -> bool {
        self.validations.iter().any(|v| v.depends_on(field))
    }
}

#[derive(Clone, Debug)]
pub struct FieldState {
    config: FieldConfig,
    value: Value,
    is_pristine: bool,
    error_message: Option<String>,
}

impl FieldState {
    #[must_use]
    pub fn value(&self) -> &Value {
        &self.value
    }

    #[must_use]
    pub fn is_pristine(&self) -> bool {
        self.is_pristine
    }

    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.error_message.is_none()
    }

    #[must_use]
    pub fn is_required(&self) -> bool {
        self.config.required.is_some()
    }

    #[must_use]
    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    /// Required check first, then rules in declaration order; the first failure wins.
    fn evaluate(&self, values: &FormValues) -> Option<String> {
        if let Some(message) = &self.config.required {
            if is_empty(&self.value) {
                return Some(message.clone());
            }
        }
        self.config
            .validations
            .iter()
            .find(|validation| !validation.rule.check(&self.value, values))
            .map(|validation| validation.message.clone())
    }
}

/// Field errors reported when a submission is blocked.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FormErrors {
    pub errors: Vec<(String, String)>,
}

impl FormErrors {
    #[must_use]
    pub fn message_for(&self, field: &str) -> Option<&str> {
        self.errors
            .iter()
            .find(|(name, _)| name == field)
            .map(|(_, message)| message.as_str())
    }
}

impl fmt::Display for FormErrors {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        let joined = self
            .errors
            .iter()
            .map(|(name, message)| format!("{name}: {message}"))
            .collect::<Vec<_>>()
            .join(", ");
        write!(formatter, "{joined}")
    }
}

impl std::error::Error for FormErrors {}

#[derive(Clone, Debug)]
pub struct FormState {
    id: String,
    fields: Vec<FieldState>,
    is_submitted: bool,
    reset_key: u64,
}

impl FormState {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            fields: Vec::new(),
            is_submitted: false,
            reset_key: 0,
        }
    }

    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    #[must_use]
    pub fn is_submitted(&self) -> bool {
        self.is_submitted
    }

    /// Bumped on every reset; adapters drop their touched state when it changes.
    #[must_use]
    pub fn reset_key(&self) -> u64 {
        self.reset_key
    }

    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.fields.iter().all(FieldState::is_valid)
    }

    #[must_use]
    pub fn field(&self, name: &str) -> Option<&FieldState> {
        self.fields.iter().find(|field| field.config.name == name)
    }

    #[must_use]
    pub fn value(&self, name: &str) -> Option<&Value> {
        self.field(name).map(FieldState::value)
    }

    #[must_use]
    pub fn values(&self) -> FormValues {
        self.fields
            .iter()
            .map(|field| (field.config.name.clone(), field.value.clone()))
            .collect()
    }

    /// Adds a field, replacing an existing declaration with the same name.
    pub fn register(&mut self, config: FieldConfig) {
        let name = config.name.clone();
        let field = FieldState {
            value: config.default_value.clone(),
            config,
            is_pristine: true,
            error_message: None,
        };
        match self.fields.iter_mut().find(|f| f.config.name == name) {
            Some(existing) => *existing = field,
            None => self.fields.push(field),
        }
        self.revalidate(&name);
    }

    pub fn unregister(&mut self, name: &str) {
        self.fields.retain(|field| field.config.name != name);
        self.revalidate(name);
    }

    /// Stores a user change. Returns `false` when no such field is registered.
    pub fn set_value(&mut self, name: &str, value: Value) -> bool {
        let Some(field) = self.fields.iter_mut().find(|f| f.config.name == name) else {
            debug!("form {}: ignoring value for unknown field {}", self.id, name);
            return false;
        };
        field.value = value;
        field.is_pristine = false;
        self.revalidate(name);
        true
    }

    /// Marks the form submitted and returns the values if every field is valid.
    ///
    /// # Errors
    /// Returns the failing fields and their messages when the form is invalid.
    pub fn submit(&mut self) -> Result<FormValues, FormErrors> {
        self.is_submitted = true;
        let errors: Vec<(String, String)> = self
            .fields
            .iter()
            .filter_map(|field| {
                field
                    .error_message
                    .as_ref()
                    .map(|message| (field.config.name.clone(), message.clone()))
            })
            .collect();

        if errors.is_empty() {
            Ok(self.values())
        } else {
            debug!("form {}: submission blocked by {} field(s)", self.id, errors.len());
            Err(FormErrors { errors })
        }
    }

    /// Like [`FormState::submit`], deserializing the values into a typed request.
    ///
    /// # Errors
    /// Returns the field errors, or a single `_form` error if the values do not fit `T`.
    pub fn submit_as<T: DeserializeOwned>(&mut self) -> Result<T, FormErrors> {
        let values = self.submit()?;
        let object: serde_json::Map<String, Value> = values.into_iter().collect();
        serde_json::from_value(Value::Object(object)).map_err(|err| FormErrors {
            errors: vec![("_form".to_string(), err.to_string())],
        })
    }

    /// Restores defaults, pristine flags and the unsubmitted state.
    pub fn reset(&mut self) {
        for field in &mut self.fields {
            field.value = field.config.default_value.clone();
            field.is_pristine = true;
        }
        self.is_submitted = false;
        self.reset_key += 1;
        self.revalidate_all();
    }

    /// Re-evaluates `changed` and every field that declares it as a dependency.
    fn revalidate(&mut self, changed: &str) {
        let values = self.values();
        for field in &mut self.fields {
            if field.config.name == changed || field.config.depends_on(changed) {
                field.error_message = field.evaluate(&values);
            }
        }
    }

    fn revalidate_all(&mut self) {
        let values = self.values();
        for field in &mut self.fields {
            field.error_message = field.evaluate(&values);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::json;

    fn password_form() -> FormState {
        let mut form = FormState::new("reset-password-finish-form");
        let rules = [
            Validation::new(Rule::MinLength(4), "too short"),
            Validation::new(Rule::MaxLength(50), "too long"),
        ];
        form.register(
            FieldConfig::new("password")
                .required("password required")
                .validations(rules.clone()),
        );
        form.register(
            FieldConfig::new("confirmPassword")
                .required("confirm required")
                .validations(rules)
                .validation(Validation::equals_field("password", "not equal")),
        );
        form
    }

    #[test]
    fn new_fields_start_pristine_and_report_required() {
        let form = password_form();
        let password = form.field("password");
        assert!(password.is_some_and(FieldState::is_pristine));
        assert_eq!(
            password.and_then(FieldState::error_message),
            Some("password required")
        );
        assert!(!form.is_valid());
        assert!(!form.is_submitted());
    }

    #[test]
    fn changing_a_dependency_revalidates_dependents() {
        let mut form = password_form();
        form.set_value("password", json!("abcd"));
        form.set_value("confirmPassword", json!("abcd"));
        assert!(form.is_valid());

        form.set_value("password", json!("abcde"));
        let confirm = form.field("confirmPassword");
        assert_eq!(confirm.and_then(FieldState::error_message), Some("not equal"));
        // Untouched by the change itself, so it stays dirty from before.
        assert!(confirm.is_some_and(|field| !field.is_pristine()));

        form.set_value("password", json!("abcd"));
        assert!(form.is_valid());
    }

    #[test]
    fn submit_blocks_and_reports_first_failing_rule() {
        let mut form = password_form();
        form.set_value("password", json!("abc"));
        form.set_value("confirmPassword", json!("abc"));

        let result = form.submit();
        assert!(form.is_submitted());
        let Err(errors) = result else {
            panic!("submission should be blocked");
        };
        assert_eq!(errors.message_for("password"), Some("too short"));
        assert_eq!(errors.message_for("confirmPassword"), Some("too short"));
    }

    #[test]
    fn submit_as_deserializes_values() -> Result<(), FormErrors> {
        #[derive(Deserialize)]
        #[serde(rename_all = "camelCase")]
        struct Passwords {
            password: String,
            confirm_password: String,
        }

        let mut form = password_form();
        form.set_value("password", json!("secret"));
        form.set_value("confirmPassword", json!("secret"));
        let passwords: Passwords = form.submit_as()?;
        assert_eq!(passwords.password, passwords.confirm_password);
        Ok(())
    }

    #[test]
    fn reset_restores_defaults_and_bumps_key() {
        let mut form = FormState::new("profile");
        form.register(FieldConfig::new("langKey").default_value(json!("en")));
        form.set_value("langKey", json!("fr"));
        let _ = form.submit();

        form.reset();

        assert_eq!(form.value("langKey"), Some(&json!("en")));
        assert!(form.field("langKey").is_some_and(FieldState::is_pristine));
        assert!(!form.is_submitted());
        assert_eq!(form.reset_key(), 1);
    }

    #[test]
    fn unknown_fields_are_ignored() {
        let mut form = FormState::new("empty");
        assert!(!form.set_value("missing", json!("x")));
        assert!(form.is_valid());
        assert!(form.values().is_empty());
    }

    #[test]
    fn unregister_revalidates_dependents() {
        let mut form = password_form();
        form.set_value("password", json!("abcd"));
        form.set_value("confirmPassword", json!("abcd"));
        form.unregister("password");
        assert_eq!(
            form.field("confirmPassword")
                .and_then(FieldState::error_message),
            Some("not equal")
        );
    }
}
