use super::{FieldBinding, FieldLabel, FormGroupView, SelectOption};
use crate::form::{FieldConfig, FormState};
use serde_json::Value;

const DEFAULT_PLACEHOLDER: &str = "Select...";
const DEFAULT_NO_OPTIONS_MESSAGE: &str = "No option";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MultiSelectView {
    pub id: String,
    pub selected: Vec<SelectOption>,
    pub options: Vec<SelectOption>,
    pub placeholder: String,
    pub no_options_message: String,
    pub is_clearable: bool,
    pub is_disabled: bool,
    pub is_error: bool,
}

/// Several options stored as a list of option values.
#[derive(Clone, Debug)]
pub struct MultiSelectField {
    binding: FieldBinding,
    label: FieldLabel,
    options: Vec<SelectOption>,
    placeholder: Option<String>,
    no_options_message: Option<String>,
    is_not_clearable: bool,
    is_disabled: bool,
}

impl MultiSelectField {
    pub fn register(
        form: &mut FormState,
        config: FieldConfig,
        label: FieldLabel,
        options: Vec<SelectOption>,
    ) -> Self {
        Self {
            binding: FieldBinding::register(form, config),
            label,
            options,
            placeholder: None,
            no_options_message: None,
            is_not_clearable: false,
            is_disabled: false,
        }
    }

    #[must_use]
    pub fn placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }

    #[must_use]
    pub fn no_options_message(mut self, message: impl Into<String>) -> Self {
        self.no_options_message = Some(message.into());
        self
    }

    #[must_use]
    pub fn not_clearable(mut self, is_not_clearable: bool) -> Self {
        self.is_not_clearable = is_not_clearable;
        self
    }

    #[must_use]
    pub fn disabled(mut self, is_disabled: bool) -> Self {
        self.is_disabled = is_disabled;
        self
    }

    /// An empty selection stores `null` so that "required" applies.
    pub fn change(&self, form: &mut FormState, selected: &[SelectOption]) {
        let value = if selected.is_empty() {
            Value::Null
        } else {
            Value::Array(
                selected
                    .iter()
                    .map(|option| Value::String(option.value.clone()))
                    .collect(),
            )
        };
        form.set_value(self.binding.name(), value);
    }

    /// Options whose label contains `search`, ignoring case.
    #[must_use]
    pub fn filter(&self, search: &str) -> Vec<SelectOption> {
        let needle = search.to_lowercase();
        self.options
            .iter()
            .filter(|option| option.label.to_lowercase().contains(&needle))
            .cloned()
            .collect()
    }

    pub fn focus(&mut self) {
        self.binding.focus();
    }

    pub fn blur(&mut self, form: &FormState) {
        self.binding.blur(form);
    }

    #[must_use]
    pub fn view(&self, form: &FormState) -> FormGroupView<MultiSelectView> {
        let values: Vec<&str> = form
            .value(self.binding.name())
            .and_then(Value::as_array)
            .map(|items| items.iter().filter_map(Value::as_str).collect())
            .unwrap_or_default();
        let selected = self
            .options
            .iter()
            .filter(|option| values.contains(&option.value.as_str()))
            .cloned()
            .collect();

        let input = MultiSelectView {
            id: self.binding.id(form),
            selected,
            options: self.options.clone(),
            placeholder: self
                .placeholder
                .clone()
                .unwrap_or_else(|| DEFAULT_PLACEHOLDER.to_string()),
            no_options_message: self
                .no_options_message
                .clone()
                .unwrap_or_else(|| DEFAULT_NO_OPTIONS_MESSAGE.to_string()),
            is_clearable: !self.is_not_clearable,
            is_disabled: self.is_disabled,
            is_error: self.binding.show_error(form),
        };
        self.binding.group(form, &self.label, input)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn authorities() -> Vec<SelectOption> {
        vec![
            SelectOption::new("ROLE_USER", "User"),
            SelectOption::new("ROLE_ADMIN", "Administrator"),
        ]
    }

    fn register(form: &mut FormState) -> MultiSelectField {
        MultiSelectField::register(
            form,
            FieldConfig::new("authorities").required("Pick at least one role"),
            FieldLabel::new("Roles"),
            authorities(),
        )
    }

    #[test]
    fn change_stores_values_and_empty_clears() {
        let mut form = FormState::new("user");
        let field = register(&mut form);

        field.change(&mut form, &authorities());
        assert_eq!(
            form.value("authorities"),
            Some(&json!(["ROLE_USER", "ROLE_ADMIN"]))
        );
        assert_eq!(field.view(&form).input.selected.len(), 2);

        field.change(&mut form, &[]);
        assert_eq!(form.value("authorities"), Some(&Value::Null));
        assert!(field.view(&form).input.selected.is_empty());
        assert!(!form.is_valid());
    }

    #[test]
    fn defaults_are_clearable_with_messages() {
        let mut form = FormState::new("user");
        let view = register(&mut form).view(&form).input;
        assert!(view.is_clearable);
        assert_eq!(view.placeholder, DEFAULT_PLACEHOLDER);
        assert_eq!(view.no_options_message, DEFAULT_NO_OPTIONS_MESSAGE);

        let view = register(&mut form).not_clearable(true).view(&form).input;
        assert!(!view.is_clearable);
    }

    #[test]
    fn filter_matches_labels_case_insensitively() {
        let mut form = FormState::new("user");
        let field = register(&mut form);
        assert_eq!(field.filter("ADMIN").len(), 1);
        assert!(field.filter("guest").is_empty());
    }
}
