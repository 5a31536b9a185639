use super::{FieldBinding, FieldLabel, FormGroupView, SelectOption};
use crate::form::{FieldConfig, FormState};
use serde_json::Value;

const DEFAULT_PLACEHOLDER: &str = "Select...";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SelectView {
    pub id: String,
    pub selected: Option<SelectOption>,
    pub options: Vec<SelectOption>,
    pub placeholder: String,
    pub is_clearable: bool,
    pub is_searchable: bool,
    pub is_disabled: bool,
    pub is_error: bool,
}

/// Single choice among options, stored as the option value.
#[derive(Clone, Debug)]
pub struct SelectField {
    binding: FieldBinding,
    label: FieldLabel,
    options: Vec<SelectOption>,
    placeholder: Option<String>,
    is_clearable: bool,
    is_searchable: bool,
    is_disabled: bool,
}

impl SelectField {
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
            is_clearable: false,
            is_searchable: false,
            is_disabled: false,
        }
    }

    #[must_use]
    pub fn placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }

    #[must_use]
    pub fn clearable(mut self, is_clearable: bool) -> Self {
        self.is_clearable = is_clearable;
        self
    }

    #[must_use]
    pub fn searchable(mut self, is_searchable: bool) -> Self {
        self.is_searchable = is_searchable;
        self
    }

    #[must_use]
    pub fn disabled(mut self, is_disabled: bool) -> Self {
        self.is_disabled = is_disabled;
        self
    }

    /// Selecting stores the option value; clearing stores `null`.
    pub fn change(&self, form: &mut FormState, option: Option<&SelectOption>) {
        let value = option.map_or(Value::Null, |option| Value::String(option.value.clone()));
        form.set_value(self.binding.name(), value);
    }

    pub fn focus(&mut self) {
        self.binding.focus();
    }

    pub fn blur(&mut self, form: &FormState) {
        self.binding.blur(form);
    }

    #[must_use]
    pub fn view(&self, form: &FormState) -> FormGroupView<SelectView> {
        let current = form.value(self.binding.name()).and_then(Value::as_str);
        let selected = current.and_then(|value| {
            self.options
                .iter()
                .find(|option| option.value == value)
                .cloned()
        });
        let input = SelectView {
            id: self.binding.id(form),
            selected,
            options: self.options.clone(),
            placeholder: self
                .placeholder
                .clone()
                .filter(|text| !text.is_empty())
                .unwrap_or_else(|| DEFAULT_PLACEHOLDER.to_string()),
            is_clearable: self.is_clearable,
            is_searchable: self.is_searchable,
            is_disabled: self.is_disabled,
            is_error: self.binding.show_error(form),
        };
        self.binding.group(form, &self.label, input)
    }
}
