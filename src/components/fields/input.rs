use super::{FieldBinding, FieldLabel, FormGroupView};
use crate::form::{FieldConfig, FormState};
use serde_json::Value;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum InputType {
    #[default]
    Text,
    Email,
    Password,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InputView {
    pub id: String,
    pub input_type: InputType,
    pub value: String,
    pub placeholder: Option<String>,
    pub is_error: bool,
}

/// Text-like input bound to a string field.
#[derive(Clone, Debug)]
pub struct InputField {
    binding: FieldBinding,
    label: FieldLabel,
    input_type: InputType,
    placeholder: Option<String>,
}

impl InputField {
    pub fn register(form: &mut FormState, config: FieldConfig, label: FieldLabel) -> Self {
        Self {
            binding: FieldBinding::register(form, config),
            label,
            input_type: InputType::Text,
            placeholder: None,
        }
    }

    #[must_use]
    pub fn input_type(mut self, input_type: InputType) -> Self {
        self.input_type = input_type;
        self
    }

    #[must_use]
    pub fn placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }

    #[must_use]
    pub fn binding(&self) -> &FieldBinding {
        &self.binding
    }

    pub fn change(&self, form: &mut FormState, value: &str) {
        form.set_value(self.binding.name(), Value::String(value.to_string()));
    }

    pub fn focus(&mut self) {
        self.binding.focus();
    }

    pub fn blur(&mut self, form: &FormState) {
        self.binding.blur(form);
    }

    #[must_use]
    pub fn view(&self, form: &FormState) -> FormGroupView<InputView> {
        let value = form
            .value(self.binding.name())
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();
        let input = InputView {
            id: self.binding.id(form),
            input_type: self.input_type,
            value,
            placeholder: self.placeholder.clone(),
            is_error: self.binding.show_error(form),
        };
        self.binding.group(form, &self.label, input)
    }
}
