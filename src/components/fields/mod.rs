//! Field adapters bind one input widget to a field of a [`FormState`]. They do
//! not validate: they read validity from the form and decide whether the error
//! is worth showing yet.
//!
//! An error is shown when the field is invalid and either the form was
//! submitted or the user left the field after changing it. Focusing the field
//! again hides the error until the next blur, and a form reset forgets the
//! touched state.

mod currency;
mod hidden;
mod input;
mod multi_select;
mod select;

pub use currency::{CurrencyField, CurrencyView};
pub use hidden::HiddenField;
pub use input::{InputField, InputType, InputView};
pub use multi_select::{MultiSelectField, MultiSelectView};
pub use select::{SelectField, SelectView};

use crate::form::{FieldConfig, FieldState, FormState};
use serde::{Deserialize, Serialize};

/// Adapter-local binding: the field name and the reset generation in which
/// the field was last blurred.
#[derive(Clone, Debug)]
pub struct FieldBinding {
    name: String,
    touched_at: Option<u64>,
}

impl FieldBinding {
    /// Registers the field in the form and binds to it.
    pub fn register(form: &mut FormState, config: FieldConfig) -> Self {
        let name = config.name.clone();
        form.register(config);
        Self {
            name,
            touched_at: None,
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn id(&self, form: &FormState) -> String {
        format!("{}-{}", form.id(), self.name)
    }

    pub fn focus(&mut self) {
        self.touched_at = None;
    }

    pub fn blur(&mut self, form: &FormState) {
        self.touched_at = Some(form.reset_key());
    }

    /// Touched only counts for the current reset generation.
    #[must_use]
    pub fn is_touched(&self, form: &FormState) -> bool {
        self.touched_at == Some(form.reset_key())
    }

    #[must_use]
    pub fn state<'a>(&self, form: &'a FormState) -> Option<&'a FieldState> {
        form.field(&self.name)
    }

    #[must_use]
    pub fn show_error(&self, form: &FormState) -> bool {
        self.state(form).is_some_and(|field| {
            !field.is_valid()
                && (form.is_submitted() || (self.is_touched(form) && !field.is_pristine()))
        })
    }

    /// Wraps an input view with label, helper and the error to display.
    fn group<I>(&self, form: &FormState, label: &FieldLabel, input: I) -> FormGroupView<I> {
        let field = self.state(form);
        let show_error = self.show_error(form);
        FormGroupView {
            id: self.id(form),
            label: label.label.clone(),
            helper: label.helper.clone(),
            is_required: field.is_some_and(FieldState::is_required),
            show_error,
            error_message: if show_error {
                field.and_then(FieldState::error_message).map(ToString::to_string)
            } else {
                None
            },
            input,
        }
    }
}

/// Label and helper text shared by every visible adapter.
#[derive(Clone, Debug, Default)]
pub struct FieldLabel {
    pub label: Option<String>,
    pub helper: Option<String>,
}

impl FieldLabel {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: Some(label.into()),
            helper: None,
        }
    }

    #[must_use]
    pub fn helper(mut self, helper: impl Into<String>) -> Self {
        self.helper = Some(helper.into());
        self
    }
}

/// Label, helper and error text around an input.
#[derive(Clone, Debug, PartialEq)]
pub struct FormGroupView<I> {
    pub id: String,
    pub label: Option<String>,
    pub helper: Option<String>,
    pub is_required: bool,
    pub show_error: bool,
    pub error_message: Option<String>,
    pub input: I,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectOption {
    pub label: String,
    pub value: String,
}

impl SelectOption {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }
}
