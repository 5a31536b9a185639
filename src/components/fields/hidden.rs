use super::{FieldBinding, FormGroupView};
use crate::form::{FieldConfig, FormState};
use serde_json::Value;

/// A value carried by the form with no visible widget. It renders only when
/// a submission failed on it.
#[derive(Clone, Debug)]
pub struct HiddenField {
    binding: FieldBinding,
}

impl HiddenField {
    pub fn register(form: &mut FormState, config: FieldConfig) -> Self {
        Self {
            binding: FieldBinding::register(form, config),
        }
    }

    pub fn set(&self, form: &mut FormState, value: Value) {
        form.set_value(self.binding.name(), value);
    }

    #[must_use]
    pub fn view(&self, form: &FormState) -> Option<FormGroupView<()>> {
        let field = self.binding.state(form)?;
        if field.is_valid() || !form.is_submitted() {
            return None;
        }
        Some(FormGroupView {
            id: self.binding.id(form),
            label: None,
            helper: None,
            is_required: field.is_required(),
            show_error: true,
            error_message: field.error_message().map(ToString::to_string),
            input: (),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn renders_only_submitted_errors() {
        let mut form = FormState::new("register");
        let field = HiddenField::register(
            &mut form,
            FieldConfig::new("langKey").required("Language is required"),
        );
        assert!(field.view(&form).is_none());

        let _ = form.submit();
        let view = field.view(&form);
        assert_eq!(
            view.and_then(|group| group.error_message),
            Some("Language is required".to_string())
        );

        field.set(&mut form, json!("en"));
        assert!(field.view(&form).is_none());
    }
}
