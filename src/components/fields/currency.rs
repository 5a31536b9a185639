use super::{FieldBinding, FieldLabel, FormGroupView};
use crate::form::{FieldConfig, FormState};
use serde_json::{Number, Value};

#[derive(Clone, Debug, PartialEq)]
pub struct CurrencyView {
    pub id: String,
    pub value: Option<f64>,
    /// Value formatted for display, empty when there is no value.
    pub display: String,
    pub placeholder: Option<String>,
    pub currency: String,
    pub is_error: bool,
}

/// Numeric amount input shown with a currency code.
#[derive(Clone, Debug)]
pub struct CurrencyField {
    binding: FieldBinding,
    label: FieldLabel,
    placeholder: Option<String>,
    currency: String,
    locale: String,
    decimals: usize,
}

impl CurrencyField {
    pub fn register(form: &mut FormState, config: FieldConfig, label: FieldLabel) -> Self {
        Self {
            binding: FieldBinding::register(form, config),
            label,
            placeholder: None,
            currency: "EUR".to_string(),
            locale: "en".to_string(),
            decimals: 2,
        }
    }

    #[must_use]
    pub fn currency(mut self, currency: impl Into<String>) -> Self {
        self.currency = currency.into();
        self
    }

    #[must_use]
    pub fn locale(mut self, locale: impl Into<String>) -> Self {
        self.locale = locale.into();
        self
    }

    #[must_use]
    pub fn decimals(mut self, decimals: usize) -> Self {
        self.decimals = decimals;
        self
    }

    #[must_use]
    pub fn placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }

    /// Stores the amount; `None` and non-finite numbers clear the field.
    pub fn change(&self, form: &mut FormState, value: Option<f64>) {
        let value = value
            .and_then(Number::from_f64)
            .map_or(Value::Null, Value::Number);
        form.set_value(self.binding.name(), value);
    }

    pub fn focus(&mut self) {
        self.binding.focus();
    }

    pub fn blur(&mut self, form: &FormState) {
        self.binding.blur(form);
    }

    #[must_use]
    pub fn view(&self, form: &FormState) -> FormGroupView<CurrencyView> {
        let value = form.value(self.binding.name()).and_then(Value::as_f64);
        let input = CurrencyView {
            id: self.binding.id(form),
            value,
            display: value
                .map(|amount| format_amount(amount, &self.currency, &self.locale, self.decimals))
                .unwrap_or_default(),
            placeholder: self.placeholder.clone(),
            currency: self.currency.clone(),
            is_error: self.binding.show_error(form),
        };
        self.binding.group(form, &self.label, input)
    }
}

/// Formats an amount with grouping and the currency code. French-style locales
/// group with spaces and use a decimal comma, others use `,` and `.`.
fn format_amount(amount: f64, currency: &str, locale: &str, decimals: usize) -> String {
    let (group_sep, decimal_sep) = if locale.starts_with("fr") {
        (' ', ',')
    } else {
        (',', '.')
    };

    let fixed = format!("{:.*}", decimals, amount.abs());
    let (integer, fraction) = fixed.split_once('.').unwrap_or((fixed.as_str(), ""));

    let mut grouped = String::new();
    for (index, digit) in integer.chars().enumerate() {
        if index > 0 && (integer.len() - index) % 3 == 0 {
            grouped.push(group_sep);
        }
        grouped.push(digit);
    }
    if !fraction.is_empty() {
        grouped.push(decimal_sep);
        grouped.push_str(fraction);
    }

    let sign = if amount < 0.0 { "-" } else { "" };
    format!("{sign}{grouped} {currency}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_amount_groups_thousands() {
        assert_eq!(format_amount(1234.5, "EUR", "en", 2), "1,234.50 EUR");
        assert_eq!(format_amount(1234.5, "EUR", "fr", 2), "1 234,50 EUR");
        assert_eq!(format_amount(-1_000_000.0, "USD", "en", 0), "-1,000,000 USD");
        assert_eq!(format_amount(12.0, "USD", "en", 2), "12.00 USD");
    }

    #[test]
    fn change_stores_numbers_and_clears_on_none() {
        let mut form = FormState::new("invoice");
        let field = CurrencyField::register(
            &mut form,
            FieldConfig::new("amount").required("Amount is required"),
            FieldLabel::new("Amount"),
        )
        .currency("USD");

        field.change(&mut form, Some(42.5));
        let view = field.view(&form);
        assert_eq!(view.input.value, Some(42.5));
        assert_eq!(view.input.display, "42.50 USD");

        field.change(&mut form, None);
        assert_eq!(field.view(&form).input.value, None);
        assert!(!form.is_valid());

        field.change(&mut form, Some(f64::NAN));
        assert_eq!(form.value("amount"), Some(&Value::Null));
    }
}
