//! Validation rules declared by pages as data. Built-in rules pass on empty
//! values so that "required" stays the single source of emptiness errors;
//! custom rules always run and receive the whole form.

use regex::Regex;
use serde_json::Value;
use std::{collections::BTreeMap, fmt, sync::Arc};

/// Snapshot of every field value in a form, keyed by field name.
pub type FormValues = BTreeMap<String, Value>;

static NULL: Value = Value::Null;

type Predicate = dyn Fn(&Value, &FormValues) -> bool + Send + Sync;

#[derive(Clone)]
pub enum Rule {
    IsEmail,
    MinLength(usize),
    MaxLength(usize),
    Custom(Arc<Predicate>),
}

impl Rule {
    /// Wraps a predicate over the field value and the current form values.
    pub fn custom<F>(predicate: F) -> Self
    where
        F: Fn(&Value, &FormValues) -> bool + Send + Sync + 'static,
    {
        Rule::Custom(Arc::new(predicate))
    }

    #[must_use]
    pub fn check(&self, value: &Value, values: &FormValues) -> bool {
        match self {
            Rule::IsEmail => is_empty(value) || value.as_str().is_some_and(valid_email),
            Rule::MinLength(min) => is_empty(value) || length(value).is_some_and(|len| len >= *min),
            Rule::MaxLength(max) => is_empty(value) || length(value).is_some_and(|len| len <= *max),
            Rule::Custom(predicate) => predicate(value, values),
        }
    }
}

impl fmt::Debug for Rule {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rule::IsEmail => write!(formatter, "IsEmail"),
            Rule::MinLength(min) => write!(formatter, "MinLength({min})"),
            Rule::MaxLength(max) => write!(formatter, "MaxLength({max})"),
            Rule::Custom(_) => write!(formatter, "Custom"),
        }
    }
}

/// A rule, the message shown when it fails, and the other fields whose
/// changes must trigger re-evaluation.
#[derive(Clone, Debug)]
pub struct Validation {
    pub rule: Rule,
    pub message: String,
    pub deps: Vec<String>,
}

impl Validation {
    pub fn new(rule: Rule, message: impl Into<String>) -> Self {
        Self {
            rule,
            message: message.into(),
            deps: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_deps<I, S>(mut self, deps: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.deps = deps.into_iter().map(Into::into).collect();
        self
    }

    /// Equality with another field, re-evaluated whenever that field changes.
    pub fn equals_field(field: &str, message: impl Into<String>) -> Self {
        let other = field.to_string();
        Self::new(
            Rule::custom(move |value, values| {
                let expected = values.get(&other).unwrap_or(&NULL);
                normalize(value) == normalize(expected)
            }),
            message,
        )
        .with_deps([field])
    }

    #[must_use]
    pub fn depends_on(&self, field: &str) -> bool {
        self.deps.iter().any(|dep| dep == field)
    }
}

/// Empty means null, an empty string or an empty list.
#[must_use]
pub fn is_empty(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(text) => text.is_empty(),
        Value::Array(items) => items.is_empty(),
        _ => false,
    }
}

#[must_use]
pub fn valid_email(email: &str) -> bool {
    Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").map_or(false, |re| re.is_match(email))
}

fn length(value: &Value) -> Option<usize> {
    match value {
        Value::String(text) => Some(text.chars().count()),
        Value::Array(items) => Some(items.len()),
        _ => None,
    }
}

/// Treats a missing value and an empty string alike when comparing fields.
fn normalize(value: &Value) -> &Value {
    if is_empty(value) {
        &NULL
    } else {
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn valid_email_accepts_basic_format() {
        assert!(valid_email("user@example.com"));
        assert!(!valid_email("not-an-email"));
        assert!(!valid_email("user@example"));
        assert!(!valid_email("us er@example.com"));
    }

    #[test]
    fn builtin_rules_pass_on_empty_values() {
        let values = FormValues::new();
        for rule in [Rule::IsEmail, Rule::MinLength(4), Rule::MaxLength(0)] {
            assert!(rule.check(&Value::Null, &values), "{rule:?} on null");
            assert!(rule.check(&json!(""), &values), "{rule:?} on empty string");
        }
    }

    #[test]
    fn length_rules_count_characters() {
        let values = FormValues::new();
        assert!(!Rule::MinLength(4).check(&json!("abc"), &values));
        assert!(Rule::MinLength(4).check(&json!("abcd"), &values));
        assert!(Rule::MaxLength(4).check(&json!("éééé"), &values));
        assert!(!Rule::MaxLength(4).check(&json!("abcde"), &values));
        assert!(Rule::MaxLength(2).check(&json!(["a", "b"]), &values));
    }

    #[test]
    fn length_rules_reject_non_text_values() {
        let values = FormValues::new();
        assert!(!Rule::MinLength(1).check(&json!(12), &values));
    }

    #[test]
    fn equals_field_reads_other_value_and_declares_dependency() {
        let validation = Validation::equals_field("password", "Passwords do not match");
        assert!(validation.depends_on("password"));
        assert!(!validation.depends_on("email"));

        let mut values = FormValues::new();
        values.insert("password".to_string(), json!("abcd"));
        assert!(validation.rule.check(&json!("abcd"), &values));
        assert!(!validation.rule.check(&json!("abce"), &values));

        values.insert("password".to_string(), json!(""));
        assert!(validation.rule.check(&Value::Null, &values));
    }
}
