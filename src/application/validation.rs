//! Field-level request validation with per-field error lists.

use std::collections::BTreeMap;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

pub const NON_FIELD_ERRORS: &str = "non_field_errors";

static RE_EMAIL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)^[a-z0-9!#$%&'*+/=?^_`{|}~-]+(\.[a-z0-9!#$%&'*+/=?^_`{|}~-]+)*@([a-z0-9]([a-z0-9-]{0,61}[a-z0-9])?\.)+[a-z]{2,63}$",
    )
    .expect("valid email regex")
});

/// Errors keyed by field name; serialized as `{"field": ["message", ...]}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors(BTreeMap<String, Vec<String>>);

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn field(field: &str, message: impl Into<String>) -> Self {
        let mut errors = Self::new();
        errors.add(field, message);
        errors
    }

    pub fn non_field(message: impl Into<String>) -> Self {
        Self::field(NON_FIELD_ERRORS, message)
    }

    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.0
            .entry(field.to_string())
            .or_default()
            .push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.0.get(field).map(Vec::as_slice)
    }
}

impl std::fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut first = true;
        for (field, messages) in &self.0 {
            for message in messages {
                if !first {
                    f.write_str("; ")?;
                }
                first = false;
                write!(f, "{}: {}", field, message)?;
            }
        }
        Ok(())
    }
}

/// Rules for a single text field.
#[derive(Debug, Clone, Copy)]
pub struct TextRule {
    pub max_length: usize,
    pub trim: bool,
}

/// Checks a required text field and returns its cleaned value.
pub fn required_text(
    errors: &mut ValidationErrors,
    field: &str,
    value: Option<&str>,
    rule: TextRule,
) -> Option<String> {
    let Some(raw) = value else {
        errors.add(field, "This field is required.");
        return None;
    };
    let cleaned = if rule.trim { raw.trim() } else { raw };
    if cleaned.is_empty() {
        errors.add(field, "This field may not be blank.");
        return None;
    }
    if cleaned.chars().count() > rule.max_length {
        errors.add(
            field,
            format!(
                "Ensure this field has no more than {} characters.",
                rule.max_length
            ),
        );
        return None;
    }
    Some(cleaned.to_string())
}

/// Like [`required_text`] but also requires a well-formed email address.
pub fn required_email(
    errors: &mut ValidationErrors,
    field: &str,
    value: Option<&str>,
    max_length: usize,
) -> Option<String> {
    let email = required_text(
        errors,
        field,
        value,
        TextRule {
            max_length,
            trim: true,
        },
    )?;
    if !RE_EMAIL.is_match(&email) {
        errors.add(field, "Enter a valid email address.");
        return None;
    }
    Some(email)
}

/// Accepts an integer primary key given as a JSON number or numeric string.
pub fn required_pk(
    errors: &mut ValidationErrors,
    field: &str,
    value: Option<&serde_json::Value>,
) -> Option<i64> {
    let received = match value {
        None => {
            errors.add(field, "This field is required.");
            return None;
        }
        Some(serde_json::Value::Null) => {
            errors.add(field, "This field may not be null.");
            return None;
        }
        Some(v) => v,
    };
    let parsed = match received {
        serde_json::Value::Number(n) => n.as_i64(),
        serde_json::Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    };
    match (parsed, received) {
        (Some(pk), _) => Some(pk),
        (None, serde_json::Value::Number(n)) => {
            errors.add(field, missing_pk_message(&n.to_string()));
            None
        }
        (None, other) => {
            errors.add(
                field,
                format!(
                    "Incorrect type. Expected pk value, received {}.",
                    json_type_name(other)
                ),
            );
            None
        }
    }
}

pub fn missing_pk_message(pk: &str) -> String {
    format!("Invalid pk \"{}\" - object does not exist.", pk)
}

fn json_type_name(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "bool",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "str",
        serde_json::Value::Array(_) => "list",
        serde_json::Value::Object(_) => "dict",
    }
}
