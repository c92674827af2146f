//! Request validation from per-field rules.

use crate::model::parse_est_date;
use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fmt;

/// Expected JSON shape of a field.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Number,
    Integer,
    Date,
}

#[derive(Clone, Debug)]
pub struct ValidationRule {
    pub field: &'static str,
    pub kind: FieldKind,
    /// Present, non-null, and for text not blank.
    pub required: bool,
    /// Inclusive bounds for numeric kinds.
    pub range: Option<(f64, f64)>,
    /// Reported when `required` or `range` fails; a generic message is used when absent.
    pub message: Option<&'static str>,
}

/// Longitude is -180..=180 and latitude -90..=90; both bounds inclusive.
pub const PARK_RULES: &[ValidationRule] = &[
    ValidationRule { field: "name", kind: FieldKind::Text, required: true, range: None, message: Some("A name is required.") },
    ValidationRule {
        field: "category",
        kind: FieldKind::Text,
        required: true,
        range: None,
        message: Some("A category is required."),
    },
    ValidationRule { field: "state", kind: FieldKind::Text, required: true, range: None, message: Some("A state is required.") },
    ValidationRule {
        field: "longitude",
        kind: FieldKind::Number,
        required: false,
        range: Some((-180.0, 180.0)),
        message: Some("Value for Longitude must be between -180 and 180"),
    },
    ValidationRule {
        field: "latitude",
        kind: FieldKind::Number,
        required: false,
        range: Some((-90.0, 90.0)),
        message: Some("Value for Latitude must be between -90 and 90"),
    },
    ValidationRule { field: "area", kind: FieldKind::Number, required: false, range: None, message: None },
    ValidationRule { field: "visitors", kind: FieldKind::Integer, required: false, range: None, message: None },
    ValidationRule {
        field: "estDate",
        kind: FieldKind::Date,
        required: true,
        range: None,
        message: Some("An establishment date is required."),
    },
];

/// Field name to messages, ordered by field name.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors(BTreeMap<String, Vec<String>>);

impl ValidationErrors {
    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.0.entry(field.to_string()).or_default().push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn field(&self, field: &str) -> Option<&[String]> {
        self.0.get(field).map(Vec::as_slice)
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .0
            .iter()
            .map(|(field, messages)| format!("{}: {}", field, messages.join(" ")))
            .collect();
        write!(f, "{}", parts.join("; "))
    }
}

pub struct RequestValidator;

impl RequestValidator {
    /// Validate body against every rule, collecting all failures.
    pub fn validate(body: &Map<String, Value>, rules: &[ValidationRule]) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::default();
        for rule in rules {
            match body.get(rule.field) {
                None | Some(Value::Null) => {
                    if rule.required {
                        errors.add(rule.field, required_message(rule));
                    }
                }
                Some(v) => validate_field(rule, v, &mut errors),
            }
        }
        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

fn validate_field(rule: &ValidationRule, v: &Value, errors: &mut ValidationErrors) {
    let col = rule.field;
    match rule.kind {
        FieldKind::Text => match v.as_str() {
            Some(s) if rule.required && s.trim().is_empty() => errors.add(col, required_message(rule)),
            Some(s) if s.contains('\0') => errors.add(col, format!("{} must not contain NUL characters", col)),
            Some(_) => {}
            None => errors.add(col, format!("{} must be a string", col)),
        },
        FieldKind::Number => match v.as_f64() {
            Some(n) => check_range(rule, n, errors),
            None => errors.add(col, format!("{} must be a number", col)),
        },
        FieldKind::Integer => match v.as_i64().filter(|n| i32::try_from(*n).is_ok()) {
            Some(n) => check_range(rule, n as f64, errors),
            None => errors.add(col, format!("{} must be a 32-bit integer", col)),
        },
        FieldKind::Date => {
            if v.as_str().and_then(parse_est_date).is_none() {
                errors.add(col, format!("{} must be a date (YYYY-MM-DD)", col));
            }
        }
    }
}

fn check_range(rule: &ValidationRule, n: f64, errors: &mut ValidationErrors) {
    if let Some((min, max)) = rule.range {
        if n < min || n > max {
            let message = match rule.message {
                Some(m) => m.to_string(),
                None => format!("{} must be between {} and {}", rule.field, min, max),
            };
            errors.add(rule.field, message);
        }
    }
}

fn required_message(rule: &ValidationRule) -> String {
    match rule.message {
        Some(m) => m.to_string(),
        None => format!("{} is required", rule.field),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn body(v: Value) -> Map<String, Value> {
        match v {
            Value::Object(m) => m,
            _ => panic!("expected object"),
        }
    }

    fn valid() -> Map<String, Value> {
        body(json!({
            "name": "Grand Canyon",
            "category": "National",
            "state": "Arizona",
            "longitude": -112.14,
            "latitude": 36.06,
            "area": 4926,
            "visitors": 2897098,
            "estDate": "1919-02-26"
        }))
    }

    #[test]
    fn accepts_valid_park() {
        assert!(RequestValidator::validate(&valid(), PARK_RULES).is_ok());
    }

    #[test]
    fn reports_every_missing_required_field() {
        let errors = RequestValidator::validate(&body(json!({"estDate": "2001-01-01"})), PARK_RULES).unwrap_err();
        assert_eq!(errors.field("name"), Some(&["A name is required.".to_string()][..]));
        assert_eq!(errors.field("category"), Some(&["A category is required.".to_string()][..]));
        assert_eq!(errors.field("state"), Some(&["A state is required.".to_string()][..]));
        assert!(errors.field("longitude").is_none());
    }

    #[test]
    fn nul_characters_in_text_are_rejected() {
        let mut b = valid();
        b.insert("category".into(), json!("Nat\u{0}ional"));
        let errors = RequestValidator::validate(&b, PARK_RULES).unwrap_err();
        assert_eq!(
            errors.field("category"),
            Some(&["category must not contain NUL characters".to_string()][..])
        );
    }

    #[test]
    fn rules_without_message_fall_back_to_generic_text() {
        const RULES: &[ValidationRule] = &[
            ValidationRule { field: "code", kind: FieldKind::Text, required: true, range: None, message: None },
            ValidationRule { field: "rank", kind: FieldKind::Integer, required: false, range: Some((1.0, 5.0)), message: None },
        ];
        let errors = RequestValidator::validate(&body(json!({"rank": 9})), RULES).unwrap_err();
        assert_eq!(errors.field("code"), Some(&["code is required".to_string()][..]));
        assert_eq!(errors.field("rank"), Some(&["rank must be between 1 and 5".to_string()][..]));
    }

    #[test]
    fn blank_and_null_strings_are_missing() {
        let mut b = valid();
        b.insert("name".into(), json!("   "));
        b.insert("state".into(), Value::Null);
        let errors = RequestValidator::validate(&b, PARK_RULES).unwrap_err();
        assert!(errors.field("name").is_some());
        assert!(errors.field("state").is_some());
        assert!(errors.field("category").is_none());
    }

    #[test]
    fn negative_longitude_is_in_range() {
        let mut b = valid();
        b.insert("longitude".into(), json!(-180));
        b.insert("latitude".into(), json!(-90));
        assert!(RequestValidator::validate(&b, PARK_RULES).is_ok());
    }

    #[test]
    fn coordinates_out_of_range_are_rejected() {
        let mut b = valid();
        b.insert("longitude".into(), json!(180.5));
        b.insert("latitude".into(), json!(-91));
        let errors = RequestValidator::validate(&b, PARK_RULES).unwrap_err();
        assert_eq!(
            errors.field("longitude"),
            Some(&["Value for Longitude must be between -180 and 180".to_string()][..])
        );
        assert_eq!(
            errors.field("latitude"),
            Some(&["Value for Latitude must be between -90 and 90".to_string()][..])
        );
    }

    #[test]
    fn wrong_types_are_rejected() {
        let mut b = valid();
        b.insert("name".into(), json!(42));
        b.insert("visitors".into(), json!(1.5));
        b.insert("area".into(), json!("big"));
        b.insert("estDate".into(), json!("yesterday"));
        let errors = RequestValidator::validate(&b, PARK_RULES).unwrap_err();
        assert_eq!(errors.field("name"), Some(&["name must be a string".to_string()][..]));
        assert!(errors.field("visitors").is_some());
        assert!(errors.field("area").is_some());
        assert!(errors.field("estDate").is_some());
    }

    #[test]
    fn visitors_must_fit_i32() {
        let mut b = valid();
        b.insert("visitors".into(), json!(i64::from(i32::MAX) + 1));
        let errors = RequestValidator::validate(&b, PARK_RULES).unwrap_err();
        assert!(errors.field("visitors").is_some());
    }
}
