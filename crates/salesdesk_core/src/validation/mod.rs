//! Form validation aggregation.
//!
//! # Responsibility
//! - Turn raw form input into a record, or into the complete set of field
//!   violations.
//!
//! # Invariants
//! - Every rule is evaluated; one failing field never hides another.
//! - A `ValidationError` always carries at least one violation.
//! - No record is produced when any violation exists.

pub mod department_form;
pub mod seller_form;

use serde::Serialize;
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub const REQUIRED_MESSAGE: &str = "Field can't be empty";
pub const MAX_TEXT_CHARS: usize = 70;

/// Field-keyed violations reported for one rejected form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationError {
    errors: BTreeMap<&'static str, String>,
}

impl ValidationError {
    /// Returns all violations keyed by field name.
    pub fn errors(&self) -> &BTreeMap<&'static str, String> {
        &self.errors
    }

    /// Returns the message recorded for `field`, if any.
    pub fn message(&self, field: &str) -> Option<&str> {
        self.errors.get(field).map(String::as_str)
    }

    pub fn fields(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.errors.keys().copied()
    }
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "validation failed:")?;
        for (field, message) in &self.errors {
            write!(f, " {field}: {message};")?;
        }
        Ok(())
    }
}

impl Error for ValidationError {}

/// Collector that every field rule reports into.
#[derive(Debug, Default)]
pub struct Violations {
    errors: BTreeMap<&'static str, String>,
}

impl Violations {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a violation; the first message per field wins.
    pub fn add(&mut self, field: &'static str, message: impl Into<String>) {
        self.errors.entry(field).or_insert_with(|| message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Checks presence and length of a free-text field.
    ///
    /// Returns the trimmed text when the field is usable.
    pub fn require_text(&mut self, field: &'static str, value: &str) -> Option<String> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            self.add(field, REQUIRED_MESSAGE);
            return None;
        }
        if trimmed.chars().count() > MAX_TEXT_CHARS {
            self.add(
                field,
                format!("Field can't be longer than {MAX_TEXT_CHARS} characters"),
            );
            return None;
        }
        Some(trimmed.to_string())
    }

    /// Checks presence of a field that must parse into a value.
    ///
    /// Blank input and unparsable input both fail the required rule; the
    /// latter is reported with `invalid_message`.
    pub fn require_parsed<T>(
        &mut self,
        field: &'static str,
        value: &str,
        invalid_message: &str,
        parse: impl FnOnce(&str) -> Option<T>,
    ) -> Option<T> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            self.add(field, REQUIRED_MESSAGE);
            return None;
        }
        let parsed = parse(trimmed);
        if parsed.is_none() {
            self.add(field, invalid_message);
        }
        parsed
    }

    /// Checks presence of an already-typed optional value.
    pub fn require_some<T>(&mut self, field: &'static str, value: Option<T>) -> Option<T> {
        if value.is_none() {
            self.add(field, REQUIRED_MESSAGE);
        }
        value
    }

    /// Closes the pass: builds the record only when nothing was recorded.
    ///
    /// `build` combines the `Option`s returned by the `require_*` rules. Each
    /// rule returns `None` only after recording a violation for its field, so
    /// every key in an error comes from the form's own field set.
    ///
    /// # Panics
    /// - When `build` returns `None` although no rule recorded a violation,
    ///   i.e. a form combined a value that no rule checked.
    pub fn finish<T>(self, build: impl FnOnce() -> Option<T>) -> Result<T, ValidationError> {
        if !self.errors.is_empty() {
            return Err(ValidationError {
                errors: self.errors,
            });
        }
        match build() {
            Some(value) => Ok(value),
            None => unreachable!("form value missing without a recorded violation"),
        }
    }
}

/// Raw input for one record kind that can be validated into that record.
pub trait FormInput {
    type Entity;

    /// Validates every field and builds the record.
    ///
    /// # Errors
    /// - Returns all violations at once when any field rule fails.
    fn validate(&self) -> Result<Self::Entity, ValidationError>;
}

/// Parses a decimal number, accepting `,` as decimal separator.
pub fn parse_decimal(text: &str) -> Option<f64> {
    text.trim()
        .replace(',', ".")
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
}

#[cfg(test)]
mod tests {
    use super::{parse_decimal, Violations, REQUIRED_MESSAGE};

    #[test]
    fn empty_collector_finishes_with_value() {
        let violations = Violations::new();
        assert_eq!(violations.finish(|| Some(3)).unwrap(), 3);
    }

    #[test]
    fn all_rules_are_reported_in_one_pass() {
        let mut violations = Violations::new();
        assert!(violations.require_text("name", "  ").is_none());
        assert!(violations
            .require_parsed("salary", "abc", "Invalid number", parse_decimal)
            .is_none());
        assert!(violations.require_some::<i64>("department", None).is_none());

        let err = violations.finish(|| Some(())).unwrap_err();
        assert_eq!(
            err.fields().collect::<Vec<_>>(),
            vec!["department", "name", "salary"]
        );
        assert_eq!(err.message("name"), Some(REQUIRED_MESSAGE));
        assert_eq!(err.message("salary"), Some("Invalid number"));
    }

    #[test]
    #[should_panic(expected = "without a recorded violation")]
    fn missing_value_without_violation_is_a_form_bug() {
        let _ = Violations::new().finish(|| None::<()>);
    }

    #[test]
    fn first_message_per_field_is_kept() {
        let mut violations = Violations::new();
        violations.add("name", "first");
        violations.add("name", "second");
        let err = violations.finish(|| Some(())).unwrap_err();
        assert_eq!(err.message("name"), Some("first"));
    }

    #[test]
    fn text_longer_than_limit_is_rejected() {
        let mut violations = Violations::new();
        let long = "x".repeat(71);
        assert!(violations.require_text("name", &long).is_none());
        assert!(!violations.is_empty());
    }

    #[test]
    fn parse_decimal_accepts_comma_and_rejects_garbage() {
        assert_eq!(parse_decimal("1500,50"), Some(1500.5));
        assert_eq!(parse_decimal(" 42 "), Some(42.0));
        assert_eq!(parse_decimal("12a"), None);
        assert_eq!(parse_decimal("NaN"), None);
    }
}
