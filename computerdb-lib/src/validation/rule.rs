//! Field rules.

use super::DateFormat;

/// The validation policy applied to one form field.
#[derive(Debug, Clone)]
pub enum FieldRule {
    /// Always valid; the field only receives success styling.
    Optional,
    /// The value must not be empty.
    Required,
    /// The value must be non-empty and at least this many characters long.
    MinLength(usize),
    /// The value must be empty or match the date format.
    Date(DateFormat),
}

impl FieldRule {
    /// Classifies a value. Values are not trimmed.
    pub fn check(&self, value: &str) -> bool {
        match self {
            Self::Optional => true,
            Self::Required => !value.is_empty(),
            Self::MinLength(min) => !value.is_empty() && value.chars().count() >= *min,
            Self::Date(format) => value.is_empty() || format.matches(value),
        }
    }
}
