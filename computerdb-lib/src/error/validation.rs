//! Validation error types

/// Error information for a specific field that failed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldValidationError {
    /// The field that failed validation.
    pub field: String,
    /// Human-readable validation error message.
    pub message: String,
    /// Optional message key, e.g. `computers.constraints.discontinued.invalid`.
    pub code: Option<String>,
}

impl FieldValidationError {
    /// Creates a new field validation error.
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
            code: None,
        }
    }

    /// Creates a new field validation error with a message key.
    pub fn with_code(field: impl Into<String>, message: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
            code: Some(code.into()),
        }
    }
}

impl std::fmt::Display for FieldValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(code) = &self.code {
            write!(f, "{}: {} ({})", self.field, self.message, code)
        } else {
            write!(f, "{}: {}", self.field, self.message)
        }
    }
}

/// Errors raised while compiling a localized date format template.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DateFormatError {
    /// The template does not contain one of `dd`, `MM` or `yyyy`.
    #[error("date format '{template}' is missing the '{token}' token")]
    MissingToken { template: String, token: &'static str },

    /// The template contains the same token more than once.
    #[error("date format '{template}' repeats the '{token}' token")]
    DuplicateToken { template: String, token: &'static str },

    /// A run of `d`, `M` or `y` letters that is not exactly one token.
    #[error("date format '{template}' has a malformed token '{run}'")]
    MalformedToken { template: String, run: String },

    /// The generated pattern was rejected by the regex engine.
    #[error("date format '{template}' produced an invalid pattern: {message}")]
    Pattern { template: String, message: String },
}
