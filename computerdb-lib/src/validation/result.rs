//! Per-field outcomes and the aggregate submission decision.

use crate::error::FieldValidationError;

use super::FieldState;

/// Outcome of validating a single field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldOutcome {
    /// Field identifier.
    pub field_id: String,
    /// Validity after the rule ran.
    pub state: FieldState,
    /// Failure message; `None` when the field is valid.
    pub message: Option<String>,
}

impl FieldOutcome {
    pub fn valid(field_id: impl Into<String>) -> Self {
        Self {
            field_id: field_id.into(),
            state: FieldState::Valid,
            message: None,
        }
    }

    pub fn invalid(field_id: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field_id: field_id.into(),
            state: FieldState::Invalid,
            message: Some(message.into()),
        }
    }

    pub fn is_valid(&self) -> bool {
        self.state.is_valid()
    }

    /// Text shown next to the field: the message on failure, empty on success.
    pub fn feedback_text(&self) -> &str {
        self.message.as_deref().unwrap_or("")
    }
}

/// Decision returned to the submit handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Submission {
    /// Let the default form action proceed.
    Allow,
    /// Cancel the default form action.
    Cancel,
}

impl From<bool> for Submission {
    fn from(valid: bool) -> Self {
        if valid { Self::Allow } else { Self::Cancel }
    }
}

/// Result of validating every field of a form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationResult {
    outcomes: Vec<FieldOutcome>,
}

impl ValidationResult {
    pub fn new(outcomes: Vec<FieldOutcome>) -> Self {
        Self { outcomes }
    }

    /// Aggregate gate: `true` iff every field is valid.
    pub fn is_valid(&self) -> bool {
        self.outcomes.iter().all(FieldOutcome::is_valid)
    }

    pub fn is_invalid(&self) -> bool {
        !self.is_valid()
    }

    pub fn submission(&self) -> Submission {
        Submission::from(self.is_valid())
    }

    /// Per-field outcomes in validation order.
    pub fn outcomes(&self) -> &[FieldOutcome] {
        &self.outcomes
    }

    pub fn outcome(&self, field_id: &str) -> Option<&FieldOutcome> {
        self.outcomes.iter().find(|o| o.field_id == field_id)
    }

    /// Outcomes of the fields that failed.
    pub fn invalid_fields(&self) -> impl Iterator<Item = &FieldOutcome> {
        self.outcomes.iter().filter(|o| !o.is_valid())
    }

    /// The first failing field, if any.
    pub fn first_error(&self) -> Option<&FieldOutcome> {
        self.invalid_fields().next()
    }

    /// Failing fields as error values.
    pub fn errors(&self) -> Vec<FieldValidationError> {
        self.invalid_fields()
            .map(|o| FieldValidationError::new(&o.field_id, o.feedback_text()))
            .collect()
    }

    /// Records a failure found after the rules ran, replacing the field's outcome.
    pub(crate) fn reject(&mut self, field_id: &str, message: &str) {
        match self.outcomes.iter_mut().find(|o| o.field_id == field_id) {
            Some(outcome) => *outcome = FieldOutcome::invalid(field_id, message),
            None => self.outcomes.push(FieldOutcome::invalid(field_id, message)),
        }
    }
}
