//! Field validator and form submission gate.

use log::debug;

use super::ClassScope;
use super::FeedbackClasses;
use super::FieldOutcome;
use super::FieldRule;
use super::FieldState;
use super::FormHost;
use super::ValidationResult;

/// Describes one form field: where it lives, which rule applies, what to say on failure.
#[derive(Debug, Clone)]
pub struct FieldDescriptor {
    /// Field identifier in the host.
    pub id: String,
    /// Rule applied on submit.
    pub rule: FieldRule,
    /// Message shown when the rule fails.
    pub message: String,
    /// Feedback node selector; `None` uses [`FeedbackClasses::feedback_target`].
    pub feedback_target: Option<String>,
}

impl FieldDescriptor {
    pub fn new(id: impl Into<String>, rule: FieldRule, message: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            rule,
            message: message.into(),
            feedback_target: None,
        }
    }

    /// Overrides the feedback node selector for this field.
    pub fn feedback_target(mut self, target: impl Into<String>) -> Self {
        self.feedback_target = Some(target.into());
        self
    }

    /// Classifies a value without touching any host.
    pub fn classify(&self, value: &str) -> FieldOutcome {
        if self.rule.check(value) {
            FieldOutcome::valid(&self.id)
        } else {
            FieldOutcome::invalid(&self.id, &self.message)
        }
    }
}

/// Renders an outcome on the host.
///
/// Both classes of each pair are removed before the one matching the new
/// state is added, so success and error never coexist.
pub fn render_outcome<H: FormHost + ?Sized>(
    host: &mut H,
    classes: &FeedbackClasses,
    target: &str,
    outcome: &FieldOutcome,
) {
    for scope in [ClassScope::Group, ClassScope::Control] {
        let pair = classes.pair(scope);
        host.remove_classes(&outcome.field_id, scope, &pair.both());
        if let Some(class) = pair.for_state(outcome.state) {
            host.add_class(&outcome.field_id, scope, class);
        }
    }
    host.set_feedback_text(&outcome.field_id, target, outcome.feedback_text());
    host.set_state(&outcome.field_id, outcome.state);
}

/// Validates a set of fields on submit.
///
/// # Example
///
/// ```
/// use computerdb_lib::validation::{FeedbackClasses, FieldRule, FormValidator, MemoryForm};
///
/// let validator = FormValidator::new(FeedbackClasses::default())
///     .field("computerName", FieldRule::MinLength(3), "Name is too short")
///     .field("companyId", FieldRule::Optional, "");
///
/// let mut form = MemoryForm::new()
///     .with_field("computerName", "AB")
///     .with_field("companyId", "");
///
/// let result = validator.validate(&mut form);
/// assert!(result.is_invalid());
/// assert_eq!(form.field("computerName").unwrap().feedback_text, "Name is too short");
/// ```
#[derive(Debug, Clone, Default)]
pub struct FormValidator {
    classes: FeedbackClasses,
    fields: Vec<FieldDescriptor>,
}

impl FormValidator {
    /// Creates a validator with no fields.
    pub fn new(classes: FeedbackClasses) -> Self {
        Self {
            classes,
            fields: Vec::new(),
        }
    }

    /// Adds a field.
    pub fn field(self, id: impl Into<String>, rule: FieldRule, message: impl Into<String>) -> Self {
        self.descriptor(FieldDescriptor::new(id, rule, message))
    }

    /// Adds a prebuilt descriptor.
    pub fn descriptor(mut self, descriptor: FieldDescriptor) -> Self {
        self.fields.push(descriptor);
        self
    }

    pub fn classes(&self) -> &FeedbackClasses {
        &self.classes
    }

    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    /// Looks up a descriptor by field id.
    pub fn get(&self, id: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|f| f.id == id)
    }

    /// Feedback node selector used for a field.
    pub fn target_for<'a>(&'a self, descriptor: &'a FieldDescriptor) -> &'a str {
        descriptor
            .feedback_target
            .as_deref()
            .unwrap_or(&self.classes.feedback_target)
    }

    /// Validates one field and renders its feedback.
    ///
    /// A field missing from the host is validated as an empty value.
    pub fn validate_field<H: FormHost + ?Sized>(
        &self,
        host: &mut H,
        descriptor: &FieldDescriptor,
    ) -> FieldOutcome {
        let value = host.value(&descriptor.id).unwrap_or_default();
        let outcome = descriptor.classify(&value);
        debug!("field '{}' validated as {:?}", descriptor.id, outcome.state);
        render_outcome(host, &self.classes, self.target_for(descriptor), &outcome);
        outcome
    }

    /// Runs every field's rule and aggregates the results.
    ///
    /// Fields are validated unconditionally, in order, so each one gets
    /// fresh feedback even after an earlier failure.
    pub fn validate<H: FormHost + ?Sized>(&self, host: &mut H) -> ValidationResult {
        let outcomes = self
            .fields
            .iter()
            .map(|descriptor| self.validate_field(host, descriptor))
            .collect();
        ValidationResult::new(outcomes)
    }

    /// Renders a failure discovered after the rules ran.
    pub fn reject<H: FormHost + ?Sized>(
        &self,
        host: &mut H,
        result: &mut ValidationResult,
        field_id: &str,
        message: &str,
    ) {
        let target = self
            .get(field_id)
            .map(|d| self.target_for(d))
            .unwrap_or(self.classes.feedback_target.as_str());
        let outcome = FieldOutcome::invalid(field_id, message);
        render_outcome(host, &self.classes, target, &outcome);
        result.reject(field_id, message);
    }

    /// Clears the feedback of every field.
    pub fn reset<H: FormHost + ?Sized>(&self, host: &mut H) {
        for descriptor in &self.fields {
            let outcome = FieldOutcome {
                field_id: descriptor.id.clone(),
                state: FieldState::Unset,
                message: None,
            };
            render_outcome(host, &self.classes, self.target_for(descriptor), &outcome);
        }
    }
}
