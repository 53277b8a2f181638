//! Host abstraction for the UI layer that owns the form.

use std::collections::BTreeSet;

use super::ClassScope;
use super::FieldState;

/// A UI layer holding form fields.
///
/// The validator reads values and renders feedback exclusively through this
/// trait, so the same rules drive a browser binding, a terminal UI or a test
/// double.
pub trait FormHost {
    /// Current value of a field, or `None` if the host has no such field.
    fn value(&self, field_id: &str) -> Option<String>;

    /// Removes classes from a field element.
    fn remove_classes(&mut self, field_id: &str, scope: ClassScope, classes: &[&str]);

    /// Adds a class to a field element.
    fn add_class(&mut self, field_id: &str, scope: ClassScope, class: &str);

    /// Replaces the text of the feedback node matched by `target` next to the field.
    fn set_feedback_text(&mut self, field_id: &str, target: &str, text: &str);

    /// Notifies the host of the new validity state.
    fn set_state(&mut self, _field_id: &str, _state: FieldState) {}
}

/// A form field held in memory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemoryField {
    pub id: String,
    pub value: String,
    pub state: FieldState,
    pub group_classes: BTreeSet<String>,
    pub control_classes: BTreeSet<String>,
    pub feedback_text: String,
}

impl MemoryField {
    fn new(id: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            value: value.into(),
            state: FieldState::Unset,
            group_classes: BTreeSet::new(),
            control_classes: BTreeSet::new(),
            feedback_text: String::new(),
        }
    }

    fn classes_mut(&mut self, scope: ClassScope) -> &mut BTreeSet<String> {
        match scope {
            ClassScope::Group => &mut self.group_classes,
            ClassScope::Control => &mut self.control_classes,
        }
    }

    /// Returns `true` if the element in `scope` carries `class`.
    pub fn has_class(&self, scope: ClassScope, class: &str) -> bool {
        match scope {
            ClassScope::Group => self.group_classes.contains(class),
            ClassScope::Control => self.control_classes.contains(class),
        }
    }
}

/// An in-memory [`FormHost`], used by the CLI and in tests.
///
/// Fields keep their insertion order. Feedback for unknown fields is ignored,
/// the same way a selector that matches nothing is a no-op.
#[derive(Debug, Clone, Default)]
pub struct MemoryForm {
    fields: Vec<MemoryField>,
}

impl MemoryForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a field, or replaces the value of an existing one.
    pub fn with_field(mut self, id: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_value(id, value);
        self
    }

    /// Sets the value of a field, creating it if needed.
    pub fn set_value(&mut self, id: impl Into<String>, value: impl Into<String>) {
        let id = id.into();
        match self.fields.iter_mut().find(|f| f.id == id) {
            Some(field) => field.value = value.into(),
            None => self.fields.push(MemoryField::new(id, value)),
        }
    }

    /// Looks up a field.
    pub fn field(&self, id: &str) -> Option<&MemoryField> {
        self.fields.iter().find(|f| f.id == id)
    }

    /// All fields in insertion order.
    pub fn fields(&self) -> &[MemoryField] {
        &self.fields
    }

    fn field_mut(&mut self, id: &str) -> Option<&mut MemoryField> {
        self.fields.iter_mut().find(|f| f.id == id)
    }
}

impl FormHost for MemoryForm {
    fn value(&self, field_id: &str) -> Option<String> {
        self.field(field_id).map(|f| f.value.clone())
    }

    fn remove_classes(&mut self, field_id: &str, scope: ClassScope, classes: &[&str]) {
        if let Some(field) = self.field_mut(field_id) {
            let set = field.classes_mut(scope);
            for class in classes {
                set.remove(*class);
            }
        }
    }

    fn add_class(&mut self, field_id: &str, scope: ClassScope, class: &str) {
        if let Some(field) = self.field_mut(field_id) {
            field.classes_mut(scope).insert(class.to_string());
        }
    }

    fn set_feedback_text(&mut self, field_id: &str, _target: &str, text: &str) {
        if let Some(field) = self.field_mut(field_id) {
            field.feedback_text = text.to_string();
        }
    }

    fn set_state(&mut self, field_id: &str, state: FieldState) {
        if let Some(field) = self.field_mut(field_id) {
            field.state = state;
        }
    }
}
