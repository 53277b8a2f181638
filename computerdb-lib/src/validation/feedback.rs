//! Visual feedback configuration.

/// Validity state of a form field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FieldState {
    /// The field has not been validated yet.
    #[default]
    Unset,
    /// The last validation passed.
    Valid,
    /// The last validation failed.
    Invalid,
}

impl FieldState {
    /// Maps a rule outcome to a state.
    pub fn from_valid(valid: bool) -> Self {
        if valid { Self::Valid } else { Self::Invalid }
    }

    /// Returns `true` for [`FieldState::Valid`].
    pub fn is_valid(self) -> bool {
        self == Self::Valid
    }
}

/// Where a class is applied relative to the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClassScope {
    /// The element wrapping the input (its parent).
    Group,
    /// The input itself.
    Control,
}

/// A pair of mutually exclusive classes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassPair {
    pub success: String,
    pub error: String,
}

impl ClassPair {
    pub fn new(success: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            success: success.into(),
            error: error.into(),
        }
    }

    /// Returns the class representing `state`, or `None` for [`FieldState::Unset`].
    pub fn for_state(&self, state: FieldState) -> Option<&str> {
        match state {
            FieldState::Valid => Some(&self.success),
            FieldState::Invalid => Some(&self.error),
            FieldState::Unset => None,
        }
    }

    /// Both classes, for clearing a previous state.
    pub fn both(&self) -> [&str; 2] {
        [&self.success, &self.error]
    }
}

/// Class names and the feedback target used to render validation state.
///
/// Defaults match the Bootstrap 4 alpha form classes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedbackClasses {
    /// Classes for the element wrapping the input.
    pub group: ClassPair,
    /// Classes for the input itself.
    pub control: ClassPair,
    /// Selector of the sibling node that receives the feedback text.
    pub feedback_target: String,
}

impl FeedbackClasses {
    /// Returns the pair for a scope.
    pub fn pair(&self, scope: ClassScope) -> &ClassPair {
        match scope {
            ClassScope::Group => &self.group,
            ClassScope::Control => &self.control,
        }
    }
}

impl Default for FeedbackClasses {
    fn default() -> Self {
        Self {
            group: ClassPair::new("has-success", "has-danger"),
            control: ClassPair::new("form-control-success", "form-control-danger"),
            feedback_target: ".form-control-error".to_string(),
        }
    }
}
