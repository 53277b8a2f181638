//! Form validation for the computer create/edit form.
//!
//! Fields are described as data ([`FieldDescriptor`]) and validated against a
//! [`FormHost`], the UI layer that owns values and renders feedback. On submit
//! every field is validated, its success or error classes are toggled, and the
//! results are folded into a single [`Submission`] decision.
//!
//! # Example
//!
//! ```
//! use computerdb_lib::validation::{ComputerForm, DateFormat, FormConfig, MemoryForm, Submission};
//!
//! let config = FormConfig::default().with_date_format(DateFormat::new("MM/dd/yyyy").unwrap());
//! let form = ComputerForm::new(config);
//!
//! let mut host = MemoryForm::new()
//!     .with_field("computerName", "AB")
//!     .with_field("introduced", "")
//!     .with_field("discontinued", "13/13/2020")
//!     .with_field("companyId", "");
//!
//! let result = form.validate(&mut host);
//! assert_eq!(result.submission(), Submission::Cancel);
//! assert_eq!(result.invalid_fields().count(), 2);
//! ```

mod computer_form;
mod date_format;
mod feedback;
mod host;
mod messages;
mod result;
mod rule;
mod validator;

pub use computer_form::{
    COMPANY_FIELD, ComputerForm, DISCONTINUED_FIELD, INTRODUCED_FIELD, NAME_FIELD,
    NAME_MIN_LENGTH,
};
pub use date_format::{DateFormat, ISO_TEMPLATE};
pub use feedback::{ClassPair, ClassScope, FeedbackClasses, FieldState};
pub use host::{FormHost, MemoryField, MemoryForm};
pub use messages::{FormConfig, Messages, parse_properties};
pub use result::{FieldOutcome, Submission, ValidationResult};
pub use rule::FieldRule;
pub use validator::{FieldDescriptor, FormValidator, render_outcome};
