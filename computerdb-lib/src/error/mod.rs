//! Error types

mod api;
mod auth;
mod validation;

pub use api::*;
pub use auth::*;
pub use validation::*;

/// Top-level error returned by client operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The backend API call failed.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// Authentication against the backend failed.
    #[error(transparent)]
    Auth(#[from] AuthError),

    /// A date format template could not be compiled.
    #[error(transparent)]
    DateFormat(#[from] DateFormatError),

    /// Form values could not be turned into a record.
    #[error("validation failed: {}", join_errors(.0))]
    Validation(Vec<FieldValidationError>),
}

impl Error {
    /// Returns the HTTP status code if the backend answered with an error status.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Api(err) => err.status_code(),
            Self::Auth(AuthError::Http { status, .. }) => Some(*status),
            _ => None,
        }
    }

    /// Returns the field errors if this is a validation failure.
    pub fn field_errors(&self) -> &[FieldValidationError] {
        match self {
            Self::Validation(errors) => errors,
            _ => &[],
        }
    }
}

fn join_errors(errors: &[FieldValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
