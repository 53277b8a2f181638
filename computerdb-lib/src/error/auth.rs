//! Authentication error types

/// Errors that can occur while logging in.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// Invalid username or password.
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// The auth endpoint answered with an unexpected status.
    #[error("Auth endpoint returned HTTP {status}: {message}")]
    Http { status: u16, message: String },

    /// Network error during authentication.
    #[error("Network error during auth: {0}")]
    Network(#[from] reqwest::Error),

    /// Failed to parse authentication response.
    #[error("Auth response parse error: {0}")]
    Parse(String),

    /// The configured auth endpoint is not a valid URL.
    #[error("Invalid auth endpoint: {0}")]
    InvalidEndpoint(String),
}
