//! Authentication

mod cached;
mod password;
mod token;

pub use cached::AuthFlow;
pub use cached::CachedTokenProvider;
pub use password::PasswordFlow;
pub use token::AccessToken;
pub use token::StaticTokenProvider;
pub use token::TokenProvider;
