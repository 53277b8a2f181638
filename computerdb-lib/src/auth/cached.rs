//! Token caching on top of a login flow.

use std::time::Duration;

use async_trait::async_trait;
use log::debug;
use tokio::sync::RwLock;

use super::AccessToken;
use super::TokenProvider;
use crate::error::AuthError;

/// A login flow that can produce fresh tokens.
#[async_trait]
pub trait AuthFlow: Send + Sync {
    /// Logs in and obtains a new access token.
    async fn authenticate(&self) -> Result<AccessToken, AuthError>;
}

/// A token provider that logs in once and reuses the token.
///
/// A new login happens when no token is cached, when the cached token expires
/// within the buffer, or after [`clear_token`](Self::clear_token).
///
/// # Example
///
/// ```ignore
/// use computerdb_lib::auth::{CachedTokenProvider, PasswordFlow};
/// use computerdb_lib::ComputerDbClient;
///
/// let flow = PasswordFlow::new(auth_url, "qbisson", "secret");
/// let client = ComputerDbClient::builder()
///     .endpoint("http://localhost:8080/ComputerDatabase/api/computers")
///     .token_provider(CachedTokenProvider::new(flow))
///     .build()?;
/// ```
pub struct CachedTokenProvider<F> {
    flow: F,
    token: RwLock<Option<AccessToken>>,
    /// Log in again this long before actual expiry
    expiry_buffer: Duration,
}

impl<F: AuthFlow> CachedTokenProvider<F> {
    /// Creates a provider with a 30 second expiry buffer.
    pub fn new(flow: F) -> Self {
        Self::with_expiry_buffer(flow, Duration::from_secs(30))
    }

    /// Creates a provider with a custom expiry buffer.
    pub fn with_expiry_buffer(flow: F, expiry_buffer: Duration) -> Self {
        Self {
            flow,
            token: RwLock::new(None),
            expiry_buffer,
        }
    }

    /// Returns the wrapped flow.
    pub fn flow(&self) -> &F {
        &self.flow
    }

    /// Clears the cached token, forcing a new login on next request.
    pub async fn clear_token(&self) {
        let mut token = self.token.write().await;
        *token = None;
    }

    fn is_usable(&self, token: &AccessToken) -> bool {
        let buffer = chrono::Duration::from_std(self.expiry_buffer).unwrap_or(chrono::Duration::zero());
        !token.expires_within(buffer)
    }
}

#[async_trait]
impl<F: AuthFlow> TokenProvider for CachedTokenProvider<F> {
    async fn get_token(&self) -> Result<AccessToken, AuthError> {
        {
            let token_guard = self.token.read().await;
            if let Some(ref token) = *token_guard
                && self.is_usable(token)
            {
                return Ok(token.clone());
            }
        }

        let mut token_guard = self.token.write().await;

        // Another task may have logged in while we waited for the write lock
        if let Some(ref token) = *token_guard
            && self.is_usable(token)
        {
            return Ok(token.clone());
        }

        debug!("no usable cached token, logging in");
        let new_token = self.flow.authenticate().await?;
        *token_guard = Some(new_token.clone());
        Ok(new_token)
    }
}
