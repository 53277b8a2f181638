//! Username/password login against the backend auth endpoint.

use async_trait::async_trait;
use chrono::Duration;
use chrono::Utc;
use log::debug;
use log::warn;
use serde::Deserialize;
use serde::Serialize;

use super::AccessToken;
use super::cached::AuthFlow;
use crate::error::AuthError;

/// Posts `{username, password}` to the auth endpoint and reads back `{token}`.
///
/// # Example
///
/// ```ignore
/// use computerdb_lib::auth::PasswordFlow;
///
/// let flow = PasswordFlow::new("http://localhost:8080/oauth/authorize", "qbisson", "secret");
/// let token = flow.authenticate().await?;
/// ```
#[derive(Clone)]
pub struct PasswordFlow {
    endpoint: String,
    username: String,
    password: String,
    http_client: reqwest::Client,
}

#[derive(Serialize)]
struct LoginRequest<'a> {
    username: &'a str,
    password: &'a str,
}

#[derive(Deserialize)]
struct TokenResponse {
    #[serde(alias = "access_token")]
    token: String,
    #[serde(default, deserialize_with = "deserialize_expires_in")]
    expires_in: Option<u64>,
}

impl TokenResponse {
    fn into_access_token(self) -> AccessToken {
        match self.expires_in {
            Some(secs) => {
                let expires_at = Utc::now() + Duration::seconds(secs as i64);
                AccessToken::with_expiry(self.token, expires_at)
            }
            None => AccessToken::new(self.token),
        }
    }
}

/// Deserializes `expires_in` which can be either a number or a string.
fn deserialize_expires_in<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de::Error;

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum StringOrNumber {
        String(String),
        Number(u64),
    }

    match Option::<StringOrNumber>::deserialize(deserializer)? {
        None => Ok(None),
        Some(StringOrNumber::Number(n)) => Ok(Some(n)),
        Some(StringOrNumber::String(s)) => s.parse().map(Some).map_err(D::Error::custom),
    }
}

impl PasswordFlow {
    /// Creates a new password flow.
    ///
    /// # Arguments
    ///
    /// * `endpoint` - The auth endpoint URL
    /// * `username` - The account name
    /// * `password` - The account password
    pub fn new(
        endpoint: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            endpoint: endpoint.into(),
            username: username.into(),
            password: password.into(),
            http_client: reqwest::Client::new(),
        }
    }

    /// Uses a custom HTTP client.
    pub fn http_client(mut self, client: reqwest::Client) -> Self {
        self.http_client = client;
        self
    }

    /// Returns the auth endpoint.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Returns the account name.
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Logs in and returns the issued token.
    pub async fn authenticate(&self) -> Result<AccessToken, AuthError> {
        let url = url::Url::parse(&self.endpoint)
            .map_err(|e| AuthError::InvalidEndpoint(format!("{}: {}", self.endpoint, e)))?;

        debug!("logging in as '{}' at {}", self.username, url);

        let response = self
            .http_client
            .post(url)
            .header(reqwest::header::ACCEPT, "application/json")
            .json(&LoginRequest {
                username: &self.username,
                password: &self.password,
            })
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            let body = response.text().await?;
            let token: TokenResponse = serde_json::from_str(&body)
                .map_err(|e| AuthError::Parse(format!("{}: {}", e, body)))?;
            Ok(token.into_access_token())
        } else if matches!(status.as_u16(), 401 | 403) {
            warn!("login rejected for '{}' ({})", self.username, status);
            Err(AuthError::InvalidCredentials)
        } else {
            let message = match response.text().await {
                Ok(body) => body,
                Err(e) => {
                    debug!("failed to read login error body: {}", e);
                    status.canonical_reason().unwrap_or("").to_string()
                }
            };
            warn!("login failed for '{}' ({})", self.username, status);
            Err(AuthError::Http {
                status: status.as_u16(),
                message,
            })
        }
    }
}

#[async_trait]
impl AuthFlow for PasswordFlow {
    async fn authenticate(&self) -> Result<AccessToken, AuthError> {
        PasswordFlow::authenticate(self).await
    }
}

impl std::fmt::Debug for PasswordFlow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PasswordFlow")
            .field("endpoint", &self.endpoint)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_response_shapes() {
        let plain: TokenResponse = serde_json::from_str(r#"{"token":"abc"}"#).unwrap();
        assert_eq!(plain.into_access_token(), AccessToken::new("abc"));

        let oauth: TokenResponse =
            serde_json::from_str(r#"{"access_token":"abc","expires_in":"3600"}"#).unwrap();
        let token = oauth.into_access_token();
        assert_eq!(token.access_token, "abc");
        assert!(token.expires_within(Duration::hours(2)));
        assert!(!token.is_expired());
    }

    #[test]
    fn test_debug_redacts_password() {
        let flow = PasswordFlow::new("http://localhost/auth", "qbisson", "hunter2");
        let debug = format!("{:?}", flow);
        assert!(debug.contains("qbisson"));
        assert!(!debug.contains("hunter2"));
    }

    #[tokio::test]
    async fn test_invalid_endpoint() {
        let flow = PasswordFlow::new("not a url", "qbisson", "secret");
        let err = flow.authenticate().await.unwrap_err();
        assert!(matches!(err, AuthError::InvalidEndpoint(_)));
    }
}
