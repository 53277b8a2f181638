//! Main ComputerDbClient

use std::sync::Arc;
use std::time::Duration;

use log::debug;
use reqwest::Client;
use reqwest::RequestBuilder;
use reqwest::header::ACCEPT;
use serde::de::DeserializeOwned;
use url::Url;

use crate::auth::CachedTokenProvider;
use crate::auth::PasswordFlow;
use crate::auth::TokenProvider;
use crate::error::ApiError;
use crate::error::Error;

/// Client for the Computer Database REST API.
///
/// This client is cheap to clone (uses `Arc` internally) and can be shared
/// across tasks. Every call issues exactly one request: there is no retry,
/// caching or deduplication.
///
/// # Example
///
/// ```ignore
/// use computerdb_lib::ComputerDbClient;
/// use computerdb_lib::api::PageRequest;
///
/// let client = ComputerDbClient::builder()
///     .endpoint("http://localhost:8080/ComputerDatabase/api/computers")
///     .build()?;
///
/// let page = client.list_computers(PageRequest::new(0, 10)).await?;
/// ```
#[derive(Clone)]
pub struct ComputerDbClient {
    inner: Arc<ComputerDbClientInner>,
}

struct ComputerDbClientInner {
    computers_url: Url,
    companies_url: Url,
    token_provider: Option<Arc<dyn TokenProvider>>,
    http_client: Client,
    timeout: Option<Duration>,
}

impl ComputerDbClient {
    /// Creates a new builder for constructing a client.
    pub fn builder() -> ComputerDbClientBuilder<Missing> {
        ComputerDbClientBuilder::new()
    }

    /// Returns the computers endpoint.
    pub fn computers_url(&self) -> &Url {
        &self.inner.computers_url
    }

    /// Returns the companies endpoint.
    pub fn companies_url(&self) -> &Url {
        &self.inner.companies_url
    }

    /// Returns `true` if requests carry a bearer token.
    pub fn is_authenticated(&self) -> bool {
        self.inner.token_provider.is_some()
    }

    pub(crate) fn http(&self) -> &Client {
        &self.inner.http_client
    }

    /// `{base}/{id}`
    pub(crate) fn item_url(base: &Url, id: i64) -> Result<Url, ApiError> {
        let mut url = base.clone();
        url.path_segments_mut()
            .map_err(|_| ApiError::InvalidUrl(base.to_string()))?
            .pop_if_empty()
            .push(&id.to_string());
        Ok(url)
    }

    /// Sends a request with the JSON accept header, bearer token and timeout applied.
    ///
    /// Non-success statuses become [`ApiError::Http`].
    pub(crate) async fn send(&self, request: RequestBuilder) -> Result<reqwest::Response, Error> {
        let mut request = request.header(ACCEPT, "application/json");

        if let Some(provider) = &self.inner.token_provider {
            let token = provider.get_token().await?;
            request = request.bearer_auth(&token.access_token);
        }

        if let Some(timeout) = self.inner.timeout {
            request = request.timeout(timeout);
        }

        let response = request.send().await.map_err(|e| match self.inner.timeout {
            Some(timeout) if e.is_timeout() => ApiError::Timeout(timeout),
            _ => ApiError::Network(e),
        })?;

        let status = response.status();
        debug!("{} {}", status.as_u16(), response.url());

        if status.is_success() {
            Ok(response)
        } else {
            let body = match response.text().await {
                Ok(body) => body,
                Err(e) => {
                    debug!("failed to read error body for {}: {}", status.as_u16(), e);
                    String::new()
                }
            };
            let message = if body.is_empty() {
                status.canonical_reason().unwrap_or("").to_string()
            } else {
                body
            };
            Err(Error::Api(ApiError::http(status.as_u16(), message)))
        }
    }

    /// Reads the whole body as text.
    pub(crate) async fn body(response: reqwest::Response) -> Result<String, Error> {
        Ok(response.text().await.map_err(ApiError::from)?)
    }

    /// Decodes a JSON body.
    pub(crate) async fn json<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, Error> {
        let body = Self::body(response).await?;
        serde_json::from_str(&body)
            .map_err(|e| Error::Api(ApiError::parse_with_body(e.to_string(), body)))
    }
}

impl std::fmt::Debug for ComputerDbClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ComputerDbClient")
            .field("computers_url", &self.inner.computers_url.as_str())
            .field("companies_url", &self.inner.companies_url.as_str())
            .field("authenticated", &self.is_authenticated())
            .field("timeout", &self.inner.timeout)
            .finish()
    }
}

// =============================================================================
// Typestate Builder
// =============================================================================

/// Marker type for missing required builder fields.
pub struct Missing;

/// Marker type for set builder fields.
pub struct Set<T>(T);

/// Builder for constructing a [`ComputerDbClient`].
///
/// Uses the typestate pattern to ensure the endpoint is set at compile time.
///
/// # Required Fields
///
/// - `endpoint` - The computers collection URL
///
/// # Example
///
/// ```ignore
/// let client = ComputerDbClient::builder()
///     .endpoint("http://localhost:8080/ComputerDatabase/api/computers")
///     .login("http://localhost:8080/ComputerDatabase/oauth/authorize", "qbisson", "secret")
///     .timeout(Duration::from_secs(30))
///     .build()?;
/// ```
pub struct ComputerDbClientBuilder<Endpoint> {
    endpoint: Endpoint,
    companies_endpoint: Option<String>,
    token_provider: Option<Arc<dyn TokenProvider>>,
    timeout: Option<Duration>,
    connect_timeout: Option<Duration>,
    http_client: Option<Client>,
}

impl ComputerDbClientBuilder<Missing> {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            endpoint: Missing,
            companies_endpoint: None,
            token_provider: None,
            timeout: None,
            connect_timeout: None,
            http_client: None,
        }
    }

    /// Sets the computers collection URL.
    ///
    /// # Example
    ///
    /// ```ignore
    /// .endpoint("http://localhost:8080/ComputerDatabase/api/computers")
    /// ```
    pub fn endpoint(self, url: impl Into<String>) -> ComputerDbClientBuilder<Set<String>> {
        ComputerDbClientBuilder {
            endpoint: Set(url.into()),
            companies_endpoint: self.companies_endpoint,
            token_provider: self.token_provider,
            timeout: self.timeout,
            connect_timeout: self.connect_timeout,
            http_client: self.http_client,
        }
    }
}

impl Default for ComputerDbClientBuilder<Missing> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> ComputerDbClientBuilder<E> {
    /// Sets the companies collection URL.
    ///
    /// Defaults to the `companies` sibling of the computers endpoint.
    pub fn companies_endpoint(mut self, url: impl Into<String>) -> Self {
        self.companies_endpoint = Some(url.into());
        self
    }

    /// Sets the token provider for authentication.
    pub fn token_provider<T: TokenProvider + 'static>(mut self, provider: T) -> Self {
        self.token_provider = Some(Arc::new(provider) as Arc<dyn TokenProvider>);
        self
    }

    /// Logs in with a username and password on first use and reuses the token.
    pub fn login(
        self,
        auth_endpoint: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        let flow = PasswordFlow::new(auth_endpoint, username, password);
        self.token_provider(CachedTokenProvider::new(flow))
    }

    /// Sets the request timeout. Requests have no timeout by default.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Sets the connection timeout.
    ///
    /// This is applied when building the HTTP client.
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = Some(timeout);
        self
    }

    /// Sets a custom HTTP client.
    ///
    /// If not set, a default client will be created.
    pub fn http_client(mut self, client: Client) -> Self {
        self.http_client = Some(client);
        self
    }
}

impl ComputerDbClientBuilder<Set<String>> {
    /// Builds the [`ComputerDbClient`].
    ///
    /// Fails if an endpoint is not an absolute URL or the HTTP client cannot
    /// be created.
    pub fn build(self) -> Result<ComputerDbClient, Error> {
        let computers_url = parse_url(&self.endpoint.0)?;
        let companies_url = match &self.companies_endpoint {
            Some(url) => parse_url(url)?,
            None => sibling(&computers_url, "companies")?,
        };

        let http_client = match self.http_client {
            Some(client) => client,
            None => {
                let mut builder = Client::builder();
                if let Some(timeout) = self.connect_timeout {
                    builder = builder.connect_timeout(timeout);
                }
                builder.build().map_err(ApiError::from)?
            }
        };

        Ok(ComputerDbClient {
            inner: Arc::new(ComputerDbClientInner {
                computers_url,
                companies_url,
                token_provider: self.token_provider,
                http_client,
                timeout: self.timeout,
            }),
        })
    }
}

fn parse_url(raw: &str) -> Result<Url, ApiError> {
    let url = Url::parse(raw).map_err(|e| ApiError::InvalidUrl(format!("{}: {}", raw, e)))?;
    if url.cannot_be_a_base() {
        return Err(ApiError::InvalidUrl(raw.to_string()));
    }
    Ok(url)
}

/// Replaces the last path segment of `url` with `name`.
fn sibling(url: &Url, name: &str) -> Result<Url, ApiError> {
    let mut sibling = url.clone();
    sibling.set_query(None);
    sibling
        .path_segments_mut()
        .map_err(|_| ApiError::InvalidUrl(url.to_string()))?
        .pop_if_empty()
        .pop()
        .push(name);
    Ok(sibling)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_companies_default_to_sibling() {
        let client = ComputerDbClient::builder()
            .endpoint("http://localhost:8080/ComputerDatabase/api/computers")
            .build()
            .unwrap();

        assert_eq!(
            client.companies_url().as_str(),
            "http://localhost:8080/ComputerDatabase/api/companies"
        );
        assert!(!client.is_authenticated());
    }

    #[test]
    fn test_trailing_slash_is_tolerated() {
        let client = ComputerDbClient::builder()
            .endpoint("http://localhost:8080/api/computers/")
            .build()
            .unwrap();

        assert_eq!(
            client.companies_url().as_str(),
            "http://localhost:8080/api/companies"
        );
        assert_eq!(
            ComputerDbClient::item_url(client.computers_url(), 42).unwrap().as_str(),
            "http://localhost:8080/api/computers/42"
        );
    }

    #[test]
    fn test_explicit_companies_endpoint() {
        let client = ComputerDbClient::builder()
            .endpoint("http://localhost:8080/api/computers")
            .companies_endpoint("http://other:9000/companies")
            .login("http://localhost:8080/oauth/authorize", "qbisson", "secret")
            .build()
            .unwrap();

        assert_eq!(client.companies_url().as_str(), "http://other:9000/companies");
        assert!(client.is_authenticated());
    }

    #[test]
    fn test_invalid_endpoint() {
        let err = ComputerDbClient::builder()
            .endpoint("localhost/api/computers")
            .build()
            .unwrap_err();
        assert!(matches!(err, Error::Api(ApiError::InvalidUrl(_))));
    }
}
