/*
[INPUT]:  HTTP configuration (base URL, timeouts, credentials)
[OUTPUT]: Configured reqwest client ready for API calls
[POS]:    HTTP layer - core client implementation
[UPDATE]: When adding connection options or changing client behavior
*/

use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, Method, Response, Url};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

use crate::http::error::{BittrexError, Result};
use crate::http::signature::RequestSigner;

/// Base URL for the Bittrex v3 API
const DEFAULT_BASE_URL: &str = "https://api.bittrex.com/v3/";

/// HTTP client configuration
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub timeout: Duration,
    pub connect_timeout: Duration,
    /// Reuse the underlying connection across calls (default true)
    pub keep_alive: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(10),
            keep_alive: true,
        }
    }
}

/// Credentials for authenticated requests
#[derive(Clone)]
pub struct Credentials {
    pub api_key: String,
    pub api_secret: String,
}

// Keep the secret out of debug output.
impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("api_key", &self.api_key)
            .finish_non_exhaustive()
    }
}

/// Error body returned by the exchange on non-2xx responses
#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    code: String,
}

/// Main HTTP client for the Bittrex v3 API.
///
/// A client built without credentials serves public market-data endpoints
/// only; authenticated operations then fail with `MissingCredentials` before
/// any network I/O. The client holds no mutable state, so a single instance
/// can be shared freely across tasks.
#[derive(Debug)]
pub struct BittrexClient {
    http_client: Client,
    base_url: Url,
    api_key: Option<String>,
    signer: Option<RequestSigner>,
}

impl BittrexClient {
    /// Create a public-only client with default configuration
    pub fn new() -> Result<Self> {
        Self::with_config(ClientConfig::default())
    }

    /// Create an authenticated client with default configuration
    pub fn with_credentials(credentials: Credentials) -> Result<Self> {
        let mut client = Self::with_config(ClientConfig::default())?;
        client.set_credentials(credentials);
        Ok(client)
    }

    /// Create a client with custom configuration
    pub fn with_config(config: ClientConfig) -> Result<Self> {
        Self::with_config_and_base_url(config, DEFAULT_BASE_URL)
    }

    /// Create a client against a non-default base URL (used by tests)
    pub fn with_config_and_base_url(config: ClientConfig, base_url: &str) -> Result<Self> {
        let mut builder = Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout);
        if !config.keep_alive {
            builder = builder.pool_max_idle_per_host(0);
        }
        let http_client = builder.build()?;

        // A trailing slash makes Url::join treat the last segment as a directory.
        let normalized = if base_url.ends_with('/') {
            base_url.to_string()
        } else {
            format!("{base_url}/")
        };

        Ok(Self {
            http_client,
            base_url: Url::parse(&normalized)?,
            api_key: None,
            signer: None,
        })
    }

    /// Set credentials for authenticated requests
    pub fn set_credentials(&mut self, credentials: Credentials) {
        self.api_key = Some(credentials.api_key);
        self.signer = Some(RequestSigner::new(credentials.api_secret));
    }

    /// True when the client can call authenticated endpoints
    pub fn has_credentials(&self) -> bool {
        self.api_key.is_some()
    }

    /// Build the full request URL for an endpoint, dropping absent parameters
    fn endpoint_url(&self, path: &str, params: &[(&str, Option<String>)]) -> Result<Url> {
        let mut url = self.base_url.join(path)?;
        {
            let mut query = url.query_pairs_mut();
            for (name, value) in params {
                if let Some(value) = value {
                    query.append_pair(name, value);
                }
            }
        }
        // An empty `?` would still be part of the signed URI; strip it.
        if url.query() == Some("") {
            url.set_query(None);
        }
        Ok(url)
    }

    /// Issue an unauthenticated GET and decode the JSON payload
    pub(crate) async fn get_public<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, Option<String>)],
    ) -> Result<T> {
        let url = self.endpoint_url(path, params)?;
        debug!(%url, "public request");
        let response = self.http_client.get(url).send().await?;
        Self::decode(response).await
    }

    /// Issue a signed GET with no body
    pub(crate) async fn get_signed<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, Option<String>)],
    ) -> Result<T> {
        self.send_signed(Method::GET, path, params, None).await
    }

    /// Issue a signed request, attaching the Scheme-B authentication headers.
    ///
    /// The signature covers the timestamp, the exact URI being sent (query
    /// string included), the HTTP method, and the SHA-512 hash of the body,
    /// so tampering with any of them invalidates the request.
    pub(crate) async fn send_signed<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        params: &[(&str, Option<String>)],
        body: Option<String>,
    ) -> Result<T> {
        let (api_key, signer) = match (&self.api_key, &self.signer) {
            (Some(key), Some(signer)) => (key, signer),
            _ => return Err(BittrexError::MissingCredentials),
        };

        let url = self.endpoint_url(path, params)?;
        let body_text = body.unwrap_or_default();
        let timestamp = RequestSigner::timestamp();
        let content_hash = RequestSigner::content_hash(&body_text);
        let signature = signer.sign(timestamp, url.as_str(), method.as_str(), &content_hash);

        debug!(%url, %method, "signed request");
        let mut builder = self
            .http_client
            .request(method, url)
            .header("Api-Key", api_key)
            .header("Api-Timestamp", timestamp.to_string())
            .header("Api-Content-Hash", content_hash)
            .header("Api-Signature", signature);
        if !body_text.is_empty() {
            builder = builder
                .header(CONTENT_TYPE, "application/json")
                .body(body_text);
        }

        let response = builder.send().await?;
        Self::decode(response).await
    }

    /// Decode a response, converting exchange failures into `Exchange` errors
    async fn decode<T: DeserializeOwned>(response: Response) -> Result<T> {
        let status = response.status();
        if status.is_success() {
            return Ok(response.json().await?);
        }

        // Failures carry `{ "code": "<REASON>" }`; fall back to the HTTP
        // status text when the body is something else.
        let code = match response.json::<ApiErrorBody>().await {
            Ok(body) => body.code,
            Err(_) => status
                .canonical_reason()
                .unwrap_or("UNKNOWN_ERROR")
                .to_string(),
        };
        debug!(%status, %code, "exchange error");
        Err(BittrexError::Exchange { status, code })
    }
}

/// Reject empty required path parameters before any network I/O
pub(crate) fn require_param(name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        Err(BittrexError::invalid_argument(format!(
            "{name} is required"
        )))
    } else {
        Ok(())
    }
}

/// Render an enum parameter as its wire value for use in a query string
pub(crate) fn enum_param<T: serde::Serialize>(value: &T) -> Result<String> {
    Ok(serde_json::to_string(value)?
        .trim_matches('"')
        .to_string())
}
