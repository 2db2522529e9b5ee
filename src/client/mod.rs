//! Warpgate admin API client
//!
//! Typed client for the Warpgate access gateway's REST admin API, combining
//! authentication, request handling, and error normalization.
//!
//! # Module Structure
//!
//! - [`roles`] - Role CRUD and role assignment to users and targets
//! - [`users`] - User CRUD and per-user credential management
//! - [`targets`] - Target CRUD with the tagged target-options union
//! - [`tickets`] - Access ticket issuance and revocation
//!
//! # Example
//!
//! ```ignore
//! use warpgate_provider::ProviderConfig;
//!
//! async fn example() -> warpgate_provider::Result<()> {
//!     let client = ProviderConfig::from_env().client()?;
//!     let roles = client.list_roles(None).await?;
//!     Ok(())
//! }
//! ```

pub mod roles;
pub mod targets;
pub mod tickets;
pub mod users;

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, CONTENT_TYPE};
use reqwest::{Method, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use url::Url;

use crate::config::ProviderConfig;
use crate::error::{Error, Result};

/// Header carrying the admin API token.
pub const TOKEN_HEADER: &str = "X-Warpgate-Token";

/// Default per-request timeout.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Maximum length of response body to log (to avoid logging sensitive data)
const MAX_LOG_BODY_LENGTH: usize = 200;

/// Sanitize response body for logging
/// Truncates long responses and strips non-printable characters
fn sanitize_for_log(body: &str) -> String {
    let truncated = if body.len() > MAX_LOG_BODY_LENGTH {
        // back off to a char boundary so multi-byte UTF-8 never splits
        let mut end = MAX_LOG_BODY_LENGTH;
        while !body.is_char_boundary(end) {
            end -= 1;
        }
        format!(
            "{}... [truncated, {} bytes total]",
            &body[..end],
            body.len()
        )
    } else {
        body.to_string()
    };

    truncated.replace(|c: char| !c.is_ascii_graphic() && c != ' ', "")
}

/// Warpgate admin API client
#[derive(Debug, Clone)]
pub struct Client {
    base_url: Url,
    token: Option<String>,
    http: reqwest::Client,
}

impl Client {
    /// Create a new client from the provider configuration.
    ///
    /// Validates the host URL and sets up an HTTP client with the configured
    /// timeout and TLS settings.
    pub fn new(config: &ProviderConfig) -> Result<Self> {
        let base_url = Url::parse(&config.api_base()?)?;

        let http = reqwest::Client::builder()
            .user_agent(concat!("warpgate-provider/", env!("CARGO_PKG_VERSION")))
            .timeout(config.timeout.unwrap_or(DEFAULT_TIMEOUT))
            .danger_accept_invalid_certs(config.insecure_skip_verify)
            .default_headers(Self::default_headers())
            .build()?;

        Ok(Self {
            base_url,
            token: config.token.clone().filter(|t| !t.is_empty()),
            http,
        })
    }

    fn default_headers() -> HeaderMap {
        let mut headers = HeaderMap::new();
        let json = HeaderValue::from_static("application/json; charset=utf-8");
        headers.insert(CONTENT_TYPE, json.clone());
        headers.insert(ACCEPT, json);
        headers
    }

    /// Resolve an API path against the base URL.
    ///
    /// Plain concatenation rather than RFC 3986 reference resolution, so the
    /// base URL's path prefix (the admin API path) is always preserved. Any
    /// query string in `path` is carried over.
    fn endpoint(&self, path: &str) -> Url {
        let (path, query) = match path.split_once('?') {
            Some((p, q)) => (p, Some(q)),
            None => (path, None),
        };

        let mut url = self.base_url.clone();
        let full = format!(
            "{}/{}",
            self.base_url.path().trim_end_matches('/'),
            path.trim_start_matches('/')
        );
        url.set_path(&full);
        url.set_query(query);
        url
    }

    /// Perform an HTTP request against the admin API.
    ///
    /// Serializes `body` as JSON when present and attaches the token header
    /// when a token is configured. Transport failures surface immediately;
    /// there are no retries.
    pub(crate) async fn request<B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<Response> {
        let url = self.endpoint(path);
        tracing::debug!("{} {}", method, url);

        let mut request = self.http.request(method, url);

        if let Some(token) = &self.token {
            request = request.header(TOKEN_HEADER, token);
        }

        if let Some(body) = body {
            request = request.json(body);
        }

        Ok(request.send().await?)
    }

    /// Process an API response, decoding the JSON body into `T`.
    ///
    /// A status >= 400 becomes [`Error::Api`] carrying the verbatim body
    /// text; a decode failure is terminal for the call.
    pub(crate) async fn handle<T: DeserializeOwned>(response: Response) -> Result<T> {
        let status = response.status();
        let body = response.text().await?;

        if status.as_u16() >= 400 {
            tracing::error!("API error: {} - {}", status, sanitize_for_log(&body));
            return Err(Error::Api {
                status: status.as_u16(),
                body,
            });
        }

        Ok(serde_json::from_str(&body)?)
    }

    /// Process an API response where no body is expected.
    pub(crate) async fn handle_empty(response: Response) -> Result<()> {
        let status = response.status();

        if status.as_u16() >= 400 {
            let body = response.text().await.unwrap_or_default();
            tracing::error!("API error: {} - {}", status, sanitize_for_log(&body));
            return Err(Error::Api {
                status: status.as_u16(),
                body,
            });
        }

        Ok(())
    }

    /// GET a single entity by path, mapping 404 to `None`.
    pub(crate) async fn get_optional<T: DeserializeOwned>(
        &self,
        path: &str,
    ) -> Result<Option<T>> {
        let response = self.request::<()>(Method::GET, path, None).await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }

        Ok(Some(Self::handle(response).await?))
    }

    /// GET a collection, optionally filtered by a search term.
    pub(crate) async fn list<T: DeserializeOwned>(
        &self,
        path: &str,
        search: Option<&str>,
    ) -> Result<Vec<T>> {
        let path = match search.filter(|s| !s.is_empty()) {
            Some(search) => format!("{}?search={}", path, urlencoding::encode(search)),
            None => path.to_string(),
        };

        let response = self.request::<()>(Method::GET, &path, None).await?;
        Self::handle(response).await
    }
}
