//! Library client construction and request plumbing.

use std::fmt::Debug;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use reqwest::header::{self, HeaderValue};
use reqwest::{Body, Method, Request};
use serde::de::DeserializeOwned;
use tracing::debug;
use tracing::instrument::WithSubscriber;
use url::Url;

use crate::auth::{AuthStrategy, BearerTokenCredentials};
use crate::config::{ClientConfig, DEFAULT_BASE_URL};
use crate::error::{ClientError, ConfigError, RequestError};

/// A client for the cloud-library service.
///
/// All state is fixed at construction, so a client can be cloned and shared
/// between tasks freely.
#[derive(Clone)]
pub struct Client {
    base_url: Url,
    credentials: Option<Arc<dyn AuthStrategy + Send + Sync>>,
    user_agent: Option<String>,
    http_client: reqwest::Client,
    logger: Option<tracing::Dispatch>,
}

impl Debug for Client {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client")
            .field("base_url", &self.base_url.as_str())
            .field("has_credentials", &self.credentials.is_some())
            .field("user_agent", &self.user_agent)
            .finish_non_exhaustive()
    }
}

impl Client {
    /// Create a new library client from configuration.
    ///
    /// The base URL is normalized to end with `/` so that resolving a
    /// relative path against it keeps the final path segment, i.e.
    /// `https://example.com/api` + `v1/search` is
    /// `https://example.com/api/v1/search`.
    pub fn new(config: ClientConfig) -> Result<Self, ConfigError> {
        let ClientConfig {
            base_url,
            auth_token,
            user_agent,
            http_client,
            logger,
        } = config;

        let mut base_url = if base_url.is_empty() {
            DEFAULT_BASE_URL.to_string()
        } else {
            base_url
        };
        if base_url.is_empty() {
            return Err(ConfigError::MissingBaseUrl);
        }
        if !base_url.ends_with('/') {
            base_url.push('/');
        }

        let base_url = Url::parse(&base_url).map_err(ConfigError::InvalidBaseUrl)?;
        if !matches!(base_url.scheme(), "http" | "https") {
            return Err(ConfigError::UnsupportedScheme(base_url.scheme().to_string()));
        }

        let http_client = match http_client {
            Some(http_client) => http_client,
            None => default_http_client().map_err(ConfigError::HttpClient)?,
        };

        let credentials = auth_token
            .filter(|token| !token.is_empty())
            .map(|token| {
                Arc::new(BearerTokenCredentials::new(token)) as Arc<dyn AuthStrategy + Send + Sync>
            });
        let user_agent = user_agent.filter(|agent| !agent.is_empty());

        let client = Self {
            base_url,
            credentials,
            user_agent,
            http_client,
            logger,
        };

        client.in_logger_scope(|| {
            debug!(
                base_url = %client.base_url,
                has_token = client.credentials.is_some(),
                user_agent = client.user_agent.as_deref(),
                "created library client"
            )
        });

        Ok(client)
    }

    /// Create a client from [`ClientConfig::default()`].
    pub fn from_default_config() -> Result<Self, ConfigError> {
        Self::new(ClientConfig::default())
    }

    /// The normalized base URL, always ending with `/`.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Build a request for `path` and `raw_query` relative to the base URL.
    ///
    /// `path` is only ever a path: a relative path is appended to the base
    /// path, an absolute path replaces it, and the scheme and host of the
    /// base URL are always kept. `raw_query` must already be encoded.
    /// Credentials and the user agent are attached when configured. No
    /// network I/O is performed.
    pub fn build_request(
        &self,
        method: Method,
        path: &str,
        raw_query: &str,
        body: Option<Body>,
    ) -> Result<Request, RequestError> {
        self.in_logger_scope(|| {
            let url = self.resolve(path, raw_query)?;

            let mut builder = self.http_client.request(method, url);
            if let Some(body) = body {
                builder = builder.body(body);
            }
            let mut request = builder.build().map_err(RequestError::Build)?;

            if let Some(credentials) = &self.credentials {
                credentials.apply(&mut request)?;
            }

            if let Some(user_agent) = &self.user_agent {
                let value = HeaderValue::from_str(user_agent).map_err(|source| {
                    RequestError::InvalidHeader {
                        name: "user-agent",
                        source,
                    }
                })?;
                request.headers_mut().insert(header::USER_AGENT, value);
            }

            Ok(request)
        })
    }

    /// Resolve `path` against the base URL, keeping its scheme and host.
    fn resolve(&self, path: &str, raw_query: &str) -> Result<Url, RequestError> {
        // `path` is a path, never a query, fragment or authority.
        // Backslashes count as separators in http(s) URLs.
        let path = path
            .replace('\\', "%5C")
            .replace('?', "%3F")
            .replace('#', "%23");
        // A leading `//` would start a network-path reference, and a relative
        // path like `a:b` would parse as a scheme.
        let mut reference = match path.strip_prefix('/') {
            Some(absolute) => format!("/{}", absolute.trim_start_matches('/')),
            None => format!("./{path}"),
        };
        if !raw_query.is_empty() {
            reference.push('?');
            reference.push_str(raw_query);
        }
        self.base_url.join(&reference).map_err(RequestError::Url)
    }

    /// Send a `GET` request and decode a JSON response body.
    pub(crate) async fn api_get<T: DeserializeOwned>(
        &self,
        path: &str,
        raw_query: &str,
    ) -> Result<T, ClientError> {
        let request = self.build_request(Method::GET, path, raw_query, None)?;
        debug!(url = %request.url(), "sending GET request");

        let response = self
            .http_client
            .execute(request)
            .await
            .map_err(ClientError::Transport)?;
        let status = response.status();
        let body = response.bytes().await.map_err(ClientError::Transport)?;

        if !status.is_success() {
            debug!(%status, "received error response");
            return Err(ClientError::from_status(status, &body));
        }

        debug!(%status, len = body.len(), "received response");
        serde_json::from_slice(&body).map_err(ClientError::Decode)
    }

    /// Run `fut` with the configured logger as its default dispatcher.
    pub(crate) async fn with_logger<F: Future>(&self, fut: F) -> F::Output {
        match &self.logger {
            Some(logger) => fut.with_subscriber(logger.clone()).await,
            None => fut.await,
        }
    }

    fn in_logger_scope<T>(&self, f: impl FnOnce() -> T) -> T {
        match &self.logger {
            Some(logger) => tracing::dispatcher::with_default(logger, f),
            None => f(),
        }
    }
}

/// Build the HTTP client used when none is configured.
pub fn default_http_client() -> Result<reqwest::Client, reqwest::Error> {
    reqwest::Client::builder()
        .connect_timeout(Duration::from_secs(15))
        .build()
}
