//! Configuration types for library client construction.

use std::fmt::Debug;

/// Base URL used when [`ClientConfig::base_url`] is empty.
///
/// Intentionally empty: every client must be pointed at a service explicitly.
pub const DEFAULT_BASE_URL: &str = "";

/// Configuration for library client construction.
///
/// [`ClientConfig::default()`] is the default configuration. It has no base
/// URL, so constructing a client from it fails unless [`DEFAULT_BASE_URL`]
/// is set.
#[derive(Clone, Default)]
pub struct ClientConfig {
    /// Base URL of the service.
    pub base_url: String,
    /// Bearer token to include in the `Authorization` header of each request.
    pub auth_token: Option<String>,
    /// User agent to include in each request.
    pub user_agent: Option<String>,
    /// HTTP client used to send requests.
    ///
    /// Defaults to a client built by [`crate::default_http_client`].
    pub http_client: Option<reqwest::Client>,
    /// Dispatcher that receives the client's log events.
    ///
    /// Defaults to the ambient `tracing` dispatcher of the calling task.
    pub logger: Option<tracing::Dispatch>,
}

impl Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("base_url", &self.base_url)
            .field("has_token", &self.auth_token.is_some())
            .field("user_agent", &self.user_agent)
            .field("http_client", &self.http_client.is_some())
            .field("logger", &self.logger.is_some())
            .finish()
    }
}
