//! Authentication strategies for library requests.

use reqwest::header::{self, HeaderValue};
use reqwest::Request;
use tracing::debug;

use crate::error::RequestError;

/// Strategy pattern for adding credentials to an outbound request.
pub trait AuthStrategy {
    /// Modify `request` to carry this strategy's credentials.
    fn apply(&self, request: &mut Request) -> Result<(), RequestError>;
}

/// Bearer token authentication strategy
///
/// Sets `Authorization: Bearer <token>` on each request.
#[derive(Clone, PartialEq, Eq)]
pub struct BearerTokenCredentials {
    auth_token: String,
}

impl BearerTokenCredentials {
    pub fn new(auth_token: impl Into<String>) -> Self {
        Self {
            auth_token: auth_token.into(),
        }
    }
}

impl std::fmt::Debug for BearerTokenCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BearerTokenCredentials")
            .finish_non_exhaustive()
    }
}

impl AuthStrategy for BearerTokenCredentials {
    fn apply(&self, request: &mut Request) -> Result<(), RequestError> {
        let mut value = HeaderValue::from_str(&format!("Bearer {}", self.auth_token)).map_err(
            |source| RequestError::InvalidHeader {
                name: "authorization",
                source,
            },
        )?;
        value.set_sensitive(true);
        request.headers_mut().insert(header::AUTHORIZATION, value);
        debug!("added bearer token authorization header");
        Ok(())
    }
}
