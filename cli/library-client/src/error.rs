//! Error handling for library client operations.

use reqwest::StatusCode;
use serde::Deserialize;
use thiserror::Error;

/// Errors raised while constructing a [`crate::Client`].
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing base URL")]
    MissingBaseUrl,
    #[error("invalid base URL")]
    InvalidBaseUrl(#[source] url::ParseError),
    #[error("unsupported protocol scheme '{0}'")]
    UnsupportedScheme(String),
    #[error("failed to build HTTP client")]
    HttpClient(#[source] reqwest::Error),
}

/// Errors raised while building an outbound request.
///
/// No network call has been attempted when one of these is returned.
#[derive(Debug, Error)]
pub enum RequestError {
    #[error("failed to resolve request URL")]
    Url(#[source] url::ParseError),
    #[error("invalid value for header '{name}'")]
    InvalidHeader {
        name: &'static str,
        #[source]
        source: reqwest::header::InvalidHeaderValue,
    },
    #[error("failed to build request")]
    Build(#[source] reqwest::Error),
}

/// Common error type for requests sent to the service.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error(transparent)]
    Request(#[from] RequestError),
    #[error("request failed")]
    Transport(#[source] reqwest::Error),
    #[error("not found")]
    NotFound,
    #[error("unauthorized")]
    Unauthorized,
    #[error("{}", fmt_api_error(.status, .message))]
    Api {
        status: StatusCode,
        message: Option<String>,
    },
    #[error("error decoding response")]
    Decode(#[source] serde_json::Error),
}

/// Errors returned by [`crate::Client::search`].
#[derive(Debug, Error)]
pub enum SearchError {
    #[error("search query ('value') must be specified")]
    ValueRequired,
    #[error("bad request: bad query '{0}'. You must search for at least 3 characters")]
    BadRequest(String),
    #[error(transparent)]
    Client(#[from] ClientError),
}

/// Error body returned by the service alongside a non-success status.
///
/// `{"error": {"code": 500, "message": "..."}}`
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ApiErrorResponse {
    pub error: ApiErrorDetail,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ApiErrorDetail {
    #[serde(default)]
    pub code: u16,
    #[serde(default)]
    pub message: String,
}

impl ClientError {
    /// Map a non-success response status and its raw body to an error.
    pub(crate) fn from_status(status: StatusCode, body: &[u8]) -> Self {
        match status {
            StatusCode::NOT_FOUND => ClientError::NotFound,
            StatusCode::UNAUTHORIZED => ClientError::Unauthorized,
            status => {
                // The body may be HTML or empty, in which case only the status
                // is reported.
                let message = serde_json::from_slice::<ApiErrorResponse>(body)
                    .ok()
                    .map(|resp| resp.error.message)
                    .filter(|message| !message.is_empty());
                ClientError::Api { status, message }
            },
        }
    }
}

fn fmt_api_error(status: &StatusCode, message: &Option<String>) -> String {
    match message {
        Some(message) => format!("API error: {status}: {message}"),
        None => format!("API error: {status}"),
    }
}
