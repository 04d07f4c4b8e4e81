//! HTTP client for the cloud-library search service.
//!
//! This crate provides:
//! - Client construction from a validated [`ClientConfig`]
//! - Request building with bearer token authentication and a user agent
//! - Library search with typed results
//!
//! ## Usage
//!
//! ```ignore
//! use library_client::{Client, ClientConfig, SearchArgs};
//!
//! let config = ClientConfig {
//!     base_url: "https://library.sylabs.io".to_string(),
//!     auth_token: Some(token),
//!     ..Default::default()
//! };
//!
//! let client = Client::new(config)?;
//! let args = SearchArgs::from([("value".to_string(), "alpine".to_string())]);
//! let results = client.search(&args).await?;
//! ```

mod auth;
mod client;
mod config;
mod error;
mod search;
mod types;

pub use auth::{AuthStrategy, BearerTokenCredentials};
pub use client::{default_http_client, Client};
pub use config::{ClientConfig, DEFAULT_BASE_URL};
pub use error::{
    ApiErrorDetail,
    ApiErrorResponse,
    ClientError,
    ConfigError,
    RequestError,
    SearchError,
};
pub use search::{encode_search_args, SearchArgs, MIN_SEARCH_VALUE_LEN, SEARCH_PATH};
pub use types::*;
