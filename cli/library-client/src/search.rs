//! Library search.

use std::collections::HashMap;

use tracing::{debug, instrument};
use url::form_urlencoded;

use crate::client::Client;
use crate::error::SearchError;
use crate::types::{SearchResponse, SearchResults};

/// Key-value search specification.
///
/// `"value"` is required and matched against entities, collections,
/// containers and images. Other keys such as `"arch"` and `"signed"` are sent
/// as additional criteria.
pub type SearchArgs = HashMap<String, String>;

/// Path of the search endpoint, relative to the base URL.
pub const SEARCH_PATH: &str = "v1/search";

/// Minimum number of characters in the search `"value"`.
pub const MIN_SEARCH_VALUE_LEN: usize = 3;

impl Client {
    /// Search the library for entities, collections, containers and images.
    ///
    /// `args` must contain `"value"`, the term to search for. Additional
    /// keys narrow the search, e.g. `"arch"` (`"amd64"`, or a comma separated
    /// list like `"amd64,arm64"`) or `"signed"` (`"true"` or `"false"`).
    /// The service limits the search to images when either of those is
    /// given.
    ///
    /// ```ignore
    /// let args = SearchArgs::from([
    ///     ("value".to_string(), "alpine".to_string()),
    ///     ("arch".to_string(), "amd64".to_string()),
    /// ]);
    /// let results = client.search(&args).await?;
    /// ```
    pub async fn search(&self, args: &SearchArgs) -> Result<SearchResults, SearchError> {
        self.with_logger(self.search_inner(args)).await
    }

    #[instrument(skip_all, fields(value = args.get("value").map(String::as_str)))]
    async fn search_inner(&self, args: &SearchArgs) -> Result<SearchResults, SearchError> {
        validate_search_args(args)?;

        let raw_query = encode_search_args(args);
        debug!(%raw_query, "sending search request");

        let response: SearchResponse = self.api_get(SEARCH_PATH, &raw_query).await?;

        debug!(n_results = response.data.len(), "received search results");
        Ok(response.data)
    }
}

/// Check the search args before anything is sent.
///
/// The length check only catches obviously bad queries early; the service
/// applies its own validation.
fn validate_search_args(args: &SearchArgs) -> Result<(), SearchError> {
    let Some(value) = args.get("value") else {
        return Err(SearchError::ValueRequired);
    };

    if value.trim().chars().count() < MIN_SEARCH_VALUE_LEN {
        return Err(SearchError::BadRequest(value.clone()));
    }

    Ok(())
}

/// Encode search args as an `application/x-www-form-urlencoded` query.
///
/// The order of pairs in the output is unspecified.
pub fn encode_search_args(args: &SearchArgs) -> String {
    form_urlencoded::Serializer::new(String::new())
        .extend_pairs(args)
        .finish()
}
