use std::path::Path;

use anyhow::Result;
use config::{Config as HierarchicalConfig, Environment};
use library_client::{Client, ClientConfig};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Prefix of environment variables overriding config file values,
/// e.g. `LIBRARY_BASE_URL`
const ENV_PREFIX: &str = "LIBRARY";

/// Library used when neither config, environment nor flags name one
pub const DEFAULT_LIBRARY_URL: &str = "https://library.sylabs.io";

#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
pub struct Config {
    /// Base URL of the library service
    // Using a URL here would add a trailing slash to bare hosts,
    // so just use a String and leave validation to the client.
    pub base_url: Option<String>,

    /// Token to authenticate with the library service
    pub auth_token: Option<String>,

    /// User agent sent with every request
    pub user_agent: Option<String>,
}

impl Config {
    /// Read the configuration from an optional TOML file,
    /// overridden by `LIBRARY_*` environment variables.
    pub fn parse(config_file: Option<&Path>) -> Result<Self> {
        let mut builder = HierarchicalConfig::builder();

        if let Some(path) = config_file {
            debug!(path = %path.display(), "reading config file");
            builder = builder.add_source(
                config::File::from(path)
                    .format(config::FileFormat::Toml)
                    .required(true),
            );
        }

        builder = builder.add_source(Environment::with_prefix(ENV_PREFIX));

        let config = builder.build()?.try_deserialize()?;
        Ok(config)
    }

    /// Create a library client, preferring `base_url_flag` over the config.
    pub fn library_client(&self, base_url_flag: Option<&str>) -> Result<Client> {
        let base_url = base_url_flag
            .or(self.base_url.as_deref())
            .unwrap_or(DEFAULT_LIBRARY_URL)
            .to_string();

        let user_agent = self.user_agent.clone().unwrap_or_else(|| {
            format!("{}/{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"))
        });

        debug!(%base_url, "using library client");
        let client = Client::new(ClientConfig {
            base_url,
            auth_token: self.auth_token.clone(),
            user_agent: Some(user_agent),
            ..Default::default()
        })?;
        Ok(client)
    }
}
