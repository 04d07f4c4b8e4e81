use std::fmt::Display;
use std::path::PathBuf;

use anyhow::{Context, Result};
use bpaf::Bpaf;
use library_client::{Client, SearchArgs, SearchResults};
use tracing::{debug, instrument};

const SEARCH_DESCRIPTION: &str =
    "Search a cloud library for entities, collections, containers and images.";

fn vec_len<T>(x: Vec<T>) -> usize {
    Vec::len(&x)
}

#[derive(Bpaf, Clone, Copy, Debug)]
pub enum Verbosity {
    Verbose(
        /// Increase logging verbosity
        ///
        /// Invoke multiple times for increasing detail.
        #[bpaf(short('v'), long("verbose"), req_flag(()), many, map(vec_len))]
        usize,
    ),

    /// Silence logs except for errors
    #[bpaf(short, long)]
    Quiet,
}

impl Default for Verbosity {
    fn default() -> Self {
        Verbosity::Verbose(0)
    }
}

#[derive(Debug, Bpaf)]
#[bpaf(options, descr(SEARCH_DESCRIPTION))]
pub struct SearchCli {
    #[bpaf(external, fallback(Default::default()))]
    pub verbosity: Verbosity,

    /// TOML file to read configuration from
    #[bpaf(long, argument("PATH"))]
    pub config: Option<PathBuf>,

    /// Base URL of the library service
    #[bpaf(long, argument("URL"))]
    pub base_url: Option<String>,

    /// Only match images for these architectures, e.g. 'amd64,arm64'
    #[bpaf(long, argument("ARCH"))]
    pub arch: Option<String>,

    /// Only match signed ('true') or unsigned ('false') images
    #[bpaf(long, argument("BOOL"))]
    pub signed: Option<bool>,

    /// Display search results as JSON
    #[bpaf(long)]
    pub json: bool,

    /// The term to search for, at least 3 characters
    #[bpaf(positional("QUERY"))]
    pub query: String,
}

impl SearchCli {
    /// Key-value search spec sent to the library
    pub fn search_args(&self) -> SearchArgs {
        let mut args = SearchArgs::from([("value".to_string(), self.query.clone())]);
        if let Some(arch) = &self.arch {
            args.insert("arch".to_string(), arch.clone());
        }
        if let Some(signed) = self.signed {
            args.insert("signed".to_string(), signed.to_string());
        }
        args
    }

    #[instrument(name = "search", skip_all, fields(query = self.query, json = self.json))]
    pub async fn handle(self, client: &Client) -> Result<()> {
        let args = self.search_args();
        debug!(?args, "searching library");

        let results = client
            .search(&args)
            .await
            .with_context(|| format!("search for '{}' failed", self.query))?;

        if self.json {
            println!("{}", serde_json::to_string_pretty(&results)?);
        } else if results.is_empty() {
            eprintln!("No matches found for '{}'", self.query);
        } else {
            print!("{}", DisplaySearchResults(&results));
        }
        Ok(())
    }
}

/// Search results as plain text, one section per non-empty category.
pub struct DisplaySearchResults<'a>(pub &'a SearchResults);

impl Display for DisplaySearchResults<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let results = self.0;

        if !results.entities.is_empty() {
            writeln!(f, "Entities:")?;
            for entity in &results.entities {
                writeln!(f, "  {}", entity.name)?;
            }
        }

        if !results.collections.is_empty() {
            writeln!(f, "Collections:")?;
            for collection in &results.collections {
                writeln!(f, "  {}/{}", collection.entity_name, collection.name)?;
            }
        }

        if !results.containers.is_empty() {
            writeln!(f, "Containers:")?;
            for container in &results.containers {
                writeln!(
                    f,
                    "  {}/{}/{}",
                    container.entity_name, container.collection_name, container.name
                )?;
            }
        }

        if !results.images.is_empty() {
            writeln!(f, "Images:")?;
            for image in &results.images {
                let arch = image.architecture.as_deref().unwrap_or("-");
                let signed = match image.signed {
                    Some(true) => "signed",
                    Some(false) => "unsigned",
                    None => "-",
                };
                writeln!(
                    f,
                    "  {}  {}  {arch}  {signed}",
                    image.container_path(),
                    image.hash
                )?;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use indoc::indoc;
    use library_client::{Collection, Container, Entity, Image};
    use pretty_assertions::assert_eq;

    use super::*;

    fn parse(args: &[&str]) -> SearchCli {
        search_cli()
            .run_inner(args)
            .expect("arguments should parse")
    }

    #[test]
    fn parses_filters_into_search_args() {
        let cli = parse(&["--arch", "amd64,arm64", "--signed", "true", "alpine"]);
        assert_eq!(
            cli.search_args(),
            SearchArgs::from([
                ("value".to_string(), "alpine".to_string()),
                ("arch".to_string(), "amd64,arm64".to_string()),
                ("signed".to_string(), "true".to_string()),
            ])
        );
    }

    #[test]
    fn query_is_required() {
        assert!(search_cli().run_inner(&["--json"]).is_err());
    }

    #[test]
    fn verbosity_flags() {
        assert!(matches!(parse(&["alpine"]).verbosity, Verbosity::Verbose(0)));
        assert!(matches!(
            parse(&["-vv", "alpine"]).verbosity,
            Verbosity::Verbose(2)
        ));
        assert!(matches!(parse(&["-q", "alpine"]).verbosity, Verbosity::Quiet));
    }

    #[test]
    fn renders_each_category() {
        let results = SearchResults {
            entities: vec![Entity {
                name: "library".to_string(),
                ..Default::default()
            }],
            collections: vec![Collection {
                name: "default".to_string(),
                entity_name: "library".to_string(),
                ..Default::default()
            }],
            containers: vec![Container {
                name: "alpine".to_string(),
                entity_name: "library".to_string(),
                collection_name: "default".to_string(),
                ..Default::default()
            }],
            images: vec![Image {
                hash: "sha256.0123".to_string(),
                architecture: Some("arm64".to_string()),
                signed: Some(true),
                entity_name: "library".to_string(),
                collection_name: "default".to_string(),
                container_name: "alpine".to_string(),
                ..Default::default()
            }],
        };

        assert_eq!(DisplaySearchResults(&results).to_string(), indoc! {"
            Entities:
              library
            Collections:
              library/default
            Containers:
              library/default/alpine
            Images:
              library/default/alpine  sha256.0123  arm64  signed
            "});
    }

    #[test]
    fn renders_nothing_for_empty_results() {
        let results = SearchResults::default();
        assert_eq!(DisplaySearchResults(&results).to_string(), "");
    }
}
