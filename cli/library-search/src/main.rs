use std::process::ExitCode;

use anyhow::{Context, Result};
use commands::SearchCli;
use tracing::debug;

mod commands;
mod config;
mod logger;

async fn run(args: SearchCli) -> Result<()> {
    let config = config::Config::parse(args.config.as_deref())
        .context("failed to load configuration")?;
    let client = config
        .library_client(args.base_url.as_deref())
        .context("failed to create library client")?;
    args.handle(&client).await
}

fn main() -> ExitCode {
    // bpaf prints help and parse errors itself and exits
    let args = commands::search_cli().run();

    logger::init_logger(args.verbosity);

    let runtime = match tokio::runtime::Runtime::new() {
        Ok(runtime) => runtime,
        Err(e) => {
            eprintln!("Error: failed to start async runtime: {e}");
            return ExitCode::from(1);
        },
    };

    match runtime.block_on(run(args)) {
        Ok(()) => ExitCode::from(0),
        Err(e) => {
            debug!("{:#}", e);
            eprintln!("Error: {e:#}");
            ExitCode::from(1)
        },
    }
}
