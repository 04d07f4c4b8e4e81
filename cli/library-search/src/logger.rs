use tracing_subscriber::prelude::*;
use tracing_subscriber::EnvFilter;

use crate::commands::Verbosity;

/// Log filter for a verbosity level, used unless `RUST_LOG` is set.
fn log_filter(verbosity: Verbosity) -> &'static str {
    match verbosity {
        // Show only errors
        Verbosity::Quiet => "off,library_search=error,library_client=error",
        // Only show warnings
        Verbosity::Verbose(0) => "off,library_search=warn,library_client=warn",
        // Show our own info logs
        Verbosity::Verbose(1) => "off,library_search=info,library_client=info",
        // Also show debug logs, including requests sent by the client
        Verbosity::Verbose(2) => "off,library_search=debug,library_client=debug",
        // Also show trace from our libraries and the HTTP stack
        Verbosity::Verbose(3) => "debug,library_search=trace,library_client=trace",
        Verbosity::Verbose(_) => "trace",
    }
}

pub(crate) fn init_logger(verbosity: Verbosity) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(log_filter(verbosity)))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    let log_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_filter(filter);

    if let Err(err) = tracing_subscriber::registry().with(log_layer).try_init() {
        eprintln!("Initializing logger failed: {err}");
    }
}
