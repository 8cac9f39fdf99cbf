//! Logging setup
//!
//! Everything goes to stderr so that it interleaves with the output of the
//! dnf child processes, which inherit our stdout/stderr.

use tracing::{Level, Subscriber};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::util::SubscriberInitExt;

/// Select the default level from the `--verbose` flag
pub fn default_level(verbose: bool) -> Level {
    if verbose { Level::DEBUG } else { Level::INFO }
}

/// `RUST_LOG` directives win over the verbose flag when they are set and valid
fn filter_from(directives: Option<String>, verbose: bool) -> EnvFilter {
    directives
        .filter(|d| !d.trim().is_empty())
        .and_then(|d| EnvFilter::try_new(d).ok())
        .unwrap_or_else(|| EnvFilter::new(default_level(verbose).as_str().to_ascii_lowercase()))
}

/// Build the stderr subscriber without installing it
pub fn build_subscriber(verbose: bool) -> impl Subscriber + Send + Sync + 'static {
    let filter = filter_from(std::env::var(EnvFilter::DEFAULT_ENV).ok(), verbose);

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .without_time()
        .with_target(true)
        .finish()
}

/// Install the global tracing subscriber. Must be called once, from `main`.
pub fn init_logging(verbose: bool) {
    build_subscriber(verbose).init();
}
