//! Logging setup for the `roster` binary

use tracing_subscriber::{EnvFilter, fmt, prelude::*};

const DEFAULT_FILTER: &str = "roster=info,roster_client=info";

/// Initialise the global subscriber.
///
/// `RUST_LOG` overrides the default filter. Output goes to stderr so it
/// never mixes with rendered listings on stdout.
pub fn init_logger(json_format: bool) -> anyhow::Result<()> {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    let subscriber = tracing_subscriber::registry().with(env_filter);

    if json_format {
        let layer = fmt::layer()
            .json()
            .with_target(true)
            .with_current_span(true)
            .with_writer(std::io::stderr);
        subscriber.with(layer).try_init()?;
    } else {
        let layer = fmt::layer()
            .with_target(false)
            .with_writer(std::io::stderr);
        subscriber.with(layer).try_init()?;
    }
    Ok(())
}

/// `ROSTER_LOG_JSON=1` (or `true`) switches to JSON lines
pub fn json_from_env() -> bool {
    std::env::var("ROSTER_LOG_JSON")
        .map(|v| matches!(v.trim(), "1" | "true" | "yes"))
        .unwrap_or(false)
}
