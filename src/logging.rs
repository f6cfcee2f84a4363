//! Logging initialization
//!
//! Installs a tracing subscriber writing to stderr so the composed label on
//! stdout stays clean. `RUST_LOG` overrides the default filter.

use tracing_subscriber::EnvFilter;

/// Initialize the global subscriber.
///
/// `verbose` lowers the default filter to debug; `json_output` switches to
/// JSON-formatted events; `no_color` strips ANSI escapes from plain output.
pub fn init(verbose: bool, json_output: bool, no_color: bool) -> anyhow::Result<()> {
    let default_filter = if verbose { "timebar=debug" } else { "timebar=info" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(!no_color)
        .with_target(false);

    if json_output {
        builder.json().try_init().map_err(|e| anyhow::anyhow!("{}", e))?;
    } else {
        builder.try_init().map_err(|e| anyhow::anyhow!("{}", e))?;
    }

    Ok(())
}
