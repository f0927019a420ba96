use anyhow::{anyhow, Result};
use tracing_subscriber::EnvFilter;

pub const DEFAULT_LOG_DIRECTIVE: &str = "nutrition_engine=info,tower_http=info";

/// Installs the global subscriber. Output goes to stderr so JSON printed by
/// the CLI on stdout stays machine-readable. `RUST_LOG` overrides the default.
pub fn init_tracing() -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_DIRECTIVE));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow!("failed to initialise logging: {e}"))
}
