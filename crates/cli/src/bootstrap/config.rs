use dns_router_domain::{CliOverrides, Config};
use tracing::info;

/// Loads, overrides and validates the configuration in one step.
pub fn load_config(path: Option<&str>, cli_overrides: CliOverrides) -> anyhow::Result<Config> {
    let config = Config::load(path, cli_overrides)?;
    config.validate()?;
    Ok(config)
}

pub fn log_summary(config: &Config) {
    info!(
        listen = %config.server.listen,
        default_upstream = %config.routing.default_upstream,
        diagnostics = config.logging.diagnostics,
        "Configuration loaded"
    );
}
