use anyhow::Context;
use clap::Parser;
use dns_router_domain::CliOverrides;
use tracing::info;

mod bootstrap;
mod server;

#[derive(Parser)]
#[command(name = "dns-router")]
#[command(version = "0.1.0")]
#[command(about = "DNS router - forwards queries to upstreams by domain suffix")]
struct Cli {
    /// Configuration file path
    #[arg(short = 'c', long, value_name = "FILE")]
    config: Option<String>,

    /// Listen address (":1053" binds all interfaces)
    #[arg(long)]
    listen: Option<String>,

    /// Suffix routes, e.g. "corp.local=10.0.0.1,example.com=https://dns.google/dns-query"
    #[arg(long)]
    upstreams: Option<String>,

    /// Upstream for names no route matches
    #[arg(long = "default")]
    default_upstream: Option<String>,

    /// Log every query, answer and failure
    #[arg(long)]
    debug: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let cli_overrides = CliOverrides {
        listen: cli.listen,
        upstreams: cli.upstreams,
        default_upstream: cli.default_upstream,
        log_level: cli.log_level,
        debug: cli.debug,
    };

    let config = bootstrap::load_config(cli.config.as_deref(), cli_overrides)
        .context("Invalid configuration")?;

    bootstrap::init_logging(&config);

    info!("Starting DNS router v{}", env!("CARGO_PKG_VERSION"));

    let services = bootstrap::RouterServices::new(&config)
        .await
        .context("Failed to build routing table")?;

    let listen_addr = config.server.listen_addr()?;
    server::start_dns_server(listen_addr, services.handler)
        .await
        .with_context(|| format!("DNS server on {} failed", config.server.listen))?;

    info!("Server shutdown complete");
    Ok(())
}
