mod bootstrap_resolver;
mod upstream_exchange;

pub use bootstrap_resolver::BootstrapResolver;
pub use upstream_exchange::UpstreamExchange;
