use dns_router_application::use_cases::{BuildRouteTableUseCase, RouteQueryUseCase};
use dns_router_domain::Config;
use dns_router_infrastructure::dns::{
    DatagramAdapter, DnsServerHandler, TunnelAdapter, UdpBootstrapResolver,
};
use std::sync::Arc;
use tracing::info;

pub struct RouterServices {
    pub handler: DnsServerHandler,
}

impl RouterServices {
    /// Builds the route table, pins DoH endpoints and wires the adapters.
    ///
    /// Any error here is fatal: nothing has been bound yet.
    pub async fn new(config: &Config) -> anyhow::Result<Self> {
        super::config::log_summary(config);

        let resolver = Arc::new(UdpBootstrapResolver::new());
        info!(server = %resolver.server(), "Bootstrapping DoH upstreams");

        let table = BuildRouteTableUseCase::new(resolver)
            .execute(&config.routing.upstreams, &config.routing.default_upstream)
            .await?;

        for route in table.routes() {
            info!(suffix = %route.suffix, upstream = %route.upstream, "Route");
        }
        info!(upstream = %table.default_upstream(), "Default route");

        let tunnel = TunnelAdapter::from_route_table(&table)?;
        info!(channels = tunnel.len(), "DoH channels ready");

        let use_case = RouteQueryUseCase::new(
            Arc::new(table),
            Arc::new(DatagramAdapter::new()),
            Arc::new(tunnel),
        )
        .with_diagnostics(config.logging.diagnostics);

        Ok(Self {
            handler: DnsServerHandler::new(Arc::new(use_case)),
        })
    }
}
