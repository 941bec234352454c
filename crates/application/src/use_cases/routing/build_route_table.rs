use crate::ports::BootstrapResolver;
use dns_router_domain::{DomainError, RouteEntry, RouteTable, UpstreamSpec};
use std::collections::HashMap;
use std::net::IpAddr;
use std::sync::Arc;
use tracing::{debug, info};

/// Builds the route table from configuration, pinning every DoH upstream
/// to the address its hostname resolves to at startup.
///
/// Any failure is fatal: the caller is expected to abort before serving.
pub struct BuildRouteTableUseCase {
    resolver: Arc<dyn BootstrapResolver>,
}

impl BuildRouteTableUseCase {
    pub fn new(resolver: Arc<dyn BootstrapResolver>) -> Self {
        Self { resolver }
    }

    pub async fn execute(
        &self,
        upstreams: &str,
        default_upstream: &str,
    ) -> Result<RouteTable, DomainError> {
        let entries = RouteTable::parse_entries(upstreams)?;

        // Each distinct DoH host is looked up once.
        let mut pinned_hosts: HashMap<String, IpAddr> = HashMap::new();

        let mut pinned_entries = Vec::with_capacity(entries.len());
        for entry in entries {
            let upstream = self.pin(&entry.upstream, &mut pinned_hosts).await?;
            pinned_entries.push(RouteEntry {
                suffix: entry.suffix,
                upstream,
            });
        }

        let default_upstream = self
            .pin(&UpstreamSpec::parse(default_upstream), &mut pinned_hosts)
            .await?;

        let table = RouteTable::new(pinned_entries, default_upstream);
        info!(
            routes = table.len(),
            default_upstream = %table.default_upstream(),
            pinned_hosts = pinned_hosts.len(),
            "Route table built"
        );
        Ok(table)
    }

    async fn pin(
        &self,
        upstream: &UpstreamSpec,
        pinned_hosts: &mut HashMap<String, IpAddr>,
    ) -> Result<UpstreamSpec, DomainError> {
        if !upstream.is_tunnel() {
            return Ok(upstream.clone());
        }

        let host = upstream
            .tunnel_host()
            .ok_or_else(|| DomainError::ConfigParse(upstream.to_string()))?;

        if let Ok(ip) = host.parse::<IpAddr>() {
            debug!(upstream = %upstream, "DoH upstream already uses an IP literal");
            return Ok(upstream.with_pinned_host(ip));
        }

        let ip = match pinned_hosts.get(host) {
            Some(ip) => *ip,
            None => {
                let addresses = self.resolver.lookup_ipv4(host).await?;
                let first = addresses
                    .first()
                    .copied()
                    .ok_or_else(|| DomainError::BootstrapLookup {
                        host: host.to_string(),
                        reason: "no addresses returned".to_string(),
                    })?;
                let ip = IpAddr::V4(first);
                pinned_hosts.insert(host.to_string(), ip);
                ip
            }
        };

        let pinned = upstream.with_pinned_host(ip);
        info!(upstream = %upstream, pinned = %pinned, "DoH upstream pinned");
        Ok(pinned)
    }
}
