use async_trait::async_trait;
use dns_router_domain::DomainError;
use std::net::Ipv4Addr;

/// One-shot A lookups used to pin DoH upstream hostnames at startup.
#[async_trait]
pub trait BootstrapResolver: Send + Sync {
    /// Addresses in the order the resolver returned them. Never empty on success.
    async fn lookup_ipv4(&self, hostname: &str) -> Result<Vec<Ipv4Addr>, DomainError>;
}
