use dns_router_domain::DomainError;
use std::net::SocketAddr;
use std::time::Duration;

/// Resolves a `host:port` target to socket addresses.
///
/// IP literals are returned directly; hostnames go through the system resolver.
pub async fn resolve_target(
    target: &str,
    timeout: Duration,
) -> Result<Vec<SocketAddr>, DomainError> {
    if let Ok(addr) = target.parse::<SocketAddr>() {
        return Ok(vec![addr]);
    }

    let addrs_iter = tokio::time::timeout(timeout, tokio::net::lookup_host(target))
        .await
        .map_err(|_| DomainError::TransportTimeout {
            upstream: target.to_string(),
        })?
        .map_err(|e| DomainError::Transport {
            upstream: target.to_string(),
            reason: format!("DNS resolution failed: {}", e),
        })?;

    let addrs: Vec<SocketAddr> = addrs_iter.collect();

    if addrs.is_empty() {
        return Err(DomainError::Transport {
            upstream: target.to_string(),
            reason: "No addresses found".to_string(),
        });
    }

    Ok(addrs)
}
