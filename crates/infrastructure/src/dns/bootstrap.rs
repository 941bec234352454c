use crate::dns::forwarding::{MessageBuilder, ResponseParser, DEFAULT_DATAGRAM_TIMEOUT};
use crate::dns::transport::udp::UdpTransport;
use crate::dns::transport::DnsTransport;
use async_trait::async_trait;
use dns_router_application::ports::BootstrapResolver;
use dns_router_domain::{DomainError, DNS_PORT};
use hickory_proto::rr::RecordType;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::time::Duration;
use tracing::debug;

/// Well-known resolver used to look up DoH hostnames.
pub fn default_bootstrap_server() -> SocketAddr {
    SocketAddr::new(IpAddr::V4(Ipv4Addr::new(1, 1, 1, 1)), DNS_PORT)
}

/// Resolves DoH hostnames with a single plain A query.
pub struct UdpBootstrapResolver {
    transport: UdpTransport,
    timeout: Duration,
}

impl UdpBootstrapResolver {
    pub fn new() -> Self {
        Self::with_server(default_bootstrap_server())
    }

    pub fn with_server(server: SocketAddr) -> Self {
        Self {
            transport: UdpTransport::new(server),
            timeout: DEFAULT_DATAGRAM_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn server(&self) -> SocketAddr {
        self.transport.server_addr()
    }
}

impl Default for UdpBootstrapResolver {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BootstrapResolver for UdpBootstrapResolver {
    async fn lookup_ipv4(&self, hostname: &str) -> Result<Vec<Ipv4Addr>, DomainError> {
        let lookup_error = |reason: String| DomainError::BootstrapLookup {
            host: hostname.to_string(),
            reason,
        };

        let query = MessageBuilder::build_query(hostname, RecordType::A)
            .map_err(|e| lookup_error(e.to_string()))?;
        let request_bytes =
            MessageBuilder::serialize(&query).map_err(|e| lookup_error(e.to_string()))?;

        debug!(
            hostname = %hostname,
            server = %self.server(),
            "Bootstrap lookup"
        );

        let response = self
            .transport
            .send(&request_bytes, self.timeout)
            .await
            .map_err(|e| lookup_error(e.to_string()))?;

        let message =
            ResponseParser::parse(&response.bytes).map_err(|e| lookup_error(e.to_string()))?;
        if message.id() != query.id() {
            return Err(lookup_error(format!(
                "Response ID {} does not match query ID {}",
                message.id(),
                query.id()
            )));
        }

        let addresses = ResponseParser::ipv4_answers(&message);
        if addresses.is_empty() {
            return Err(lookup_error(format!(
                "no addresses returned ({})",
                ResponseParser::rcode_to_status(message.response_code())
            )));
        }

        debug!(
            hostname = %hostname,
            addresses = ?addresses,
            "Bootstrap lookup successful"
        );

        Ok(addresses)
    }
}
