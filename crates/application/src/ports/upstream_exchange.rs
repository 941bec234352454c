use async_trait::async_trait;
use dns_router_domain::DomainError;
use hickory_proto::op::Message;

#[async_trait]
pub trait UpstreamExchange: Send + Sync {
    /// Send `query` to `upstream` and return the decoded reply.
    ///
    /// `upstream` is a `host:port` for datagram exchanges and the pinned
    /// endpoint URL for DoH exchanges.
    async fn exchange(&self, query: &Message, upstream: &str) -> Result<Message, DomainError>;

    fn protocol_name(&self) -> &'static str;
}
