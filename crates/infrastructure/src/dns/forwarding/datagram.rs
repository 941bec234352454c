use super::message_builder::MessageBuilder;
use super::response_parser::ResponseParser;
use crate::dns::transport::resolver::resolve_target;
use crate::dns::transport::udp::UdpTransport;
use crate::dns::transport::DnsTransport;
use async_trait::async_trait;
use dns_router_application::ports::UpstreamExchange;
use dns_router_domain::DomainError;
use hickory_proto::op::Message;
use std::time::Duration;
use tracing::debug;

/// Timeout for one plain DNS exchange.
pub const DEFAULT_DATAGRAM_TIMEOUT: Duration = Duration::from_secs(2);

/// Plain DNS over UDP: one request, one reply, no retry.
pub struct DatagramAdapter {
    timeout: Duration,
}

impl DatagramAdapter {
    pub fn new() -> Self {
        Self {
            timeout: DEFAULT_DATAGRAM_TIMEOUT,
        }
    }

    pub fn with_timeout(timeout: Duration) -> Self {
        Self { timeout }
    }
}

impl Default for DatagramAdapter {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UpstreamExchange for DatagramAdapter {
    async fn exchange(&self, query: &Message, upstream: &str) -> Result<Message, DomainError> {
        let server = resolve_target(upstream, self.timeout)
            .await?
            .first()
            .copied()
            .ok_or_else(|| DomainError::Transport {
                upstream: upstream.to_string(),
                reason: "No addresses found".to_string(),
            })?;

        let request_bytes = MessageBuilder::serialize(query)?;
        let response = UdpTransport::new(server)
            .with_response_size(usize::from(query.max_payload()))
            .send(&request_bytes, self.timeout)
            .await?;

        let message =
            ResponseParser::parse(&response.bytes).map_err(|e| DomainError::Transport {
                upstream: upstream.to_string(),
                reason: e.to_string(),
            })?;

        if message.id() != query.id() {
            return Err(DomainError::Transport {
                upstream: upstream.to_string(),
                reason: format!(
                    "Response ID {} does not match query ID {}",
                    message.id(),
                    query.id()
                ),
            });
        }

        debug!(
            upstream = %upstream,
            protocol = response.protocol_used,
            answers = message.answers().len(),
            status = ResponseParser::rcode_to_status(message.response_code()),
            "Datagram exchange complete"
        );

        Ok(message)
    }

    fn protocol_name(&self) -> &'static str {
        "UDP"
    }
}
