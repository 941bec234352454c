use super::message_builder::MessageBuilder;
use super::response_parser::ResponseParser;
use crate::dns::transport::https::{HttpsTransport, TUNNEL_TIMEOUT};
use crate::dns::transport::DnsTransport;
use async_trait::async_trait;
use dns_router_application::ports::UpstreamExchange;
use dns_router_domain::{DomainError, RouteTable};
use hickory_proto::op::Message;
use std::collections::HashMap;
use tracing::{debug, info};

/// DNS-over-HTTPS exchanges through channels built once at startup.
///
/// Channels are keyed by their pinned endpoint URL and never added or
/// removed after construction.
pub struct TunnelAdapter {
    channels: HashMap<String, HttpsTransport>,
}

impl TunnelAdapter {
    /// One channel for every distinct DoH upstream in `table`, default included.
    pub fn from_route_table(table: &RouteTable) -> Result<Self, DomainError> {
        Self::from_urls(table.upstreams().filter_map(|u| u.url()))
    }

    pub fn from_urls<'a, I>(urls: I) -> Result<Self, DomainError>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut channels = HashMap::new();
        for url in urls {
            if channels.contains_key(url) {
                continue;
            }
            let channel = HttpsTransport::new(url.to_string())?;
            info!(endpoint = %url, "DoH channel ready");
            channels.insert(url.to_string(), channel);
        }
        Ok(Self { channels })
    }

    pub fn channel(&self, endpoint: &str) -> Option<&HttpsTransport> {
        self.channels.get(endpoint)
    }

    pub fn endpoints(&self) -> impl Iterator<Item = &str> {
        self.channels.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.channels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.channels.is_empty()
    }
}

#[async_trait]
impl UpstreamExchange for TunnelAdapter {
    async fn exchange(&self, query: &Message, upstream: &str) -> Result<Message, DomainError> {
        let channel = self
            .channel(upstream)
            .ok_or_else(|| DomainError::ChannelNotFound(upstream.to_string()))?;

        let request_bytes = MessageBuilder::serialize(query)?;
        let response = channel.send(&request_bytes, TUNNEL_TIMEOUT).await?;

        let message =
            ResponseParser::parse(&response.bytes).map_err(|e| DomainError::Transport {
                upstream: upstream.to_string(),
                reason: e.to_string(),
            })?;

        debug!(
            upstream = %upstream,
            protocol = response.protocol_used,
            answers = message.answers().len(),
            status = ResponseParser::rcode_to_status(message.response_code()),
            "DoH exchange complete"
        );

        Ok(message)
    }

    fn protocol_name(&self) -> &'static str {
        "HTTPS"
    }
}
