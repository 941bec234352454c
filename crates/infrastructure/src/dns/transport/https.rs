//! HTTPS transport for DNS queries: DNS-over-HTTPS (RFC 8484)
//!
//! Sends DNS queries as HTTP POST requests with `application/dns-message` content type.
//! The request body is the raw DNS wire format message, and the response body
//! contains the raw DNS wire format response.
//!
//! Each transport owns a pooled client bound to one pinned endpoint, so the
//! upstream hostname is never resolved again after startup.
//!
//! Wire format (HTTP):
//! ```text
//! POST /dns-query HTTP/2
//! Content-Type: application/dns-message
//! Accept: application/dns-message
//!
//! <raw DNS message bytes>
//! ```

use super::{DnsTransport, TransportResponse};
use async_trait::async_trait;
use dns_router_domain::DomainError;
use std::time::Duration;
use tracing::debug;

/// Content type for DNS-over-HTTPS requests and responses (RFC 8484 §4.1)
pub const DNS_MESSAGE_CONTENT_TYPE: &str = "application/dns-message";

/// Per-call bound for every DoH exchange.
pub const TUNNEL_TIMEOUT: Duration = Duration::from_secs(5);

/// DNS-over-HTTPS transport (RFC 8484)
pub struct HttpsTransport {
    url: String,
    client: reqwest::Client,
}

impl HttpsTransport {
    /// Builds a transport with certificate verification on and a fixed timeout.
    pub fn new(url: String) -> Result<Self, DomainError> {
        let client = reqwest::Client::builder()
            .use_rustls_tls()
            .timeout(TUNNEL_TIMEOUT)
            .pool_max_idle_per_host(4)
            .build()
            .map_err(|e| DomainError::Transport {
                upstream: url.clone(),
                reason: format!("Failed to build HTTPS client: {}", e),
            })?;

        Ok(Self { url, client })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    fn transport_error(&self, reason: String) -> DomainError {
        DomainError::Transport {
            upstream: self.url.clone(),
            reason,
        }
    }
}

#[async_trait]
impl DnsTransport for HttpsTransport {
    async fn send(
        &self,
        message_bytes: &[u8],
        timeout: Duration,
    ) -> Result<TransportResponse, DomainError> {
        debug!(
            url = %self.url,
            message_len = message_bytes.len(),
            "Sending DoH query"
        );

        let response = tokio::time::timeout(
            timeout,
            self.client
                .post(&self.url)
                .header("Content-Type", DNS_MESSAGE_CONTENT_TYPE)
                .header("Accept", DNS_MESSAGE_CONTENT_TYPE)
                .body(message_bytes.to_vec())
                .send(),
        )
        .await
        .map_err(|_| DomainError::TransportTimeout {
            upstream: self.url.clone(),
        })?
        .map_err(|e| {
            if e.is_timeout() {
                DomainError::TransportTimeout {
                    upstream: self.url.clone(),
                }
            } else {
                self.transport_error(format!("DoH request failed: {}", e))
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(self.transport_error(format!(
                "DoH server returned HTTP {}: {}",
                status.as_u16(),
                status.canonical_reason().unwrap_or("Unknown")
            )));
        }

        let response_bytes = tokio::time::timeout(timeout, response.bytes())
            .await
            .map_err(|_| DomainError::TransportTimeout {
                upstream: self.url.clone(),
            })?
            .map_err(|e| self.transport_error(format!("Failed to read DoH response: {}", e)))?;

        debug!(
            url = %self.url,
            response_len = response_bytes.len(),
            "DoH response received"
        );

        Ok(TransportResponse {
            bytes: response_bytes.to_vec(),
            protocol_used: "HTTPS",
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_https_transport_creation() {
        let transport = HttpsTransport::new("https://1.1.1.1/dns-query".to_string()).unwrap();
        assert_eq!(transport.url(), "https://1.1.1.1/dns-query");
    }

    #[tokio::test]
    async fn test_https_transport_unreachable_endpoint() {
        // Nothing listens on the discard port locally.
        let transport = HttpsTransport::new("https://127.0.0.1:9/dns-query".to_string()).unwrap();
        let result = transport
            .send(&[0x00, 0x01], Duration::from_secs(2))
            .await;

        assert!(matches!(
            result,
            Err(DomainError::Transport { .. }) | Err(DomainError::TransportTimeout { .. })
        ));
    }
}
