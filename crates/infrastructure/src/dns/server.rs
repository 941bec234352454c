use crate::dns::forwarding::{MessageBuilder, ResponseParser};
use dns_router_application::use_cases::{failure_response, RouteQueryUseCase};
use hickory_proto::op::{Message, MessageType, ResponseCode};
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::{debug, error};

/// Turns raw inbound datagrams into raw replies.
#[derive(Clone)]
pub struct DnsServerHandler {
    use_case: Arc<RouteQueryUseCase>,
}

impl DnsServerHandler {
    pub fn new(use_case: Arc<RouteQueryUseCase>) -> Self {
        Self { use_case }
    }

    /// Returns `None` when the datagram should be dropped without a reply.
    pub async fn handle_raw(&self, query_buf: &[u8], client: SocketAddr) -> Option<Vec<u8>> {
        let request = match Message::from_vec(query_buf) {
            Ok(message) => message,
            Err(e) => {
                debug!(client = %client, error = %e, "Dropping undecodable datagram");
                return None;
            }
        };

        if request.message_type() != MessageType::Query {
            debug!(client = %client, id = request.id(), "Dropping non-query message");
            return None;
        }

        let response = self.use_case.execute(&request).await;
        debug!(
            client = %client,
            id = response.id(),
            status = ResponseParser::rcode_to_status(response.response_code()),
            answers = response.answers().len(),
            "Sending response"
        );

        match MessageBuilder::serialize(&response) {
            Ok(bytes) => Some(bytes),
            Err(e) => {
                error!(error = %e, "Failed to serialize response");
                MessageBuilder::serialize(&failure_response(&request, ResponseCode::ServFail)).ok()
            }
        }
    }
}
