use crate::ports::UpstreamExchange;
use dns_router_domain::{DomainError, RouteTable, UpstreamSpec};
use hickory_proto::op::{Message, ResponseCode};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Routes one inbound query to the upstream selected by the route table.
///
/// Never fails: upstream errors become a SERVFAIL for that query only.
pub struct RouteQueryUseCase {
    table: Arc<RouteTable>,
    datagram: Arc<dyn UpstreamExchange>,
    tunnel: Arc<dyn UpstreamExchange>,
    diagnostics: bool,
}

impl RouteQueryUseCase {
    pub fn new(
        table: Arc<RouteTable>,
        datagram: Arc<dyn UpstreamExchange>,
        tunnel: Arc<dyn UpstreamExchange>,
    ) -> Self {
        Self {
            table,
            datagram,
            tunnel,
            diagnostics: false,
        }
    }

    /// Log every question and answer record at info level.
    pub fn with_diagnostics(mut self, enabled: bool) -> Self {
        self.diagnostics = enabled;
        self
    }

    /// Upstream chosen for the first question of `request`.
    pub fn select(&self, request: &Message) -> Option<&UpstreamSpec> {
        let question = request.queries().first()?;
        Some(self.table.select(&question.name().to_ascii()))
    }

    pub async fn execute(&self, request: &Message) -> Message {
        let Some(question) = request.queries().first() else {
            debug!(id = request.id(), "Query without question");
            return failure_response(request, ResponseCode::FormErr);
        };

        if self.diagnostics {
            info!("Query: {}", question);
        }

        let name = question.name().to_ascii();
        let upstream = self.table.select(&name);
        debug!(domain = %name, upstream = %upstream, "Upstream selected");

        match self.forward(request, upstream).await {
            Ok(response) => {
                if self.diagnostics {
                    for answer in response.answers() {
                        info!("Answer: {}", answer);
                    }
                }
                response
            }
            Err(e) => {
                if self.diagnostics {
                    warn!("Failed: {} error: {}", question, e);
                } else {
                    debug!(domain = %name, upstream = %upstream, error = %e, "Upstream exchange failed");
                }
                failure_response(request, ResponseCode::ServFail)
            }
        }
    }

    /// Sends `request` over the transport `upstream` requires.
    pub async fn forward(
        &self,
        request: &Message,
        upstream: &UpstreamSpec,
    ) -> Result<Message, DomainError> {
        let (exchange, target) = match upstream {
            UpstreamSpec::Tunnel { url } => (&self.tunnel, url.to_string()),
            UpstreamSpec::Traditional { .. } => {
                let target = upstream
                    .datagram_target()
                    .ok_or_else(|| DomainError::ConfigParse(upstream.to_string()))?;
                (&self.datagram, target)
            }
        };

        debug!(
            id = request.id(),
            target = %target,
            protocol = exchange.protocol_name(),
            "Forwarding query"
        );
        exchange.exchange(request, &target).await
    }
}

/// Reply to `request` carrying only its question and the given response code.
///
/// ID, opcode, RD and CD are echoed; every other section and flag starts empty.
pub fn failure_response(request: &Message, code: ResponseCode) -> Message {
    let mut response = Message::error_msg(request.id(), request.op_code(), code);
    response.add_queries(request.queries().iter().cloned());
    response.set_recursion_desired(request.recursion_desired());
    response.set_checking_disabled(request.checking_disabled());
    response.set_recursion_available(true);
    response
}
