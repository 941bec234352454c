#![allow(dead_code)]
use async_trait::async_trait;
use dns_router_application::ports::{BootstrapResolver, UpstreamExchange};
use dns_router_domain::DomainError;
use hickory_proto::op::{Message, MessageType, OpCode, Query};
use hickory_proto::rr::{rdata, Name, RData, Record, RecordType};
use std::collections::{HashMap, HashSet};
use std::net::Ipv4Addr;
use std::str::FromStr;
use std::sync::Mutex;

pub fn query_for(id: u16, name: &str) -> Message {
    let mut message = Message::new(id, MessageType::Query, OpCode::Query);
    message.set_recursion_desired(true);
    message.add_query(Query::query(Name::from_str(name).unwrap(), RecordType::A));
    message
}

pub fn answer_for(query: &Message, ip: Ipv4Addr) -> Message {
    let mut response = query.to_response();
    response.set_recursion_available(true);
    let name = query.queries()[0].name().clone();
    response.add_answer(Record::from_rdata(name, 60, RData::A(rdata::A(ip))));
    response
}

pub struct MockBootstrapResolver {
    answers: HashMap<String, Vec<Ipv4Addr>>,
    failing: HashSet<String>,
    lookups: Mutex<Vec<String>>,
}

impl MockBootstrapResolver {
    pub fn new() -> Self {
        Self {
            answers: HashMap::new(),
            failing: HashSet::new(),
            lookups: Mutex::new(Vec::new()),
        }
    }

    pub fn with_answer(mut self, host: &str, addresses: Vec<Ipv4Addr>) -> Self {
        self.answers.insert(host.to_string(), addresses);
        self
    }

    pub fn with_failure(mut self, host: &str) -> Self {
        self.failing.insert(host.to_string());
        self
    }

    pub fn lookups(&self) -> Vec<String> {
        self.lookups.lock().unwrap().clone()
    }
}

#[async_trait]
impl BootstrapResolver for MockBootstrapResolver {
    async fn lookup_ipv4(&self, hostname: &str) -> Result<Vec<Ipv4Addr>, DomainError> {
        self.lookups.lock().unwrap().push(hostname.to_string());

        if self.failing.contains(hostname) {
            return Err(DomainError::BootstrapLookup {
                host: hostname.to_string(),
                reason: "connection refused".to_string(),
            });
        }
        Ok(self.answers.get(hostname).cloned().unwrap_or_default())
    }
}

/// Answers every query with `answer_ip` unless the upstream is marked failing.
pub struct MockExchange {
    protocol: &'static str,
    answer_ip: Ipv4Addr,
    failing: HashSet<String>,
    calls: Mutex<Vec<(String, String)>>,
}

impl MockExchange {
    pub fn new(protocol: &'static str, answer_ip: Ipv4Addr) -> Self {
        Self {
            protocol,
            answer_ip,
            failing: HashSet::new(),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn failing_for(mut self, upstream: &str) -> Self {
        self.failing.insert(upstream.to_string());
        self
    }

    /// `(upstream, question name)` pairs in call order.
    pub fn calls(&self) -> Vec<(String, String)> {
        self.calls.lock().unwrap().clone()
    }

    pub fn upstreams(&self) -> Vec<String> {
        self.calls().into_iter().map(|(upstream, _)| upstream).collect()
    }
}

#[async_trait]
impl UpstreamExchange for MockExchange {
    async fn exchange(&self, query: &Message, upstream: &str) -> Result<Message, DomainError> {
        let name = query
            .queries()
            .first()
            .map(|q| q.name().to_ascii())
            .unwrap_or_default();
        self.calls
            .lock()
            .unwrap()
            .push((upstream.to_string(), name));

        if self.failing.contains(upstream) {
            return Err(DomainError::Transport {
                upstream: upstream.to_string(),
                reason: "network unreachable".to_string(),
            });
        }
        Ok(answer_for(query, self.answer_ip))
    }

    fn protocol_name(&self) -> &'static str {
        self.protocol
    }
}
