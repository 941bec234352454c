#![allow(dead_code)]
use hickory_proto::op::{Message, MessageType, OpCode, Query};
use hickory_proto::rr::{Name, RecordType};
use std::str::FromStr;

pub struct DnsServerBuilder;

impl DnsServerBuilder {
    pub fn google_https() -> String {
        "https://dns.google/dns-query".to_string()
    }

    pub fn cloudflare_https() -> String {
        "https://1.1.1.1/dns-query".to_string()
    }

    pub fn unreachable_https() -> String {
        "https://127.0.0.1:9/dns-query".to_string()
    }
}

pub fn query_for(id: u16, name: &str) -> Message {
    let mut message = Message::new(id, MessageType::Query, OpCode::Query);
    message.set_recursion_desired(true);
    message.add_query(Query::query(Name::from_str(name).unwrap(), RecordType::A));
    message
}

pub fn query_bytes(id: u16, name: &str) -> Vec<u8> {
    query_for(id, name).to_vec().unwrap()
}
