#![allow(dead_code)]
use hickory_proto::op::Message;
use hickory_proto::rr::{rdata, RData, Record};
use std::net::Ipv4Addr;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, Request, Respond, ResponseTemplate};

const DNS_MESSAGE: &str = "application/dns-message";

/// What the mock saw for one HTTP request.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub content_type: Option<String>,
    pub body: Vec<u8>,
}

/// Answers a decodable DNS query with one A record for `answer_ip`.
struct DnsAnswer {
    answer_ip: Ipv4Addr,
    status: u16,
}

impl Respond for DnsAnswer {
    fn respond(&self, request: &Request) -> ResponseTemplate {
        let body = Message::from_vec(&request.body)
            .ok()
            .and_then(|query| {
                let mut response = query.to_response();
                if let Some(question) = query.queries().first() {
                    response.add_answer(Record::from_rdata(
                        question.name().clone(),
                        60,
                        RData::A(rdata::A(self.answer_ip)),
                    ));
                }
                response.to_vec().ok()
            })
            .unwrap_or_default();

        ResponseTemplate::new(self.status).set_body_raw(body, DNS_MESSAGE)
    }
}

/// Plain-HTTP DoH endpoint on loopback serving `POST /dns-query`.
pub struct MockDohServer {
    server: MockServer,
}

impl MockDohServer {
    /// Replies with the given HTTP status to every well-formed DoH POST.
    pub async fn start(answer_ip: Ipv4Addr, status: u16) -> Self {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/dns-query"))
            .and(header("content-type", DNS_MESSAGE))
            .respond_with(DnsAnswer { answer_ip, status })
            .mount(&server)
            .await;

        Self { server }
    }

    pub fn url(&self) -> String {
        format!("{}/dns-query", self.server.uri())
    }

    pub async fn requests(&self) -> Vec<RecordedRequest> {
        self.server
            .received_requests()
            .await
            .unwrap_or_default()
            .into_iter()
            .map(|request| RecordedRequest {
                method: request.method.to_string(),
                path: request.url.path().to_string(),
                content_type: request
                    .headers
                    .get("content-type")
                    .and_then(|value| value.to_str().ok())
                    .map(str::to_string),
                body: request.body,
            })
            .collect()
    }
}
