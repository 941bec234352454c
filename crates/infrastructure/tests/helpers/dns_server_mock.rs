#![allow(dead_code)]
use hickory_proto::op::Message;
use hickory_proto::rr::{rdata, RData, Record};
use std::net::{Ipv4Addr, SocketAddr};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::net::UdpSocket;
use tokio::sync::oneshot;

/// How the mock answers each query.
#[derive(Debug, Clone, Copy)]
pub enum MockBehavior {
    /// One A record with this address.
    Answer(Ipv4Addr),
    /// `count` A records, all with this address.
    Many(Ipv4Addr, usize),
    /// NOERROR with an empty answer section.
    Empty,
    /// A valid answer whose ID does not match the query.
    WrongId(Ipv4Addr),
    /// Bytes that do not decode as a DNS message.
    Garbage,
    /// Never replies.
    Silent,
}

pub struct MockDnsServer {
    addr: SocketAddr,
    queries: Arc<AtomicUsize>,
    shutdown_tx: Option<oneshot::Sender<()>>,
}

impl MockDnsServer {
    /// Starts on an OS-assigned loopback port.
    pub async fn start(behavior: MockBehavior) -> Result<Self, std::io::Error> {
        let socket = UdpSocket::bind(SocketAddr::from(([127, 0, 0, 1], 0))).await?;
        let addr = socket.local_addr()?;
        let queries = Arc::new(AtomicUsize::new(0));
        let counter = queries.clone();

        let (shutdown_tx, mut shutdown_rx) = oneshot::channel();

        tokio::spawn(async move {
            let mut buf = vec![0u8; 4096];

            loop {
                tokio::select! {
                    _ = &mut shutdown_rx => {
                        break;
                    }
                    result = socket.recv_from(&mut buf) => {
                        if let Ok((len, peer)) = result {
                            counter.fetch_add(1, Ordering::SeqCst);
                            if let Some(response) = Self::build_mock_response(&buf[..len], behavior) {
                                let _ = socket.send_to(&response, peer).await;
                            }
                        }
                    }
                }
            }
        });

        Ok(Self {
            addr,
            queries,
            shutdown_tx: Some(shutdown_tx),
        })
    }

    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    pub fn query_count(&self) -> usize {
        self.queries.load(Ordering::SeqCst)
    }

    fn build_mock_response(query: &[u8], behavior: MockBehavior) -> Option<Vec<u8>> {
        let request = Message::from_vec(query).ok()?;

        let mut response = request.to_response();
        response.set_recursion_available(true);

        let answer = |response: &mut Message, ip: Ipv4Addr| {
            if let Some(question) = request.queries().first() {
                response.add_answer(Record::from_rdata(
                    question.name().clone(),
                    60,
                    RData::A(rdata::A(ip)),
                ));
            }
        };

        match behavior {
            MockBehavior::Answer(ip) => answer(&mut response, ip),
            MockBehavior::Many(ip, count) => {
                for _ in 0..count {
                    answer(&mut response, ip);
                }
            }
            MockBehavior::Empty => {}
            MockBehavior::WrongId(ip) => {
                answer(&mut response, ip);
                let mut header = *response.header();
                header.set_id(request.id().wrapping_add(1));
                response.set_header(header);
            }
            MockBehavior::Garbage => return Some(vec![0xde, 0xad]),
            MockBehavior::Silent => return None,
        }

        response.to_vec().ok()
    }

    pub fn shutdown(mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

impl Drop for MockDnsServer {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}
