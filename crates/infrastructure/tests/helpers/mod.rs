pub mod builders;
pub mod dns_server_mock;
pub mod doh_server_mock;

pub use builders::{query_bytes, query_for, DnsServerBuilder};
pub use dns_server_mock::{MockBehavior, MockDnsServer};
pub use doh_server_mock::{MockDohServer, RecordedRequest};
