pub mod bootstrap;
pub mod forwarding;
pub mod server;
pub mod transport;

pub use bootstrap::UdpBootstrapResolver;
pub use forwarding::{DatagramAdapter, TunnelAdapter};
pub use server::DnsServerHandler;
