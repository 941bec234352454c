pub mod datagram;
pub mod message_builder;
pub mod response_parser;
pub mod tunnel;

pub use datagram::{DatagramAdapter, DEFAULT_DATAGRAM_TIMEOUT};
pub use message_builder::MessageBuilder;
pub use response_parser::ResponseParser;
pub use tunnel::TunnelAdapter;
