pub mod log_capture;
pub mod mock_ports;

pub use log_capture::LogCapture;
pub use mock_ports::{answer_for, query_for, MockBootstrapResolver, MockExchange};
