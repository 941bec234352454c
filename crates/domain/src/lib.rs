//! DNS Router Domain Layer
pub mod config;
pub mod errors;
pub mod route_table;
pub mod upstream;

pub use config::{CliOverrides, Config, ConfigError};
pub use errors::DomainError;
pub use route_table::{RouteEntry, RouteTable};
pub use upstream::{UpstreamSpec, DNS_PORT, TUNNEL_PREFIX};
