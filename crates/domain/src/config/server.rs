use super::errors::ConfigError;
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    /// UDP address to listen on. `:port` binds every IPv4 interface.
    #[serde(default = "default_listen")]
    pub listen: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen: default_listen(),
        }
    }
}

impl ServerConfig {
    pub fn listen_addr(&self) -> Result<SocketAddr, ConfigError> {
        let listen = self.listen.trim();
        let candidate = if listen.starts_with(':') {
            format!("0.0.0.0{}", listen)
        } else {
            listen.to_string()
        };
        candidate.parse().map_err(|e| {
            ConfigError::Validation(format!("Invalid listen address '{}': {}", self.listen, e))
        })
    }
}

fn default_listen() -> String {
    ":1053".to_string()
}
