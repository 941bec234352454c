use serde::{Deserialize, Serialize};

use super::errors::ConfigError;
use super::logging::LoggingConfig;
use super::routing::RoutingConfig;
use super::server::ServerConfig;
use crate::route_table::RouteTable;

/// Main configuration structure for the DNS router
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    /// Listener configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Suffix routes and default upstream
    #[serde(default)]
    pub routing: RoutingConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from file or use defaults
    ///
    /// Priority order:
    /// 1. Explicitly provided path
    /// 2. dns-router.toml in current directory
    /// 3. /etc/dns-router/config.toml
    /// 4. Default configuration
    pub fn load(path: Option<&str>, cli_overrides: CliOverrides) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = path {
            Self::from_file(path)?
        } else if std::path::Path::new("dns-router.toml").exists() {
            Self::from_file("dns-router.toml")?
        } else if std::path::Path::new("/etc/dns-router/config.toml").exists() {
            Self::from_file("/etc/dns-router/config.toml")?
        } else {
            Self::default()
        };

        config.apply_cli_overrides(cli_overrides);
        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::FileRead(path.to_string(), e.to_string()))?;
        Self::from_toml(&contents)
    }

    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        toml::from_str(contents).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Apply command-line overrides to configuration
    fn apply_cli_overrides(&mut self, overrides: CliOverrides) {
        if let Some(listen) = overrides.listen {
            self.server.listen = listen;
        }
        if let Some(upstreams) = overrides.upstreams {
            self.routing.upstreams = upstreams;
        }
        if let Some(default_upstream) = overrides.default_upstream {
            self.routing.default_upstream = default_upstream;
        }
        if let Some(level) = overrides.log_level {
            self.logging.level = level;
        }
        if overrides.debug {
            self.logging.diagnostics = true;
        }
    }

    /// Validate configuration
    ///
    /// Malformed route entries are reported here too, before any
    /// bootstrap lookup runs.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.server.listen_addr()?;

        if self.routing.default_upstream.trim().is_empty() {
            return Err(ConfigError::Validation(
                "Default upstream cannot be empty".to_string(),
            ));
        }

        RouteTable::parse_entries(&self.routing.upstreams)
            .map_err(|e| ConfigError::Validation(e.to_string()))?;

        Ok(())
    }
}

/// Values given on the command line; `None` keeps the file/default value.
#[derive(Debug, Default)]
pub struct CliOverrides {
    pub listen: Option<String>,
    pub upstreams: Option<String>,
    pub default_upstream: Option<String>,
    pub log_level: Option<String>,
    pub debug: bool,
}
