use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RoutingConfig {
    /// Comma-separated `suffix=upstream` list, e.g. `example.com=https://dns.google/dns-query`.
    #[serde(default)]
    pub upstreams: String,

    /// Upstream used when no suffix matches (plain DNS or DNS over HTTPS).
    #[serde(default = "default_upstream")]
    pub default_upstream: String,
}

impl Default for RoutingConfig {
    fn default() -> Self {
        Self {
            upstreams: String::new(),
            default_upstream: default_upstream(),
        }
    }
}

fn default_upstream() -> String {
    "1.1.1.1".to_string()
}
