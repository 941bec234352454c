use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Error in upstream spec: {0}")]
    ConfigParse(String),

    #[error("Failed to resolve DoH domain {host}: {reason}")]
    BootstrapLookup { host: String, reason: String },

    #[error("Transport error talking to {upstream}: {reason}")]
    Transport { upstream: String, reason: String },

    #[error("Transport timeout talking to {upstream}")]
    TransportTimeout { upstream: String },

    #[error("No DoH client for resolver: {0}")]
    ChannelNotFound(String),

    #[error("Invalid DNS message: {0}")]
    InvalidDnsMessage(String),
}

impl DomainError {
    /// Errors that only affect the query being handled.
    pub fn is_per_query(&self) -> bool {
        matches!(
            self,
            DomainError::Transport { .. }
                | DomainError::TransportTimeout { .. }
                | DomainError::ChannelNotFound(_)
                | DomainError::InvalidDnsMessage(_)
        )
    }
}
