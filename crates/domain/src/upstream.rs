use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;

/// Scheme prefix marking a DNS-over-HTTPS upstream.
pub const TUNNEL_PREFIX: &str = "https://";

/// Port appended to traditional upstreams that do not carry one.
pub const DNS_PORT: u16 = 53;

/// An upstream resolver as written in configuration.
///
/// Anything that does not start with [`TUNNEL_PREFIX`] is a traditional
/// resolver; an unusable value only fails once a query is sent to it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum UpstreamSpec {
    Traditional { host: Arc<str> },
    Tunnel { url: Arc<str> },
}

impl UpstreamSpec {
    pub fn parse(s: &str) -> Self {
        let s = s.trim();
        if s.starts_with(TUNNEL_PREFIX) {
            UpstreamSpec::Tunnel { url: s.into() }
        } else {
            UpstreamSpec::Traditional { host: s.into() }
        }
    }

    pub fn is_tunnel(&self) -> bool {
        matches!(self, UpstreamSpec::Tunnel { .. })
    }

    pub fn url(&self) -> Option<&str> {
        match self {
            UpstreamSpec::Tunnel { url } => Some(url),
            UpstreamSpec::Traditional { .. } => None,
        }
    }

    /// `host:port` to dial for a traditional upstream, port 53 unless one is given.
    pub fn datagram_target(&self) -> Option<String> {
        let UpstreamSpec::Traditional { host } = self else {
            return None;
        };

        if host.parse::<SocketAddr>().is_ok() {
            return Some(host.to_string());
        }
        if let Ok(ip) = host.parse::<IpAddr>() {
            return Some(SocketAddr::new(ip, DNS_PORT).to_string());
        }
        if let Some((name, port)) = host.rsplit_once(':') {
            if !name.contains(':') && port.parse::<u16>().is_ok() {
                return Some(host.to_string());
            }
        }
        Some(format!("{}:{}", host, DNS_PORT))
    }

    /// Authority of a tunnel URL: everything between the scheme and the first `/`.
    pub fn tunnel_authority(&self) -> Option<&str> {
        let url = self.url()?;
        let rest = url.strip_prefix(TUNNEL_PREFIX)?;
        rest.split('/').next()
    }

    /// Host part of the tunnel authority, with any port and IPv6 brackets removed.
    pub fn tunnel_host(&self) -> Option<&str> {
        let authority = self.tunnel_authority()?;
        let host = split_authority(authority).0;
        if host.is_empty() {
            None
        } else {
            Some(host)
        }
    }

    /// Returns the tunnel spec with its host replaced by the literal `ip`.
    ///
    /// Traditional specs are returned unchanged.
    pub fn with_pinned_host(&self, ip: IpAddr) -> Self {
        let (Some(url), Some(authority)) = (self.url(), self.tunnel_authority()) else {
            return self.clone();
        };

        let port = split_authority(authority).1;
        let literal = match ip {
            IpAddr::V4(v4) => v4.to_string(),
            IpAddr::V6(v6) => format!("[{}]", v6),
        };
        let pinned_authority = match port {
            Some(port) => format!("{}:{}", literal, port),
            None => literal,
        };

        let path = &url[TUNNEL_PREFIX.len() + authority.len()..];
        UpstreamSpec::Tunnel {
            url: format!("{}{}{}", TUNNEL_PREFIX, pinned_authority, path).into(),
        }
    }
}

/// Splits `host[:port]` or `[v6][:port]` into host and optional port.
fn split_authority(authority: &str) -> (&str, Option<&str>) {
    if let Some(rest) = authority.strip_prefix('[') {
        return match rest.split_once(']') {
            Some((host, tail)) => (host, tail.strip_prefix(':')),
            None => (rest, None),
        };
    }
    match authority.rsplit_once(':') {
        Some((host, port)) if port.parse::<u16>().is_ok() => (host, Some(port)),
        _ => (authority, None),
    }
}

impl fmt::Display for UpstreamSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UpstreamSpec::Traditional { host } => write!(f, "{}", host),
            UpstreamSpec::Tunnel { url } => write!(f, "{}", url),
        }
    }
}
