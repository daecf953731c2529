use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One `host:port` entry from the `es.nodes` option.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeAddress {
    pub host: String,
    pub port: u16,
}

impl NodeAddress {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
        }
    }

    /// Parses a comma-separated node list. Blank entries are rejected rather
    /// than skipped so a typo like `a:1,,b:2` surfaces to the user.
    pub fn parse_list(raw: &str) -> Result<Vec<NodeAddress>, String> {
        if raw.trim().is_empty() {
            return Err("node list is empty".to_string());
        }
        raw.split(',').map(|entry| entry.trim().parse()).collect()
    }
}

impl FromStr for NodeAddress {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (host, port) = s
            .rsplit_once(':')
            .ok_or_else(|| format!("'{s}' is not a host:port pair"))?;
        let host = host.trim();
        if !is_valid_host(host) {
            return Err(format!("'{s}' has an invalid host"));
        }
        let port = port
            .trim()
            .parse::<u16>()
            .ok()
            .filter(|p| *p != 0)
            .ok_or_else(|| format!("'{s}' has an invalid port"))?;
        Ok(NodeAddress::new(host, port))
    }
}

/// Hostnames, IPv4 literals and bracketed IPv6 literals; anything that would
/// change the meaning of the request URI is refused.
fn is_valid_host(host: &str) -> bool {
    if let Some(inner) = host.strip_prefix('[').and_then(|h| h.strip_suffix(']')) {
        return !inner.is_empty()
            && inner
                .chars()
                .all(|c| c.is_ascii_hexdigit() || c == ':' || c == '.');
    }
    !host.is_empty()
        && host
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '.' || c == '-' || c == '_')
}

impl fmt::Display for NodeAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.host, self.port)
    }
}
