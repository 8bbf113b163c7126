//! Caller metadata extraction.
//!
//! # Responsibilities
//! - Split the transport peer address into host and port
//! - Pick up the proxy forwarding header as-is
//!
//! # Design Decisions
//! - Never fails: a malformed address leaves `ip`/`port` empty
//! - `X-Forwarded-For` is reported, never trusted or validated

use axum::http::HeaderMap;
use serde::{Deserialize, Serialize};

/// Header carrying the original client address when behind a proxy.
pub const X_FORWARDED_FOR: &str = "x-forwarded-for";

/// What the server can tell about the caller of a single request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallerInfo {
    /// Raw peer address as seen on the socket.
    #[serde(rename = "RemoteAddr")]
    pub remote_addr: String,

    /// Host part of `remote_addr`, empty if it could not be split.
    #[serde(rename = "IP")]
    pub ip: String,

    /// Port part of `remote_addr`, empty if it could not be split.
    #[serde(rename = "Port")]
    pub port: String,

    /// First `X-Forwarded-For` value, empty if absent. Caller-controlled.
    #[serde(rename = "X-Forwarded-For")]
    pub forwarded_for: String,
}

impl CallerInfo {
    pub fn extract(remote_addr: &str, forwarded_for: Option<&str>) -> Self {
        let (ip, port) = split_host_port(remote_addr).unwrap_or_default();
        Self {
            remote_addr: remote_addr.to_string(),
            ip: ip.to_string(),
            port: port.to_string(),
            forwarded_for: forwarded_for.unwrap_or_default().to_string(),
        }
    }

    /// Extract from a peer address and the request headers.
    pub fn from_headers(remote_addr: &str, headers: &HeaderMap) -> Self {
        let forwarded_for = headers
            .get(X_FORWARDED_FOR)
            .map(|v| String::from_utf8_lossy(v.as_bytes()).into_owned());
        Self::extract(remote_addr, forwarded_for.as_deref())
    }
}

/// Split `host:port` or `[host]:port` into its parts.
///
/// Returns `None` when there is no port separator, when an unbracketed host
/// contains a colon, or when brackets appear anywhere but around the host.
/// The port itself may be empty.
pub fn split_host_port(addr: &str) -> Option<(&str, &str)> {
    let colon = addr.rfind(':')?;
    let (host, port) = (&addr[..colon], &addr[colon + 1..]);

    let host = match host.strip_prefix('[') {
        Some(bracketed) => {
            let inner = bracketed.strip_suffix(']')?;
            if inner.contains(['[', ']']) {
                return None;
            }
            inner
        }
        None => {
            if host.contains([':', '[', ']']) {
                return None;
            }
            host
        }
    };

    if port.contains(['[', ']']) {
        return None;
    }
    Some((host, port))
}
