//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from config files.
//! Every field has a default, so an empty file is a valid configuration.

use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::observability::logging::LogLevel;

/// Root configuration for the server.
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq)]
#[serde(default)]
pub struct ServerConfig {
    /// Minimum severity that gets logged.
    pub log_level: LogLevel,

    /// Listener configuration (bind address, keep-alive).
    pub listener: ListenerConfig,

    /// Connection timeouts.
    pub timeouts: TimeoutConfig,

    /// Identify route settings.
    pub identify: IdentifyConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct ListenerConfig {
    /// Interface to bind (e.g., "0.0.0.0" or "::").
    pub bind_host: String,

    /// Port to bind. 0 picks an ephemeral port.
    pub port: u16,

    /// Reuse connections across requests.
    pub keep_alive: bool,
}

impl ListenerConfig {
    /// Resolve `bind_host` and `port` into a socket address.
    pub fn bind_address(&self) -> Result<SocketAddr, std::net::AddrParseError> {
        let ip: IpAddr = self.bind_host.parse()?;
        Ok(SocketAddr::new(ip, self.port))
    }
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_host: "0.0.0.0".to_string(),
            port: 8080,
            keep_alive: true,
        }
    }
}

/// Timeout configuration for connection I/O.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Deadline for receiving request headers, and separately the request body, in seconds.
    ///
    /// The two deadlines run one after the other, so a single request may take
    /// up to twice this long to arrive.
    pub read_secs: u64,

    /// Longest a response write may stall, in seconds.
    pub write_secs: u64,

    /// Longest a connection may sit without incoming bytes, in seconds.
    ///
    /// This covers every socket read, including stalls in the middle of a
    /// request, so it must not be shorter than `read_secs`.
    pub idle_secs: u64,
}

impl TimeoutConfig {
    pub fn read(&self) -> Duration {
        Duration::from_secs(self.read_secs)
    }

    pub fn write(&self) -> Duration {
        Duration::from_secs(self.write_secs)
    }

    pub fn idle(&self) -> Duration {
        Duration::from_secs(self.idle_secs)
    }
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            read_secs: 10,
            write_secs: 10,
            idle_secs: 10,
        }
    }
}

/// Identify route configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct IdentifyConfig {
    /// Expose the identify route at all.
    pub enabled: bool,

    /// Literal path the identify route is bound to.
    pub path: String,
}

impl Default for IdentifyConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            path: "/ident".to_string(),
        }
    }
}
