//! TCP listener implementation.
//!
//! # Responsibilities
//! - Bind to the configured address
//! - Accept incoming TCP connections
//! - Graceful handling of accept errors
//!
//! # Design Decisions
//! - No connection limit; every accepted connection gets its own task
//! - Errors caused by the peer are skipped, anything else backs off for a
//!   second so a persistent failure (e.g. fd exhaustion) cannot spin the loop

use std::io;
use std::net::SocketAddr;
use std::time::Duration;

use tokio::net::{TcpListener, TcpStream};

use crate::config::ListenerConfig;

/// Pause after an accept error that was not caused by the peer.
const ACCEPT_ERROR_BACKOFF: Duration = Duration::from_secs(1);

/// Error type for listener operations.
#[derive(Debug, thiserror::Error)]
pub enum ListenerError {
    /// The configured address could not be parsed.
    #[error("Invalid bind address: {0}")]
    Address(#[from] std::net::AddrParseError),
    /// Failed to bind to address.
    #[error("Failed to bind: {0}")]
    Bind(#[source] io::Error),
}

/// A bound TCP listener.
#[derive(Debug)]
pub struct Listener {
    inner: TcpListener,
}

impl Listener {
    /// Bind to the configured address.
    pub async fn bind(config: &ListenerConfig) -> Result<Self, ListenerError> {
        let addr = config.bind_address()?;
        let listener = TcpListener::bind(addr).await.map_err(ListenerError::Bind)?;
        let local_addr = listener.local_addr().map_err(ListenerError::Bind)?;

        tracing::debug!(addr = %local_addr, "listener bound");

        Ok(Self { inner: listener })
    }

    /// Accept the next connection.
    ///
    /// Never fails: accept errors are logged and retried.
    pub async fn accept(&self) -> (TcpStream, SocketAddr) {
        loop {
            match self.inner.accept().await {
                Ok((stream, addr)) => {
                    tracing::debug!(peer_addr = %addr, "connection accepted");
                    return (stream, addr);
                }
                Err(err) if is_connection_error(&err) => {
                    tracing::debug!(error = %err, "connection error during accept");
                }
                Err(err) => {
                    tracing::error!(error = %err, "accept error");
                    tokio::time::sleep(ACCEPT_ERROR_BACKOFF).await;
                }
            }
        }
    }

    /// Get the local address this listener is bound to.
    pub fn local_addr(&self) -> Result<SocketAddr, io::Error> {
        self.inner.local_addr()
    }
}

/// Returns whether the error was caused by the peer rather than the listener.
fn is_connection_error(err: &io::Error) -> bool {
    matches!(
        err.kind(),
        io::ErrorKind::ConnectionRefused
            | io::ErrorKind::ConnectionAborted
            | io::ErrorKind::ConnectionReset
    )
}
