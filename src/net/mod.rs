//! Network layer subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming TCP connection
//!     → listener.rs (accept loop, accept-error back-off)
//!     → connection.rs (connection id, read/write stall deadlines)
//!     → Hand off to HTTP layer
//! ```

pub mod connection;
pub mod listener;

pub use connection::{ConnectionId, TimeoutStream};
pub use listener::{Listener, ListenerError};
