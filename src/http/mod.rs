//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (hyper http1, keep-alive, header read timeout)
//!     → Axum router: identify path or catch-all
//!     → handlers.rs (log, drain body, respond)
//!         → caller.rs (peer address + X-Forwarded-For, identify only)
//!     → Send to client
//! ```

pub mod caller;
pub mod handlers;
pub mod server;

pub use caller::CallerInfo;
pub use server::HttpServer;
