//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! All subsystems produce:
//!     → tracing events and spans
//!     → logging.rs (threshold check, one JSON record per line)
//!     → stderr
//! ```
//!
//! # Design Decisions
//! - Structured logging (JSON) for machine parsing
//! - The logger is passed explicitly; installing it globally is left to `main`

pub mod logging;

pub use logging::{LogLevel, Logger, LoggingError};
