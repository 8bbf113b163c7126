//! Minimal HTTP sink library.
//!
//! Accepts any request, drains the body and answers 200. An optional identify
//! route reflects the caller's address back as JSON.

pub mod config;
pub mod http;
pub mod net;
pub mod observability;

pub use config::schema::ServerConfig;
pub use http::HttpServer;
pub use observability::Logger;
