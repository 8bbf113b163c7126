//! Discard server
//!
//! A minimal HTTP sink for load-balancer health checks, webhook sinks and
//! network path verification.
//!
//! # Architecture Overview
//!
//! ```text
//!     Client Request   ┌──────────┐    ┌──────────┐    ┌─────────────────────┐
//!     ────────────────▶│   net    │───▶│  http    │───▶│ router              │
//!                      │ listener │    │  server  │    │  /ident → identify  │
//!                      └──────────┘    └──────────┘    │  *      → discard   │
//!                                                      └──────────┬──────────┘
//!     Client Response                                             │
//!     ◀───────────────────────────────── 200 (empty | caller JSON)┘
//! ```
//!
//! Exit status: 1 on bad flags, bad config, or a failed bind; 2 if the logger
//! cannot be installed.

use std::process::ExitCode;

use clap::Parser;
use discard_server::config::Cli;
use discard_server::{HttpServer, Logger};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        // --help and --version also land here, on stdout.
        Err(err) if !err.use_stderr() => {
            let _ = err.print();
            return ExitCode::SUCCESS;
        }
        Err(err) => {
            let _ = err.print();
            eprintln!("\n{}", Cli::usage());
            return ExitCode::FAILURE;
        }
    };

    let config = match cli.into_config() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("invalid configuration: {err}");
            return ExitCode::FAILURE;
        }
    };

    let logger = Logger::new(config.log_level);
    if let Err(err) = logger.install_global() {
        eprintln!("{err}");
        return ExitCode::from(2);
    }

    tracing::debug!(
        bind_host = %config.listener.bind_host,
        port = config.listener.port,
        keep_alive = config.listener.keep_alive,
        read_timeout_secs = config.timeouts.read_secs,
        write_timeout_secs = config.timeouts.write_secs,
        idle_timeout_secs = config.timeouts.idle_secs,
        identify = config.identify.enabled,
        "configuration loaded"
    );

    // Only returns on a bind failure; otherwise runs until the process is killed.
    if let Err(err) = HttpServer::new(config, logger).serve().await {
        tracing::error!(fatal = true, error = %err, "http server failed");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
