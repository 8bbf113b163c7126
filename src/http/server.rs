//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with both handlers
//! - Configure HTTP/1.1 keep-alive and the read/write/idle timeouts
//! - Wire up middleware (tracing)
//! - Run the accept loop, one task per connection
//!
//! # Design Decisions
//! - Connections are served by hyper directly rather than `axum::serve`,
//!   which exposes no timeout settings
//! - No drain on shutdown: when the stop signal fires, the accept loop
//!   returns and in-flight connections are left to finish on their own

use std::error::Error as _;
use std::future::Future;
use std::io;
use std::net::SocketAddr;

use axum::{extract::ConnectInfo, routing::any, Router};
use hyper::body::Incoming;
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper_util::rt::{TokioIo, TokioTimer};
use tokio::net::TcpStream;
use tower::ServiceExt;
use tower_http::trace::TraceLayer;
use tracing::instrument::WithSubscriber;
use tracing::Instrument;

use crate::config::ServerConfig;
use crate::http::handlers::{discard, identify, AppState};
use crate::net::{ConnectionId, Listener, ListenerError, TimeoutStream};
use crate::observability::logging::Logger;

/// HTTP server for the discard sink.
pub struct HttpServer {
    router: Router,
    config: ServerConfig,
    logger: Logger,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: ServerConfig, logger: Logger) -> Self {
        let router = Self::build_router(&config);
        Self {
            router,
            config,
            logger,
        }
    }

    /// Build the Axum router with all middleware layers.
    ///
    /// Everything not claimed by the identify route falls through to the
    /// discard handler, `/` included.
    pub fn build_router(config: &ServerConfig) -> Router {
        let state = AppState {
            read_timeout: config.timeouts.read(),
        };

        let mut router = Router::new();
        if config.identify.enabled {
            router = router.route(&config.identify.path, any(identify));
        }
        router
            .fallback(discard)
            .with_state(state)
            .layer(TraceLayer::new_for_http())
    }

    /// Bind the configured address and serve until the process is killed.
    pub async fn serve(self) -> Result<(), ListenerError> {
        let listener = Listener::bind(&self.config.listener)
            .with_subscriber(self.logger.dispatch().clone())
            .await?;
        self.run(listener).await;
        Ok(())
    }

    /// Serve connections from an already bound listener. Never returns.
    pub async fn run(self, listener: Listener) {
        self.run_until(listener, std::future::pending()).await
    }

    /// Serve connections until `signal` completes.
    pub async fn run_until<F>(self, listener: Listener, signal: F)
    where
        F: Future<Output = ()>,
    {
        let dispatch = self.logger.dispatch().clone();
        self.accept_loop(listener, signal)
            .with_subscriber(dispatch)
            .await
    }

    async fn accept_loop<F>(self, listener: Listener, signal: F)
    where
        F: Future<Output = ()>,
    {
        if let Ok(addr) = listener.local_addr() {
            tracing::debug!(addr = %addr, "starting listening server");
        }

        tokio::pin!(signal);
        loop {
            let (stream, peer) = tokio::select! {
                accepted = listener.accept() => accepted,
                () = &mut signal => {
                    tracing::info!("server closed");
                    return;
                }
            };

            let id = ConnectionId::new();
            let span = tracing::debug_span!("connection", connection_id = %id, peer_addr = %peer);
            let connection = serve_connection(stream, peer, self.router.clone(), self.config.clone());
            tokio::spawn(
                connection
                    .instrument(span)
                    .with_subscriber(self.logger.dispatch().clone()),
            );
        }
    }
}

/// Serve every request on one connection until it closes, fails or times out.
async fn serve_connection(stream: TcpStream, peer: SocketAddr, router: Router, config: ServerConfig) {
    let timeouts = &config.timeouts;
    let io = TokioIo::new(TimeoutStream::new(stream, timeouts.idle(), timeouts.write()));

    let service = service_fn(move |mut request: hyper::Request<Incoming>| {
        request.extensions_mut().insert(ConnectInfo(peer));
        router.clone().oneshot(request)
    });

    let mut builder = http1::Builder::new();
    builder
        .timer(TokioTimer::new())
        .keep_alive(config.listener.keep_alive)
        .header_read_timeout(timeouts.read());

    match builder.serve_connection(io, service).await {
        Ok(()) => tracing::debug!("connection closed"),
        Err(err) if is_timeout(&err) => tracing::warn!(error = %err, "connection timed out"),
        Err(err) => tracing::error!(error = %err, "connection error"),
    }
}

/// Whether hyper gave up because of one of our deadlines.
fn is_timeout(err: &hyper::Error) -> bool {
    err.is_timeout()
        || err
            .source()
            .and_then(|source| source.downcast_ref::<io::Error>())
            .is_some_and(|io_err| io_err.kind() == io::ErrorKind::TimedOut)
}
