//! Request handlers.
//!
//! Both handlers log the request target, drain the body, and answer 200.
//! Neither holds state across requests.

use std::net::SocketAddr;
use std::time::Duration;

use axum::{
    body::Body,
    extract::{ConnectInfo, Request, State},
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use futures_util::StreamExt;

use crate::http::caller::CallerInfo;

/// State shared by the handlers.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Deadline for receiving the whole request body, counted from the moment
    /// the handler runs. Header reading has its own deadline of the same length
    /// in hyper, so a request may take up to twice this in total.
    pub read_timeout: Duration,
}

/// Why a request body could not be drained.
#[derive(Debug, thiserror::Error)]
enum DrainError {
    #[error("request body not received within {0:?}")]
    TimedOut(Duration),
    #[error(transparent)]
    Body(#[from] axum::Error),
}

/// Read and drop every chunk of the body. Returns the number of bytes discarded.
async fn drain(body: Body, deadline: Duration) -> Result<u64, DrainError> {
    let read_all = async {
        let mut stream = body.into_data_stream();
        let mut discarded = 0u64;
        while let Some(chunk) = stream.next().await {
            discarded += chunk?.len() as u64;
        }
        Ok::<_, DrainError>(discarded)
    };
    tokio::time::timeout(deadline, read_all)
        .await
        .map_err(|_| DrainError::TimedOut(deadline))?
}

/// Log the request and drain its body.
///
/// On failure returns the response to send instead of the normal one: still a
/// 200, but a body that could not be read to the end leaves the connection
/// unusable, so it asks for the connection to be closed.
async fn receive(state: &AppState, request: Request) -> Result<(), Response> {
    let url = request.uri().to_string();
    tracing::info!(url = %url, "received request");

    match drain(request.into_body(), state.read_timeout).await {
        Ok(discarded) => {
            tracing::debug!(url = %url, bytes = discarded, "request body discarded");
            Ok(())
        }
        Err(err @ DrainError::TimedOut(_)) => {
            tracing::warn!(url = %url, error = %err, "failed to read body");
            Err(close(StatusCode::OK.into_response()))
        }
        Err(err) => {
            tracing::error!(url = %url, error = %err, "failed to read body");
            Err(close(StatusCode::OK.into_response()))
        }
    }
}

fn close(mut response: Response) -> Response {
    response
        .headers_mut()
        .insert(header::CONNECTION, HeaderValue::from_static("close"));
    response
}

/// Catch-all route: discard the body and answer 200 with an empty body.
pub async fn discard(State(state): State<AppState>, request: Request) -> Response {
    match receive(&state, request).await {
        Ok(()) => StatusCode::OK.into_response(),
        Err(response) => response,
    }
}

/// Identify route: discard the body and answer with the caller's metadata as JSON.
pub async fn identify(
    State(state): State<AppState>,
    ConnectInfo(peer): ConnectInfo<SocketAddr>,
    request: Request,
) -> Response {
    let caller = CallerInfo::from_headers(&peer.to_string(), request.headers());

    if let Err(response) = receive(&state, request).await {
        return response;
    }

    match serde_json::to_vec(&caller) {
        Ok(body) => (
            [(header::CONTENT_TYPE, HeaderValue::from_static("application/json"))],
            body,
        )
            .into_response(),
        Err(err) => {
            tracing::error!(error = %err, "failed to serialize caller info");
            StatusCode::OK.into_response()
        }
    }
}
