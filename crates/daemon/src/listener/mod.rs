// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! HTTP listener.
//!
//! Validates loglevel requests at the boundary and forwards each batch to
//! the dispatcher. Every rejection is logged with its status and reason.

mod decode;
mod loglevel;

use std::future::Future;

use axum::http::{Method, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::routing::any;
use axum::Router;
use lc_engine::DispatcherHandle;
use tokio::net::TcpListener;
use tracing::info;

pub use decode::{decode_batch, BodyError};
pub use loglevel::MAX_BODY_BYTES;

/// Build the HTTP router over a running dispatcher.
pub fn router(dispatcher: DispatcherHandle) -> Router {
    Router::new()
        .route("/loglevel/", any(loglevel::handle))
        .route("/loglevel/{*app}", any(loglevel::handle))
        .fallback(not_found)
        .with_state(dispatcher)
}

/// Serve until `shutdown` resolves, then finish in-flight requests.
pub async fn serve<F>(
    listener: TcpListener,
    dispatcher: DispatcherHandle,
    shutdown: F,
) -> std::io::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    axum::serve(listener, router(dispatcher))
        .with_graceful_shutdown(shutdown)
        .await
}

async fn not_found(method: Method, uri: Uri) -> Response {
    reject(&method, &uri, StatusCode::NOT_FOUND, "Not Found")
}

/// Plain-text error response, logged once.
pub(crate) fn reject(method: &Method, uri: &Uri, status: StatusCode, message: &str) -> Response {
    info!(
        "return error {} ({}) for {} {}",
        status.as_u16(),
        message,
        method,
        uri.path()
    );
    (status, message.to_string()).into_response()
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
