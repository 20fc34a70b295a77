// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `POST /loglevel/<appname>` handler.

use axum::body::Body;
use axum::extract::rejection::PathRejection;
use axum::extract::{Path, State};
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{HeaderMap, Method, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use http_body_util::LengthLimitError;
use lc_core::AppName;
use lc_engine::DispatcherHandle;
use tracing::{debug, warn};

use super::decode::decode_batch;
use super::reject;

/// Largest accepted request body (10 MiB)
pub const MAX_BODY_BYTES: usize = 10 * 1024 * 1024;

/// Validate the request at the boundary, then hand the batch to the
/// dispatcher and relay the worker's verdict.
///
/// Checks run in a fixed order: method, content type, authorization, app
/// name, body size, body decoding.
pub(crate) async fn handle(
    State(dispatcher): State<DispatcherHandle>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    path: Result<Path<String>, PathRejection>,
    body: Body,
) -> Response {
    if method != Method::POST {
        return reject(&method, &uri, StatusCode::METHOD_NOT_ALLOWED, "log accepts POST only");
    }
    if !is_json(&headers) {
        return reject(&method, &uri, StatusCode::UNSUPPORTED_MEDIA_TYPE, "Send me JSON!");
    }
    let Some(token) = bearer_token(&headers) else {
        return reject(
            &method,
            &uri,
            StatusCode::UNAUTHORIZED,
            "Missing/non-bearer authorization",
        );
    };
    let raw_app = path.map(|Path(raw)| raw).unwrap_or_default();
    let Ok(app) = AppName::parse(raw_app) else {
        return reject(&method, &uri, StatusCode::NOT_FOUND, "Invalid/missing app name");
    };

    let bytes = match axum::body::to_bytes(body, MAX_BODY_BYTES).await {
        Ok(bytes) => bytes,
        Err(e) if is_length_limit(&e) => {
            return reject(&method, &uri, StatusCode::PAYLOAD_TOO_LARGE, "Request too large");
        }
        Err(e) => {
            warn!(%app, error = %e, "failed to read request body");
            return reject(
                &method,
                &uri,
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal Server Error",
            );
        }
    };
    let batch = match decode_batch(&bytes) {
        Ok(batch) => batch,
        Err(e) => return reject(&method, &uri, StatusCode::BAD_REQUEST, &e.to_string()),
    };

    debug!(%app, items = batch.logs.len(), "log batch received");
    let result = dispatcher.submit(app, token, batch.logs).await;
    if result.is_ok() {
        return (StatusCode::OK, result.message).into_response();
    }
    let status = StatusCode::from_u16(result.code.http_status())
        .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    reject(&method, &uri, status, &result.message)
}

/// Media type is `application/json`, ignoring parameters such as charset.
fn is_json(headers: &HeaderMap) -> bool {
    headers
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(';').next())
        .is_some_and(|media| media.trim().eq_ignore_ascii_case("application/json"))
}

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
}

fn is_length_limit(err: &axum::Error) -> bool {
    let mut source: Option<&(dyn std::error::Error + 'static)> = Some(err);
    while let Some(e) = source {
        if e.is::<LengthLimitError>() {
            return true;
        }
        source = e.source();
    }
    false
}
