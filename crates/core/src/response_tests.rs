// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[yare::parameterized(
    ok           = { StatusKind::Ok, 200 },
    not_found    = { StatusKind::NotFound, 404 },
    unauthorized = { StatusKind::Unauthorized, 401 },
    internal     = { StatusKind::InternalError, 500 },
)]
fn maps_to_http_status(kind: StatusKind, status: u16) {
    assert_eq!(kind.http_status(), status);
}

#[yare::parameterized(
    ok            = { LogResponse::ok(), StatusKind::Ok, "OK" },
    unconfigured  = { LogResponse::not_configured(), StatusKind::NotFound, "Logger not configured" },
    bad_token     = { LogResponse::invalid_token(), StatusKind::Unauthorized, "Invalid token" },
    create_failed = { LogResponse::create_failed(), StatusKind::InternalError, "Could not create logfile" },
    write_failed  = { LogResponse::write_failed(), StatusKind::InternalError, "Could not write logfile" },
    unavailable   = { LogResponse::unavailable(), StatusKind::InternalError, "Logger unavailable" },
)]
fn canned_responses(response: LogResponse, code: StatusKind, message: &str) {
    assert_eq!(response.code, code);
    assert_eq!(response.message, message);
    assert_eq!(response.is_ok(), code == StatusKind::Ok);
}
