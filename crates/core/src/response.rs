// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Result of processing one log batch.

use std::fmt;

/// Outcome category of a log batch, mapped 1:1 to an HTTP status at the
/// boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatusKind {
    Ok,
    NotFound,
    Unauthorized,
    InternalError,
}

impl StatusKind {
    /// HTTP status code for this outcome.
    pub fn http_status(self) -> u16 {
        match self {
            StatusKind::Ok => 200,
            StatusKind::NotFound => 404,
            StatusKind::Unauthorized => 401,
            StatusKind::InternalError => 500,
        }
    }
}

impl fmt::Display for StatusKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            StatusKind::Ok => "ok",
            StatusKind::NotFound => "not_found",
            StatusKind::Unauthorized => "unauthorized",
            StatusKind::InternalError => "internal_error",
        };
        f.write_str(s)
    }
}

/// Message and status returned to the caller that submitted a batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogResponse {
    pub message: String,
    pub code: StatusKind,
}

impl LogResponse {
    pub fn ok() -> Self {
        Self::new(StatusKind::Ok, "OK")
    }

    pub fn not_configured() -> Self {
        Self::new(StatusKind::NotFound, "Logger not configured")
    }

    pub fn invalid_token() -> Self {
        Self::new(StatusKind::Unauthorized, "Invalid token")
    }

    pub fn create_failed() -> Self {
        Self::new(StatusKind::InternalError, "Could not create logfile")
    }

    pub fn write_failed() -> Self {
        Self::new(StatusKind::InternalError, "Could not write logfile")
    }

    /// The worker or dispatcher went away before replying.
    pub fn unavailable() -> Self {
        Self::new(StatusKind::InternalError, "Logger unavailable")
    }

    pub fn new(code: StatusKind, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            code,
        }
    }

    pub fn is_ok(&self) -> bool {
        self.code == StatusKind::Ok
    }
}

#[cfg(test)]
#[path = "response_tests.rs"]
mod tests;
